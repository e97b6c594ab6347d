//! Code template rendering.
//!
//! Generated snippets are written as raw template strings with a small
//! mustache-like syntax:
//! - `{{variable}}` is replaced with the value of `variable`
//! - `{{#if flag}}content{{/if}}` includes content only if `flag` is set
//! - `{{#if flag}}content{{else}}alternative{{/if}}` with else support
//!
//! Conditionals nest. A block tag alone on its line takes the whole line with
//! it, so templates can be laid out like the code they produce. Any other
//! `{{` sequence (JSX style objects, Vue interpolation) is left untouched.

use super::ToolError;

const IF_OPEN: &str = "{{#if ";
const ELSE_TAG: &str = "{{else}}";
const ENDIF_TAG: &str = "{{/if}}";

/// A template bound to its variables and flags.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a str,
    vars: Vec<(&'a str, String)>,
    flags: Vec<(&'a str, bool)>,
}

impl<'a> Template<'a> {
    /// Create a template over `source` with nothing bound.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            vars: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Bind a substitution variable.
    pub fn var(mut self, name: &'a str, value: impl Into<String>) -> Self {
        self.vars.push((name, value.into()));
        self
    }

    /// Bind a conditional flag.
    pub fn flag(mut self, name: &'a str, on: bool) -> Self {
        self.flags.push((name, on));
        self
    }

    /// Render the template.
    ///
    /// Fails on unbalanced block tags and on `{{name}}` placeholders that
    /// have no bound variable.
    pub fn render(&self) -> Result<String, ToolError> {
        let source = strip_standalone_tags(self.source);
        let resolved = self.process_conditionals(source)?;
        self.substitute(&resolved)
    }

    fn is_set(&self, name: &str) -> bool {
        if let Some((_, on)) = self.flags.iter().find(|(n, _)| *n == name) {
            return *on;
        }
        self.vars
            .iter()
            .any(|(n, value)| *n == name && !value.is_empty())
    }

    /// Resolve `{{#if}}` blocks innermost first.
    fn process_conditionals(&self, template: String) -> Result<String, ToolError> {
        let mut result = template;

        while let Some(if_start) = result.rfind(IF_OPEN) {
            let var_end = result[if_start..]
                .find("}}")
                .map(|pos| if_start + pos)
                .ok_or_else(|| ToolError::template("Unclosed {{#if}} tag"))?;
            let flag = result[if_start + IF_OPEN.len()..var_end].trim();

            let endif_pos = result[var_end..]
                .find(ENDIF_TAG)
                .map(|pos| var_end + pos)
                .ok_or_else(|| ToolError::template(format!("Missing {{{{/if}}}} for '{}'", flag)))?;

            let block = &result[var_end + 2..endif_pos];
            let (when_set, otherwise) = match block.find(ELSE_TAG) {
                Some(pos) => (&block[..pos], &block[pos + ELSE_TAG.len()..]),
                None => (block, ""),
            };
            let replacement = if self.is_set(flag) { when_set } else { otherwise };

            result = format!(
                "{}{}{}",
                &result[..if_start],
                replacement,
                &result[endif_pos + ENDIF_TAG.len()..]
            );
        }

        if result.contains(ENDIF_TAG) || result.contains(ELSE_TAG) {
            return Err(ToolError::template("Unmatched {{/if}} or {{else}} tag"));
        }

        Ok(result)
    }

    /// Replace `{{name}}` placeholders in a single pass.
    ///
    /// Substituted values are not rescanned.
    fn substitute(&self, template: &str) -> Result<String, ToolError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];

            let placeholder = after
                .find("}}")
                .map(|close| &after[..close])
                .filter(|name| is_identifier(name));

            match placeholder {
                Some(name) => {
                    let value = self
                        .vars
                        .iter()
                        .find(|(n, _)| *n == name)
                        .map(|(_, v)| v.as_str())
                        .ok_or_else(|| {
                            ToolError::template(format!("Unbound template variable: {}", name))
                        })?;
                    out.push_str(value);
                    rest = &after[name.len() + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_block_tag(line: &str) -> bool {
    if line == ELSE_TAG || line == ENDIF_TAG {
        return true;
    }
    line.starts_with(IF_OPEN) && line.ends_with("}}") && line.matches("{{").count() == 1
}

/// Collapse lines that hold nothing but a block tag.
fn strip_standalone_tags(source: &str) -> String {
    source
        .split_inclusive('\n')
        .map(|line| {
            let tag = line.trim();
            if is_block_tag(tag) { tag } else { line }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let result = Template::new("Hello, {{name}}!")
            .var("name", "World")
            .render()
            .unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_conditional_with_flag() {
        let template = "a{{#if on}}b{{/if}}c";
        assert_eq!(Template::new(template).flag("on", true).render().unwrap(), "abc");
        assert_eq!(Template::new(template).flag("on", false).render().unwrap(), "ac");
    }

    #[test]
    fn test_conditional_on_variable() {
        let template = "Hello{{#if name}}, {{name}}{{/if}}!";
        assert_eq!(
            Template::new(template).var("name", "World").render().unwrap(),
            "Hello, World!"
        );
        assert_eq!(Template::new(template).var("name", "").render().unwrap(), "Hello!");
    }

    #[test]
    fn test_conditional_with_else() {
        let result = Template::new("{{#if on}}yes{{else}}no{{/if}}")
            .flag("on", false)
            .render()
            .unwrap();
        assert_eq!(result, "no");
    }

    #[test]
    fn test_nested_conditionals() {
        let template = "{{#if a}}A{{#if b}}B{{else}}b{{/if}}{{else}}none{{/if}}";
        let render = |a, b| {
            Template::new(template)
                .flag("a", a)
                .flag("b", b)
                .render()
                .unwrap()
        };
        assert_eq!(render(true, true), "AB");
        assert_eq!(render(true, false), "Ab");
        assert_eq!(render(false, true), "none");
    }

    #[test]
    fn test_standalone_tags_take_their_line() {
        let template = "start\n  {{#if on}}\nmiddle\n  {{/if}}\nend\n";
        assert_eq!(
            Template::new(template).flag("on", true).render().unwrap(),
            "start\nmiddle\nend\n"
        );
        assert_eq!(
            Template::new(template).flag("on", false).render().unwrap(),
            "start\nend\n"
        );
    }

    #[test]
    fn test_foreign_braces_are_preserved() {
        let template = "<div style={{ padding: 8 }}>{{ user.name }}</div>";
        assert_eq!(Template::new(template).render().unwrap(), template);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let result = Template::new("{{a}}").var("a", "{{b}}").render().unwrap();
        assert_eq!(result, "{{b}}");
    }

    #[test]
    fn test_unbound_variable_fails() {
        let err = Template::new("{{missing}}").render().unwrap_err();
        assert!(matches!(err, ToolError::Template(_)));
    }

    #[test]
    fn test_unclosed_if_fails() {
        assert!(Template::new("{{#if a}}never closed").render().is_err());
        assert!(Template::new("stray {{/if}}").render().is_err());
    }
}
