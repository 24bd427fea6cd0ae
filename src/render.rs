//! Fluentd text rendering of directive trees.
//!
//! Each directive becomes a block:
//!
//! ```text
//! <label tag>
//!   @type plugin
//!   @id identifier
//!   name value
//!   <child>
//!   </child>
//! </label>
//! ```
//!
//! `tag`, `@type` and `@id` appear only when set. Attributes are written in
//! sorted order, followed by the children in tree order.
//!
//! Values are written bare when Fluentd reads them back verbatim. Any other
//! value is written as a double-quoted string, escaping `\`, `"`, `#` and the
//! line control characters, so a value never spans more than one line.
//! Values holding other control characters, and labels, tags or attribute
//! names that cannot be written as a single token, fail with
//! [`GrepError::RenderError`].

use crate::config::RenderConfig;
use crate::directive::Directive;
use crate::error::{GrepError, Result};
use std::borrow::Cow;

/// Render with the default indentation.
pub fn render(directive: &Directive) -> Result<String> {
    render_with(directive, &RenderConfig::default())
}

pub fn render_with(directive: &Directive, config: &RenderConfig) -> Result<String> {
    let mut out = String::new();
    write_directive(&mut out, directive, 0, config.indent)?;
    Ok(out)
}

fn write_directive(
    out: &mut String,
    directive: &Directive,
    level: usize,
    indent: usize,
) -> Result<()> {
    let outer = " ".repeat(level * indent);
    let inner = " ".repeat((level + 1) * indent);
    let label = word(directive.label(), "directive name")?;

    out.push_str(&outer);
    out.push('<');
    out.push_str(label);
    if let Some(tag) = &directive.meta.tag {
        out.push(' ');
        out.push_str(tag_pattern(tag)?);
    }
    out.push_str(">\n");

    if let Some(plugin_type) = &directive.meta.plugin_type {
        write_attribute(out, &inner, "@type", plugin_type)?;
    }
    if let Some(id) = &directive.meta.id {
        write_attribute(out, &inner, "@id", id)?;
    }
    for (name, value) in &directive.params {
        write_attribute(out, &inner, word(name, "attribute name")?, value)?;
    }
    for child in &directive.children {
        write_directive(out, child, level + 1, indent)?;
    }

    out.push_str(&outer);
    out.push_str("</");
    out.push_str(label);
    out.push_str(">\n");
    Ok(())
}

fn write_attribute(out: &mut String, indent: &str, name: &str, value: &str) -> Result<()> {
    let value = literal(value)?;
    out.push_str(indent);
    out.push_str(name);
    out.push(' ');
    out.push_str(&value);
    out.push('\n');
    Ok(())
}

/// A directive or attribute name: one token with no markup characters.
fn word<'a>(name: &'a str, what: &str) -> Result<&'a str> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '#'));
    if invalid {
        return Err(GrepError::RenderError(format!("invalid {what} {name:?}")));
    }
    Ok(name)
}

fn tag_pattern(tag: &str) -> Result<&str> {
    if tag.trim().is_empty() || tag.chars().any(|c| c.is_control() || c == '>') {
        return Err(GrepError::RenderError(format!("invalid tag {tag:?}")));
    }
    Ok(tag)
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.starts_with(['"', '\''])
        || value.trim() != value
        || value.chars().any(|c| c == '#' || c.is_control())
}

fn literal(value: &str) -> Result<Cow<'_, str>> {
    if !needs_quotes(value) {
        return Ok(Cow::Borrowed(value));
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            // `#{` would start embedded Ruby
            '#' => quoted.push_str("\\#"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{0c}' => quoted.push_str("\\f"),
            '\u{08}' => quoted.push_str("\\b"),
            c if c.is_control() => {
                return Err(GrepError::RenderError(format!(
                    "value {value:?} contains unrepresentable character {c:?}"
                )));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    Ok(Cow::Owned(quoted))
}
