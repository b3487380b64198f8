//! `${NAME}` placeholder substitution for manifest templates
//!
//! Placeholders are replaced verbatim with the value bound to `NAME`. A `$`
//! not followed by `{` is copied through unchanged. Rendering is strict: an
//! unbound name or an unterminated placeholder fails the whole render rather
//! than leaving a half-filled document behind.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Render `template`, substituting every `${NAME}` from `vars`.
pub fn render(template: &str, vars: &HashMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            return Err(Error::Template {
                message: "Unterminated placeholder".to_string(),
                variable: None,
            });
        };
        let name = &after[..end];
        if !is_valid_name(name) {
            return Err(Error::Template {
                message: format!("Malformed placeholder '${{{}}}'", name),
                variable: None,
            });
        }

        let value = vars.get(name).ok_or_else(|| Error::Template {
            message: "Undefined variable".to_string(),
            variable: Some(name.to_string()),
        })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
