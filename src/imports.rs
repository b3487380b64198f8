//! Import statement extraction
//!
//! Only single-line, semicolon-terminated statements are recognised:
//!
//! ```text
//! import "repoA/api/v1/service.proto";
//! import public "shared/types.proto";
//! ```
//!
//! Imports whose path does not start with a known repository name are
//! skipped; they belong to the generator's toolchain (well-known types and
//! the like), not to another repository under the root.

use std::path::{Component, Path};

use crate::error::{Error, Result};
use crate::repos::RepoSet;

const KEYWORD: &[u8] = b"import";
const MODIFIERS: [&[u8]; 2] = [b"public", b"weak"];

/// Pull the cross-repository imports out of `content`, in source order.
///
/// `file` is only used to name the file in parse errors.
pub fn extract(file: &str, content: &[u8], repos: &RepoSet) -> Result<Vec<String>> {
    let mut imports = Vec::new();

    for line in content.split(|&b| b == b'\n') {
        let line = line.trim_ascii();
        let Some(rest) = after_keyword(line) else {
            continue;
        };

        let rest = rest.trim_ascii();
        if rest.is_empty() {
            return Err(parse_error(file, "has import line with nothing imported"));
        }
        let Some(rest) = rest.strip_suffix(b";") else {
            return Err(parse_error(file, "has import line that doesn't end with ';'"));
        };

        let raw = trim_quotes(strip_modifier(rest.trim_ascii()));
        if raw.is_empty() {
            return Err(parse_error(file, "has import line with nothing imported"));
        }
        let path = std::str::from_utf8(raw)
            .map_err(|_| parse_error(file, "has import path that is not valid UTF-8"))?;

        if !repos.matches(path) {
            continue;
        }
        imports.push(clean_relative(file, path)?);
    }

    Ok(imports)
}

/// Returns what follows the `import` keyword, or `None` if the line is not an
/// import statement.
fn after_keyword(line: &[u8]) -> Option<&[u8]> {
    let rest = line.strip_prefix(KEYWORD)?;
    match rest.first() {
        None => Some(rest),
        Some(b) if b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b';') => Some(rest),
        Some(_) => None,
    }
}

fn strip_modifier(rest: &[u8]) -> &[u8] {
    for modifier in MODIFIERS {
        if let Some(after) = rest.strip_prefix(modifier) {
            if after.first().is_some_and(|b| b.is_ascii_whitespace()) {
                return after.trim_ascii();
            }
        }
    }
    rest
}

fn trim_quotes(mut raw: &[u8]) -> &[u8] {
    while let [b'"' | b'\'', tail @ ..] = raw {
        raw = tail;
    }
    while let [head @ .., b'"' | b'\''] = raw {
        raw = head;
    }
    raw
}

/// Import paths are joined onto the repository root and the staging
/// directory, so they must not climb out of either. `.` and empty segments
/// are dropped so that every spelling of a file yields the same key.
fn clean_relative(file: &str, import: &str) -> Result<String> {
    let mut parts = Vec::new();
    for component in Path::new(import).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => {
                return Err(parse_error(
                    file,
                    &format!("import \"{}\" must be a relative path inside the root", import),
                ))
            }
        }
    }
    Ok(parts.join("/"))
}

fn parse_error(file: &str, message: &str) -> Error {
    Error::ImportParse {
        file: file.to_string(),
        message: message.to_string(),
    }
}
