//! Cleaning raw completion text into a specification document.
//!
//! Completion services wrap the JSON they return in prose and Markdown fences.
//! Extraction drops the fence lines and keeps the first balanced `{...}`
//! object. Braces inside JSON string literals do not count toward the balance.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::compiler::{CompileError, Specification};

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no JSON object found in completion text")]
    NoObject,

    #[error("completion JSON object is not closed ({0} unmatched `{{`)")]
    Unbalanced(usize),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // A fence line is three backticks plus an optional language tag.
    FENCE.get_or_init(|| Regex::new(r"(?im)^[ \t]*```[a-z0-9_-]*[ \t]*$").unwrap())
}

/// Remove Markdown code-fence lines.
pub fn strip_fences(raw: &str) -> String {
    fence_regex().replace_all(raw.trim(), "").into_owned()
}

/// Return the first balanced JSON object in `raw`, fences removed.
pub fn extract_json(raw: &str) -> Result<String, ExtractError> {
    let text = strip_fences(raw);

    let start = text.find('{').ok_or(ExtractError::NoObject)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Ok(text[start..end].to_string());
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::Unbalanced(depth))
}

/// Extract the JSON object from a completion and lower it.
pub fn parse_completion(raw: &str) -> Result<Specification, ExtractError> {
    let json = extract_json(raw)?;
    Ok(Specification::from_json(&json)?)
}
