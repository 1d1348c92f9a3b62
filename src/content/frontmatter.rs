//! Front-matter splitting

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::post::RawFrontMatter;

/// Front-matter that cannot be recovered from
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("Failed to parse JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON front-matter must be an object")]
    JsonNotObject,

    #[error("Unterminated JSON front-matter")]
    UnterminatedJson,
}

/// Front-matter splitter for markdown documents
pub struct FrontMatter;

impl FrontMatter {
    /// Split `content` into raw front-matter and the remaining body.
    ///
    /// Documents without front-matter, or whose YAML block or leading `{...}`
    /// block is unusable, yield an empty mapping and the whole document as
    /// body. Only `;;;`-fenced JSON is required to be valid.
    pub fn parse(content: &str) -> Result<(RawFrontMatter, &str), FrontMatterError> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Ok(Self::parse_yaml(content));
        }

        if content.starts_with(";;;") {
            return Self::parse_fenced_json(content);
        }

        if content.starts_with('{') {
            return Ok(Self::parse_json_object(content));
        }

        Ok((Mapping::new(), content))
    }

    fn parse_yaml(content: &str) -> (RawFrontMatter, &str) {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return (Mapping::new(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (Mapping::new(), remaining);
        }

        // `---` is also a markdown thematic break
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return (Mapping::new(), content);
        }

        match serde_yaml::from_str::<Value>(yaml_content) {
            Ok(Value::Mapping(map)) => (map, remaining),
            Ok(_) => {
                tracing::warn!("YAML front-matter is not a mapping, ignoring it");
                (Mapping::new(), remaining)
            }
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, treating as content: {}", e);
                (Mapping::new(), content)
            }
        }
    }

    fn parse_fenced_json(content: &str) -> Result<(RawFrontMatter, &str), FrontMatterError> {
        let rest = &content[3..];
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::UnterminatedJson)?;
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
        Ok((json_to_mapping(&rest[..end_pos])?, remaining))
    }

    /// A leading `{` may just as well be template syntax such as `{{ x }}`
    fn parse_json_object(content: &str) -> (RawFrontMatter, &str) {
        let Some(end_pos) = matching_brace(content) else {
            return (Mapping::new(), content);
        };

        match json_to_mapping(&content[..end_pos]) {
            Ok(map) => {
                let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
                (map, remaining)
            }
            Err(e) => {
                tracing::debug!("Leading braces are not JSON front-matter: {}", e);
                (Mapping::new(), content)
            }
        }
    }
}

/// A `key: value` line, with a simple identifier as key and not a URL scheme
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

/// Byte offset just past the brace closing the object that opens `content`
fn matching_brace(content: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn json_to_mapping(json: &str) -> Result<RawFrontMatter, FrontMatterError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(FrontMatterError::JsonNotObject);
    }
    // JSON is a subset of YAML's data model
    match serde_yaml::to_value(value) {
        Ok(Value::Mapping(map)) => Ok(map),
        _ => Err(FrontMatterError::JsonNotObject),
    }
}
