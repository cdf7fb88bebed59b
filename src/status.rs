//! Post and page status lists.
//!
//! `wp.getPostStatusList` and `wp.getPageStatusList` answer with a struct of
//! `status => description`. Some setups hand back the struct's text rendering
//! instead, e.g. `{publish=Published, draft=Draft}`; both are accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::entities::PostAndPageStatus;
use crate::error::{Error, Result};
use crate::mapped::rule;
use crate::xmlrpc::encoding::{Struct, Value};

static RENDERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\{(.*)\}$").expect("valid regex"));

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").expect("valid regex"));

// Every entry is `<slug>=<description>`; the description may hold `=`.
static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Za-z0-9_-]+)=(.*)$").expect("valid regex"));

/// Reads a status list from whatever shape the server used.
pub fn from_value(context: &str, value: &Value) -> Result<Vec<PostAndPageStatus>> {
    match *value {
        Value::Struct(ref members) => from_struct(members),
        Value::String(ref text) => parse_status_list(text),
        ref other => Err(Error::mismatch(context, "struct", other.type_name())),
    }
}

/// One pair per member, in the order the server sent them.
pub fn from_struct(members: &Struct) -> Result<Vec<PostAndPageStatus>> {
    members
        .iter()
        .map(|(status, description)| {
            let description = rule::string::decode(status, description)?;
            Ok(PostAndPageStatus {
                status: status.clone(),
                description,
            })
        })
        .collect()
}

/// Parses the `{key=value, key=value}` rendering of a status struct.
///
/// Entries are separated by a comma and optional whitespace. Every entry must
/// be `key=value`, so a description cannot contain a comma.
pub fn parse_status_list(text: &str) -> Result<Vec<PostAndPageStatus>> {
    let caps = RENDERING
        .captures(text.trim())
        .ok_or_else(|| Error::malformed(format!("status list not in braces: '{}'", text)))?;
    let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let result = SEPARATOR
        .split(inner)
        .map(|entry| {
            let caps = ENTRY.captures(entry).ok_or_else(|| {
                Error::malformed(format!("bad status entry '{}' in '{}'", entry, text))
            })?;
            let status = caps.get(1).map_or("", |m| m.as_str());
            let description = caps.get(2).map_or("", |m| m.as_str());
            Ok(PostAndPageStatus::new(status, description))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} statuses from text rendering", result.len());
    Ok(result)
}
