//! Parsers for the `gog drive` plain-text output.
//!
//! The CLI prints tab-separated text with no versioned schema, so every
//! format assumption lives here and nowhere else.

use std::collections::HashMap;
use std::process::Output;

use super::error::{DriveError, Result};
use super::types::{EntryKind, RemoteEntry, RemoteObject};

/// Parses `drive ls --plain` output: a header line followed by
/// `id\tname\ttype[\t...]` rows. Malformed rows are skipped.
pub fn parse_listing(output: &str) -> Vec<RemoteEntry> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .skip(1)
        .filter_map(parse_listing_row)
        .collect()
}

fn parse_listing_row(line: &str) -> Option<RemoteEntry> {
    let mut parts = line.split('\t');
    let id = parts.next()?;
    let name = parts.next()?;
    let kind = parts.next()?;

    if id.is_empty() || name.is_empty() {
        return None;
    }

    let kind = match kind {
        "file" => EntryKind::File,
        "folder" => EntryKind::Folder,
        _ => return None,
    };

    Some(RemoteEntry {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    })
}

/// Parses `key\tvalue` lines. Only the first two columns count; lines
/// with an empty key or value are ignored.
pub fn parse_key_values(output: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in output.lines() {
        let mut parts = line.split('\t');
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if !key.is_empty() && !value.is_empty() {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}

/// Extracts the created item from `mkdir`/`upload` output. An `id` key is
/// required; `link` is optional.
pub fn parse_created(output: &str, subcommand: &str) -> Result<RemoteObject> {
    let mut values = parse_key_values(output);
    let id = values
        .remove("id")
        .ok_or_else(|| DriveError::UnexpectedOutput {
            subcommand: subcommand.to_string(),
            output: output.trim().to_string(),
        })?;

    Ok(RemoteObject {
        id,
        link: values.remove("link"),
    })
}

/// Parses `drive url` output (`<id>\t<url>`). Returns `None` when no
/// tab-separated line with a non-empty url exists.
pub fn parse_url(output: &str) -> Option<String> {
    let line = output.lines().find(|l| l.contains('\t'))?;
    let url = line.split('\t').nth(1)?.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Summarises a failed `gog` run on one line: the exit status, then
/// stderr (stdout when stderr is empty) with line breaks folded into `; `.
pub fn describe_failure(output: &Output) -> String {
    let status = match output.status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };

    let mut detail = one_line(&output.stderr);
    if detail.is_empty() {
        detail = one_line(&output.stdout);
    }

    if detail.is_empty() {
        status
    } else {
        format!("{}: {}", status, detail)
    }
}

fn one_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
