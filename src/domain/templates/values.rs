//! Composition of `values.yaml` content from per-kind fragments.

use std::collections::BTreeSet;

use serde_yaml::{Mapping, Value};

use crate::domain::identifiers::ModuleName;

use super::placeholder::{self, MODULE_MARKER};

/// Indented body of a module block: the non-empty fragments, separated by
/// blank lines. Empty when no fragment has content.
pub fn module_body<'a>(
    fragments: impl IntoIterator<Item = &'a str>,
    module: &ModuleName,
) -> String {
    let parts: Vec<&str> = fragments
        .into_iter()
        .map(|fragment| fragment.trim_end_matches(['\n', '\r']))
        .filter(|fragment| !fragment.trim().is_empty())
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    let mut body = parts.join("\n\n");
    body.push('\n');
    placeholder::substitute_module(&body, module)
}

/// Module block: the module key followed by `body`.
pub fn block_from_body(body: &str, module: &ModuleName) -> String {
    if body.trim().is_empty() {
        // A bare key would parse as null; keep the module key a mapping.
        return format!("{}: {{}}\n", module);
    }
    format!("{}:\n{}", module, body)
}

/// Render the values block of `module`.
pub fn module_block<'a>(
    fragments: impl IntoIterator<Item = &'a str>,
    module: &ModuleName,
) -> String {
    block_from_body(&module_body(fragments, module), module)
}

/// Full `values.yaml` of a new chart: the header, a blank line, then the block
/// of the first module.
pub fn values_document(header: &str, chart_name: &str, first_block: &str) -> String {
    let mut document = placeholder::substitute_chart(header, chart_name);
    document.truncate(document.trim_end_matches('\n').len());
    document.push_str("\n\n");
    document.push_str(first_block);
    document
}

/// Text appended to an existing `values.yaml` for a new module.
pub fn append_fragment(block: &str) -> String {
    format!("\n{}", block)
}

/// One top-level entry of a module body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyEntry {
    pub key: String,
    /// The entry's lines, with the comments directly above it.
    pub text: String,
}

/// Split a module body into its top-level entries.
pub fn body_entries(body: &str) -> Vec<BodyEntry> {
    let mut entries: Vec<BodyEntry> = Vec::new();
    let mut pending = String::new();

    for line in body.split_inclusive('\n') {
        if let Some(key) = entry_key(line) {
            let mut text = without_leading_blank_lines(&pending).to_string();
            text.push_str(line);
            pending.clear();
            entries.push(BodyEntry { key: key.to_string(), text });
        } else if line.trim().is_empty() || is_entry_comment(line) {
            pending.push_str(line);
        } else if let Some(entry) = entries.last_mut() {
            entry.text.push_str(&pending);
            entry.text.push_str(line);
            pending.clear();
        }
    }
    entries
}

/// Body made of the entries of `body` whose key passes `keep`, in order.
pub fn select_entries(body: &str, keep: impl Fn(&str) -> bool) -> String {
    body_entries(body)
        .into_iter()
        .filter(|entry| keep(entry.key.as_str()))
        .map(|entry| entry.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-level module keys a template reads through `.Values.<MODULE_NAME>.`.
pub fn module_value_reads(template: &str) -> BTreeSet<&str> {
    let prefix = format!(".Values.{}.", MODULE_MARKER);
    template
        .match_indices(prefix.as_str())
        .filter_map(|(at, _)| {
            let rest = &template[at + prefix.len()..];
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            (end > 0).then(|| &rest[..end])
        })
        .collect()
}

/// Whether `values_yaml` already declares `key` at the top level.
///
/// Keys are compared the way YAML reads them, so `123` or `true` match the
/// number or boolean key they parse to. Falls back to a line scan when the
/// document does not parse, so a broken file still protects against
/// appending a second copy of a module.
pub fn has_top_level_key(values_yaml: &str, key: &str) -> bool {
    match serde_yaml::from_str::<Value>(values_yaml) {
        Ok(Value::Mapping(mapping)) => module_entry(&mapping, key).is_some(),
        Ok(_) => false,
        Err(_) => values_yaml.lines().any(|line| declares_key(line, key)),
    }
}

/// Result of merging a module body into a document that already declares
/// the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyMerge {
    /// Every key of the body is already present.
    Unchanged,
    /// `document` carries the `added` keys inside the module block.
    Merged { document: String, added: Vec<String> },
    /// The `missing` keys could not be placed in the existing block.
    Unmergeable { missing: Vec<String> },
}

/// Add the entries of `body` that the `module` block of `values_yaml` lacks.
///
/// Entries go at the end of the block. The result is accepted only when it
/// parses back with every other key untouched.
pub fn merge_module_body(values_yaml: &str, module: &str, body: &str) -> BodyMerge {
    let entries = body_entries(body);
    let all_keys = || -> Vec<String> { entries.iter().map(|entry| entry.key.clone()).collect() };

    let Ok(Value::Mapping(before)) = serde_yaml::from_str::<Value>(values_yaml) else {
        return BodyMerge::Unmergeable { missing: all_keys() };
    };
    let present: Vec<Value> = match module_entry(&before, module) {
        Some((_, Value::Mapping(block))) => block.iter().map(|(key, _)| key.clone()).collect(),
        Some((_, Value::Null)) => Vec::new(),
        _ => return BodyMerge::Unmergeable { missing: all_keys() },
    };

    let missing: Vec<&BodyEntry> =
        entries.iter().filter(|entry| !present.contains(&plain_key(&entry.key))).collect();
    if missing.is_empty() {
        return BodyMerge::Unchanged;
    }
    let added: Vec<String> = missing.iter().map(|entry| entry.key.clone()).collect();

    match insert_entries(values_yaml, module, &missing) {
        Some(document) if merged_cleanly(&document, &before, module, &added) => {
            BodyMerge::Merged { document, added }
        }
        _ => BodyMerge::Unmergeable { missing: added },
    }
}

/// The key `name` becomes when written unquoted as a mapping key.
fn plain_key(name: &str) -> Value {
    serde_yaml::from_str::<Mapping>(&format!("{}: 0\n", name))
        .ok()
        .filter(|mapping| mapping.len() == 1)
        .and_then(|mapping| mapping.into_iter().next())
        .map(|(key, _)| key)
        .unwrap_or_else(|| Value::String(name.to_string()))
}

fn module_entry<'m>(mapping: &'m Mapping, name: &str) -> Option<(&'m Value, &'m Value)> {
    let plain = plain_key(name);
    mapping.iter().find(|(key, _)| **key == plain || key.as_str() == Some(name))
}

fn insert_entries(values_yaml: &str, module: &str, entries: &[&BodyEntry]) -> Option<String> {
    let lines: Vec<&str> = values_yaml.split_inclusive('\n').collect();
    let start = lines.iter().position(|line| declares_key(line.trim_end(), module))?;
    let inline = lines[start].trim_end().strip_prefix(module)?.strip_prefix(':')?.trim();
    let insertion =
        entries.iter().map(|entry| entry.text.as_str()).collect::<Vec<_>>().join("\n");

    let mut document = String::new();
    match inline {
        "" => {
            let end = (start + 1..lines.len())
                .find(|&i| is_top_level(lines[i]))
                .unwrap_or(lines.len());
            let mut last = end;
            while last > start + 1 && lines[last - 1].trim().is_empty() {
                last -= 1;
            }
            lines[..last].iter().for_each(|line| document.push_str(line));
            if !document.ends_with('\n') {
                document.push('\n');
            }
            if last > start + 1 {
                document.push('\n');
            }
            document.push_str(&insertion);
            lines[last..].iter().for_each(|line| document.push_str(line));
        }
        "{}" | "~" | "null" => {
            lines[..start].iter().for_each(|line| document.push_str(line));
            document.push_str(&format!("{}:\n", module));
            document.push_str(&insertion);
            lines[start + 1..].iter().for_each(|line| document.push_str(line));
        }
        _ => return None,
    }
    Some(document)
}

fn merged_cleanly(document: &str, before: &Mapping, module: &str, added: &[String]) -> bool {
    let Ok(Value::Mapping(after)) = serde_yaml::from_str::<Value>(document) else {
        return false;
    };
    let Some((module_key, old)) = module_entry(before, module) else {
        return false;
    };
    let Some(Value::Mapping(new)) = after.get(module_key) else {
        return false;
    };

    let others_kept = before.len() == after.len()
        && before
            .iter()
            .filter(|(key, _)| *key != module_key)
            .all(|(key, value)| after.get(key) == Some(value));
    let old_block_kept = match old {
        Value::Mapping(old) => {
            new.len() == old.len() + added.len()
                && old.iter().all(|(key, value)| new.get(key) == Some(value))
        }
        _ => new.len() == added.len(),
    };
    let added_present =
        added.iter().all(|key| new.iter().any(|(existing, _)| *existing == plain_key(key)));

    others_kept && old_block_kept && added_present
}

fn entry_key(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("  ")?;
    if rest.trim().is_empty() || rest.starts_with([' ', '\t', '#', '-']) {
        return None;
    }
    let (key, after) = rest.split_once(':')?;
    (after.is_empty() || after.starts_with([' ', '\n', '\r'])).then(|| key.trim())
}

fn is_entry_comment(line: &str) -> bool {
    line.strip_prefix("  ").is_some_and(|rest| rest.starts_with('#'))
}

fn is_top_level(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with([' ', '\t'])
}

fn without_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    rest
}

fn declares_key(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}
