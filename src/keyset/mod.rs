//! Key-set resolution.
//!
//! Turns an explicit key list or a bracketed character-class pattern into the
//! ordered set of characters a keyboard makes available.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::KeyCatalog;
use crate::constants::{BACKSPACE, ENTER};
use crate::error::ConfigError;

/// Bracket groups of a pattern. Text outside the brackets is ignored.
static BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.+?\]").expect("bracket group regex is valid"));

/// How keys matched by several bracket groups are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeys {
    /// Keep every occurrence; `[AB][BC]` yields `A, B, B, C`
    #[default]
    Preserve,
    /// Keep only the first occurrence of each key
    Deduplicate,
}

/// Ordered set of resolved keys, structural control keys included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeySet {
    keys: Vec<char>,
}

impl KeySet {
    /// All keys in resolution order.
    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    /// Keys without the structural backspace/validate characters.
    pub fn content_keys(&self) -> impl Iterator<Item = char> + '_ {
        self.keys
            .iter()
            .copied()
            .filter(|c| *c != BACKSPACE && *c != ENTER)
    }

    /// Returns `true` if `c` was resolved.
    pub fn contains(&self, c: char) -> bool {
        self.keys.contains(&c)
    }

    /// Number of resolved keys, duplicates counted.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Extracts the bracket groups of a pattern in order of appearance.
///
/// # Examples
///
/// ```
/// use minkeyboard::keyset::bracket_groups;
///
/// assert_eq!(bracket_groups("^[A-Z][0-9]+$"), vec!["[A-Z]", "[0-9]"]);
/// assert!(bracket_groups("plain text").is_empty());
/// ```
pub fn bracket_groups(pattern: &str) -> Vec<&str> {
    BRACKET_GROUP
        .find_iter(pattern)
        .map(|m| m.as_str())
        .collect()
}

/// Resolves the keys to render.
///
/// Explicit keys win over the pattern. Without either, or when the pattern has
/// no bracket group, the whole catalog is used. Backspace and validate are
/// always added.
///
/// An unparsable bracket group is a configuration error, never masked.
pub fn resolve(
    explicit: Option<&[char]>,
    pattern: Option<&str>,
    catalog: &KeyCatalog,
    duplicates: DuplicateKeys,
) -> Result<KeySet, ConfigError> {
    let mut keys = match (explicit, pattern) {
        (Some(explicit), _) => explicit.to_vec(),
        (None, Some(pattern)) => match_pattern(pattern, catalog)?,
        (None, None) => catalog.keys().to_vec(),
    };

    if duplicates == DuplicateKeys::Deduplicate {
        let mut seen = Vec::with_capacity(keys.len());
        keys.retain(|c| {
            if seen.contains(c) {
                false
            } else {
                seen.push(*c);
                true
            }
        });
    }

    for structural in [BACKSPACE, ENTER] {
        if !keys.contains(&structural) {
            keys.push(structural);
        }
    }

    tracing::debug!(count = keys.len(), ?duplicates, "resolved key set");
    Ok(KeySet { keys })
}

fn match_pattern(pattern: &str, catalog: &KeyCatalog) -> Result<Vec<char>, ConfigError> {
    let groups = bracket_groups(pattern);
    if groups.is_empty() {
        return Ok(catalog.keys().to_vec());
    }

    let mut keys = Vec::new();
    let mut buf = [0u8; 4];
    for group in groups {
        let class = Regex::new(&format!("^{group}$")).map_err(|e| ConfigError::InvalidPattern {
            pattern: group.to_string(),
            message: e.to_string(),
        })?;
        keys.extend(
            catalog
                .keys()
                .iter()
                .copied()
                .filter(|c| class.is_match(c.encode_utf8(&mut buf))),
        );
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(keys: &str) -> KeyCatalog {
        KeyCatalog::new(keys).unwrap()
    }

    #[test]
    fn test_resolve_single_group() {
        let set = resolve(None, Some("[A-C]"), &catalog("ABC123"), DuplicateKeys::Preserve)
            .unwrap();
        assert_eq!(set.keys(), &['A', 'B', 'C', '\u{8}', '\n']);
    }

    #[test]
    fn test_resolve_overlapping_groups_keep_duplicates() {
        let set = resolve(None, Some("[AB][BC]"), &catalog("ABC"), DuplicateKeys::Preserve)
            .unwrap();
        let content: Vec<char> = set.content_keys().collect();
        assert_eq!(content, vec!['A', 'B', 'B', 'C']);
    }

    #[test]
    fn test_resolve_overlapping_groups_deduplicated() {
        let set = resolve(
            None,
            Some("[AB][BC]"),
            &catalog("ABC"),
            DuplicateKeys::Deduplicate,
        )
        .unwrap();
        let content: Vec<char> = set.content_keys().collect();
        assert_eq!(content, vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_resolve_follows_catalog_order() {
        let set = resolve(None, Some("[CBA]"), &catalog("ABC"), DuplicateKeys::Preserve)
            .unwrap();
        let content: Vec<char> = set.content_keys().collect();
        assert_eq!(content, vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_resolve_ignores_text_outside_brackets() {
        let set = resolve(
            None,
            Some("^[0-9]{5}$"),
            &catalog("AB0123"),
            DuplicateKeys::Preserve,
        )
        .unwrap();
        let content: Vec<char> = set.content_keys().collect();
        assert_eq!(content, vec!['0', '1', '2', '3']);
    }

    #[test]
    fn test_resolve_negated_group() {
        let set = resolve(None, Some("[^A]"), &catalog("AB1"), DuplicateKeys::Preserve)
            .unwrap();
        let content: Vec<char> = set.content_keys().collect();
        assert_eq!(content, vec!['B', '1']);
    }

    #[test]
    fn test_explicit_keys_win_over_pattern() {
        let explicit = ['X', 'Y'];
        let set = resolve(
            Some(&explicit),
            Some("[A-C]"),
            &catalog("ABCXY"),
            DuplicateKeys::Preserve,
        )
        .unwrap();
        assert_eq!(set.keys(), &['X', 'Y', '\u{8}', '\n']);
    }

    #[test]
    fn test_no_group_falls_back_to_catalog() {
        let set = resolve(None, Some("anything"), &catalog("AB"), DuplicateKeys::Preserve)
            .unwrap();
        assert_eq!(set.keys(), &['A', 'B', '\u{8}', '\n']);

        let set = resolve(None, None, &catalog("AB"), DuplicateKeys::Preserve).unwrap();
        assert_eq!(set.keys(), &['A', 'B', '\u{8}', '\n']);
    }

    #[test]
    fn test_structural_keys_not_doubled() {
        let explicit = ['A', '\n'];
        let set = resolve(Some(&explicit), None, &catalog("A"), DuplicateKeys::Preserve).unwrap();
        assert_eq!(set.keys(), &['A', '\n', '\u{8}']);
    }

    #[test]
    fn test_invalid_group_is_config_error() {
        let err = resolve(None, Some("[Z-A]"), &catalog("ABC"), DuplicateKeys::Preserve)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "[Z-A]"));
    }
}
