//! Key specifications and the character classification table.

use crate::constants::{BACKSPACE, ENTER};
use serde::{Deserialize, Serialize};

/// Combining marks recognised by the classification table, with their key names.
///
/// Order matches the combining pad of the embedded catalogs.
pub const COMBINING_MARKS: [(char, &str); 5] = [
    ('\u{0301}', "acute-accent"),
    ('\u{0300}', "grave-accent"),
    ('\u{0302}', "circumflex-accent"),
    ('\u{0308}', "diaeresis-accent"),
    ('\u{0327}', "cedilla-accent"),
];

/// Logical action performed when a key is pressed.
///
/// Resolved once when the layout is projected, never re-derived at press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    /// Insert the key content at the cursor
    Print,
    /// Compose the key's combining mark with the preceding character
    Combine,
    /// Delete backwards
    Delete,
    /// Validate the field and move along the focus chain
    Validate,
}

impl std::fmt::Display for KeyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Print => write!(f, "print"),
            Self::Combine => write!(f, "combine"),
            Self::Delete => write!(f, "delete"),
            Self::Validate => write!(f, "validate"),
        }
    }
}

/// One renderable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// Literal content inserted by the key (control sentinel for backspace/enter)
    pub key_char: String,
    /// Stable identifier for styling and lookup, never used for logic
    pub key_name: String,
    /// What pressing the key does
    pub action: KeyAction,
}

impl KeySpec {
    /// Classifies a catalog character into a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use minkeyboard::models::{KeyAction, KeySpec};
    ///
    /// let key = KeySpec::classify('\u{0300}');
    /// assert_eq!(key.action, KeyAction::Combine);
    /// assert_eq!(key.key_name, "grave-accent");
    ///
    /// let key = KeySpec::classify('A');
    /// assert_eq!(key.action, KeyAction::Print);
    /// assert_eq!(key.key_name, "A");
    /// ```
    pub fn classify(c: char) -> Self {
        match c {
            ENTER => Self::new(c, "enter", KeyAction::Validate),
            BACKSPACE => Self::new(c, "backspace", KeyAction::Delete),
            ' ' => Self::new(' ', "space", KeyAction::Print),
            '-' => Self::new(c, "hyphen", KeyAction::Print),
            '\'' => Self::new(c, "apostrophe", KeyAction::Print),
            '_' => Self::new(c, "underscore", KeyAction::Print),
            _ => match combining_mark_name(c) {
                Some(name) => Self::new(c, name, KeyAction::Combine),
                None => Self::new(c, c.to_string(), KeyAction::Print),
            },
        }
    }

    fn new(c: char, name: impl Into<String>, action: KeyAction) -> Self {
        Self {
            key_char: c.to_string(),
            key_name: name.into(),
            action,
        }
    }

    /// Returns the single character carried by this key, if it carries exactly one.
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.key_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Looks up the key name of a recognised combining mark.
pub fn combining_mark_name(c: char) -> Option<&'static str> {
    COMBINING_MARKS
        .iter()
        .find(|(mark, _)| *mark == c)
        .map(|(_, name)| *name)
}

/// Parses a key token used on the command line.
///
/// Accepts a single literal character or a symbolic name such as `backspace`,
/// `enter`, `space` or an accent name (`grave`, `grave-accent`).
pub fn parse_key_token(token: &str) -> Option<char> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(c);
    }

    match token {
        "backspace" => Some(BACKSPACE),
        "enter" | "validate" => Some(ENTER),
        "space" => Some(' '),
        "hyphen" => Some('-'),
        "apostrophe" => Some('\''),
        "underscore" => Some('_'),
        _ => COMBINING_MARKS
            .iter()
            .find(|(_, name)| *name == token || name.strip_suffix("-accent") == Some(token))
            .map(|(mark, _)| *mark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_control_keys() {
        let enter = KeySpec::classify('\n');
        assert_eq!(enter.action, KeyAction::Validate);
        assert_eq!(enter.key_name, "enter");

        let backspace = KeySpec::classify('\u{8}');
        assert_eq!(backspace.action, KeyAction::Delete);
        assert_eq!(backspace.key_name, "backspace");
    }

    #[test]
    fn test_classify_accents() {
        for (mark, name) in COMBINING_MARKS {
            let key = KeySpec::classify(mark);
            assert_eq!(key.action, KeyAction::Combine);
            assert_eq!(key.key_name, name);
            assert_eq!(key.as_char(), Some(mark));
        }
    }

    #[test]
    fn test_classify_symbols() {
        assert_eq!(KeySpec::classify(' ').key_name, "space");
        assert_eq!(KeySpec::classify(' ').key_char, " ");
        assert_eq!(KeySpec::classify('-').key_name, "hyphen");
        assert_eq!(KeySpec::classify('\'').key_name, "apostrophe");
        assert_eq!(KeySpec::classify('_').key_name, "underscore");
        assert_eq!(KeySpec::classify('\u{c9}').key_name, "\u{c9}");
        assert_eq!(KeySpec::classify('7').action, KeyAction::Print);
    }

    #[test]
    fn test_parse_key_token() {
        assert_eq!(parse_key_token("A"), Some('A'));
        assert_eq!(parse_key_token("backspace"), Some('\u{8}'));
        assert_eq!(parse_key_token("enter"), Some('\n'));
        assert_eq!(parse_key_token("grave"), Some('\u{0300}'));
        assert_eq!(parse_key_token("acute-accent"), Some('\u{0301}'));
        assert_eq!(parse_key_token("nope"), None);
        assert_eq!(parse_key_token(""), None);
    }
}
