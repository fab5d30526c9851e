//! Layout projection.
//!
//! Filters a declarative layout table down to the resolved keys and classifies
//! every retained character into a [`KeySpec`]. The control pad is routed to its
//! own bucket so a renderer can show it in a fixed header apart from the content.

use serde::Serialize;

use crate::keyset::KeySet;
use crate::models::{KeySpec, LayoutTable, Pad, MAINPAD};

/// A pad ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPad {
    /// Pad name
    pub name: String,
    /// Non-empty rows of keys
    pub rows: Vec<Vec<KeySpec>>,
}

impl RenderPad {
    /// Iterates over every key of the pad, row by row.
    pub fn keys(&self) -> impl Iterator<Item = &KeySpec> {
        self.rows.iter().flatten()
    }
}

/// Render-ready layout model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderLayout {
    /// Control pads (backspace, validate)
    pub control: Vec<RenderPad>,
    /// Content pads (main, numeric, combining)
    pub content: Vec<RenderPad>,
}

impl RenderLayout {
    /// Iterates over every key, control bucket first.
    pub fn keys(&self) -> impl Iterator<Item = &KeySpec> {
        self.control
            .iter()
            .chain(self.content.iter())
            .flat_map(RenderPad::keys)
    }

    /// Finds a rendered key by its name.
    pub fn find(&self, key_name: &str) -> Option<&KeySpec> {
        self.keys().find(|k| k.key_name == key_name)
    }

    /// Total number of rendered keys.
    pub fn key_count(&self) -> usize {
        self.keys().count()
    }
}

/// Projects `table` onto `keys`.
///
/// Rows keep only resolved characters; empty rows and empty pads are dropped.
/// The control pad is always considered present. A table without content pads
/// renders the resolved content keys, in key-set order, as a single main pad row.
pub fn project(table: &LayoutTable, keys: &KeySet) -> RenderLayout {
    let table = if table.has_no_content() {
        fallback_table(table, keys)
    } else {
        table.with_controlpad()
    };

    let mut layout = RenderLayout::default();
    for pad in table.pads() {
        let Some(projected) = project_pad(pad, keys) else {
            continue;
        };
        if pad.is_control() {
            layout.control.push(projected);
        } else {
            layout.content.push(projected);
        }
    }

    tracing::debug!(
        control = layout.control.len(),
        content = layout.content.len(),
        keys = layout.key_count(),
        "projected layout"
    );
    layout
}

fn project_pad(pad: &Pad, keys: &KeySet) -> Option<RenderPad> {
    let rows: Vec<Vec<KeySpec>> = pad
        .rows
        .iter()
        .map(|row| {
            row.chars()
                .filter(|c| keys.contains(*c))
                .map(KeySpec::classify)
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(RenderPad {
            name: pad.name.clone(),
            rows,
        })
    }
}

fn fallback_table(table: &LayoutTable, keys: &KeySet) -> LayoutTable {
    let mut pads = vec![Pad::new(MAINPAD, vec![keys.content_keys().collect()])];
    pads.extend(table.pads().iter().cloned());
    LayoutTable::new(pads).with_controlpad()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KeyCatalog;
    use crate::keyset::{resolve, DuplicateKeys};
    use crate::models::{KeyAction, COMBININGPAD, CONTROLPAD, NUMPAD};

    fn table() -> LayoutTable {
        LayoutTable::new(vec![
            Pad::new(MAINPAD, vec!["ABC".to_string(), "DE".to_string()]),
            Pad::new(NUMPAD, vec!["12".to_string()]),
            Pad::new(COMBININGPAD, vec!["\u{0301}\u{0300}".to_string()]),
        ])
    }

    fn keys(pattern: &str) -> KeySet {
        let catalog = KeyCatalog::new("ABCDE12\u{0301}\u{0300}").unwrap();
        resolve(None, Some(pattern), &catalog, DuplicateKeys::Preserve).unwrap()
    }

    #[test]
    fn test_project_filters_rows_and_pads() {
        let layout = project(&table(), &keys("[A-C]"));

        assert_eq!(layout.content.len(), 1);
        let main = &layout.content[0];
        assert_eq!(main.name, MAINPAD);
        assert_eq!(main.rows.len(), 1);
        let names: Vec<&str> = main.keys().map(|k| k.key_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_control_pad_always_routed_separately() {
        let layout = project(&table(), &keys("[0-9]"));

        assert_eq!(layout.control.len(), 1);
        assert_eq!(layout.control[0].name, CONTROLPAD);
        let actions: Vec<KeyAction> = layout.control[0].keys().map(|k| k.action).collect();
        assert_eq!(actions, vec![KeyAction::Delete, KeyAction::Validate]);

        assert_eq!(layout.content.len(), 1);
        assert_eq!(layout.content[0].name, NUMPAD);
    }

    #[test]
    fn test_combining_keys_classified() {
        let layout = project(&table(), &keys("[\u{0300}-\u{0302}]"));
        let accent = layout.find("grave-accent").unwrap();
        assert_eq!(accent.action, KeyAction::Combine);
        assert!(layout.find("acute-accent").is_some());
    }

    #[test]
    fn test_fallback_renders_key_set_with_duplicates() {
        let catalog = KeyCatalog::new("ABC").unwrap();
        let keys = resolve(None, Some("[AB][BC]"), &catalog, DuplicateKeys::Preserve).unwrap();
        let layout = project(&LayoutTable::default(), &keys);

        assert_eq!(layout.content.len(), 1);
        let names: Vec<&str> = layout.content[0]
            .keys()
            .map(|k| k.key_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "B", "C"]);
        assert_eq!(layout.control[0].rows[0].len(), 2);
    }
}
