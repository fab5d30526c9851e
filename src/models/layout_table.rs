//! Declarative multi-pad keyboard layout tables.

use crate::constants::{BACKSPACE, ENTER};
use serde::{Deserialize, Serialize};

/// Pad holding the main letter keys.
pub const MAINPAD: &str = "mainpad";
/// Pad holding digits.
pub const NUMPAD: &str = "numpad";
/// Pad holding combining accents.
pub const COMBININGPAD: &str = "combiningpad";
/// Pad holding the structural backspace/validate keys.
pub const CONTROLPAD: &str = "controlpad";

/// A named pad: an ordered sequence of rows, each row an ordered sequence of characters.
///
/// Rows are stored as strings; every `char` is one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pad {
    /// Pad name (e.g., "mainpad", "controlpad")
    pub name: String,
    /// Rows of keys, top to bottom
    pub rows: Vec<String>,
}

impl Pad {
    /// Creates a new pad.
    pub fn new(name: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns `true` if this pad is the control pad.
    #[must_use]
    pub fn is_control(&self) -> bool {
        self.name == CONTROLPAD
    }
}

/// Mapping from pad name to rows, in declaration order.
///
/// # Invariants
///
/// - The control pad is conceptually always present and always holds backspace and
///   validate; [`LayoutTable::with_controlpad`] supplies whatever is not configured.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTable {
    pads: Vec<Pad>,
}

impl LayoutTable {
    /// Creates a layout table from pads in declaration order.
    pub fn new(pads: Vec<Pad>) -> Self {
        Self { pads }
    }

    /// All configured pads, in declaration order.
    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    /// Gets a pad by name.
    pub fn get(&self, name: &str) -> Option<&Pad> {
        self.pads.iter().find(|p| p.name == name)
    }

    /// Returns `true` if no content pad (anything but the control pad) is configured.
    pub fn has_no_content(&self) -> bool {
        self.pads.iter().all(Pad::is_control)
    }

    /// Returns a copy whose control pad holds backspace and validate.
    ///
    /// The default control pad is appended when none is configured. A configured
    /// control pad missing either key gets it appended to its last row.
    pub fn with_controlpad(&self) -> Self {
        let mut table = self.clone();
        let Some(pad) = table.pads.iter_mut().find(|p| p.is_control()) else {
            table.pads.push(Self::default_controlpad());
            return table;
        };

        let missing: String = [BACKSPACE, ENTER]
            .into_iter()
            .filter(|c| !pad.rows.iter().any(|row| row.contains(*c)))
            .collect();
        if !missing.is_empty() {
            match pad.rows.last_mut() {
                Some(row) => row.push_str(&missing),
                None => pad.rows.push(missing),
            }
        }
        table
    }

    /// The control pad used when none is configured.
    pub fn default_controlpad() -> Pad {
        Pad::new(CONTROLPAD, vec![[BACKSPACE, ENTER].iter().collect()])
    }
}
