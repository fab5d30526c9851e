//! Editable field state and field-group data structures.
//!
//! Offsets and lengths are counted in Unicode scalar values (`char`s), not bytes.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a host input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(u64);

impl FieldId {
    /// Creates a `FieldId` from a raw host identifier.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Gets the underlying raw value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Identifier of one keyboard instance (one binding of the engine to a field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Creates an `InstanceId` from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Gets the underlying raw value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "keyboard#{}", self.0)
    }
}

/// Value and selection of a text field.
///
/// # Invariants
///
/// - `0 <= selection_start <= selection_end <= value.chars().count()`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditableFieldState {
    /// Current text value
    pub value: String,
    /// Selection start (char offset)
    pub selection_start: usize,
    /// Selection end (char offset)
    pub selection_end: usize,
}

impl EditableFieldState {
    /// Creates a state with the cursor at the end of `value`.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.chars().count();
        Self {
            value,
            selection_start: end,
            selection_end: end,
        }
    }

    /// Creates a state with a collapsed cursor at `cursor`.
    pub fn with_cursor(value: impl Into<String>, cursor: usize) -> Self {
        Self::with_selection(value, cursor, cursor)
    }

    /// Creates a state with the given selection, clamped to the invariant.
    pub fn with_selection(value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value: value.into(),
            selection_start: start,
            selection_end: end,
        }
        .clamped()
    }

    /// Number of characters in the value.
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns `true` if a non-empty range is selected.
    pub fn has_selection(&self) -> bool {
        self.selection_start < self.selection_end
    }

    /// Returns a copy that satisfies the selection invariant.
    ///
    /// Offsets beyond the value are pulled back to its end and a reversed
    /// selection is normalized so that start <= end.
    pub fn clamped(&self) -> Self {
        let len = self.char_len();
        let a = self.selection_start.min(len);
        let b = self.selection_end.min(len);
        Self {
            value: self.value.clone(),
            selection_start: a.min(b),
            selection_end: a.max(b),
        }
    }
}

/// Maximum length declared by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxLength {
    /// At most this many characters
    Limited(usize),
    /// No limit declared
    #[default]
    Unlimited,
}

impl MaxLength {
    /// Resolves the effective limit: the field's declared maximum wins over the configured constant.
    pub fn resolve(declared: Option<usize>, configured: Option<usize>) -> Self {
        declared
            .or(configured)
            .map_or(Self::Unlimited, Self::Limited)
    }

    /// The limit for a value of `len` characters; unlimited maps to `len + 1` (never full).
    pub fn limit_for(self, len: usize) -> usize {
        match self {
            Self::Limited(max) => max,
            Self::Unlimited => len + 1,
        }
    }
}

/// A field as seen by the focus chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Field identifier
    pub id: FieldId,
    /// Field is not displayed
    #[serde(default)]
    pub hidden: bool,
    /// Field is disabled
    #[serde(default)]
    pub disabled: bool,
}

impl FieldRef {
    /// Creates a visible, enabled field reference.
    pub const fn new(id: FieldId) -> Self {
        Self {
            id,
            hidden: false,
            disabled: false,
        }
    }

    /// Returns `true` if the field can currently take focus.
    pub const fn is_focusable(&self) -> bool {
        !self.hidden && !self.disabled
    }
}

/// Ordered collection of fields sharing one navigation chain.
///
/// Order is document traversal order and must stay stable across a validate operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Shared marker identifying the group
    pub marker: String,
    /// Member fields in traversal order
    pub fields: Vec<FieldRef>,
}

impl FieldGroup {
    /// Creates a group of visible, enabled fields.
    pub fn new(marker: impl Into<String>, ids: impl IntoIterator<Item = FieldId>) -> Self {
        Self {
            marker: marker.into(),
            fields: ids.into_iter().map(FieldRef::new).collect(),
        }
    }

    /// Fields that are currently focusable, in order.
    pub fn focusable(&self) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|f| f.is_focusable())
            .map(|f| f.id)
            .collect()
    }

    /// Position of `field` among the focusable fields.
    pub fn index_of(&self, field: FieldId) -> Option<usize> {
        self.focusable().iter().position(|id| *id == field)
    }

    /// The navigation chain: this group reduced to its focusable fields.
    ///
    /// [`FieldGroup::index_of`] on the original group indexes the chain's `fields`.
    #[must_use]
    pub fn chain(&self) -> Self {
        Self {
            marker: self.marker.clone(),
            fields: self
                .fields
                .iter()
                .filter(|f| f.is_focusable())
                .copied()
                .collect(),
        }
    }
}
