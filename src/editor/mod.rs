//! Text-buffer editing.
//!
//! Pure state transitions over [`EditableFieldState`]: insertion, backward
//! deletion and combining-mark composition. None of them navigates or changes
//! keyboard visibility; callers compose them with the focus chain and the
//! visibility coordinator.
//!
//! Every refused edit is an ordinary outcome with `changed == false`.

use unicode_normalization::UnicodeNormalization;

use crate::models::{EditableFieldState, MaxLength};

/// Result of an editing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// State after the operation
    pub state: EditableFieldState,
    /// `true` iff the value differs from the input value
    pub changed: bool,
}

impl EditOutcome {
    fn unchanged(state: EditableFieldState) -> Self {
        Self {
            state,
            changed: false,
        }
    }

    fn from_edit(before: &EditableFieldState, after: EditableFieldState) -> Self {
        let changed = after.value != before.value;
        Self {
            state: after,
            changed,
        }
    }
}

/// Byte offset of the char at `index`, or the value length past the end.
fn byte_offset(value: &str, index: usize) -> usize {
    value
        .char_indices()
        .nth(index)
        .map_or(value.len(), |(offset, _)| offset)
}

/// Replaces the chars in `start..end` with `text`.
fn splice(value: &str, start: usize, end: usize, text: &str) -> String {
    let from = byte_offset(value, start);
    let to = byte_offset(value, end);
    let mut out = String::with_capacity(value.len() + text.len());
    out.push_str(&value[..from]);
    out.push_str(text);
    out.push_str(&value[to..]);
    out
}

/// Returns `true` when the field holds at least its maximum number of characters.
pub fn is_full(state: &EditableFieldState, max_length: MaxLength) -> bool {
    let len = state.char_len();
    len >= max_length.limit_for(len)
}

/// Inserts `text` in place of the selection and collapses the cursor after it.
///
/// Refused when nothing is selected and the field is full.
///
/// # Examples
///
/// ```
/// use minkeyboard::editor::insert;
/// use minkeyboard::models::EditableFieldState;
///
/// let out = insert(&EditableFieldState::with_cursor("ab", 1), "X", false);
/// assert_eq!(out.state, EditableFieldState::with_cursor("aXb", 2));
/// assert!(out.changed);
/// ```
pub fn insert(state: &EditableFieldState, text: &str, is_full: bool) -> EditOutcome {
    let state = state.clamped();
    if !state.has_selection() && is_full {
        return EditOutcome::unchanged(state);
    }

    let value = splice(
        &state.value,
        state.selection_start,
        state.selection_end,
        text,
    );
    let cursor = state.selection_start + text.chars().count();
    EditOutcome::from_edit(&state, EditableFieldState::with_cursor(value, cursor))
}

/// Deletes the selection, or the character before the cursor when nothing is selected.
///
/// Deleting at position 0 with nothing selected is a no-op.
pub fn delete_backward(state: &EditableFieldState) -> EditOutcome {
    let state = state.clamped();
    let start = state.selection_start;

    if state.has_selection() {
        let value = splice(&state.value, start, state.selection_end, "");
        return EditOutcome::from_edit(&state, EditableFieldState::with_cursor(value, start));
    }

    if start == 0 {
        return EditOutcome::unchanged(state);
    }

    let value = splice(&state.value, start - 1, start, "");
    EditOutcome::from_edit(&state, EditableFieldState::with_cursor(value, start - 1))
}

/// Composes `mark` with the character before the cursor, normalized to NFC.
///
/// A no-op at position 0 or over a non-empty selection. When a precomposed
/// form exists it replaces the preceding character and the cursor stays after
/// it. Otherwise the base and the mark are both kept and the cursor stays
/// between them.
pub fn combine(state: &EditableFieldState, mark: char) -> EditOutcome {
    let state = state.clamped();
    let cursor = state.selection_start;
    if cursor == 0 || state.has_selection() {
        return EditOutcome::unchanged(state);
    }

    let Some(preceding) = state.value.chars().nth(cursor - 1) else {
        return EditOutcome::unchanged(state);
    };

    let composed: String = [preceding, mark].iter().copied().nfc().collect();
    let value = splice(&state.value, cursor - 1, cursor, &composed);

    tracing::trace!(
        base = %preceding,
        mark = %mark.escape_unicode(),
        precomposed = composed.chars().count() == 1,
        "combined mark"
    );

    // Either way the cursor keeps its numeric position: after the precomposed
    // character, or between an uncombined base and its mark.
    EditOutcome::from_edit(&state, EditableFieldState::with_cursor(value, cursor))
}
