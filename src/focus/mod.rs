//! Field-to-field navigation on validation.
//!
//! Validation is a single state transition that returns a [`NavigationOutcome`];
//! the caller closes the current keyboard and activates (or blurs) fields.
//! Nothing here calls back into the keyboard, so there is no re-entrant
//! "validate, focus next, open next" chain.

use crate::events::{notify, EventSink, KeyboardEvent, Verdict};
use crate::models::{FieldGroup, FieldId};

/// Result of validating a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A listener vetoed the validation; nothing else happens
    Vetoed,
    /// Activation moves to the given field
    Advanced(FieldId),
    /// The validated field was the last of its chain; focus is removed
    ChainComplete,
}

impl NavigationOutcome {
    /// Returns `true` unless the validation was vetoed.
    ///
    /// Every non-vetoed outcome closes the validated field's keyboard.
    pub const fn closes_keyboard(self) -> bool {
        !matches!(self, Self::Vetoed)
    }
}

/// Validates `current` within `group`.
///
/// Only focusable fields (not hidden, not disabled) take part in the chain. A
/// `validate` notification carrying the chain and the field's index in it is
/// emitted first and may be vetoed. A field missing from the chain advances to the chain's first field.
///
/// # Examples
///
/// ```
/// use minkeyboard::events::RecordingSink;
/// use minkeyboard::focus::{validate, NavigationOutcome};
/// use minkeyboard::models::{FieldGroup, FieldId};
///
/// let f0 = FieldId::from_raw(0);
/// let f1 = FieldId::from_raw(1);
/// let group = FieldGroup::new("form", [f0, f1]);
/// let mut sink = RecordingSink::new();
///
/// assert_eq!(validate(&group, f0, &mut sink), NavigationOutcome::Advanced(f1));
/// assert_eq!(validate(&group, f1, &mut sink), NavigationOutcome::ChainComplete);
/// ```
pub fn validate(group: &FieldGroup, current: FieldId, sink: &mut dyn EventSink) -> NavigationOutcome {
    let chain = group.chain();
    let index = chain.fields.iter().position(|f| f.id == current);
    let next = chain.fields.get(index.map_or(0, |i| i + 1)).map(|f| f.id);

    let event = KeyboardEvent::Validate {
        index,
        group: chain,
    };
    if notify(sink, event) == Verdict::Veto {
        return NavigationOutcome::Vetoed;
    }

    let outcome = next.map_or(NavigationOutcome::ChainComplete, NavigationOutcome::Advanced);

    tracing::debug!(%current, ?index, ?outcome, "validated field");
    outcome
}
