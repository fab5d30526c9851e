//! Notifications emitted by the keyboard engine.
//!
//! Listeners receive every notification through an [`EventSink`] and answer
//! with a [`Verdict`]. Only `keypress` and `validate` can be vetoed; the answer
//! to any other notification is ignored.

use serde::Serialize;

use crate::models::{FieldGroup, InstanceId};

/// Listener answer to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// Let the operation proceed
    #[default]
    Allow,
    /// Cancel the operation before any state is touched
    Veto,
}

/// Kinds of notifications, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Panel opened
    Opened,
    /// Panel closed
    Closed,
    /// Key about to be applied
    Keypress,
    /// Field value changed
    Change,
    /// Field validated
    Validate,
    /// Insert refused because the field is full
    Full,
}

/// A notification emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum KeyboardEvent {
    /// A keyboard panel became visible
    Opened {
        /// Instance that opened
        instance: InstanceId,
    },

    /// A keyboard panel was hidden
    Closed {
        /// Instance that closed
        instance: InstanceId,
    },

    /// A key was pressed; vetoing suppresses the edit
    Keypress {
        /// Key name
        name: String,
        /// Key content
        key_char: String,
        /// Position of the bound field in `group.fields`
        index: Option<usize>,
        /// Focusable fields of the bound field's group
        group: FieldGroup,
    },

    /// The field value changed
    Change {
        /// Value before the edit
        old: String,
        /// Value after the edit
        new: String,
        /// Position of the bound field in `group.fields`
        index: Option<usize>,
        /// Focusable fields of the bound field's group
        group: FieldGroup,
    },

    /// The field was validated; vetoing cancels navigation
    Validate {
        /// Position of the validated field in `group.fields`
        index: Option<usize>,
        /// Focusable fields of the validated field's group
        group: FieldGroup,
    },

    /// An insert was refused because the field reached its maximum length
    Full {
        /// Instance whose field is full
        instance: InstanceId,
    },
}

impl KeyboardEvent {
    /// The kind of this notification.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Opened { .. } => EventKind::Opened,
            Self::Closed { .. } => EventKind::Closed,
            Self::Keypress { .. } => EventKind::Keypress,
            Self::Change { .. } => EventKind::Change,
            Self::Validate { .. } => EventKind::Validate,
            Self::Full { .. } => EventKind::Full,
        }
    }

    /// Returns `true` if a listener may veto this notification.
    pub const fn is_cancelable(&self) -> bool {
        matches!(self, Self::Keypress { .. } | Self::Validate { .. })
    }
}

/// Receiver of engine notifications.
pub trait EventSink {
    /// Handles a notification and answers whether the operation may proceed.
    fn emit(&mut self, event: &KeyboardEvent) -> Verdict;
}

impl<F> EventSink for F
where
    F: FnMut(&KeyboardEvent) -> Verdict,
{
    fn emit(&mut self, event: &KeyboardEvent) -> Verdict {
        self(event)
    }
}

/// Emits `event` and returns the effective verdict.
///
/// Vetoes of non-cancelable notifications are ignored.
pub(crate) fn notify(sink: &mut dyn EventSink, event: KeyboardEvent) -> Verdict {
    let verdict = sink.emit(&event);
    if verdict == Verdict::Veto {
        if event.is_cancelable() {
            tracing::debug!(kind = ?event.kind(), "notification vetoed");
            return Verdict::Veto;
        }
        tracing::warn!(kind = ?event.kind(), "ignoring veto of non-cancelable notification");
    }
    Verdict::Allow
}

/// Sink that records every notification and vetoes the configured kinds.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Notifications in emission order
    pub events: Vec<KeyboardEvent>,
    vetoed: Vec<EventKind>,
}

impl RecordingSink {
    /// Creates a sink that allows everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vetoes every notification of `kind`.
    pub fn vetoing(mut self, kind: EventKind) -> Self {
        self.vetoed.push(kind);
        self
    }

    /// Recorded notifications of `kind`.
    pub fn of_kind(&self, kind: EventKind) -> Vec<&KeyboardEvent> {
        self.events.iter().filter(|e| e.kind() == kind).collect()
    }

    /// Number of recorded notifications of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &KeyboardEvent) -> Verdict {
        self.events.push(event.clone());
        if self.vetoed.contains(&event.kind()) {
            Verdict::Veto
        } else {
            Verdict::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_honours_cancelable_veto() {
        let mut sink = RecordingSink::new().vetoing(EventKind::Validate);
        let verdict = notify(
            &mut sink,
            KeyboardEvent::Validate {
                index: Some(0),
                group: FieldGroup::default(),
            },
        );
        assert_eq!(verdict, Verdict::Veto);
        assert_eq!(sink.count(EventKind::Validate), 1);
    }

    #[test]
    fn test_notify_ignores_non_cancelable_veto() {
        let mut sink = RecordingSink::new().vetoing(EventKind::Opened);
        let verdict = notify(
            &mut sink,
            KeyboardEvent::Opened {
                instance: InstanceId::from_raw(1),
            },
        );
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = 0;
        let mut sink = |_: &KeyboardEvent| {
            seen += 1;
            Verdict::Allow
        };
        notify(
            &mut sink,
            KeyboardEvent::Full {
                instance: InstanceId::from_raw(3),
            },
        );
        assert_eq!(seen, 1);
    }
}
