//! Boundary contracts implemented by the embedding host.
//!
//! The engine never renders, animates, positions or focuses anything itself.
//! It drives these traits, and the host reports key activations back through
//! [`Document::press`](crate::services::Document::press).

use serde::{Deserialize, Serialize};

use crate::models::{EditableFieldState, FieldGroup, FieldId, InstanceId};
use crate::projector::RenderLayout;

/// Placement rules forwarded to the host positioning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Positioning {
    /// Panel point to align (e.g., "left top")
    pub my: String,
    /// Anchor point to align against (e.g., "left bottom")
    pub at: String,
    /// Collision handling (e.g., "flipfit")
    pub collision: String,
}

impl Default for Positioning {
    fn default() -> Self {
        Self {
            my: "left top".to_string(),
            at: "left bottom".to_string(),
            collision: "flipfit".to_string(),
        }
    }
}

/// Turns a render layout into visual elements.
pub trait RenderSurface {
    /// Renders (or re-renders) the panel of `instance`, replacing any previous key set.
    fn render(&mut self, instance: InstanceId, layout: &RenderLayout);

    /// Removes the panel of a detached instance.
    fn remove(&mut self, instance: InstanceId);
}

/// Show/hide effects and placement of keyboard panels.
pub trait PanelEffects {
    /// Makes the panel visible.
    fn show(&mut self, panel: InstanceId, animate: bool);

    /// Hides the panel.
    fn hide(&mut self, panel: InstanceId, animate: bool);

    /// Places the panel next to the anchor field.
    fn place_near(&mut self, panel: InstanceId, anchor: FieldId, rules: &Positioning);
}

/// Access to the host's input fields.
///
/// Field state is owned by the host; the engine reads and writes it once per operation.
pub trait FieldHost {
    /// Current value and selection of `field`.
    fn state(&self, field: FieldId) -> EditableFieldState;

    /// Replaces the value and selection of `field`.
    fn set_state(&mut self, field: FieldId, state: EditableFieldState);

    /// Maximum length declared by the field itself, if any.
    fn declared_max_length(&self, field: FieldId) -> Option<usize>;

    /// The navigation group `field` belongs to, in traversal order.
    fn group_of(&self, field: FieldId) -> FieldGroup;

    /// Gives `field` input focus.
    fn activate(&mut self, field: FieldId);

    /// Removes input focus from `field`.
    fn deactivate(&mut self, field: FieldId);
}
