//! Keyboard panel visibility.
//!
//! Each instance owns a two-state machine (closed/open). The
//! [`VisibilityCoordinator`] is the publish/subscribe registry that receives
//! every document-wide interaction once and broadcasts it to all subscribers.
//! Each subscriber decides on its own whether the interaction belongs to it,
//! so only unrelated keyboards close and the outcome does not depend on the
//! order in which subscribers are visited.

use serde::{Deserialize, Serialize};

use crate::events::{notify, EventSink, KeyboardEvent};
use crate::host::{PanelEffects, Positioning};
use crate::models::{FieldId, InstanceId};

/// Visibility of a keyboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Panel hidden
    #[default]
    Closed,
    /// Panel shown
    Open,
}

/// Element an interaction landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A bound input field
    Field(FieldId),
    /// A key of an instance's panel
    Key(InstanceId),
    /// The panel of an instance, outside any key
    Panel(InstanceId),
    /// Anything else in the document
    Elsewhere,
}

/// Kind of document-wide interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionKind {
    /// Mouse or pen pressed
    PointerDown,
    /// Finger touched
    TouchStart,
    /// Physical key pressed (named as the host reports it, e.g. "Tab")
    KeyDown(String),
}

/// A single captured document interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// What happened
    pub kind: InteractionKind,
    /// Where it happened
    pub target: Target,
}

impl Interaction {
    /// Pointer pressed on `target`.
    pub const fn pointer_down(target: Target) -> Self {
        Self {
            kind: InteractionKind::PointerDown,
            target,
        }
    }

    /// Touch started on `target`.
    pub const fn touch_start(target: Target) -> Self {
        Self {
            kind: InteractionKind::TouchStart,
            target,
        }
    }

    /// Physical key `key` pressed while `target` had focus.
    pub fn key_down(key: impl Into<String>, target: Target) -> Self {
        Self {
            kind: InteractionKind::KeyDown(key.into()),
            target,
        }
    }

    /// Returns `true` for Tab-key navigation.
    pub fn is_tab(&self) -> bool {
        matches!(&self.kind, InteractionKind::KeyDown(key) if key == "Tab")
    }
}

/// Where an opened panel goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Rendered inside a fixed host container; no placement request is made
    Fixed(String),
    /// Placed next to the bound field
    Anchored(Positioning),
}

/// Visibility state machine of one keyboard instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelVisibility {
    instance: InstanceId,
    bound_field: FieldId,
    visibility: Visibility,
    placement: Placement,
    animate: bool,
}

impl PanelVisibility {
    /// Creates a closed panel bound to `field`.
    pub fn new(instance: InstanceId, field: FieldId, placement: Placement, animate: bool) -> Self {
        Self {
            instance,
            bound_field: field,
            visibility: Visibility::Closed,
            placement,
            animate,
        }
    }

    /// The instance this panel belongs to.
    pub const fn instance(&self) -> InstanceId {
        self.instance
    }

    /// The field the panel is bound to.
    pub const fn bound_field(&self) -> FieldId {
        self.bound_field
    }

    /// Current visibility.
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns `true` if the panel is open.
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// Replaces placement and animation settings. Visibility is unchanged.
    pub fn configure(&mut self, placement: Placement, animate: bool) {
        self.placement = placement;
        self.animate = animate;
    }

    /// Returns `true` if `target` is the bound field or part of this panel.
    pub fn owns(&self, target: Target) -> bool {
        match target {
            Target::Field(field) => field == self.bound_field,
            Target::Key(instance) | Target::Panel(instance) => instance == self.instance,
            Target::Elsewhere => false,
        }
    }

    /// Returns `true` if `trigger` should close this panel.
    ///
    /// Programmatic closes, Tab navigation and interactions outside the bound
    /// field and the panel all close it.
    pub fn dismissed_by(&self, trigger: Option<&Interaction>) -> bool {
        match trigger {
            None => true,
            Some(interaction) => interaction.is_tab() || !self.owns(interaction.target),
        }
    }

    /// Opens the panel. Idempotent: returns `false` and does nothing if already open.
    pub fn open(
        &mut self,
        trigger: Option<&Interaction>,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> bool {
        if self.is_open() {
            return false;
        }

        self.visibility = Visibility::Open;
        if let Placement::Anchored(rules) = &self.placement {
            effects.place_near(self.instance, self.bound_field, rules);
        }
        effects.show(self.instance, self.animate);
        tracing::debug!(instance = %self.instance, ?trigger, "keyboard opened");
        notify(
            sink,
            KeyboardEvent::Opened {
                instance: self.instance,
            },
        );
        true
    }

    /// Closes the panel if `trigger` dismisses it. Returns `true` on an actual transition.
    pub fn close(
        &mut self,
        trigger: Option<&Interaction>,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> bool {
        if !self.is_open() || !self.dismissed_by(trigger) {
            return false;
        }

        self.visibility = Visibility::Closed;
        effects.hide(self.instance, self.animate);
        tracing::debug!(instance = %self.instance, ?trigger, "keyboard closed");
        notify(
            sink,
            KeyboardEvent::Closed {
                instance: self.instance,
            },
        );
        true
    }
}

/// Registry of keyboard panels sharing one document.
///
/// Subscribers are kept in attachment order.
#[derive(Debug, Clone, Default)]
pub struct VisibilityCoordinator {
    subscribers: Vec<PanelVisibility>,
}

impl VisibilityCoordinator {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a panel. A panel already registered for the same instance is replaced.
    pub fn subscribe(&mut self, panel: PanelVisibility) {
        self.subscribers.retain(|p| p.instance != panel.instance);
        self.subscribers.push(panel);
    }

    /// Removes a panel from the registry. Returns the panel if it was registered.
    pub fn unsubscribe(&mut self, instance: InstanceId) -> Option<PanelVisibility> {
        let pos = self.subscribers.iter().position(|p| p.instance == instance)?;
        Some(self.subscribers.remove(pos))
    }

    /// Gets a registered panel.
    pub fn panel(&self, instance: InstanceId) -> Option<&PanelVisibility> {
        self.subscribers.iter().find(|p| p.instance == instance)
    }

    /// Replaces placement and animation settings of a registered panel.
    pub fn configure(&mut self, instance: InstanceId, placement: Placement, animate: bool) -> bool {
        match self.subscribers.iter_mut().find(|p| p.instance == instance) {
            Some(panel) => {
                panel.configure(placement, animate);
                true
            }
            None => false,
        }
    }

    /// Current visibility of `instance`, if registered.
    pub fn visibility(&self, instance: InstanceId) -> Option<Visibility> {
        self.panel(instance).map(PanelVisibility::visibility)
    }

    /// Instances whose panel is open, in attachment order.
    pub fn open_instances(&self) -> Vec<InstanceId> {
        self.subscribers
            .iter()
            .filter(|p| p.is_open())
            .map(|p| p.instance)
            .collect()
    }

    /// Opens `instance`, first closing any other open panel so at most one stays open.
    ///
    /// Returns `true` if `instance` transitioned to open.
    pub fn open(
        &mut self,
        instance: InstanceId,
        trigger: Option<&Interaction>,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> bool {
        if !self.subscribers.iter().any(|p| p.instance == instance) {
            tracing::warn!(%instance, "open requested for unknown keyboard");
            return false;
        }

        for other in self
            .subscribers
            .iter_mut()
            .filter(|p| p.instance != instance)
        {
            other.close(None, effects, sink);
        }

        self.subscribers
            .iter_mut()
            .find(|p| p.instance == instance)
            .is_some_and(|panel| panel.open(trigger, effects, sink))
    }

    /// Closes `instance` if `trigger` dismisses it.
    pub fn close(
        &mut self,
        instance: InstanceId,
        trigger: Option<&Interaction>,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> bool {
        self.subscribers
            .iter_mut()
            .find(|p| p.instance == instance)
            .is_some_and(|panel| panel.close(trigger, effects, sink))
    }

    /// Broadcasts one captured interaction to every subscriber.
    ///
    /// Returns the instances that closed, in attachment order.
    pub fn broadcast(
        &mut self,
        interaction: &Interaction,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> Vec<InstanceId> {
        self.subscribers
            .iter_mut()
            .filter_map(|panel| {
                panel
                    .close(Some(interaction), effects, sink)
                    .then_some(panel.instance)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, RecordingSink};
    use proptest::prelude::*;

    /// Effects double that records calls.
    #[derive(Debug, Default)]
    struct Effects {
        calls: Vec<String>,
    }

    impl PanelEffects for Effects {
        fn show(&mut self, panel: InstanceId, _animate: bool) {
            self.calls.push(format!("show {}", panel.as_raw()));
        }

        fn hide(&mut self, panel: InstanceId, _animate: bool) {
            self.calls.push(format!("hide {}", panel.as_raw()));
        }

        fn place_near(&mut self, panel: InstanceId, anchor: FieldId, _rules: &Positioning) {
            self.calls
                .push(format!("place {} near {}", panel.as_raw(), anchor.as_raw()));
        }
    }

    fn panel(n: u64) -> PanelVisibility {
        PanelVisibility::new(
            InstanceId::from_raw(n),
            FieldId::from_raw(n),
            Placement::Anchored(Positioning::default()),
            false,
        )
    }

    fn coordinator(n: u64) -> VisibilityCoordinator {
        let mut coordinator = VisibilityCoordinator::new();
        for i in 0..n {
            coordinator.subscribe(panel(i));
        }
        coordinator
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut p = panel(1);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();

        assert!(p.open(None, &mut effects, &mut sink));
        assert!(!p.open(None, &mut effects, &mut sink));

        assert_eq!(sink.count(EventKind::Opened), 1);
        assert_eq!(effects.calls, vec!["place 1 near 1", "show 1"]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut p = panel(1);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();

        assert!(!p.close(None, &mut effects, &mut sink));
        p.open(None, &mut effects, &mut sink);
        assert!(p.close(None, &mut effects, &mut sink));
        assert!(!p.close(None, &mut effects, &mut sink));
        assert_eq!(sink.count(EventKind::Closed), 1);
    }

    #[test]
    fn test_fixed_placement_skips_positioning() {
        let mut p = PanelVisibility::new(
            InstanceId::from_raw(1),
            FieldId::from_raw(1),
            Placement::Fixed("#keyboard".to_string()),
            true,
        );
        let mut effects = Effects::default();
        p.open(None, &mut effects, &mut RecordingSink::new());
        assert_eq!(effects.calls, vec!["show 1"]);
    }

    #[test]
    fn test_own_interactions_keep_panel_open() {
        let mut p = panel(1);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();
        p.open(None, &mut effects, &mut sink);

        let own = [
            Interaction::pointer_down(Target::Field(FieldId::from_raw(1))),
            Interaction::touch_start(Target::Key(InstanceId::from_raw(1))),
            Interaction::pointer_down(Target::Panel(InstanceId::from_raw(1))),
            Interaction::key_down("a", Target::Field(FieldId::from_raw(1))),
        ];
        for interaction in &own {
            assert!(!p.close(Some(interaction), &mut effects, &mut sink));
        }
        assert!(p.is_open());
    }

    #[test]
    fn test_tab_closes_even_on_own_field() {
        let mut p = panel(1);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();
        p.open(None, &mut effects, &mut sink);

        let tab = Interaction::key_down("Tab", Target::Field(FieldId::from_raw(1)));
        assert!(p.close(Some(&tab), &mut effects, &mut sink));
    }

    #[test]
    fn test_broadcast_closes_only_unrelated_panels() {
        let mut coordinator = coordinator(2);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();
        let a = InstanceId::from_raw(0);
        let b = InstanceId::from_raw(1);

        coordinator.open(a, None, &mut effects, &mut sink);
        let closed = coordinator.broadcast(
            &Interaction::pointer_down(Target::Key(b)),
            &mut effects,
            &mut sink,
        );

        assert_eq!(closed, vec![a]);
        assert!(coordinator.open_instances().is_empty());
    }

    #[test]
    fn test_broadcast_on_own_key_keeps_panel_open() {
        let mut coordinator = coordinator(2);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();
        let b = InstanceId::from_raw(1);

        coordinator.open(b, None, &mut effects, &mut sink);
        let closed = coordinator.broadcast(
            &Interaction::pointer_down(Target::Key(b)),
            &mut effects,
            &mut sink,
        );

        assert!(closed.is_empty());
        assert_eq!(coordinator.open_instances(), vec![b]);
    }

    #[test]
    fn test_open_closes_other_panels() {
        let mut coordinator = coordinator(3);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();

        coordinator.open(InstanceId::from_raw(0), None, &mut effects, &mut sink);
        coordinator.open(InstanceId::from_raw(2), None, &mut effects, &mut sink);

        assert_eq!(coordinator.open_instances(), vec![InstanceId::from_raw(2)]);
        assert_eq!(
            coordinator.visibility(InstanceId::from_raw(0)),
            Some(Visibility::Closed)
        );
    }

    #[test]
    fn test_unsubscribed_panel_ignores_broadcast() {
        let mut coordinator = coordinator(2);
        let mut effects = Effects::default();
        let mut sink = RecordingSink::new();
        let a = InstanceId::from_raw(0);

        coordinator.open(a, None, &mut effects, &mut sink);
        let removed = coordinator.unsubscribe(a).unwrap();
        assert!(removed.is_open());

        let closed = coordinator.broadcast(
            &Interaction::pointer_down(Target::Elsewhere),
            &mut effects,
            &mut sink,
        );
        assert!(closed.is_empty());
        assert_eq!(coordinator.visibility(a), None);
    }

    fn target_strategy(n: u64) -> impl Strategy<Value = Target> {
        prop_oneof![
            (0..n).prop_map(|i| Target::Field(FieldId::from_raw(i))),
            (0..n).prop_map(|i| Target::Key(InstanceId::from_raw(i))),
            (0..n).prop_map(|i| Target::Panel(InstanceId::from_raw(i))),
            Just(Target::Elsewhere),
        ]
    }

    proptest! {
        #[test]
        fn prop_broadcast_outcome_is_order_independent(
            open in prop::collection::vec(any::<bool>(), 4),
            target in target_strategy(4),
            tab in any::<bool>(),
            order in Just((0u64..4).collect::<Vec<_>>()).prop_shuffle(),
        ) {
            let interaction = if tab {
                Interaction::key_down("Tab", target)
            } else {
                Interaction::pointer_down(target)
            };

            let run = |ids: &[u64]| {
                let mut effects = Effects::default();
                let mut sink = RecordingSink::new();
                let mut coordinator = VisibilityCoordinator::new();
                for &i in ids {
                    let mut p = panel(i);
                    if open[i as usize] {
                        p.open(None, &mut effects, &mut sink);
                    }
                    coordinator.subscribe(p);
                }
                coordinator.broadcast(&interaction, &mut effects, &mut sink);
                let mut still_open = coordinator.open_instances();
                still_open.sort();
                still_open
            };

            let attachment_order: Vec<u64> = (0..4).collect();
            prop_assert_eq!(run(&attachment_order), run(&order));
        }
    }
}
