//! A document hosting any number of field-bound keyboards.
//!
//! [`Document`] is the entry point the host drives: it attaches keyboards to
//! fields, turns key activations into edits or navigation, opens keyboards on
//! focus and broadcasts document-wide interactions to the visibility registry.

use anyhow::{bail, Context, Result};

use crate::catalog::CatalogDb;
use crate::config::KeyboardConfig;
use crate::editor::{self, EditOutcome};
use crate::error::ConfigError;
use crate::events::{notify, EventSink, KeyboardEvent, Verdict};
use crate::focus::{self, NavigationOutcome};
use crate::host::{FieldHost, PanelEffects, RenderSurface};
use crate::models::{FieldGroup, FieldId, InstanceId, KeyAction, KeySpec};
use crate::services::KeyboardInstance;
use crate::visibility::{Interaction, PanelVisibility, Visibility, VisibilityCoordinator};

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The keypress notification was vetoed; nothing was touched
    Vetoed,
    /// An editing key was applied
    Edited {
        /// `true` if the field value changed
        changed: bool,
    },
    /// A printable key was refused because the field is full
    Full,
    /// The validate key ran the focus chain
    Navigated(NavigationOutcome),
}

/// Keyboards attached to the fields of one document.
#[derive(Debug, Clone)]
pub struct Document {
    catalogs: CatalogDb,
    instances: Vec<KeyboardInstance>,
    visibility: VisibilityCoordinator,
    next_id: u64,
}

impl Document {
    /// Creates an empty document using `catalogs`.
    pub fn new(catalogs: CatalogDb) -> Self {
        Self {
            catalogs,
            instances: Vec::new(),
            visibility: VisibilityCoordinator::new(),
            next_id: 1,
        }
    }

    /// Creates an empty document with the embedded catalogs.
    pub fn load() -> Result<Self> {
        Ok(Self::new(CatalogDb::load()?))
    }

    /// Attaches a keyboard to `field` and renders its panel.
    ///
    /// `field_pattern` is the pattern the field declares itself; the configured
    /// pattern takes precedence. A field that already has a keyboard gets a new
    /// one in its place; the previous one is detached, closing it first if open.
    pub fn attach(
        &mut self,
        field: FieldId,
        config: KeyboardConfig,
        field_pattern: Option<&str>,
        surface: &mut dyn RenderSurface,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> std::result::Result<InstanceId, ConfigError> {
        let id = InstanceId::from_raw(self.next_id);
        let placement = config.placement();
        let animate = config.animate;
        let instance = KeyboardInstance::build(
            id,
            field,
            config,
            field_pattern.map(str::to_string),
            &self.catalogs,
        )?;
        self.next_id += 1;

        if let Some(previous) = self.instance_for(field).map(KeyboardInstance::id) {
            self.detach(previous, surface, effects, sink);
        }

        surface.render(id, instance.layout());
        self.visibility
            .subscribe(PanelVisibility::new(id, field, placement, animate));
        self.instances.push(instance);

        tracing::info!(instance = %id, %field, "attached keyboard");
        Ok(id)
    }

    /// Detaches a keyboard. An open panel is closed first.
    ///
    /// Returns `false` if the instance is not attached.
    pub fn detach(
        &mut self,
        instance: InstanceId,
        surface: &mut dyn RenderSurface,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> bool {
        if self.instance(instance).is_none() {
            return false;
        }

        self.visibility.close(instance, None, effects, sink);
        self.remove(instance, surface);
        tracing::info!(%instance, "detached keyboard");
        true
    }

    fn remove(&mut self, instance: InstanceId, surface: &mut dyn RenderSurface) {
        self.visibility.unsubscribe(instance);
        self.instances.retain(|i| i.id() != instance);
        surface.remove(instance);
    }

    /// Reconfigures a keyboard and re-renders it.
    ///
    /// On a configuration error the previous layout stays rendered.
    pub fn reconfigure(
        &mut self,
        instance: InstanceId,
        config: KeyboardConfig,
        surface: &mut dyn RenderSurface,
    ) -> Result<()> {
        let placement = config.placement();
        let animate = config.animate;
        let keyboard = self
            .instances
            .iter_mut()
            .find(|i| i.id() == instance)
            .with_context(|| format!("Unknown keyboard {instance}"))?;

        keyboard.reconfigure(config, &self.catalogs)?;
        surface.render(instance, keyboard.layout());
        self.visibility.configure(instance, placement, animate);
        Ok(())
    }

    /// Gets an attached keyboard.
    pub fn instance(&self, instance: InstanceId) -> Option<&KeyboardInstance> {
        self.instances.iter().find(|i| i.id() == instance)
    }

    /// Gets the keyboard attached to `field`.
    pub fn instance_for(&self, field: FieldId) -> Option<&KeyboardInstance> {
        self.instances.iter().find(|i| i.field() == field)
    }

    /// All attached keyboards, in attachment order.
    pub fn instances(&self) -> &[KeyboardInstance] {
        &self.instances
    }

    /// Current visibility of a keyboard.
    pub fn visibility(&self, instance: InstanceId) -> Option<Visibility> {
        self.visibility.visibility(instance)
    }

    /// Keyboards that are open, in attachment order.
    pub fn open_instances(&self) -> Vec<InstanceId> {
        self.visibility.open_instances()
    }

    /// Opens the keyboard of `field` after it gained focus.
    ///
    /// Returns the opened instance, or `None` if the field has no keyboard or
    /// its keyboard was already open.
    pub fn focus(
        &mut self,
        field: FieldId,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> Option<InstanceId> {
        let id = self.instance_for(field)?.id();
        self.visibility
            .open(id, None, effects, sink)
            .then_some(id)
    }

    /// Broadcasts one captured document interaction to every keyboard.
    ///
    /// Returns the keyboards that closed.
    pub fn dispatch(
        &mut self,
        interaction: &Interaction,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> Vec<InstanceId> {
        self.visibility.broadcast(interaction, effects, sink)
    }

    /// Applies a key activation from the panel of `instance`.
    ///
    /// Only keys rendered by this keyboard are accepted. A `keypress`
    /// notification is emitted first; a veto stops everything.
    /// Editing keys update the field once and emit `change` when the value
    /// differs. The validate key runs the focus chain: the keyboard closes and
    /// the next field is activated, or the field loses focus at the chain end.
    pub fn press(
        &mut self,
        instance: InstanceId,
        key: &KeySpec,
        host: &mut dyn FieldHost,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> Result<PressOutcome> {
        let keyboard = self
            .instance(instance)
            .with_context(|| format!("Unknown keyboard {instance}"))?;
        if !keyboard.layout().keys().any(|k| k == key) {
            bail!("Key '{}' is not rendered by keyboard {instance}", key.key_name);
        }
        let field = keyboard.field();
        let max_length = keyboard.max_length(host.declared_max_length(field));

        let group = host.group_of(field).chain();
        let index = group.index_of(field);

        let keypress = KeyboardEvent::Keypress {
            name: key.key_name.clone(),
            key_char: key.key_char.clone(),
            index,
            group: group.clone(),
        };
        if notify(sink, keypress) == Verdict::Veto {
            return Ok(PressOutcome::Vetoed);
        }

        let state = host.state(field);
        let edit = match key.action {
            KeyAction::Print => {
                let full = editor::is_full(&state, max_length);
                if full && !state.clamped().has_selection() {
                    tracing::debug!(%instance, "field full, insert refused");
                    notify(sink, KeyboardEvent::Full { instance });
                    return Ok(PressOutcome::Full);
                }
                editor::insert(&state, &key.key_char, full)
            }
            KeyAction::Combine => match key.as_char() {
                Some(mark) => editor::combine(&state, mark),
                None => EditOutcome {
                    state: state.clone(),
                    changed: false,
                },
            },
            KeyAction::Delete => editor::delete_backward(&state),
            KeyAction::Validate => {
                let outcome = self.navigate(instance, field, &group, host, effects, sink);
                return Ok(PressOutcome::Navigated(outcome));
            }
        };

        let changed = edit.changed;
        if edit.state != state {
            host.set_state(field, edit.state.clone());
        }
        if changed {
            notify(
                sink,
                KeyboardEvent::Change {
                    old: state.value,
                    new: edit.state.value,
                    index,
                    group,
                },
            );
        }

        Ok(PressOutcome::Edited { changed })
    }

    fn navigate(
        &mut self,
        instance: InstanceId,
        field: FieldId,
        group: &FieldGroup,
        host: &mut dyn FieldHost,
        effects: &mut dyn PanelEffects,
        sink: &mut dyn EventSink,
    ) -> NavigationOutcome {
        let outcome = focus::validate(group, field, sink);
        if !outcome.closes_keyboard() {
            return outcome;
        }

        self.visibility.close(instance, None, effects, sink);
        match outcome {
            NavigationOutcome::Advanced(next) => {
                host.activate(next);
                self.focus(next, effects, sink);
            }
            NavigationOutcome::ChainComplete => host.deactivate(field),
            NavigationOutcome::Vetoed => {}
        }
        outcome
    }
}
