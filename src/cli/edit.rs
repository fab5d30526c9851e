//! Headless editing command.
//!
//! Runs a sequence of key presses against a single in-memory field through the
//! same press flow a host uses, then prints the final field state and every
//! notification that was emitted. Only keys the configured keyboard renders
//! can be pressed.

use crate::cli::common::{load_catalogs, print_json, CliError, CliResult, SourceArgs};
use crate::events::{KeyboardEvent, RecordingSink};
use crate::host::{FieldHost, PanelEffects, Positioning, RenderSurface};
use crate::models::{parse_key_token, EditableFieldState, FieldGroup, FieldId, InstanceId, KeySpec};
use crate::projector::RenderLayout;
use crate::services::{Document, PressOutcome};
use clap::Args;
use serde::Serialize;

const FIELD: FieldId = FieldId::from_raw(1);

/// Apply key presses to a text value
#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Initial field value
    #[arg(long, value_name = "TEXT", default_value = "", allow_hyphen_values = true)]
    pub value: String,

    /// Cursor position in characters (defaults to the end of the value)
    #[arg(long, value_name = "N")]
    pub cursor: Option<usize>,

    /// End of the initial selection (defaults to the cursor)
    #[arg(long, value_name = "N")]
    pub selection_end: Option<usize>,

    /// Maximum length declared by the field
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Keys to press: a literal character or backspace, enter, space, acute,
    /// grave, circumflex, diaeresis, cedilla
    #[arg(long, value_name = "KEY", num_args = 1.., required = true)]
    pub press: Vec<String>,

    /// Keyboard configuration source
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Serialize)]
struct EditResponse {
    value: String,
    selection_start: usize,
    selection_end: usize,
    active: bool,
    events: Vec<KeyboardEvent>,
}

/// One field kept in memory, with no rendering or effects.
#[derive(Debug)]
struct MemoryField {
    state: EditableFieldState,
    max_length: Option<usize>,
    active: bool,
}

impl FieldHost for MemoryField {
    fn state(&self, _field: FieldId) -> EditableFieldState {
        self.state.clone()
    }

    fn set_state(&mut self, _field: FieldId, state: EditableFieldState) {
        self.state = state;
    }

    fn declared_max_length(&self, _field: FieldId) -> Option<usize> {
        self.max_length
    }

    fn group_of(&self, field: FieldId) -> FieldGroup {
        FieldGroup::new("cli", [field])
    }

    fn activate(&mut self, _field: FieldId) {
        self.active = true;
    }

    fn deactivate(&mut self, _field: FieldId) {
        self.active = false;
    }
}

/// Rendering and effects that do nothing.
struct Headless;

impl RenderSurface for Headless {
    fn render(&mut self, _instance: InstanceId, _layout: &RenderLayout) {}

    fn remove(&mut self, _instance: InstanceId) {}
}

impl PanelEffects for Headless {
    fn show(&mut self, _panel: InstanceId, _animate: bool) {}

    fn hide(&mut self, _panel: InstanceId, _animate: bool) {}

    fn place_near(&mut self, _panel: InstanceId, _anchor: FieldId, _rules: &Positioning) {}
}

impl EditArgs {
    /// Execute the edit command
    pub fn execute(&self) -> CliResult<()> {
        let keys = self
            .press
            .iter()
            .map(|token| {
                parse_key_token(token)
                    .map(KeySpec::classify)
                    .ok_or_else(|| CliError::validation(format!("Unknown key '{token}'")))
            })
            .collect::<CliResult<Vec<_>>>()?;

        let cursor = self.cursor.unwrap_or_else(|| self.value.chars().count());
        let selection_end = self.selection_end.unwrap_or(cursor);
        let mut field = MemoryField {
            state: EditableFieldState::with_selection(self.value.clone(), cursor, selection_end),
            max_length: self.max_length,
            active: true,
        };

        let config = self.source.keyboard_config()?;
        let mut document = Document::new(load_catalogs()?);
        let mut headless = Headless;
        let mut sink = RecordingSink::new();

        let instance = document
            .attach(FIELD, config, None, &mut Headless, &mut headless, &mut sink)
            .map_err(|e| CliError::validation(e.to_string()))?;
        if let Some(keyboard) = document.instance(instance) {
            if let Some(missing) = keys.iter().find(|k| keyboard.key(&k.key_name).is_none()) {
                return Err(CliError::validation(format!(
                    "Key '{}' is not on the keyboard",
                    missing.key_name
                )));
            }
        }
        document.focus(FIELD, &mut headless, &mut sink);

        for key in &keys {
            let outcome = document
                .press(instance, key, &mut field, &mut headless, &mut sink)
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            tracing::debug!(key = %key.key_name, ?outcome, "pressed");
            if matches!(outcome, PressOutcome::Navigated(_)) && !field.active {
                break;
            }
        }

        let response = EditResponse {
            value: field.state.value,
            selection_start: field.state.selection_start,
            selection_end: field.state.selection_end,
            active: field.active,
            events: sink.events,
        };

        if self.source.json {
            return print_json(&response);
        }

        println!("Value:     {:?}", response.value);
        println!(
            "Selection: {}..{}",
            response.selection_start, response.selection_end
        );
        for event in &response.events {
            println!("Event:     {}", event_label(event));
        }
        Ok(())
    }
}

fn event_label(event: &KeyboardEvent) -> String {
    match event {
        KeyboardEvent::Keypress { name, .. } => format!("keypress {name}"),
        KeyboardEvent::Change { old, new, .. } => format!("change {old:?} -> {new:?}"),
        KeyboardEvent::Validate { index, .. } => match index {
            Some(i) => format!("validate #{i}"),
            None => "validate".to_string(),
        },
        KeyboardEvent::Opened { .. } => "opened".to_string(),
        KeyboardEvent::Closed { .. } => "closed".to_string(),
        KeyboardEvent::Full { .. } => "full".to_string(),
    }
}
