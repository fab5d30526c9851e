//! Layout projection command.

use crate::cli::common::{load_catalogs, print_json, CliError, CliResult, SourceArgs};
use crate::projector::RenderPad;
use crate::services::materialize;
use clap::Args;

/// Print the projected layout of a configuration
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Keyboard configuration source
    #[command(flatten)]
    pub source: SourceArgs,
}

impl LayoutArgs {
    /// Execute the layout command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.source.keyboard_config()?;
        let catalogs = load_catalogs()?;

        let (_, layout) = materialize(&config, None, &catalogs)
            .map_err(|e| CliError::validation(e.to_string()))?;

        if self.source.json {
            return print_json(&layout);
        }

        println!("Control:");
        print_pads(&layout.control);
        println!("Content:");
        if layout.content.is_empty() {
            println!("  (no content keys)");
        }
        print_pads(&layout.content);
        Ok(())
    }
}

fn print_pads(pads: &[RenderPad]) {
    for pad in pads {
        println!("  [{}]", pad.name);
        for row in &pad.rows {
            let names: Vec<&str> = row.iter().map(|k| k.key_name.as_str()).collect();
            println!("    {}", names.join(" "));
        }
    }
}
