//! Key-set resolution command.

use crate::cli::common::{load_catalogs, print_json, CliError, CliResult, SourceArgs};
use crate::models::KeySpec;
use crate::services::materialize;
use clap::Args;
use serde::Serialize;

/// Print the keys a configuration resolves to
#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    /// Keyboard configuration source
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Serialize)]
struct KeysResponse {
    catalog: String,
    keys: Vec<KeySpec>,
    count: usize,
}

impl KeysArgs {
    /// Execute the keys command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.source.keyboard_config()?;
        let catalogs = load_catalogs()?;

        let (key_set, _) = materialize(&config, None, &catalogs)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let keys: Vec<KeySpec> = key_set.keys().iter().map(|c| KeySpec::classify(*c)).collect();
        let response = KeysResponse {
            catalog: config.catalog,
            count: keys.len(),
            keys,
        };

        if self.source.json {
            return print_json(&response);
        }

        println!("Catalog: {}", response.catalog);
        println!("Keys ({}):", response.count);
        for key in &response.keys {
            println!("  {:<16} {}", key.key_name, key.action);
        }
        Ok(())
    }
}
