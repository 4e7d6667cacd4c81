use std::fs;

use spell_core::SpellConfig;

use crate::commands::die;

/// Validate a spellime config TOML file.
pub fn validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    match SpellConfig::from_toml(&content) {
        Ok(config) => {
            println!(
                "OK: max_edit_distance={} prefix_length={} mode={:?}",
                config.engine.max_edit_distance, config.engine.prefix_length, config.ranking.mode
            );
        }
        Err(error) => {
            eprintln!("Invalid config: {error}");
            std::process::exit(1);
        }
    }
}
