//! List command - print every registered culture.

use colored::Colorize;
use farmtech::{LoadStatus, RecordStore, Storage, StorageConfig};

use crate::render;

pub fn run(config: &StorageConfig, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = Storage::new(config).load();

    if let LoadStatus::Corrupt(reason) = &outcome.status {
        eprintln!(
            "{} Data file could not be read: {}",
            "Warning:".yellow().bold(),
            reason
        );
    }

    let store = RecordStore::from_records(outcome.cultures);

    if json_output {
        println!("{}", serde_json::to_string_pretty(store.list())?);
    } else {
        render::print_listing(store.list(), &store.summary());
    }

    Ok(())
}
