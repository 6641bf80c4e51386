//! Session state for the interactive controller.

use colored::Colorize;
use farmtech::{LoadStatus, RecordStore, Storage};
use log::error;

/// The record store plus where it is persisted.
pub struct Session {
    /// Records being edited.
    pub store: RecordStore,
    storage: Storage,
}

impl Session {
    /// Load records from storage and report what was found.
    ///
    /// Never fails: unreadable storage starts an empty session.
    pub fn open(storage: Storage) -> Self {
        let outcome = storage.load();

        match &outcome.status {
            LoadStatus::Loaded(count) => println!(
                "{} {} cultures from {}",
                "Loaded".green().bold(),
                count,
                storage.json_path().display()
            ),
            LoadStatus::Missing => println!(
                "{} No data file found, starting a new registry.",
                "Note:".yellow()
            ),
            LoadStatus::Empty => println!(
                "{} Data file is empty, starting a new registry.",
                "Note:".yellow()
            ),
            LoadStatus::Corrupt(reason) => println!(
                "{} Data file could not be read ({}), starting a new registry.",
                "Warning:".yellow().bold(),
                reason
            ),
        }

        Self {
            store: RecordStore::from_records(outcome.cultures),
            storage,
        }
    }

    /// Save the current records.
    ///
    /// A failure is reported but the in-memory records are kept. Returns
    /// whether the save succeeded.
    pub fn persist(&self) -> bool {
        match self.storage.save(self.store.list()) {
            Ok(()) => true,
            Err(e) => {
                error!("Save failed: {}", e);
                eprintln!(
                    "{} Could not save: {}. Changes are kept for this session only.",
                    "Error:".red().bold(),
                    e
                );
                false
            }
        }
    }
}
