//! Show command - print one culture in detail.

use colored::Colorize;
use farmtech::{RecordStore, Storage, StorageConfig};

use crate::render;

pub fn run(config: &StorageConfig, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::from_records(Storage::new(config).try_load()?);
    let culture = store.get(id)?;

    println!("{}", format!("Culture {}", culture.id).cyan().bold());
    println!("{}", render::culture_details(culture));

    Ok(())
}
