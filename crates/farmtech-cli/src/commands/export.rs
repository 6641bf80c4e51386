//! Export command - rewrite the data file and regenerate the CSV export.

use colored::Colorize;
use farmtech::{Storage, StorageConfig};

pub fn run(config: &StorageConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::new(config);

    // Strict load: a corrupt file must not be overwritten with an empty one.
    let cultures = storage.try_load()?;
    storage.save(&cultures)?;

    println!(
        "{} {} cultures",
        "Exported".green().bold(),
        cultures.len().to_string().white().bold()
    );
    println!("  Data: {}", storage.json_path().display());
    println!("  CSV:  {}", storage.csv_path().display());

    Ok(())
}
