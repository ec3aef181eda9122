//! Data directory initialization command.

use console::style;

use crate::config::Settings;
use crate::repository::DocumentRepository;

/// Create the data directory and database.
pub fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.data_dir)?;
    DocumentRepository::new(&settings.db_path)?;

    println!(
        "{} Initialized database at {}",
        style("✓").green(),
        settings.db_path.display()
    );
    Ok(())
}
