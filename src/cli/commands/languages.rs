//! Collection listing command.

use console::style;

use crate::config::Settings;
use crate::models::display_name;
use crate::repository::DocumentRepository;

/// List language collections with document counts, plus recent imports.
pub fn cmd_languages(settings: &Settings) -> anyhow::Result<()> {
    let repo = DocumentRepository::new(&settings.db_path)?;
    let langs = repo.languages()?;

    if langs.is_empty() {
        println!("No collections found. Run 'gmrview import' first.");
        return Ok(());
    }

    println!("{}", style("Collections:").bold());
    for lang in &langs {
        let count = repo.doc_count(lang)?;
        println!(
            "  {:<6} {:<12} {:>8} documents",
            lang,
            display_name(lang),
            count
        );
    }

    let history = repo.import_history()?;
    if !history.is_empty() {
        println!();
        println!("{}", style("Recent imports:").bold());
        for record in history.iter().take(10) {
            println!(
                "  {}  {:<6} {:>8} documents  {}",
                record.imported_at.format("%Y-%m-%d %H:%M"),
                record.lang,
                record.doc_count,
                record.file
            );
        }
    }

    Ok(())
}
