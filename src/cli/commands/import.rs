//! JSON Lines import command.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::models::Document;
use crate::repository::DocumentRepository;

/// Documents written per transaction.
const CHUNK_SIZE: usize = 500;

/// Import documents from JSONL files into a language collection.
pub fn cmd_import(
    settings: &Settings,
    lang: &str,
    files: &[PathBuf],
    dry_run: bool,
) -> anyhow::Result<()> {
    if files.is_empty() {
        anyhow::bail!("no input files given");
    }

    let repo = DocumentRepository::new(&settings.db_path)?;
    if !dry_run {
        repo.init_collection(lang)?;
    }

    let mut total: u64 = 0;
    let mut skipped: u64 = 0;

    for file in files {
        let name = file.display().to_string();
        let reader = BufReader::new(
            File::open(file).map_err(|e| anyhow::anyhow!("cannot open {}: {}", name, e))?,
        );

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg} ({pos} documents)")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(name.clone());

        let mut chunk: Vec<Document> = Vec::with_capacity(CHUNK_SIZE);
        let mut file_count: u64 = 0;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Document>(&line) {
                Ok(mut doc) => {
                    doc.lang.get_or_insert_with(|| lang.to_string());
                    chunk.push(doc);
                    file_count += 1;
                    pb.inc(1);
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("{}:{}: skipping bad document: {}", name, lineno + 1, e);
                }
            }

            if chunk.len() >= CHUNK_SIZE {
                if !dry_run {
                    repo.save_all(lang, &chunk)?;
                }
                chunk.clear();
            }
        }

        if !chunk.is_empty() && !dry_run {
            repo.save_all(lang, &chunk)?;
        }
        if !dry_run {
            repo.record_import(lang, &name, file_count)?;
        }

        pb.finish_with_message(format!("{} ({} documents)", name, file_count));
        total += file_count;
    }

    let verb = if dry_run { "Validated" } else { "Imported" };
    println!(
        "{} {} {} documents into docs_{}{}",
        style("✓").green(),
        verb,
        total,
        lang,
        if skipped > 0 {
            format!(" ({} skipped)", skipped)
        } else {
            String::new()
        }
    );
    Ok(())
}
