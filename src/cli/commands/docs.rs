//! Page-through command: fetch and print document pages.

use console::style;

use crate::config::Settings;
use crate::pager::{Direction, PageRequest, Pager};
use crate::repository::DocumentRepository;
use crate::search::{LmFilter, SearchCriteria};

/// Fetch up to `pages` consecutive pages and print one line per
/// document. Walks forward with the boundary-stack pager, so the anchor
/// handoff between pages is the same one the web UI uses.
pub fn cmd_docs(
    settings: &Settings,
    lang: &str,
    anchor: &str,
    batch: Option<usize>,
    filters: &[String],
    pages: usize,
) -> anyhow::Result<()> {
    let criteria = parse_filters(filters)?;
    let filter = LmFilter::build(&criteria);
    let batch_size = batch.unwrap_or(settings.batch_size);

    let repo = DocumentRepository::new(&settings.db_path)?;
    let mut pager = Pager::new(batch_size);

    let mut request = PageRequest::at(anchor, Direction::Forward, batch_size);
    for page_no in 0..pages.max(1) {
        let docs = repo.find_page(lang, &filter, &request)?;
        if docs.is_empty() {
            if page_no == 0 {
                println!("No matching documents.");
            }
            break;
        }

        pager.record_page(&docs);
        for doc in &docs {
            let matched = filter.select(&doc.lms).len();
            println!(
                "{}  {} {:>3} {}  {}",
                style(&doc.id).cyan(),
                style("lms:").dim(),
                matched,
                style(format!("/{}", doc.lms.len())).dim(),
                doc.text
            );
        }

        let partial = docs.len() < batch_size;
        if partial {
            break;
        }
        request = pager.next();
    }

    Ok(())
}

/// Parse repeated `key=value` arguments into search criteria.
fn parse_filters(filters: &[String]) -> anyhow::Result<SearchCriteria> {
    let mut criteria = SearchCriteria::new();
    for raw in filters {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("filter '{}' is not key=value", raw))?;
        criteria.set(key, value);
    }
    Ok(criteria)
}
