//! End-to-end pagination against a real store: the boundary-stack pager
//! driving anchor-bounded page fetches, including the backward walk and
//! the criteria-change reset.

use gmrview::models::Document;
use gmrview::pager::Pager;
use gmrview::repository::DocumentRepository;
use gmrview::search::{LmFilter, SearchCriteria};

use tempfile::tempdir;

fn doc(id: &str, lemma: &str) -> Document {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "text": "some annotated sentence",
        "lms": [{
            "score": 0.5,
            "source": {"start": 0, "end": 4, "form": lemma, "lemma": lemma},
            "target": {"start": 5, "end": 14, "form": "annotated", "lemma": "annotated"}
        }]
    }))
    .unwrap()
}

fn seeded_repo(dir: &tempfile::TempDir, n: usize) -> DocumentRepository {
    let repo = DocumentRepository::new(&dir.path().join("corpus.db")).unwrap();
    let docs: Vec<Document> = (0..n)
        .map(|i| {
            let lemma = if i % 2 == 0 { "fire" } else { "water" };
            doc(&format!("doc_{:03}", i), lemma)
        })
        .collect();
    repo.save_all("en", &docs).unwrap();
    repo
}

#[test]
fn paging_forward_then_backward_restores_page_bounds() {
    let dir = tempdir().unwrap();
    let repo = seeded_repo(&dir, 10);
    let filter = LmFilter::build(&SearchCriteria::new());

    let mut pager = Pager::new(4);

    // Page 1.
    let page1 = repo.find_page("en", &filter, &pager.start()).unwrap();
    pager.record_page(&page1);
    let bounds1 = pager.current().cloned().unwrap();
    assert_eq!(bounds1.first, "doc_000");
    assert_eq!(bounds1.last, "doc_003");

    // Page 2, anchored (inclusively) at page 1's last id.
    let page2 = repo.find_page("en", &filter, &pager.next()).unwrap();
    pager.record_page(&page2);
    assert_eq!(page2[0].id, "doc_003");

    // Back to page 1: same boundary pair as before.
    let back = repo.find_page("en", &filter, &pager.previous()).unwrap();
    pager.record_page(&back);
    assert_eq!(pager.current(), Some(&bounds1));
    let ids: Vec<&str> = back.iter().map(|d| d.id.as_str()).collect();
    let original: Vec<&str> = page1.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, original);
}

#[test]
fn criteria_change_resets_to_start_of_collection() {
    let dir = tempdir().unwrap();
    let repo = seeded_repo(&dir, 10);

    let mut pager = Pager::new(3);
    let all = LmFilter::build(&SearchCriteria::new());

    let page1 = repo.find_page("en", &all, &pager.start()).unwrap();
    pager.record_page(&page1);
    let page2 = repo.find_page("en", &all, &pager.next()).unwrap();
    pager.record_page(&page2);
    assert_eq!(pager.depth(), 2);

    // New criteria: stale boundaries are cleared and the next fetch
    // anchors at the start.
    let criteria: SearchCriteria = [("source_lemma", "fire")].into_iter().collect();
    let filter = LmFilter::build(&criteria);
    pager.reset();
    assert_eq!(pager.depth(), 0);

    let page = repo.find_page("en", &filter, &pager.next()).unwrap();
    pager.record_page(&page);
    let ids: Vec<&str> = page.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["doc_000", "doc_002", "doc_004"]);
}

#[test]
fn sparse_matches_fill_pages_past_the_anchor() {
    let dir = tempdir().unwrap();
    let repo = seeded_repo(&dir, 20);

    let criteria: SearchCriteria = [("source_lemma", "water")].into_iter().collect();
    let filter = LmFilter::build(&criteria);

    let mut pager = Pager::new(4);
    let page1 = repo.find_page("en", &filter, &pager.start()).unwrap();
    pager.record_page(&page1);
    let ids: Vec<&str> = page1.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["doc_001", "doc_003", "doc_005", "doc_007"]);

    let page2 = repo.find_page("en", &filter, &pager.next()).unwrap();
    let ids: Vec<&str> = page2.iter().map(|d| d.id.as_str()).collect();
    // Anchor is inclusive, so the previous last id leads the next page.
    assert_eq!(ids, vec!["doc_007", "doc_009", "doc_011", "doc_013"]);
}
