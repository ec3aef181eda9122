//! Dependency-graph derivation.
//!
//! Turns a document's `word`/`dep` fields into the flat node/edge list
//! consumed by the front end's graph-layout library. Layout itself is
//! the library's problem; this module only derives the structure.

use serde::Serialize;

use crate::models::Document;

/// One word node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub idx: u32,
    /// Surface form, used as the node label.
    pub label: String,
    pub pos: String,
}

/// One dependency edge, from dependent to head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: u32,
    pub to: u32,
    /// Relation label.
    pub label: String,
}

/// Node/edge list for one document's dependency parse.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Derive the dependency graph of a document.
///
/// Head indices in the corpus data are 1-based with 0 marking the root,
/// so an edge is emitted only for `head > 0` and points at `head - 1`.
pub fn dependency_graph(doc: &Document) -> DependencyGraph {
    let nodes = doc
        .word
        .iter()
        .map(|word| GraphNode {
            idx: word.idx,
            label: word.form.clone(),
            pos: word.pos.clone(),
        })
        .collect();

    let edges = doc
        .word
        .iter()
        .filter_map(|word| {
            let dep = word.dep.as_ref()?;
            if dep.head > 0 {
                Some(GraphEdge {
                    from: word.idx,
                    to: dep.head - 1,
                    label: dep.kind.clone(),
                })
            } else {
                None
            }
        })
        .collect();

    DependencyGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dep, Word};

    fn word(idx: u32, form: &str, pos: &str, dep: Option<(u32, &str)>) -> Word {
        Word {
            idx,
            start: 0,
            end: 0,
            pos: pos.to_string(),
            form: form.to_string(),
            lem: form.to_string(),
            dep: dep.map(|(head, kind)| Dep {
                head,
                kind: kind.to_string(),
                subtype: None,
            }),
        }
    }

    fn doc(words: Vec<Word>) -> Document {
        Document {
            id: "d1".to_string(),
            text: String::new(),
            word: words,
            lms: vec![],
            lang: None,
        }
    }

    #[test]
    fn test_nodes_and_edges_from_parse() {
        let d = doc(vec![
            word(0, "dogs", "NNS", Some((2, "nsubj"))),
            word(1, "loudly", "RB", Some((2, "advmod"))),
            word(2, "bark", "VBP", Some((0, "root"))),
        ]);
        let graph = dependency_graph(&d);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes[0].label, "dogs");

        // Root (head 0) gets no edge; 1-based heads shift down.
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0], GraphEdge { from: 0, to: 1, label: "nsubj".to_string() });
        assert_eq!(graph.edges[1], GraphEdge { from: 1, to: 1, label: "advmod".to_string() });
    }

    #[test]
    fn test_unattached_word_has_no_edge() {
        let d = doc(vec![word(0, "hm", "UH", None)]);
        let graph = dependency_graph(&d);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }
}
