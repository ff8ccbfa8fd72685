use bubbl2struct::document::HtmlDocument;
use bubbl2struct::errors::ConceptMapError;
use bubbl2struct::extraction::ConceptMapExtractor;
use bubbl2struct::projection::MatrixProjector;
use bubbl2struct::types::*;

/// Helper: build a graph from `(id, description)` nodes and
/// `(from, to, description)` edges.
fn make_graph(nodes: &[(usize, &str)], edges: &[(usize, usize, &str)]) -> Graph {
    Graph {
        nodes: nodes
            .iter()
            .map(|&(id, description)| Node {
                id,
                description: description.to_string(),
            })
            .collect(),
        edges: edges
            .iter()
            .map(|&(from, to, description)| Edge {
                from,
                to,
                description: description.to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_projects_extracted_fixture() {
    let doc = HtmlDocument::parse(include_str!("fixtures/water_cycle.html")).unwrap();
    let graph = ConceptMapExtractor::default().extract(&doc).unwrap();
    let matrix = MatrixProjector::default().project(&graph).unwrap();

    assert_eq!(matrix.rows(), vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]]);
    assert_eq!(matrix.node_names, vec!["Rain", "River", "Sea"]);
    assert_eq!(matrix.edge_description(1, 2), Some("flows into"));
    assert_eq!(matrix.edge_description(0, 1), None);
    assert_eq!(matrix.edge_count(), 3);
}

#[test]
fn test_node_names_recover_descriptions_by_id() {
    // Nodes listed out of id order still land in the right slot.
    let graph = make_graph(&[(2, "gamma"), (0, "alpha"), (1, "beta")], &[]);
    let matrix = MatrixProjector::default().project(&graph).unwrap();
    for node in &graph.nodes {
        assert_eq!(matrix.node_names[node.id], node.description);
    }
}

#[test]
fn test_matrix_is_directed() {
    let graph = make_graph(&[(0, "a"), (1, "b")], &[(0, 1, "")]);
    let matrix = MatrixProjector::default().project(&graph).unwrap();
    assert!(matrix.has_edge(0, 1));
    assert!(!matrix.has_edge(1, 0));
    assert_eq!(matrix.adjacency[[0, 1]], 1);
    assert_eq!(matrix.adjacency[[1, 0]], 0);
}

#[test]
fn test_self_loop_is_representable() {
    let graph = make_graph(&[(0, "a")], &[(0, 0, "again")]);
    let matrix = MatrixProjector::default().project(&graph).unwrap();
    assert!(matrix.has_edge(0, 0));
    assert_eq!(matrix.edge_description(0, 0), Some("again"));
}

#[test]
fn test_parallel_edges_share_a_cell_and_last_label_wins() {
    let graph = make_graph(
        &[(0, "a"), (1, "b")],
        &[(0, 1, "first"), (0, 1, ""), (0, 1, "last")],
    );
    let matrix = MatrixProjector::default().project(&graph).unwrap();
    assert_eq!(matrix.edge_count(), 1);
    assert_eq!(matrix.adjacency[[0, 1]], 1);
    assert_eq!(matrix.edge_description(0, 1), Some("last"));
}

#[test]
fn test_successors_and_predecessors() {
    let graph = make_graph(
        &[(0, "hub"), (1, "left"), (2, "right")],
        &[(0, 1, ""), (0, 2, ""), (2, 0, "")],
    );
    let matrix = MatrixProjector::default().project(&graph).unwrap();
    assert_eq!(matrix.successors(0), vec![1, 2]);
    assert_eq!(matrix.predecessors(0), vec![2]);
    assert!(matrix.successors(1).is_empty());
    assert!(matrix.successors(99).is_empty());
    assert!(!matrix.has_edge(99, 0));
}

#[test]
fn test_one_based_graph() {
    let graph = make_graph(&[(1, "first"), (2, "second")], &[(1, 2, "then")]);
    let projector = MatrixProjector::with_id_base(1);
    assert_eq!(projector.id_base(), 1);
    let matrix = projector.project(&graph).unwrap();
    assert_eq!(matrix.node_names, vec!["first", "second"]);
    assert!(matrix.has_edge(0, 1));
    assert_eq!(matrix.edge_description(0, 1), Some("then"));
}

#[test]
fn test_one_based_graph_rejected_by_default_projector() {
    let graph = make_graph(&[(1, "first"), (2, "second")], &[]);
    let err = MatrixProjector::default().project(&graph).unwrap_err();
    assert!(matches!(
        err,
        ConceptMapError::InvalidNodeId {
            id: 2,
            node_count: 2
        }
    ));
}

#[test]
fn test_edge_with_out_of_range_id_is_an_error() {
    let graph = make_graph(&[(0, "a"), (1, "b")], &[(0, 5, "")]);
    let err = MatrixProjector::default().project(&graph).unwrap_err();
    match err {
        ConceptMapError::InvalidNodeId { id, node_count } => {
            assert_eq!(id, 5);
            assert_eq!(node_count, 2);
        }
        other => panic!("expected InvalidNodeId, got {other:?}"),
    }
}

#[test]
fn test_id_below_base_is_an_error() {
    let graph = make_graph(&[(1, "a"), (2, "b")], &[(0, 1, "")]);
    let err = MatrixProjector::with_id_base(1).project(&graph).unwrap_err();
    assert!(matches!(err, ConceptMapError::InvalidNodeId { id: 0, .. }));
}

#[test]
fn test_duplicate_node_id_is_an_error() {
    let graph = make_graph(&[(0, "a"), (0, "b")], &[]);
    let err = MatrixProjector::default().project(&graph).unwrap_err();
    assert!(matches!(err, ConceptMapError::DuplicateNodeId { id: 0 }));
}

#[test]
fn test_empty_graph() {
    let matrix = MatrixProjector::default().project(&Graph::default()).unwrap();
    assert_eq!(matrix.node_count(), 0);
    assert_eq!(matrix.edge_count(), 0);
    assert!(matrix.rows().is_empty());
}

#[test]
fn test_report_mirrors_matrix() {
    let graph = make_graph(&[(0, "a"), (1, "b")], &[(1, 0, "back")]);
    let matrix = MatrixProjector::default().project(&graph).unwrap();
    let report = matrix.report();
    assert_eq!(report.adjacency, vec![vec![0, 0], vec![1, 0]]);
    assert_eq!(report.node_names, vec!["a", "b"]);
    assert_eq!(report.edge_descriptions[1][0], "back");
    assert_eq!(report.edge_descriptions[0][1], "");
}
