use crate::types::{AdjacencyMatrix, Graph};

/// Formats an `AdjacencyMatrix` as a plain-text report.
///
/// The report lists the matrix rows, every node as `id: name`, the labeled
/// links as `from -> to: label`, and finally the matrix shape.
pub fn format_matrix_as_text(matrix: &AdjacencyMatrix) -> String {
    let mut out = String::new();
    let n = matrix.node_count();

    out.push_str("Adjacency matrix:\n");
    if n == 0 {
        out.push_str("  (empty)\n");
    }
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        out.push_str(&format!("  [{}]\n", cells.join(" ")));
    }

    out.push_str("\nNodes:\n");
    for (id, name) in matrix.node_names.iter().enumerate() {
        out.push_str(&format!("  {}: {}\n", id, name));
    }

    out.push_str("\nEdge labels:\n");
    let mut labeled = 0;
    for from in 0..n {
        for to in 0..n {
            if let Some(label) = matrix.edge_description(from, to) {
                out.push_str(&format!("  {} -> {}: {}\n", from, to, label));
                labeled += 1;
            }
        }
    }
    if labeled == 0 {
        out.push_str("  (none)\n");
    }

    out.push_str(&format!("\nShape: ({}, {})\n", n, n));
    out
}

/// Formats an `AdjacencyMatrix` as pretty-printed JSON.
pub fn format_matrix_as_json(matrix: &AdjacencyMatrix) -> String {
    serde_json::to_string_pretty(&matrix.report()).unwrap_or_default()
}

/// Formats a `Graph` as an outline, one concept per line.
///
/// Each concept is followed by its outgoing links as `-> target: label`;
/// unlabeled links leave the label off.
pub fn format_graph_as_text(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Concepts: {}, links: {}\n",
        graph.nodes.len(),
        graph.edges.len()
    ));

    for node in &graph.nodes {
        out.push_str(&format!(
            "\n{}: {} (in {}, out {})\n",
            node.id,
            node.description,
            graph.incoming(node.id).count(),
            graph.outgoing(node.id).count()
        ));
        for edge in graph.outgoing(node.id) {
            let target = graph
                .node(edge.to)
                .map(|n| n.description.as_str())
                .unwrap_or("?");
            if edge.description.is_empty() {
                out.push_str(&format!("  -> {}\n", target));
            } else {
                out.push_str(&format!("  -> {}: {}\n", target, edge.description));
            }
        }
    }
    out
}
