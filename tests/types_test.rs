use std::collections::HashSet;

use bubbl2struct::types::*;

fn sample_graph() -> Graph {
    Graph {
        nodes: vec![
            Node {
                id: 0,
                description: "Rain".to_string(),
            },
            Node {
                id: 1,
                description: "River".to_string(),
            },
        ],
        edges: vec![Edge {
            from: 0,
            to: 1,
            description: "feeds".to_string(),
        }],
    }
}

#[test]
fn graph_json_has_expected_shape() {
    let json = sample_graph().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["nodes"][0]["id"], 0);
    assert_eq!(value["nodes"][1]["description"], "River");
    assert_eq!(value["edges"][0]["from"], 0);
    assert_eq!(value["edges"][0]["to"], 1);
    assert_eq!(value["edges"][0]["description"], "feeds");
}

#[test]
fn graph_reads_back_from_json() {
    let json = r#"{"nodes":[{"id":0,"description":"A"}],"edges":[{"from":0,"to":0,"description":""}]}"#;
    let graph = Graph::from_json(json).unwrap();
    assert_eq!(graph.nodes[0].description, "A");
    assert_eq!(graph.edges[0].to, 0);

    let pretty = sample_graph().to_json_pretty().unwrap();
    assert!(pretty.contains('\n'));
    assert_eq!(Graph::from_json(&pretty).unwrap(), sample_graph());
}

#[test]
fn graph_from_invalid_json_is_an_error() {
    assert!(Graph::from_json("{\"nodes\": 3}").is_err());
}

#[test]
fn edges_are_equal_only_when_all_fields_match() {
    let base = Edge {
        from: 0,
        to: 1,
        description: String::new(),
    };
    let mut set = HashSet::new();
    assert!(set.insert(base.clone()));
    assert!(!set.insert(base.clone()));
    assert!(set.insert(Edge {
        description: "labeled".to_string(),
        ..base.clone()
    }));
    assert!(set.insert(Edge {
        from: 1,
        to: 0,
        ..base
    }));
    assert_eq!(set.len(), 3);
}

#[test]
fn graph_lookups() {
    let graph = sample_graph();
    assert_eq!(graph.node(1).map(|n| n.description.as_str()), Some("River"));
    assert!(graph.node(7).is_none());
    assert_eq!(graph.outgoing(0).count(), 1);
    assert_eq!(graph.incoming(0).count(), 0);
    assert_eq!(graph.incoming(1).next().map(|e| e.from), Some(0));
}

#[test]
fn first_node_id_is_zero() {
    assert_eq!(FIRST_NODE_ID, 0);
}
