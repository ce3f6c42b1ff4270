use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::GraphError;
use crate::graph::location::{normalize_label, LocationGraph};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// 地点拓扑的声明式描述（内置种子或配置文件 `[topology]`）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl Topology {
    /// 按声明顺序建图：节点下标即 `nodes` 中的位置
    pub fn build(&self) -> Result<LocationGraph, GraphError> {
        let mut seen = HashSet::new();
        let mut graph = LocationGraph::new();
        for label in &self.nodes {
            if !seen.insert(normalize_label(label)) {
                return Err(GraphError::DuplicateLabel(label.clone()));
            }
            graph.add_node(label.clone());
        }

        for edge in &self.edges {
            let from = graph
                .find_index_by_label(&edge.from)
                .ok_or_else(|| GraphError::UnknownLabel(edge.from.clone()))?;
            let to = graph
                .find_index_by_label(&edge.to)
                .ok_or_else(|| GraphError::UnknownLabel(edge.to.clone()))?;
            graph.add_undirected_edge(from, to, edge.distance)?;
        }

        tracing::info!(
            "Location graph built: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(from: &str, to: &str, distance: f64) -> EdgeSpec {
        EdgeSpec {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }

    #[test]
    fn builds_in_declaration_order() {
        let t = Topology {
            nodes: vec!["A".into(), "B".into()],
            edges: vec![spec("a", "B", 3.0)],
        };
        let g = t.build().unwrap();
        assert_eq!(g.find_index_by_label("b"), Some(1));
        assert_eq!(g.neighbors(0), &[(1, 3.0)]);
    }

    #[test]
    fn rejects_duplicate_and_unknown_labels() {
        let dup = Topology {
            nodes: vec!["Glenwood".into(), "GLENWOOD".into()],
            edges: vec![],
        };
        assert!(matches!(dup.build(), Err(GraphError::DuplicateLabel(l)) if l == "GLENWOOD"));

        let unknown = Topology {
            nodes: vec!["A".into()],
            edges: vec![spec("A", "Z", 1.0)],
        };
        assert!(matches!(unknown.build(), Err(GraphError::UnknownLabel(l)) if l == "Z"));
    }
}
