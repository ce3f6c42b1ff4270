use std::collections::VecDeque;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::GraphError;
use crate::graph::union_find::UnionFind;

/// 无向带权边（MST 结果中保证 from < to）
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Kruskal 结果：连通时为生成树，否则为生成森林
#[derive(Clone, Debug, Default, Serialize)]
pub struct SpanningForest {
    pub edges: Vec<Edge>,
    pub total: f64,
}

impl SpanningForest {
    /// 边数 == 节点数 - 1 即连通
    pub fn spans(&self, node_count: usize) -> bool {
        node_count > 0 && self.edges.len() == node_count - 1
    }
}

/// 比较用的地点名：NFC + 去首尾空白 + 小写
pub(crate) fn normalize_label(label: &str) -> String {
    label.trim().nfc().collect::<String>().to_lowercase()
}

/// 地点图：节点下标在插入时分配（从 0 递增），之后不变。
///
/// 建好后只读；邻接表按插入顺序保存，无向边在两端各记一次。
#[derive(Clone, Debug, Default)]
pub struct LocationGraph {
    nodes: Vec<String>,
    adj: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, label: impl Into<String>) -> usize {
        self.nodes.push(label.into());
        self.adj.push(Vec::new());
        self.nodes.len() - 1
    }

    pub fn add_undirected_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<(), GraphError> {
        let count = self.nodes.len();
        for index in [a, b] {
            if index >= count {
                return Err(GraphError::NodeOutOfRange { index, count });
            }
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        self.adj[a].push((b, weight));
        self.adj[b].push((a, weight));
        self.edge_count += 1;
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn neighbors(&self, index: usize) -> &[(usize, f64)] {
        self.adj.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// 大小写无关的精确匹配；返回第一个命中的下标
    pub fn find_index_by_label(&self, name: &str) -> Option<usize> {
        let wanted = normalize_label(name);
        self.nodes.iter().position(|n| normalize_label(n) == wanted)
    }

    /// 广度优先：起点先出，逐层展开；每个节点只在首次发现时出现一次
    pub fn bfs(&self, start: usize) -> Bfs<'_> {
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        if let Some(v) = visited.get_mut(start) {
            *v = true;
            queue.push_back(start);
        }
        Bfs {
            graph: self,
            visited,
            queue,
        }
    }

    /// 深度优先（显式栈）：优先探索下标最小的未访问邻居
    pub fn dfs(&self, start: usize) -> Dfs<'_> {
        let stack = if start < self.nodes.len() {
            vec![start]
        } else {
            Vec::new()
        };
        Dfs {
            graph: self,
            visited: vec![false; self.nodes.len()],
            stack,
        }
    }

    /// Kruskal：每条无向边只取一次（from < to），按权重稳定升序，
    /// 两端不在同一分量时保留。
    pub fn minimum_spanning_tree(&self) -> SpanningForest {
        let mut edges: Vec<Edge> = self
            .adj
            .iter()
            .enumerate()
            .flat_map(|(from, list)| {
                list.iter()
                    .filter(move |(to, _)| from < *to)
                    .map(move |&(to, weight)| Edge { from, to, weight })
            })
            .collect();
        edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut sets = UnionFind::new(self.nodes.len());
        let mut forest = SpanningForest::default();
        for edge in edges {
            if sets.union(edge.from, edge.to) {
                forest.total += edge.weight;
                forest.edges.push(edge);
            }
        }
        forest
    }
}

pub struct Bfs<'a> {
    graph: &'a LocationGraph,
    visited: Vec<bool>,
    queue: VecDeque<usize>,
}

impl Iterator for Bfs<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let node = self.queue.pop_front()?;
        for &(neighbor, _) in self.graph.neighbors(node) {
            if !self.visited[neighbor] {
                self.visited[neighbor] = true;
                self.queue.push_back(neighbor);
            }
        }
        Some(node)
    }
}

pub struct Dfs<'a> {
    graph: &'a LocationGraph,
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl Iterator for Dfs<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(node) = self.stack.pop() {
            if self.visited[node] {
                continue;
            }
            self.visited[node] = true;

            // 降序入栈 → 升序出栈
            let mut next: Vec<usize> = self
                .graph
                .neighbors(node)
                .iter()
                .map(|&(to, _)| to)
                .filter(|&to| !self.visited[to])
                .collect();
            next.sort_unstable_by(|a, b| b.cmp(a));
            self.stack.extend(next);
            return Some(node);
        }
        None
    }
}
