use serde::Serialize;
use std::fmt;

/// 单棵有序索引的规模
#[derive(Clone, Debug, Default, Serialize)]
pub struct TreeStats {
    /// 不同 key 的条目数
    pub entries: usize,
    /// 树高（空树为 0）
    pub height: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

/// 目录概览：各索引规模与地点图规模
#[derive(Clone, Debug, Default, Serialize)]
pub struct DirectoryReport {
    pub records: usize,
    pub status: StatusCounts,
    /// BST（按 id）
    pub by_id: TreeStats,
    /// AVL（按创建时间）
    pub by_created: TreeStats,
    /// 红黑树（按优先级）
    pub by_priority: TreeStats,
    /// 红黑树黑高；路径间不一致时为 None
    pub black_height: Option<usize>,
    pub heap_len: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
}

fn tree_line(f: &mut fmt::Formatter<'_>, name: &str, t: &TreeStats) -> fmt::Result {
    writeln!(
        f,
        "║   {:<13}{:>6} entries, height {:>4}       ║",
        name, t.entries, t.height
    )
}

impl fmt::Display for DirectoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════════════╗")?;
        writeln!(f, "║           req-idx Directory Report               ║")?;
        writeln!(f, "╠══════════════════════════════════════════════════╣")?;
        writeln!(f, "║ Records: {:>39} ║", self.records)?;
        writeln!(
            f,
            "║   open {:>5}  in-progress {:>5}  closed {:>5}    ║",
            self.status.open,
            self.status.in_progress,
            self.status.closed + self.status.resolved
        )?;
        writeln!(f, "╠──────────────────────────────────────────────────╣")?;
        writeln!(f, "║ Indexes:                                         ║")?;
        tree_line(f, "bst/id", &self.by_id)?;
        tree_line(f, "avl/created", &self.by_created)?;
        tree_line(f, "rb/priority", &self.by_priority)?;
        let black = self
            .black_height
            .map_or_else(|| "broken".to_string(), |h| h.to_string());
        writeln!(f, "║   rb black height: {:>10}                    ║", black)?;
        writeln!(f, "║   job heap:        {:>10}                    ║", self.heap_len)?;
        writeln!(f, "╠──────────────────────────────────────────────────╣")?;
        writeln!(f, "║ Location graph:                                  ║")?;
        writeln!(f, "║   nodes:           {:>10}                    ║", self.graph_nodes)?;
        writeln!(f, "║   edges:           {:>10}                    ║", self.graph_edges)?;
        writeln!(f, "╚══════════════════════════════════════════════════╝")?;
        Ok(())
    }
}
