use std::collections::{HashMap, HashSet};
use std::time::SystemTime;

use crate::core::seed::{seed_records, seed_topology};
use crate::core::{Record, RecordId, Status, StatusEvent, TransitionCause};
use crate::directory::keys::{CreatedKey, JobItem, PriorityKey};
use crate::error::DirectoryError;
use crate::graph::{LocationGraph, SpanningForest, Topology};
use crate::index::{AvlTree, Bst, MinHeap, OrderedIndex, RedBlackTree};
use crate::query::{create_matcher, LocationSuggester};
use crate::stats::{DirectoryReport, StatusCounts, TreeStats};

pub const LOCATION_NOT_FOUND: &str = "Location not found.";
const PATH_SEPARATOR: &str = " → ";

/// 排序视图：id（BST）/ 创建时间（AVL）/ 优先级（红黑树）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Created,
    Priority,
}

/// 记录目录：持有唯一的记录真相，并在其上派生各索引。
///
/// - 记录按插入顺序落在 `records`，`slots` 为 id → 槽位
/// - 各索引的 value 都是槽位；读视图只投影，不修改记录
/// - 索引只整体重建（`rebuild_indexes`），不做增量维护
/// - 状态迁移是唯一会修改记录的入口
pub struct Directory {
    records: Vec<Record>,
    slots: HashMap<RecordId, usize>,
    by_id: Bst<RecordId, usize>,
    by_created: AvlTree<CreatedKey, usize>,
    by_priority: RedBlackTree<PriorityKey, usize>,
    jobs: MinHeap<JobItem>,
    graph: LocationGraph,
    distance_unit: String,
}

impl Directory {
    /// 校验记录集（id 唯一、父/子引用存在）、补齐父子链接后建索引
    pub fn new(mut records: Vec<Record>, graph: LocationGraph) -> Result<Self, DirectoryError> {
        let mut slots = HashMap::with_capacity(records.len());
        for (slot, r) in records.iter().enumerate() {
            if slots.insert(r.id.clone(), slot).is_some() {
                return Err(DirectoryError::DuplicateRecord(r.id.clone()));
            }
        }
        for r in &records {
            check_links(r, &slots)?;
        }
        link_children(&mut records, &slots);

        let mut dir = Self {
            records,
            slots,
            by_id: Bst::new(),
            by_created: AvlTree::new(),
            by_priority: RedBlackTree::new(),
            jobs: MinHeap::new(),
            graph,
            distance_unit: "km".to_string(),
        };
        dir.rebuild_indexes();
        Ok(dir)
    }

    /// 内置种子记录 + 给定拓扑
    pub fn seeded_with(topology: &Topology, anchor: SystemTime) -> Result<Self, DirectoryError> {
        let graph = topology.build()?;
        Self::new(seed_records(anchor), graph)
    }

    /// 内置种子记录 + 内置五节点拓扑
    pub fn seeded(anchor: SystemTime) -> Result<Self, DirectoryError> {
        Self::seeded_with(&seed_topology(), anchor)
    }

    pub fn with_distance_unit(mut self, unit: impl Into<String>) -> Self {
        self.distance_unit = unit.into();
        self
    }

    /// 丢弃所有索引并按插入顺序重新构建
    pub fn rebuild_indexes(&mut self) {
        self.by_id = Bst::new();
        self.by_created = AvlTree::new();
        self.by_priority = RedBlackTree::new();
        self.jobs = MinHeap::new();

        for (slot, r) in self.records.iter().enumerate() {
            let seq = slot as u64;
            self.by_id.insert(r.id.clone(), slot);
            self.by_created.insert((r.created_at, seq), slot);
            self.by_priority.insert(PriorityKey::new(r.priority, seq), slot);
            self.jobs.push(JobItem::new(r, seq, slot));
        }

        tracing::info!(
            "Directory indexes rebuilt: {} records (bst h={}, avl h={}, rb h={})",
            self.records.len(),
            self.by_id.height(),
            self.by_created.height(),
            self.by_priority.height()
        );
    }

    /// 提交路径：追加一条记录后整体重建索引。
    ///
    /// 若记录带父 id 且父记录尚未列出它，则追加到父记录的 dependents 末尾。
    pub fn add_record(&mut self, record: Record) -> Result<(), DirectoryError> {
        if self.slots.contains_key(&record.id) {
            return Err(DirectoryError::DuplicateRecord(record.id));
        }
        check_links(&record, &self.slots)?;

        if let Some(parent) = record.parent_id.as_ref().and_then(|p| self.slots.get(p)) {
            let parent = &mut self.records[*parent];
            if !parent.dependents.contains(&record.id) {
                parent.dependents.push(record.id.clone());
            }
        }

        tracing::info!("Record {} added", record.id);
        self.slots.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        self.rebuild_indexes();
        Ok(())
    }

    // ---- 读视图 ----

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 全部记录（插入顺序）
    pub fn get_all(&self) -> &[Record] {
        &self.records
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Record> {
        self.slots.get(id).map(|&slot| &self.records[slot])
    }

    pub fn sort_by_id(&self) -> Vec<&Record> {
        self.project(self.by_id.in_order().map(|(_, slot)| *slot))
    }

    pub fn sort_by_created(&self) -> Vec<&Record> {
        self.project(self.by_created.in_order().map(|(_, slot)| *slot))
    }

    pub fn sort_by_priority(&self) -> Vec<&Record> {
        self.project(self.by_priority.in_order().map(|(_, slot)| *slot))
    }

    /// 堆序最小的 n 条（在堆副本上逐个 pop）
    pub fn get_next_jobs(&self, n: usize) -> Vec<&Record> {
        let mut heap = self.jobs.clone();
        let slots = std::iter::from_fn(|| heap.pop())
            .take(n)
            .map(|job| job.slot);
        self.project(slots)
    }

    pub fn sorted(&self, key: SortKey) -> Vec<&Record> {
        match key {
            SortKey::Id => self.sort_by_id(),
            SortKey::Created => self.sort_by_created(),
            SortKey::Priority => self.sort_by_priority(),
        }
    }

    /// 按 id 过滤（包含或 glob），结果按 id 升序
    pub fn filter_ids(&self, pattern: &str) -> Vec<&Record> {
        self.filter_sorted(pattern, SortKey::Id)
    }

    /// 在 `key` 对应的排序视图上按 id 过滤，保持该视图的顺序
    pub fn filter_sorted(&self, pattern: &str, key: SortKey) -> Vec<&Record> {
        let matcher = create_matcher(pattern);
        self.sorted(key)
            .into_iter()
            .filter(|r| {
                matcher
                    .prefix()
                    .map_or(true, |p| r.id.to_uppercase().starts_with(p))
            })
            .filter(|r| matcher.matches(&r.id))
            .collect()
    }

    fn project(&self, slots: impl Iterator<Item = usize>) -> Vec<&Record> {
        slots.map(|slot| &self.records[slot]).collect()
    }

    // ---- 状态迁移 ----

    /// 单步推进状态：Open → InProgress → Closed；终态为 no-op（返回空事件）。
    /// 推进到 Closed 时级联关闭所有后代。
    pub fn update_status(&mut self, id: &str) -> Result<Vec<StatusEvent>, DirectoryError> {
        let slot = self.slot_of(id)?;
        let Some(next) = self.records[slot].status.advance() else {
            tracing::debug!("{} already terminal, status unchanged", id);
            return Ok(Vec::new());
        };

        let now = SystemTime::now();
        let mut events = vec![self.set_status(slot, next, TransitionCause::Advance, now)];
        if next == Status::Closed && self.records[slot].has_dependents() {
            events.extend(self.close_descendants(slot, now));
        }
        Ok(events)
    }

    /// 强制关闭记录，并无条件级联关闭所有后代（不论其当前状态）
    pub fn resolve_request(&mut self, id: &str) -> Result<Vec<StatusEvent>, DirectoryError> {
        let slot = self.slot_of(id)?;
        let now = SystemTime::now();
        let mut events = vec![self.set_status(slot, Status::Closed, TransitionCause::Resolve, now)];
        if self.records[slot].has_dependents() {
            events.extend(self.close_descendants(slot, now));
        }
        tracing::info!("{} resolved, {} records touched", id, events.len());
        Ok(events)
    }

    fn slot_of(&self, id: &str) -> Result<usize, DirectoryError> {
        self.slots
            .get(id)
            .copied()
            .ok_or_else(|| DirectoryError::RecordNotFound(id.to_string()))
    }

    fn set_status(
        &mut self,
        slot: usize,
        to: Status,
        cause: TransitionCause,
        at: SystemTime,
    ) -> StatusEvent {
        let record = &mut self.records[slot];
        let from = record.status;
        record.status = to;
        record.updated_at = Some(at);
        tracing::debug!("{}: {} -> {} ({:?})", record.id, from, to, cause);
        StatusEvent {
            id: record.id.clone(),
            from,
            to,
            cause,
            at,
        }
    }

    /// 显式栈深度优先：按 dependents 列表顺序访问后代；visited 防环
    fn close_descendants(&mut self, root: usize, at: SystemTime) -> Vec<StatusEvent> {
        let mut events = Vec::new();
        let mut visited = HashSet::from([root]);
        let mut stack = self.dependent_slots(root);
        stack.reverse();

        while let Some(slot) = stack.pop() {
            if !visited.insert(slot) {
                continue;
            }
            events.push(self.set_status(slot, Status::Closed, TransitionCause::Cascade, at));
            stack.extend(self.dependent_slots(slot).into_iter().rev());
        }
        events
    }

    fn dependent_slots(&self, slot: usize) -> Vec<usize> {
        self.records[slot]
            .dependents
            .iter()
            .filter_map(|d| self.slots.get(d).copied())
            .collect()
    }

    // ---- 地点图 ----

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    fn location_index(&self, name: &str) -> Result<usize, DirectoryError> {
        self.graph
            .find_index_by_label(name)
            .ok_or_else(|| DirectoryError::LocationNotFound(name.to_string()))
    }

    fn labels_of(&self, order: impl Iterator<Item = usize>) -> Vec<&str> {
        order.filter_map(|i| self.graph.label(i)).collect()
    }

    pub fn bfs_path(&self, location: &str) -> Result<Vec<&str>, DirectoryError> {
        let start = self.location_index(location)?;
        Ok(self.labels_of(self.graph.bfs(start)))
    }

    pub fn dfs_path(&self, location: &str) -> Result<Vec<&str>, DirectoryError> {
        let start = self.location_index(location)?;
        Ok(self.labels_of(self.graph.dfs(start)))
    }

    /// BFS 路径文本；地点不存在时返回 "Location not found."
    pub fn run_bfs(&self, location: &str) -> String {
        self.bfs_path(location)
            .map(|p| p.join(PATH_SEPARATOR))
            .unwrap_or_else(|_| LOCATION_NOT_FOUND.to_string())
    }

    pub fn run_dfs(&self, location: &str) -> String {
        self.dfs_path(location)
            .map(|p| p.join(PATH_SEPARATOR))
            .unwrap_or_else(|_| LOCATION_NOT_FOUND.to_string())
    }

    pub fn minimum_spanning_network(&self) -> SpanningForest {
        self.graph.minimum_spanning_tree()
    }

    /// 逐边报告 + 总距离；空图或不连通图返回空串
    pub fn get_mst_summary(&self) -> String {
        let forest = self.minimum_spanning_network();
        if !forest.spans(self.graph.node_count()) {
            return String::new();
        }

        let unit = &self.distance_unit;
        let label = |i: usize| self.graph.label(i).unwrap_or("?");
        let mut lines: Vec<String> = forest
            .edges
            .iter()
            .map(|e| format!("{} — {} : {:.1} {unit}", label(e.from), label(e.to), e.weight))
            .collect();
        lines.push(format!("Total Distance: {:.1} {unit}", forest.total));
        lines.join("\n")
    }

    /// 模糊匹配的地点名建议（最多 `limit` 个）
    pub fn suggest_locations(&self, name: &str, limit: usize) -> Vec<&str> {
        LocationSuggester::new()
            .suggest(name, self.graph.labels())
            .into_iter()
            .take(limit)
            .map(|(label, _)| label)
            .collect()
    }

    // ---- 统计 ----

    pub fn report(&self) -> DirectoryReport {
        let mut status = StatusCounts::default();
        for r in &self.records {
            match r.status {
                Status::Open => status.open += 1,
                Status::InProgress => status.in_progress += 1,
                Status::Resolved => status.resolved += 1,
                Status::Closed => status.closed += 1,
            }
        }

        DirectoryReport {
            records: self.records.len(),
            status,
            by_id: tree_stats(&self.by_id),
            by_created: tree_stats(&self.by_created),
            by_priority: tree_stats(&self.by_priority),
            black_height: self.by_priority.black_height(),
            heap_len: self.jobs.len(),
            graph_nodes: self.graph.node_count(),
            graph_edges: self.graph.edge_count(),
        }
    }
}

fn tree_stats<K: Ord, V>(index: &impl OrderedIndex<K, V>) -> TreeStats {
    TreeStats {
        entries: index.len(),
        height: index.height(),
    }
}

/// 父记录的 dependents 未列出子记录时补到末尾，使级联能到达所有子记录
fn link_children(records: &mut [Record], slots: &HashMap<RecordId, usize>) {
    let links: Vec<(usize, RecordId)> = records
        .iter()
        .filter_map(|r| {
            let parent = *slots.get(r.parent_id.as_ref()?)?;
            (!records[parent].dependents.contains(&r.id)).then(|| (parent, r.id.clone()))
        })
        .collect();
    for (parent, child) in links {
        tracing::debug!("Linking {} under parent {}", child, records[parent].id);
        records[parent].dependents.push(child);
    }
}

fn check_links(record: &Record, slots: &HashMap<RecordId, usize>) -> Result<(), DirectoryError> {
    if let Some(parent) = &record.parent_id {
        if !slots.contains_key(parent) {
            return Err(DirectoryError::UnknownParent {
                id: record.id.clone(),
                parent: parent.clone(),
            });
        }
    }
    if let Some(dependent) = record.dependents.iter().find(|d| !slots.contains_key(*d)) {
        return Err(DirectoryError::UnknownDependent {
            id: record.id.clone(),
            dependent: dependent.clone(),
        });
    }
    Ok(())
}
