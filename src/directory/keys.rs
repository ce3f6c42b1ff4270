use std::cmp::Ordering;
use std::time::SystemTime;

use crate::core::{Priority, Record};

/// AVL 键：创建时间，插入序号兜底（相同时间戳不互相覆盖）
pub type CreatedKey = (SystemTime, u64);

/// 红黑树键：优先级取负（高优先级在前），同优先级按插入序号
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    neg_priority: i32,
    seq: u64,
}

impl PriorityKey {
    pub fn new(priority: Priority, seq: u64) -> Self {
        Self {
            neg_priority: -priority.ordinal(),
            seq,
        }
    }
}

/// 任务堆元素：ETA 早者优先；ETA 相同时优先级高者优先；再按插入序号
#[derive(Clone, Debug)]
pub struct JobItem {
    pub eta: SystemTime,
    pub priority: Priority,
    pub seq: u64,
    /// 记录在目录中的槽位
    pub slot: usize,
}

impl JobItem {
    pub fn new(record: &Record, seq: u64, slot: usize) -> Self {
        Self {
            eta: record.eta,
            priority: record.priority,
            seq,
            slot,
        }
    }
}

impl Ord for JobItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.eta
            .cmp(&other.eta)
            .then_with(|| other.priority.cmp(&self.priority))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for JobItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for JobItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JobItem {}
