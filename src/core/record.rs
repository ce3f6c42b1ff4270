use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

pub type RecordId = String;

/// 优先级（序数越大越紧急）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Priority {
    pub fn ordinal(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        };
        f.pad(s)
    }
}

/// 工单状态机：Open → InProgress → Closed；Resolved / Closed 为终态
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Resolved | Status::Closed)
    }

    /// 单步推进；终态返回 None（调用方视为 no-op）
    pub fn advance(self) -> Option<Status> {
        match self {
            Status::Open => Some(Status::InProgress),
            Status::InProgress => Some(Status::Closed),
            Status::Resolved | Status::Closed => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Open => "Open",
            Status::InProgress => "InProgress",
            Status::Resolved => "Resolved",
            Status::Closed => "Closed",
        };
        f.pad(s)
    }
}

/// 服务请求记录
///
/// `status` / `updated_at` 只由 `Directory` 的状态迁移写入；
/// `Directory` 对外只暴露 `&Record`。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub location: String,
    pub created_at: SystemTime,
    pub updated_at: Option<SystemTime>,
    pub priority: Priority,
    pub status: Status,
    pub parent_id: Option<RecordId>,
    /// 依赖本记录的子记录 id（有序）
    pub dependents: Vec<RecordId>,
    /// ETA：任务堆的主排序键
    pub eta: SystemTime,
}

impl Record {
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
        priority: Priority,
        created_at: SystemTime,
        eta: SystemTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            location: location.into(),
            created_at,
            updated_at: None,
            priority,
            status: Status::Open,
            parent_id: None,
            dependents: Vec::new(),
            eta,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<RecordId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_dependents<I, S>(mut self, dependents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RecordId>,
    {
        self.dependents = dependents.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_dependents(&self) -> bool {
        !self.dependents.is_empty()
    }
}
