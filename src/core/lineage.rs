use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::record::{RecordId, Status};

/// 状态迁移原因
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// `update_status` 单步推进
    Advance,
    /// `resolve_request` 强制关闭
    Resolve,
    /// 父记录关闭后的级联关闭
    Cascade,
}

/// 状态迁移事件（迁移操作的显式返回值，替代记录上的回调钩子）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusEvent {
    pub id: RecordId,
    pub from: Status,
    pub to: Status,
    pub cause: TransitionCause,
    pub at: std::time::SystemTime,
}

impl StatusEvent {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = match self.cause {
            TransitionCause::Advance => "advance",
            TransitionCause::Resolve => "resolve",
            TransitionCause::Cascade => "cascade",
        };
        write!(f, "{}: {} -> {} ({})", self.id, self.from, self.to, cause)
    }
}
