use std::sync::Arc;
use wildmatch::WildMatch;

/// Matcher 抽象接口：对记录 id 做匹配
pub trait Matcher: Send + Sync {
    fn matches(&self, id: &str) -> bool;
    /// 固定前缀（如果有），用于在完整匹配前先做廉价过滤
    fn prefix(&self) -> Option<&str> {
        None
    }
}

/// 包含匹配（大小写无关）
pub struct ExactMatcher {
    pattern: String,
}

impl ExactMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_uppercase(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, id: &str) -> bool {
        id.to_uppercase().contains(&self.pattern)
    }
}

/// 通配符匹配 (Glob)，大小写无关
pub struct GlobMatcher {
    wild: WildMatch,
    prefix: Option<String>,
}

impl GlobMatcher {
    pub fn new(pattern: &str) -> Self {
        let pattern = pattern.to_uppercase();
        // 提取通配符前的固定前缀
        let prefix = pattern
            .split(['*', '?'])
            .next()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Self {
            wild: WildMatch::new(&pattern),
            prefix,
        }
    }
}

impl Matcher for GlobMatcher {
    fn matches(&self, id: &str) -> bool {
        self.wild.matches(&id.to_uppercase())
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// 匹配器工厂：含 `*` / `?` 视为 glob，否则为包含匹配
pub fn create_matcher(pattern: &str) -> Arc<dyn Matcher> {
    if pattern.contains(['*', '?']) {
        Arc::new(GlobMatcher::new(pattern))
    } else {
        Arc::new(ExactMatcher::new(pattern))
    }
}
