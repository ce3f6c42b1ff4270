use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// 地点名模糊建议（"did you mean"）
pub struct LocationSuggester {
    matcher: SkimMatcherV2,
}

impl Default for LocationSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSuggester {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// 按得分降序返回命中的地点名；同分保持输入顺序
    pub fn suggest<'a>(
        &self,
        keyword: &str,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(&'a str, i64)> {
        let mut results: Vec<(&str, i64)> = labels
            .into_iter()
            .filter_map(|label| {
                self.matcher
                    .fuzzy_match(label, keyword.trim())
                    .map(|score| (label, score))
            })
            .collect();
        results.sort_by_key(|k| std::cmp::Reverse(k.1));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_closest_labels() {
        let labels = ["Durban North", "Glenwood", "Umhlanga", "Morningside", "Springfield"];
        let s = LocationSuggester::new();

        let hits = s.suggest("glnwd", labels);
        assert_eq!(hits.first().map(|h| h.0), Some("Glenwood"));

        assert!(s.suggest("zzzz", labels).is_empty());
    }
}
