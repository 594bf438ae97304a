use regex::{Regex, RegexBuilder};

use crate::capture::model::CapturedRequest;

/// 搜索条件：先按正则匹配，非法正则退化为子串匹配
#[derive(Debug, Clone)]
enum SearchPattern {
    Regex(Regex),
    Substring(String),
}

/// 列表过滤器：搜索文本 + 仅 GraphQL 开关
///
/// 搜索文本匹配 `"METHOD URL"`，大小写不敏感。
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pattern: Option<SearchPattern>,
    graphql_only: bool,
}

impl RequestFilter {
    pub fn new(search: &str, graphql_only: bool) -> Self {
        let search = search.trim();
        let pattern = if search.is_empty() {
            None
        } else {
            match RegexBuilder::new(search).case_insensitive(true).build() {
                Ok(re) => Some(SearchPattern::Regex(re)),
                Err(e) => {
                    tracing::debug!("Invalid filter regex {:?}, using substring match: {}", search, e);
                    Some(SearchPattern::Substring(search.to_lowercase()))
                }
            }
        };

        Self {
            pattern,
            graphql_only,
        }
    }

    /// 不过滤任何请求
    pub fn all() -> Self {
        Self::default()
    }

    pub fn graphql_only(&self) -> bool {
        self.graphql_only
    }

    /// 是否设置了任何条件
    pub fn is_active(&self) -> bool {
        self.pattern.is_some() || self.graphql_only
    }

    pub fn matches(&self, request: &CapturedRequest) -> bool {
        if self.graphql_only && !request.is_graphql {
            return false;
        }

        let Some(pattern) = &self.pattern else {
            return true;
        };
        let search_text = request.search_text();
        match pattern {
            SearchPattern::Regex(re) => re.is_match(&search_text),
            SearchPattern::Substring(needle) => search_text.to_lowercase().contains(needle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::exchange::{Exchange, ResponseContent};

    fn record(method: &str, url: &str, is_graphql: bool) -> CapturedRequest {
        CapturedRequest::from_exchange(
            Exchange::new(method, url),
            ResponseContent::default(),
            is_graphql,
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RequestFilter::new("   ", false);
        assert!(!filter.is_active());
        assert!(filter.matches(&record("GET", "https://example.com/a", false)));
    }

    #[test]
    fn test_all_matches_everything() {
        let filter = RequestFilter::all();
        assert!(!filter.is_active());
        assert!(filter.matches(&record("GET", "https://example.com/a", false)));
        assert!(filter.matches(&record("POST", "https://example.com/graphql", true)));
    }

    #[test]
    fn test_regex_is_case_insensitive() {
        let filter = RequestFilter::new("^post .*/USERS$", false);
        assert!(filter.matches(&record("POST", "https://example.com/api/users", false)));
        assert!(!filter.matches(&record("GET", "https://example.com/api/users", false)));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let filter = RequestFilter::new("users(", false);
        assert!(filter.matches(&record("GET", "https://example.com/Users(1)", false)));
        assert!(!filter.matches(&record("GET", "https://example.com/users/1", false)));
    }

    #[test]
    fn test_method_is_searchable() {
        let filter = RequestFilter::new("delete", false);
        assert!(filter.matches(&record("DELETE", "https://example.com/a", false)));
        assert!(!filter.matches(&record("GET", "https://example.com/a", false)));
    }

    #[test]
    fn test_graphql_only() {
        let filter = RequestFilter::new("", true);
        assert!(filter.is_active());
        assert!(filter.matches(&record("POST", "https://example.com/graphql", true)));
        assert!(!filter.matches(&record("POST", "https://example.com/graphql", false)));
    }
}
