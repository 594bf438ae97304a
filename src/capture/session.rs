use std::collections::VecDeque;

use tracing::debug;

use crate::capture::filter::RequestFilter;
use crate::capture::model::CapturedRequest;
use crate::export::{ExportFormat, export_as};
use crate::{ReqcopyError, Result};

/// 最多保留的请求数
pub const MAX_REQUESTS: usize = 500;

/// 一次捕获会话：已捕获的请求（最新在前）和当前选中项
///
/// 选中项按记录 id 跟踪，新记录插到前面时仍指向同一条请求。
#[derive(Debug, Clone)]
pub struct CaptureSession {
    requests: VecDeque<CapturedRequest>,
    capacity: usize,
    selected_id: Option<String>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::with_capacity(MAX_REQUESTS)
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定容量（测试用），不超过 [`MAX_REQUESTS`]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_REQUESTS);
        Self {
            requests: VecDeque::with_capacity(capacity),
            capacity,
            selected_id: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 插入到最前面；超出容量时淘汰并返回最旧的一条
    pub fn push(&mut self, request: CapturedRequest) -> Option<CapturedRequest> {
        self.requests.push_front(request);
        if self.requests.len() <= self.capacity {
            return None;
        }

        let evicted = self.requests.pop_back()?;
        debug!(id = %evicted.id, url = %evicted.url, "Evicted oldest request");
        if self.selected_id.as_deref() == Some(evicted.id.as_str()) {
            self.selected_id = None;
        }
        Some(evicted)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CapturedRequest> {
        self.requests.get(index)
    }

    /// 最新在前
    pub fn iter(&self) -> impl Iterator<Item = &CapturedRequest> {
        self.requests.iter()
    }

    /// 清空所有请求和选中项
    pub fn clear(&mut self) {
        self.requests.clear();
        self.selected_id = None;
    }

    /// 按过滤器筛选，返回 (索引, 请求)
    pub fn filtered(&self, filter: &RequestFilter) -> Vec<(usize, &CapturedRequest)> {
        self.requests
            .iter()
            .enumerate()
            .filter(|(_, req)| filter.matches(req))
            .collect()
    }

    /// 选中指定索引，索引无效时返回 false 且不改变选中项
    pub fn select(&mut self, index: usize) -> bool {
        match self.requests.get(index) {
            Some(req) => {
                self.selected_id = Some(req.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.requests.iter().position(|req| req.id == id)
    }

    pub fn selected(&self) -> Option<&CapturedRequest> {
        self.selected_index().and_then(|i| self.requests.get(i))
    }

    /// 下移一条（更旧的请求），已在末尾时不动
    pub fn select_next(&mut self) -> bool {
        let next = match self.selected_index() {
            Some(i) => i + 1,
            None => 0,
        };
        next < self.requests.len() && self.select(next)
    }

    /// 上移一条（更新的请求），已在顶部或未选中时不动
    pub fn select_previous(&mut self) -> bool {
        match self.selected_index() {
            Some(i) if i > 0 => self.select(i - 1),
            _ => false,
        }
    }

    /// 按指定格式导出当前选中的请求
    pub fn export_selected(&self, format: ExportFormat) -> Result<String> {
        let request = self.selected().ok_or(ReqcopyError::NoSelection)?;
        Ok(export_as(format, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::exchange::{Exchange, ResponseContent};

    fn record(path: &str) -> CapturedRequest {
        CapturedRequest::from_exchange(
            Exchange::new("GET", &format!("https://example.com{path}")),
            ResponseContent::new("{}"),
            false,
        )
    }

    #[test]
    fn test_newest_first() {
        let mut session = CaptureSession::new();
        session.push(record("/1"));
        session.push(record("/2"));
        session.push(record("/3"));

        let urls: Vec<&str> = session.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/3",
                "https://example.com/2",
                "https://example.com/1"
            ]
        );
    }

    #[test]
    fn test_eviction_returns_oldest() {
        let mut session = CaptureSession::with_capacity(2);
        assert!(session.push(record("/1")).is_none());
        assert!(session.push(record("/2")).is_none());
        let evicted = session.push(record("/3")).unwrap();
        assert_eq!(evicted.url, "https://example.com/1");
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_default_capacity_bound() {
        let mut session = CaptureSession::new();
        for i in 0..(MAX_REQUESTS + 25) {
            session.push(record(&format!("/{i}")));
            assert!(session.len() <= MAX_REQUESTS);
        }
        assert_eq!(session.len(), MAX_REQUESTS);
        // 最旧的 25 条被淘汰
        assert_eq!(
            session.get(MAX_REQUESTS - 1).unwrap().url,
            "https://example.com/25"
        );
        assert_eq!(
            session.get(0).unwrap().url,
            format!("https://example.com/{}", MAX_REQUESTS + 24)
        );
    }

    #[test]
    fn test_capacity_is_clamped() {
        assert_eq!(CaptureSession::with_capacity(10_000).capacity(), MAX_REQUESTS);
        assert_eq!(CaptureSession::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_selection_follows_record() {
        let mut session = CaptureSession::new();
        session.push(record("/a"));
        assert!(session.select(0));

        session.push(record("/b"));
        assert_eq!(session.selected_index(), Some(1));
        assert_eq!(session.selected().unwrap().url, "https://example.com/a");
    }

    #[test]
    fn test_selection_cleared_on_eviction() {
        let mut session = CaptureSession::with_capacity(1);
        session.push(record("/a"));
        session.select(0);
        session.push(record("/b"));
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_select_invalid_index() {
        let mut session = CaptureSession::new();
        session.push(record("/a"));
        session.select(0);
        assert!(!session.select(5));
        assert_eq!(session.selected_index(), Some(0));
    }

    #[test]
    fn test_navigation() {
        let mut session = CaptureSession::new();
        session.push(record("/1"));
        session.push(record("/2"));

        assert!(!session.select_previous());
        assert!(session.select_next());
        assert_eq!(session.selected_index(), Some(0));
        assert!(session.select_next());
        assert_eq!(session.selected_index(), Some(1));
        assert!(!session.select_next());
        assert_eq!(session.selected_index(), Some(1));
        assert!(session.select_previous());
        assert_eq!(session.selected_index(), Some(0));
    }

    #[test]
    fn test_clear() {
        let mut session = CaptureSession::new();
        session.push(record("/1"));
        session.select(0);
        session.clear();
        assert!(session.is_empty());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_export_without_selection() {
        let mut session = CaptureSession::new();
        session.push(record("/1"));
        let err = session.export_selected(ExportFormat::Json).unwrap_err();
        assert!(matches!(err, ReqcopyError::NoSelection));
        assert_eq!(err.to_string(), "No request selected");
    }

    #[test]
    fn test_export_selected() {
        let mut session = CaptureSession::new();
        session.push(record("/1"));
        session.select(0);
        let text = session.export_selected(ExportFormat::Curl).unwrap();
        assert!(text.starts_with("curl 'https://example.com/1'"));
    }
}
