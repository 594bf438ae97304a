use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::Result;
use crate::capture::classifier::classify;
use crate::capture::exchange::{ContentFetcher, Exchange, ResponseContent};
use crate::capture::model::CapturedRequest;
use crate::capture::session::CaptureSession;

/// 驱动捕获流程：分类 -> 异步获取响应体 -> 写入会话
///
/// 所有写入都在 controller 自己的任务上依次完成；
/// 并发的只有响应体的获取，写入顺序是获取完成的顺序。
pub struct CaptureController<F> {
    session: CaptureSession,
    fetcher: Arc<F>,
}

impl<F> CaptureController<F>
where
    F: ContentFetcher + Send + Sync + 'static,
{
    pub fn new(fetcher: F) -> Self {
        Self::with_session(fetcher, CaptureSession::new())
    }

    pub fn with_session(fetcher: F, session: CaptureSession) -> Self {
        Self {
            session,
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CaptureSession {
        &mut self.session
    }

    pub fn into_session(self) -> CaptureSession {
        self.session
    }

    /// 处理一条已完成的请求，返回是否写入了会话
    pub async fn on_request_finished(&mut self, exchange: Exchange) -> bool {
        let classification = classify(&exchange);
        if !classification.api_relevant {
            debug!(url = %exchange.url, "Skipped non-API request");
            return false;
        }

        let content = self.fetcher.fetch(&exchange).await;
        self.store(exchange, content, classification.is_graphql)
    }

    /// 批量处理：响应体并发获取，按完成顺序写入
    ///
    /// 返回写入的条数。没有超时，某个获取卡住只会延迟它自己。
    pub async fn capture_all(&mut self, exchanges: Vec<Exchange>) -> usize {
        let mut pending = JoinSet::new();
        let mut skipped = 0usize;

        for exchange in exchanges {
            let classification = classify(&exchange);
            if !classification.api_relevant {
                debug!(url = %exchange.url, "Skipped non-API request");
                skipped += 1;
                continue;
            }

            let fetcher = Arc::clone(&self.fetcher);
            pending.spawn(async move {
                let content = fetcher.fetch(&exchange).await;
                (exchange, content, classification.is_graphql)
            });
        }

        let mut captured = 0usize;
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok((exchange, content, is_graphql)) => {
                    if self.store(exchange, content, is_graphql) {
                        captured += 1;
                    }
                }
                Err(e) => warn!("Content fetch task failed: {}", e),
            }
        }

        info!(
            captured,
            skipped,
            total = self.session.len(),
            "Capture finished"
        );
        captured
    }

    fn store(
        &mut self,
        exchange: Exchange,
        content: Result<ResponseContent>,
        is_graphql: bool,
    ) -> bool {
        match content {
            Ok(content) => {
                let request = CapturedRequest::from_exchange(exchange, content, is_graphql);
                debug!(
                    id = %request.id,
                    method = %request.method,
                    url = %request.url,
                    is_graphql,
                    "Captured request"
                );
                self.session.push(request);
                true
            }
            Err(e) => {
                // Best-effort：获取失败只记录警告，丢弃这条请求
                warn!(url = %exchange.url, "Error capturing request: {}", e);
                false
            }
        }
    }
}
