use std::fs;
use std::future::Future;
use std::path::Path;

use tracing::debug;

use crate::capture::exchange::{ContentFetcher, Exchange, ResponseContent};
use crate::har::types::{Entry, Har};
use crate::{ReqcopyError, Result};

/// 从 HAR 文件中读取的已完成请求，充当 host 的角色
#[derive(Debug, Clone, Default)]
pub struct HarArchive {
    entries: Vec<Entry>,
}

impl HarArchive {
    /// 从文件加载
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let archive = Self::parse(&content)
            .map_err(|e| ReqcopyError::ParseError(format!("{}: {}", path.display(), e)))?;
        debug!(
            path = %path.display(),
            entries = archive.len(),
            "Loaded HAR archive"
        );
        Ok(archive)
    }

    /// 从字符串内容解析
    pub fn parse(content: &str) -> Result<Self> {
        let har: Har = serde_json::from_str(content)?;
        Ok(Self {
            entries: har.log.entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// 按文件中的顺序交付所有请求（不含响应体）
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| to_exchange(index, entry))
            .collect()
    }
}

fn to_exchange(index: usize, entry: &Entry) -> Exchange {
    let request = &entry.request;
    let response = &entry.response;

    Exchange {
        index,
        resource_type: entry.resource_type.clone(),
        method: request.method.clone(),
        url: request.url.clone(),
        headers: request.headers.clone(),
        query_string: request.query_string.clone(),
        post_data: request.post_data.clone().map(Into::into),
        // 0 / -1 表示请求未完成
        status: u16::try_from(response.status).unwrap_or(0),
        status_text: response.status_text.clone(),
        response_headers: response.headers.clone(),
        mime_type: response.content.mime_type.clone(),
    }
}

impl ContentFetcher for HarArchive {
    fn fetch(&self, exchange: &Exchange) -> impl Future<Output = Result<ResponseContent>> + Send {
        let result = self
            .entries
            .get(exchange.index)
            .map(|entry| ResponseContent {
                body: entry.response.content.text.clone(),
                encoding: entry.response.content.encoding.clone(),
            })
            .ok_or_else(|| {
                ReqcopyError::FetchError(format!("HAR 中不存在第 {} 条请求", exchange.index))
            });
        std::future::ready(result)
    }
}
