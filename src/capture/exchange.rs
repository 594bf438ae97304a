use std::future::Future;

use crate::Result;
use crate::capture::model::{Header, Param, PostData};

/// host 交付的一次已完成的请求/响应
///
/// 响应体不在这里，需要通过 [`ContentFetcher`] 异步获取。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Exchange {
    /// 在 host 交付序列中的位置，fetcher 用它定位响应体
    pub index: usize,
    /// `xhr` / `fetch` / `image` ...，host 未提供时为 None
    pub resource_type: Option<String>,
    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
    pub query_string: Vec<Header>,
    pub post_data: Option<PostData>,
    pub status: u16,
    pub status_text: String,
    pub response_headers: Vec<Header>,
    /// 响应的 content type
    pub mime_type: Option<String>,
}

impl Exchange {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            status: 200,
            status_text: "OK".to_string(),
            ..Self::default()
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_resource_type(mut self, resource_type: &str) -> Self {
        self.resource_type = Some(resource_type.to_string());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.post_data = Some(PostData::from_text(text));
        self
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.post_data = Some(PostData::from_params(params));
        self
    }

    pub fn with_status(mut self, status: u16, status_text: &str) -> Self {
        self.status = status;
        self.status_text = status_text.to_string();
        self
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }

    /// 请求 header 值，名称大小写不敏感
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// 异步获取到的响应体
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseContent {
    pub body: Option<String>,
    pub encoding: Option<String>,
}

impl ResponseContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            encoding: None,
        }
    }
}

/// 获取响应体的能力，由 host 注入
///
/// 核心逻辑只依赖这个 trait，不依赖任何具体的 host 运行时。
pub trait ContentFetcher {
    fn fetch(&self, exchange: &Exchange) -> impl Future<Output = Result<ResponseContent>> + Send;
}
