use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capture::exchange::{Exchange, ResponseContent};

/// 名称/值对，用于 headers 和 query string，保持原始顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 表单参数 (`application/x-www-form-urlencoded` / multipart)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// 文件字段等可能没有值
    pub value: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// 请求体：原始文本和/或结构化参数
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostData {
    pub mime_type: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl PostData {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn from_params(params: Vec<Param>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// 非空的原始文本
    pub fn raw_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// 状态码分类，决定列表中的颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirect,
    Error,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        if status < 300 {
            StatusClass::Success
        } else if status < 400 {
            StatusClass::Redirect
        } else {
            StatusClass::Error
        }
    }
}

/// 一条被捕获的请求，创建后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedRequest {
    /// 捕获时间 + 随机数 (UUIDv7)，只保证唯一
    pub id: String,

    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
    pub query_string: Vec<Header>,
    pub post_data: Option<PostData>,

    pub status: u16,
    pub status_text: String,
    pub response_headers: Vec<Header>,
    /// 响应原文，host 没有给出时为空串
    pub response_body: String,
    pub response_encoding: Option<String>,

    /// 捕获时间，只用于展示
    pub time: DateTime<Utc>,

    /// 捕获时判定一次，之后不再重新计算
    pub is_graphql: bool,
}

impl CapturedRequest {
    /// 由 host 交付的 exchange 和异步取到的响应内容构造记录
    pub fn from_exchange(exchange: Exchange, content: ResponseContent, is_graphql: bool) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            method: exchange.method,
            url: exchange.url,
            headers: exchange.headers,
            query_string: exchange.query_string,
            post_data: exchange.post_data,
            status: exchange.status,
            status_text: exchange.status_text,
            response_headers: exchange.response_headers,
            response_body: content.body.unwrap_or_default(),
            response_encoding: content.encoding,
            time: Utc::now(),
            is_graphql,
        }
    }

    /// 本地时间 HH:MM:SS
    pub fn display_time(&self) -> String {
        self.time.with_timezone(&Local).format("%H:%M:%S").to_string()
    }

    /// 用于过滤匹配的文本: "METHOD URL"
    pub fn search_text(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    /// URL 的 path + query 部分，解析失败时返回原始 URL
    pub fn path_and_query(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(parsed) => match parsed.query() {
                Some(query) => format!("{}?{}", parsed.path(), query),
                None => parsed.path().to_string(),
            },
            Err(_) => self.url.clone(),
        }
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }
}
