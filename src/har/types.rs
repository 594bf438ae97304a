use serde::{Deserialize, Serialize};

use crate::capture::model::{Header, Param, PostData};

/// HAR 1.2 根对象
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Har {
    pub log: Log,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Log {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub started_date_time: Option<String>,
    pub request: Request,
    pub response: Response,
    /// DevTools 扩展字段: xhr / fetch / image / script ...
    #[serde(rename = "_resourceType", default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub query_string: Vec<Header>,
    #[serde(default)]
    pub post_data: Option<HarPostData>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPostData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl From<HarPostData> for PostData {
    fn from(data: HarPostData) -> Self {
        PostData {
            mime_type: data.mime_type,
            text: data.text,
            params: data.params,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// 请求失败时浏览器会写 0 或 -1
    pub status: i64,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// 例如 base64
    #[serde(default)]
    pub encoding: Option<String>,
}
