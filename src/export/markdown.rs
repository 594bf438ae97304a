use serde_json::Value;

use crate::capture::model::CapturedRequest;
use crate::export::payload::{parse_payload, pretty_or_raw, to_pretty};

/// Markdown 文档：标题、URL、状态、请求体、响应
pub fn format_markdown(request: &CapturedRequest) -> String {
    let payload = parse_payload(request.post_data.as_ref());
    let response = pretty_or_raw(&request.response_body);

    let mut md = format!("## {} {}\n\n", request.method, url_path(&request.url));
    md.push_str(&format!("**URL:** `{}`\n\n", request.url));
    md.push_str(&format!(
        "**Status:** {} {}\n\n",
        request.status, request.status_text
    ));

    if is_truthy(&payload) {
        md.push_str(&format!(
            "### Request Payload\n```json\n{}\n```\n\n",
            to_pretty(&payload)
        ));
    }

    md.push_str(&format!("### Response\n```json\n{}\n```", response));
    md
}

/// null、false、0 和空字符串视为没有请求体
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// URL 的 path 部分，无法解析时返回原始 URL
fn url_path(raw: &str) -> String {
    url::Url::parse(raw)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| raw.to_string())
}
