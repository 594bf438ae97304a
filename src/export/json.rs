use serde::Serialize;
use serde_json::Value;

use crate::capture::model::CapturedRequest;
use crate::export::payload::{parse_body, parse_payload};

/// 导出对象，字段顺序即输出顺序
#[derive(Serialize)]
struct JsonExport<'a> {
    endpoint: &'a str,
    method: &'a str,
    status: u16,
    payload: Value,
    response: Value,
}

/// `{endpoint, method, status, payload, response}`，2 空格缩进
pub fn format_json(request: &CapturedRequest) -> String {
    let export = JsonExport {
        endpoint: &request.url,
        method: &request.method,
        status: request.status,
        payload: parse_payload(request.post_data.as_ref()),
        response: parse_body(&request.response_body),
    };

    serde_json::to_string_pretty(&export).unwrap_or_default()
}
