use serde_json::{Map, Value};

use crate::capture::model::PostData;

/// 解析请求体
///
/// - 有原始文本：能解析为 JSON 则返回 JSON，否则原样返回文本
/// - 只有表单参数：合并为对象，同名参数后者覆盖前者
/// - 都没有：null
pub fn parse_payload(post_data: Option<&PostData>) -> Value {
    let Some(post_data) = post_data else {
        return Value::Null;
    };

    if let Some(text) = post_data.raw_text() {
        return serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
    }

    if !post_data.params.is_empty() {
        let mut obj = Map::new();
        for param in &post_data.params {
            obj.insert(
                param.name.clone(),
                Value::String(param.value.clone().unwrap_or_default()),
            );
        }
        return Value::Object(obj);
    }

    Value::Null
}

/// 尝试将响应体解析为 JSON，失败时保留原始字符串
pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// 尝试将 body 格式化为漂亮的 JSON，不是有效 JSON 时返回原始内容
pub fn pretty_or_raw(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

/// JSON 值格式化为 2 空格缩进的文本
pub fn to_pretty(value: &Value) -> String {
    // Value 的序列化不会失败
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
