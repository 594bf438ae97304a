use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::capture::model::PostData;
use crate::graphql::formatter::format_query;
use crate::graphql::types::{GraphQLInfo, OperationType};

/// JSON 请求体中可能承载操作文本的字段，按优先级排列
pub(crate) const OPERATION_FIELDS: [&str; 3] = ["query", "mutation", "subscription"];

/// 裸 GraphQL 文本必须以这些关键字（含空格）开头
const OPERATION_KEYWORDS: [&str; 3] = ["query ", "mutation ", "subscription "];

/// 解码时临时替换已转义的反斜杠 (Unicode 私用区字符)
const BACKSLASH_PLACEHOLDER: &str = "\u{E000}";

/// 从 JSON 请求体中取出的原始字段
struct RawOperation {
    text: String,
    variables: Option<Value>,
    name: Option<String>,
}

/// 从请求体中解析 GraphQL 操作
///
/// 支持两种传输方式：
/// 1. JSON: `{"query": "...", "variables": {...}, "operationName": "..."}`
/// 2. 裸文本: `query GetUser { ... }`
///
/// 只有结构化参数（表单）的请求体不会被视为 GraphQL。
/// 请求体中找不到操作时返回 None，不会返回错误。
pub fn parse_graphql(post_data: Option<&PostData>) -> Option<GraphQLInfo> {
    let text = post_data?.raw_text()?;

    let raw = match serde_json::from_str::<Value>(text) {
        Ok(value) => extract_from_json(&value)?,
        // 不是 JSON 是正常分支：按裸 GraphQL 文本处理
        Err(_) => {
            if !starts_with_operation_keyword(text.trim()) {
                return None;
            }
            RawOperation {
                text: text.to_string(),
                variables: None,
                name: None,
            }
        }
    };

    let operation = decode_escapes(&raw.text);
    let operation_name = raw.name.or_else(|| infer_operation_name(&operation));
    let operation_type = OperationType::infer(&operation);

    Some(GraphQLInfo {
        operation_name,
        operation_type,
        query: format_query(&operation),
        variables: raw.variables,
    })
}

fn extract_from_json(value: &Value) -> Option<RawOperation> {
    let obj = value.as_object()?;

    let text = OPERATION_FIELDS
        .iter()
        .filter_map(|field| obj.get(*field))
        .find(|v| !v.is_null())
        .map(coerce_to_string)?;

    let variables = obj.get("variables").filter(|v| !v.is_null()).cloned();
    let name = obj
        .get("operationName")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(RawOperation {
        text,
        variables,
        name,
    })
}

/// 非字符串字段按 JSON 文本处理
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 裸文本是否以 `query ` / `mutation ` / `subscription ` 开头
pub(crate) fn starts_with_operation_keyword(trimmed: &str) -> bool {
    OPERATION_KEYWORDS.iter().any(|kw| trimmed.starts_with(kw))
}

/// 传输层未解码的转义序列还原
///
/// 只有出现字面量 `\n` 时才解码，已解码的文本原样返回。
/// `\\` 先替换为占位符，避免 `\\n` 被误解码为换行。
///
/// 重复解码结果不变的前提是输出中不再含有字面量 `\n`：
/// 输入里的 `\\n` 解码一次后变成 `\n`，再解码会变成换行。
pub fn decode_escapes(text: &str) -> String {
    if !text.contains("\\n") {
        return text.to_string();
    }

    text.replace("\\\\", BACKSLASH_PLACEHOLDER)
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\r", "\r")
        .replace("\\\"", "\"")
        .replace(BACKSLASH_PLACEHOLDER, "\\")
}

/// 从操作文本中找出第一个 `query Name` / `mutation Name` / `subscription Name`
pub fn infer_operation_name(text: &str) -> Option<String> {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = NAME_REGEX.get_or_init(|| {
        Regex::new(r"(?:query|mutation|subscription)\s+([A-Za-z0-9_]+)").unwrap()
    });

    re.captures(text).map(|caps| caps[1].to_string())
}
