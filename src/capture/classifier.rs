use serde_json::Value;
use tracing::trace;

use crate::capture::exchange::Exchange;
use crate::capture::model::PostData;
use crate::graphql::parser::{OPERATION_FIELDS, starts_with_operation_keyword};

/// 常见的 GraphQL endpoint 路径
const GRAPHQL_URL_HINTS: [&str; 4] = ["/graphql", "/api/graphql", "/gql", "/query"];

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    /// 是否是 API 流量（否则直接丢弃）
    pub api_relevant: bool,
    /// 是否是 GraphQL 操作，只对 API 流量判定
    pub is_graphql: bool,
}

/// 判定一次 exchange 是否需要捕获，以及是否是 GraphQL
pub fn classify(exchange: &Exchange) -> Classification {
    let api_relevant = is_api_relevant(exchange);
    let is_graphql = api_relevant && is_graphql(exchange);

    trace!(
        method = %exchange.method,
        url = %exchange.url,
        api_relevant,
        is_graphql,
        "classified exchange"
    );

    Classification {
        api_relevant,
        is_graphql,
    }
}

/// XHR/Fetch、JSON 或纯文本响应视为 API 流量；
/// 其余只有 `/api/` 路径且响应为 JSON 时才算
pub fn is_api_relevant(exchange: &Exchange) -> bool {
    let mime = exchange
        .mime_type
        .as_deref()
        .unwrap_or_default()
        .to_ascii_lowercase();
    // host 没给 resource type 时退回到 content type
    let resource_type = exchange.resource_type.as_deref().unwrap_or(&mime);

    if resource_type.eq_ignore_ascii_case("xhr")
        || resource_type.eq_ignore_ascii_case("fetch")
        || mime.contains("json")
        || mime.contains("text/plain")
    {
        return true;
    }

    exchange.url.contains("/api/") && mime.contains("json")
}

/// POST 且 body 为带 query/mutation/subscription 字段的 JSON 对象，
/// 或者 body 不是 JSON 但以操作关键字开头
pub fn is_graphql(exchange: &Exchange) -> bool {
    if !exchange.method.eq_ignore_ascii_case("POST") {
        return false;
    }
    let Some(text) = exchange.post_data.as_ref().and_then(PostData::raw_text) else {
        return false;
    };

    let trimmed = text.trim();
    // URL 提示只决定是否尝试 JSON 解析，本身不算 GraphQL
    if trimmed.starts_with('{') || has_endpoint_hint(exchange) {
        if let Ok(value) = serde_json::from_str::<Value>(text) {
            return has_operation_field(&value);
        }
    }

    starts_with_operation_keyword(trimmed)
}

fn has_endpoint_hint(exchange: &Exchange) -> bool {
    let url = exchange.url.to_ascii_lowercase();
    let is_json = exchange
        .header("content-type")
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

    is_json && GRAPHQL_URL_HINTS.iter().any(|hint| url.contains(hint))
}

fn has_operation_field(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        OPERATION_FIELDS
            .iter()
            .any(|field| obj.get(*field).is_some_and(|v| !v.is_null()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::model::Param;

    fn graphql_post(url: &str, body: &str) -> Exchange {
        Exchange::new("POST", url)
            .with_resource_type("fetch")
            .with_header("Content-Type", "application/json")
            .with_mime_type("application/json")
            .with_text(body)
    }

    #[test]
    fn test_xhr_and_fetch_are_api() {
        let xhr = Exchange::new("GET", "https://example.com/users").with_resource_type("xhr");
        assert!(is_api_relevant(&xhr));

        let fetch = Exchange::new("GET", "https://example.com/users").with_resource_type("fetch");
        assert!(is_api_relevant(&fetch));
    }

    #[test]
    fn test_json_and_text_responses_are_api() {
        let json = Exchange::new("GET", "https://example.com/data")
            .with_resource_type("document")
            .with_mime_type("application/json; charset=utf-8");
        assert!(is_api_relevant(&json));

        let text = Exchange::new("GET", "https://example.com/health")
            .with_resource_type("other")
            .with_mime_type("text/plain");
        assert!(is_api_relevant(&text));
    }

    #[test]
    fn test_image_is_rejected() {
        let image = Exchange::new("GET", "https://example.com/logo.png")
            .with_resource_type("image")
            .with_mime_type("image/png");
        let result = classify(&image);
        assert!(!result.api_relevant);
        assert!(!result.is_graphql);
    }

    #[test]
    fn test_html_under_api_path_is_rejected() {
        let page = Exchange::new("GET", "https://example.com/api/docs")
            .with_resource_type("document")
            .with_mime_type("text/html");
        assert!(!is_api_relevant(&page));
    }

    #[test]
    fn test_mime_type_used_when_resource_type_missing() {
        let exchange = Exchange::new("GET", "https://example.com/x").with_mime_type("application/json");
        assert!(is_api_relevant(&exchange));

        let exchange = Exchange::new("GET", "https://example.com/x").with_mime_type("text/css");
        assert!(!is_api_relevant(&exchange));
    }

    #[test]
    fn test_json_body_with_query_is_graphql() {
        let exchange = graphql_post(
            "https://example.com/anything",
            r#"{"query":"query GetUser{ user { id } }"}"#,
        );
        assert!(classify(&exchange).is_graphql);

        let exchange = graphql_post(
            "https://example.com/anything",
            r#"{"mutation":"mutation Add { add }"}"#,
        );
        assert!(classify(&exchange).is_graphql);
    }

    #[test]
    fn test_raw_graphql_body() {
        let exchange = Exchange::new("POST", "https://example.com/gql")
            .with_resource_type("fetch")
            .with_text("query { me }");
        assert!(classify(&exchange).is_graphql);

        let exchange = Exchange::new("POST", "https://example.com/gql")
            .with_resource_type("fetch")
            .with_text("  subscription OnEvent { event }  ");
        assert!(classify(&exchange).is_graphql);
    }

    #[test]
    fn test_graphql_url_alone_is_not_enough() {
        let exchange = graphql_post("https://example.com/graphql", r#"{"foo":"bar"}"#);
        let result = classify(&exchange);
        assert!(result.api_relevant);
        assert!(!result.is_graphql);
    }

    #[test]
    fn test_get_is_never_graphql() {
        let exchange = Exchange::new("GET", "https://example.com/graphql?query=%7Bme%7D")
            .with_resource_type("fetch")
            .with_text(r#"{"query":"{ me }"}"#);
        assert!(!is_graphql(&exchange));
    }

    #[test]
    fn test_null_operation_field_is_not_graphql() {
        let exchange = graphql_post("https://example.com/graphql", r#"{"query":null}"#);
        assert!(!is_graphql(&exchange));
    }

    #[test]
    fn test_keyword_needs_trailing_space() {
        let exchange = Exchange::new("POST", "https://example.com/gql")
            .with_resource_type("fetch")
            .with_text("query{ me }");
        assert!(!is_graphql(&exchange));
    }

    #[test]
    fn test_form_params_are_not_graphql() {
        let exchange = Exchange::new("POST", "https://example.com/graphql")
            .with_resource_type("xhr")
            .with_params(vec![Param::new("query", "{ me }")]);
        assert!(!is_graphql(&exchange));
    }

    #[test]
    fn test_rejected_exchange_is_not_tagged() {
        let exchange = Exchange::new("POST", "https://example.com/upload")
            .with_resource_type("image")
            .with_mime_type("image/png")
            .with_text("query { me }");
        let result = classify(&exchange);
        assert!(!result.api_relevant);
        assert!(!result.is_graphql);
    }
}
