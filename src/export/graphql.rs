use crate::capture::model::CapturedRequest;
use crate::export::json::format_json;
use crate::export::payload::{pretty_or_raw, to_pretty};
use crate::graphql::parse_graphql;

/// GraphQL 记录：操作名、类型、查询、变量、响应分段输出
///
/// 非 GraphQL 请求或解析失败时退回 JSON 格式。
pub fn format_graphql(request: &CapturedRequest) -> String {
    if !request.is_graphql {
        return format_json(request);
    }
    let Some(info) = parse_graphql(request.post_data.as_ref()) else {
        return format_json(request);
    };

    let mut sections = Vec::new();

    let mut header = String::new();
    if let Some(name) = &info.operation_name {
        header.push_str(&format!("# Operation: {}\n", name));
    }
    header.push_str(&format!("# Type: {}", info.operation_type));
    sections.push(header);

    sections.push(format!("# Query:\n{}", info.query));

    if let Some(variables) = &info.variables {
        sections.push(format!("# Variables:\n{}", to_pretty(variables)));
    }

    sections.push(format!(
        "# Response ({} {}):\n{}",
        request.status,
        request.status_text,
        pretty_or_raw(&request.response_body)
    ));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::exchange::{Exchange, ResponseContent};

    fn capture(body: &str, response: &str, is_graphql: bool) -> CapturedRequest {
        CapturedRequest::from_exchange(
            Exchange::new("POST", "https://example.com/graphql").with_text(body),
            ResponseContent::new(response),
            is_graphql,
        )
    }

    #[test]
    fn test_full_transcript() {
        let request = capture(
            r#"{"query":"query GetUser($id: ID!) {\nuser(id: $id) {\nname\n}\n}","variables":{"id":"7"}}"#,
            r#"{"data":{"user":{"name":"Ada"}}}"#,
            true,
        );

        let expected = "# Operation: GetUser\n# Type: query\n\n\
# Query:\nquery GetUser($id: ID!) {\n  user(id: $id) {\n    name\n  }\n}\n\n\
# Variables:\n{\n  \"id\": \"7\"\n}\n\n\
# Response (200 OK):\n{\n  \"data\": {\n    \"user\": {\n      \"name\": \"Ada\"\n    }\n  }\n}";
        assert_eq!(format_graphql(&request), expected);
    }

    #[test]
    fn test_anonymous_without_variables() {
        let request = capture("query { me }", "not json", true);
        assert_eq!(
            format_graphql(&request),
            "# Type: query\n\n# Query:\nquery { me }\n\n# Response (200 OK):\nnot json"
        );
    }

    #[test]
    fn test_non_graphql_falls_back_to_json() {
        let request = capture(r#"{"query":"query Q { q }"}"#, "{}", false);
        assert_eq!(format_graphql(&request), format_json(&request));
    }

    #[test]
    fn test_unparseable_body_falls_back_to_json() {
        let request = capture(r#"{"foo":1}"#, "{}", true);
        assert_eq!(format_graphql(&request), format_json(&request));
    }
}
