use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// GraphQL 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    #[default]
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// 由操作文本的首个关键字推断，无法判断时为 query
    pub fn infer(text: &str) -> Self {
        let trimmed = text.trim_start();
        if trimmed.starts_with("mutation") {
            OperationType::Mutation
        } else if trimmed.starts_with("subscription") {
            OperationType::Subscription
        } else {
            OperationType::Query
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 从请求体中提取的 GraphQL 信息，每次导出时重新计算
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLInfo {
    pub operation_name: Option<String>,
    pub operation_type: OperationType,
    /// 解码并缩进后的操作文本
    pub query: String,
    pub variables: Option<Value>,
}
