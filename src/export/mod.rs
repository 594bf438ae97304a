pub mod curl;
pub mod graphql;
pub mod json;
pub mod markdown;
pub mod payload;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ReqcopyError;
use crate::capture::model::CapturedRequest;

pub use curl::format_curl;
pub use graphql::format_graphql;
pub use json::format_json;
pub use markdown::format_markdown;
pub use payload::parse_payload;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Curl,
    #[serde(alias = "md")]
    Markdown,
    #[serde(alias = "gql")]
    Graphql,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Curl,
        ExportFormat::Markdown,
        ExportFormat::Graphql,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Curl => "curl",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Graphql => "graphql",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReqcopyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "curl" => Ok(ExportFormat::Curl),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "graphql" | "gql" => Ok(ExportFormat::Graphql),
            _ => Err(ReqcopyError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 将一条请求渲染为指定格式的文本
pub fn export_as(format: ExportFormat, request: &CapturedRequest) -> String {
    match format {
        ExportFormat::Json => format_json(request),
        ExportFormat::Curl => format_curl(request),
        ExportFormat::Markdown => format_markdown(request),
        ExportFormat::Graphql => format_graphql(request),
    }
}
