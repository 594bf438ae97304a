use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReqcopyError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("不支持的导出格式: {0}")]
    InvalidFormat(String),

    #[error("No request selected")]
    NoSelection,

    #[error("请求索引超出范围: {0}")]
    IndexOutOfRange(usize),

    #[error("获取响应内容失败: {0}")]
    FetchError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for ReqcopyError {
    fn from(err: anyhow::Error) -> Self {
        ReqcopyError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for ReqcopyError {
    fn from(err: toml::de::Error) -> Self {
        ReqcopyError::ConfigError(err.to_string())
    }
}

/// Result type for reqcopy crate
pub type Result<T> = std::result::Result<T, ReqcopyError>;
