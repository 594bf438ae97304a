pub mod capture;
pub mod config;
pub mod error;
pub mod export;
pub mod graphql;
pub mod har;
pub mod logger;
pub mod view;

// Re-export commonly used types
pub use capture::{CaptureController, CaptureSession, CapturedRequest, Exchange, classify};
pub use error::{ReqcopyError, Result};
pub use export::{ExportFormat, export_as};
pub use graphql::{GraphQLInfo, OperationType, format_query, parse_graphql};
