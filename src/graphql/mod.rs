pub mod formatter;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use formatter::format_query;
pub use parser::{decode_escapes, infer_operation_name, parse_graphql};
pub use types::{GraphQLInfo, OperationType};
