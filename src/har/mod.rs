pub mod archive;
pub mod types;

// Re-export commonly used types
pub use archive::HarArchive;
pub use types::{Content, Entry, Har, HarPostData, Log, Request, Response};
