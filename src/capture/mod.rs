pub mod classifier;
pub mod controller;
pub mod exchange;
pub mod filter;
pub mod model;
pub mod session;

// Re-export commonly used types
pub use classifier::{Classification, classify};
pub use controller::CaptureController;
pub use exchange::{ContentFetcher, Exchange, ResponseContent};
pub use filter::RequestFilter;
pub use model::{CapturedRequest, Header, Param, PostData, StatusClass};
pub use session::{CaptureSession, MAX_REQUESTS};
