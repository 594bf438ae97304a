pub mod printer;
pub mod selector;

pub use printer::{print_requests, render_requests};
pub use selector::select_interactive;
