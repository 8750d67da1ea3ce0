pub mod files;
pub mod health;
pub mod query;
pub mod session;
pub mod upload;

pub use files::{clear_selection, select_file};
pub use health::health_check;
pub use query::submit_query;
pub use session::{session_view, transcript};
pub use upload::upload;
