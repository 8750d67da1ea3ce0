pub mod message;
pub mod session;
pub mod state;

pub use message::{Message, Role, Transcript};
pub use session::{DocumentSession, PendingFile, PDF_MIME};
pub use state::{ChatState, StateView};
