pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, TestflowsError};
pub use events::{ChatEvent, EventBus};
pub use id::{SequentialIdFactory, SessionId, SessionIdFactory, UuidIdFactory};
pub use types::{ConversationEntry, Role};

pub type Result<T> = std::result::Result<T, TestflowsError>;
