//! Archive handling: loading and types.

mod loader;
mod types;

pub use loader::{Archive, is_safe_segment};
pub use types::{
    ConversationSummary, ConversationType, DayIndex, GlobalIndex, Message, MessageKind, Timestamp,
    User,
};
