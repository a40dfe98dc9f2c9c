pub mod assistant;
pub mod event;
pub mod intent;
pub mod language;
pub mod lead;
pub mod message;
pub mod session;
pub mod toast;
pub mod topic;

pub use assistant::{Channel, GenerationRequest, MessageVariant, Tone};
pub use event::{ActivityEvent, ActivityKind};
pub use intent::Intent;
pub use language::Language;
pub use lead::{BookingRecord, LeadRecord};
pub use message::{BotReply, ChatMessage, ReplyKind, Sender};
pub use session::{ChatSession, SessionContext, SessionSnapshot};
pub use toast::{Toast, ToastVariant};
pub use topic::Topic;
