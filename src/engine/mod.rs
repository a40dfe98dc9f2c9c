//! The rule engine behind the widget: pure functions, no IO, deterministic
//! for a given session state.

pub mod intent;
pub mod language;
pub mod responder;
pub mod templates;

pub use intent::{classify_intent, is_urgent, should_capture_lead, shows_interest};
pub use language::detect_language;
pub use responder::generate_reply;
