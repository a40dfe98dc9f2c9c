use serde::{Deserialize, Serialize};

/// Coarse classification of a user message when no topic bucket matched.
/// Classification priority is SalesLead > ServiceInterest > HelpSeeking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SalesLead,
    ServiceInterest,
    HelpSeeking,
    General,
}
