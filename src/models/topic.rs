use serde::{Deserialize, Serialize};

/// Subject buckets with a canned paragraph each. Scan order is fixed:
/// pricing beats trial beats nfc and so on, so a message matching several
/// buckets always resolves the same way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Pricing,
    Trial,
    Nfc,
    Booking,
    Marketing,
    Support,
}

impl Topic {
    /// All topics in scan priority order.
    pub const PRIORITY: [Topic; 6] = [
        Topic::Pricing,
        Topic::Trial,
        Topic::Nfc,
        Topic::Booking,
        Topic::Marketing,
        Topic::Support,
    ];
}
