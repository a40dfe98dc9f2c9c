use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Sv,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sv => "sv",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "sv" => Language::Sv,
            _ => Language::En,
        }
    }

    /// Seed the session language from a browser locale string ("sv-SE" → Sv).
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_lowercase().starts_with("sv") {
            Language::Sv
        } else {
            Language::En
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}
