use crate::models::Language;

/// Whole-token matches only; "prison" must not count as "pris".
const SWEDISH_WORDS: [&str; 12] = [
    "hej", "tack", "ja", "nej", "hur", "vad", "när", "var", "varför", "pris", "kostnad", "gratis",
];

/// Sticky language detection: any Swedish token flips the session to Swedish,
/// a message with no matches leaves the current language untouched. There is
/// no automatic way back to English.
pub fn detect_language(text: &str, current: Language) -> Language {
    let lower = text.to_lowercase();
    let matches = lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| SWEDISH_WORDS.contains(w))
        .count();

    if matches > 0 {
        Language::Sv
    } else {
        current
    }
}
