use crate::models::{Intent, Language, SessionContext};

// Substring sets, per language. Order of the three checks is the tie-break:
// a message carrying both a buying keyword and a help keyword is a sales
// lead, never a help request. These are explicit purchase signals; merely
// topical words like "price" belong to the pricing topic scan, otherwise a
// first innocent pricing question would already force the lead form.
const SALES_EN: [&str; 8] = [
    "buy", "purchase", "sign up", "signup", "subscribe", "quote", "how much", "get started",
];
const SALES_SV: [&str; 8] = [
    "köpa", "beställ", "prenumerera", "offert", "anmäla", "teckna", "hur mycket", "komma igång",
];
const SERVICE_EN: [&str; 8] = [
    "demo", "trial", "interested", "feature", "nfc", "campaign", "how does", "tell me more",
];
const SERVICE_SV: [&str; 7] = [
    "provperiod", "gratis", "intresserad", "funktion", "kampanj", "hur fungerar", "berätta mer",
];
const HELP_EN: [&str; 6] = ["help", "support", "problem", "issue", "question", "stuck"];
const HELP_SV: [&str; 5] = ["hjälp", "stöd", "problem", "fråga", "fungerar inte"];

// Interest and urgency pools span both languages; the lead predicate does
// not care which language the signal arrived in.
const INTEREST_KEYWORDS: [&str; 16] = [
    "interested", "want", "need", "how much", "price", "pricing", "cost", "demo", "trial",
    "sign up", "intresserad", "vill", "behöver", "pris", "kosta", "kostnad",
];
const URGENT_KEYWORDS: [&str; 7] = ["now", "today", "asap", "urgent", "nu", "idag", "brådskande"];

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

pub fn classify_intent(message: &str, language: Language) -> Intent {
    let lower = message.to_lowercase();
    let (sales, service, help): (&[&str], &[&str], &[&str]) = match language {
        Language::En => (&SALES_EN, &SERVICE_EN, &HELP_EN),
        Language::Sv => (&SALES_SV, &SERVICE_SV, &HELP_SV),
    };

    if contains_any(&lower, sales) {
        Intent::SalesLead
    } else if contains_any(&lower, service) {
        Intent::ServiceInterest
    } else if contains_any(&lower, help) {
        Intent::HelpSeeking
    } else {
        Intent::General
    }
}

pub fn shows_interest(message: &str) -> bool {
    contains_any(&message.to_lowercase(), &INTEREST_KEYWORDS)
}

pub fn is_urgent(message: &str) -> bool {
    contains_any(&message.to_lowercase(), &URGENT_KEYWORDS)
}

/// Lead-worthiness: a warmed-up visitor asking with interest, an urgent
/// message, or an outright sales question.
pub fn should_capture_lead(message: &str, ctx: &SessionContext) -> bool {
    (ctx.questions_asked >= 2 && shows_interest(message))
        || is_urgent(message)
        || classify_intent(message, ctx.language) == Intent::SalesLead
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(questions: u32, language: Language) -> SessionContext {
        let mut c = SessionContext::new(language, 0);
        c.questions_asked = questions;
        c
    }

    #[test]
    fn test_sales_beats_help() {
        // Both a buying keyword and a help keyword: sales wins.
        let intent = classify_intent("I need help, how much does it cost?", Language::En);
        assert_eq!(intent, Intent::SalesLead);
    }

    #[test]
    fn test_service_beats_help() {
        let intent = classify_intent("help me understand the demo", Language::En);
        assert_eq!(intent, Intent::ServiceInterest);
    }

    #[test]
    fn test_help_seeking() {
        assert_eq!(classify_intent("I have a problem", Language::En), Intent::HelpSeeking);
        assert_eq!(classify_intent("jag har ett problem", Language::Sv), Intent::HelpSeeking);
    }

    #[test]
    fn test_general_when_nothing_matches() {
        assert_eq!(classify_intent("nice weather", Language::En), Intent::General);
    }

    #[test]
    fn test_swedish_sales() {
        assert_eq!(classify_intent("hur mycket kostar det?", Language::Sv), Intent::SalesLead);
    }

    #[test]
    fn test_urgency_alone_captures_lead() {
        let c = ctx(0, Language::En);
        assert!(should_capture_lead("call me today", &c));
    }

    #[test]
    fn test_interest_requires_two_questions() {
        // Interest keywords without any buying keyword: gated on warm-up.
        let cold = ctx(0, Language::En);
        let warm = ctx(2, Language::En);
        assert!(!should_capture_lead("I want the demo", &cold));
        assert!(should_capture_lead("I want the demo", &warm));
    }

    #[test]
    fn test_monotonic_in_questions_asked() {
        let msg = "I want the demo";
        let mut was_true = false;
        for q in 0..6 {
            let captured = should_capture_lead(msg, &ctx(q, Language::En));
            if was_true {
                assert!(captured, "predicate flipped back at questions_asked={q}");
            }
            was_true |= captured;
        }
        assert!(was_true);
    }

    #[test]
    fn test_plain_question_never_captures() {
        let warm = ctx(5, Language::En);
        assert!(!should_capture_lead("what colors do the cards come in", &warm));
    }
}
