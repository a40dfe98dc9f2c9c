use crate::engine::intent::{classify_intent, should_capture_lead};
use crate::engine::templates;
use crate::models::{BotReply, ChatSession, Intent, Language, ReplyKind, Topic};

const GREETING_KEYWORDS: [&str; 5] = ["hello", "hi", "hey", "hej", "hallå"];
const YES_WORDS: [&str; 8] = ["yes", "yeah", "yep", "sure", "ok", "okay", "ja", "javisst"];
const NO_WORDS: [&str; 5] = ["no", "nope", "no thanks", "nej", "nej tack"];

/// Substring lists per topic, grouped English then Swedish. The scan checks
/// both groups so a visitor can mix languages mid-sentence, as the widget
/// audience tends to.
fn topic_keywords(topic: Topic) -> (&'static [&'static str], &'static [&'static str]) {
    match topic {
        Topic::Pricing => (&["price", "pricing", "cost", "sek"], &["pris", "kosta", "kostnad"]),
        Topic::Trial => (&["trial", "free"], &["gratis", "provperiod"]),
        Topic::Nfc => (&["nfc", "card"], &["kort"]),
        Topic::Booking => (
            &["demo", "meeting", "call", "book"],
            &["möte", "samtal", "boka"],
        ),
        Topic::Marketing => (&["marketing", "campaign"], &["marknadsföring", "kampanj"]),
        Topic::Support => (&["support", "help"], &["hjälp", "stöd"]),
    }
}

fn match_topic(lower: &str) -> Option<Topic> {
    Topic::PRIORITY.into_iter().find(|&topic| {
        let (en, sv) = topic_keywords(topic);
        en.iter().chain(sv.iter()).any(|k| lower.contains(k))
    })
}

// Token match, not substring: "this" must not read as "hi".
fn is_greeting(lower: &str) -> bool {
    lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|w| GREETING_KEYWORDS.contains(&w))
}

fn bare_word(lower: &str, words: &[&str]) -> bool {
    let stripped = lower.trim_matches(|c: char| !c.is_alphanumeric() && c != ' ');
    words.contains(&stripped.trim())
}

/// Select the bot's reply for one user message and record what was said in
/// the session's conversation memory. Evaluation order is fixed: greeting,
/// topic scan (drill-down on repeats), contextual yes/no, intent branch,
/// generic fallback.
pub fn generate_reply(message: &str, session: &mut ChatSession) -> BotReply {
    let lower = message.to_lowercase();
    let language = session.context.language;

    // A greeting that also carries a topic keyword ("hej, vad kostar det?")
    // is answered on the topic, not with small talk.
    let reply = if is_greeting(&lower) && match_topic(&lower).is_none() {
        BotReply::plain(
            templates::greeting(language, session.context.name.as_deref()),
            ReplyKind::Greeting,
        )
    } else if let Some(topic) = match_topic(&lower) {
        reply_for_topic(&lower, topic, session)
    } else if bare_word(&lower, &YES_WORDS) {
        reply_for_yes(session)
    } else if bare_word(&lower, &NO_WORDS) {
        BotReply::plain(templates::no_problem(language), ReplyKind::Fallback)
    } else {
        reply_for_intent(&lower, session)
    };

    session.last_reply = Some(reply.kind);
    reply
}

fn reply_for_topic(lower: &str, topic: Topic, session: &mut ChatSession) -> BotReply {
    let language = session.context.language;
    let already_discussed = !session.topics_discussed.insert(topic);

    // Repeats get the drill-down question instead of the same paragraph,
    // but keep the same form-attachment rules either way.
    let reply = if already_discussed {
        BotReply::plain(
            templates::topic_follow_up(language, topic),
            ReplyKind::FollowUp(topic),
        )
    } else {
        BotReply::plain(templates::topic_response(language, topic), ReplyKind::Topic(topic))
    };

    match topic {
        Topic::Pricing | Topic::Trial => {
            reply.with_lead_form(should_capture_lead(lower, &session.context))
        }
        Topic::Booking => reply.with_booking_form(),
        Topic::Nfc | Topic::Marketing | Topic::Support => reply,
    }
}

/// A bare "yes" means "yes to whatever you just offered".
fn reply_for_yes(session: &ChatSession) -> BotReply {
    let language = session.context.language;
    match session.last_reply {
        Some(ReplyKind::Topic(Topic::Booking)) | Some(ReplyKind::FollowUp(Topic::Booking)) => {
            BotReply::plain(
                templates::topic_response(language, Topic::Booking),
                ReplyKind::Topic(Topic::Booking),
            )
            .with_booking_form()
        }
        Some(ReplyKind::Topic(Topic::Trial))
        | Some(ReplyKind::FollowUp(Topic::Trial))
        | Some(ReplyKind::Conversion)
        | Some(ReplyKind::LeadPrompt) => BotReply::plain(
            templates::lead_capture_prompt(language),
            ReplyKind::LeadPrompt,
        )
        .with_lead_form(true),
        _ => BotReply::plain(templates::fallback(language), ReplyKind::Fallback),
    }
}

fn reply_for_intent(lower: &str, session: &ChatSession) -> BotReply {
    let language = session.context.language;
    match classify_intent(lower, language) {
        Intent::SalesLead => {
            BotReply::plain(templates::conversion(language), ReplyKind::Conversion)
                .with_lead_form(true)
        }
        Intent::ServiceInterest => {
            BotReply::plain(templates::conversion(language), ReplyKind::Conversion)
                .with_lead_form(session.context.questions_asked >= 1)
        }
        Intent::HelpSeeking => BotReply::plain(
            templates::topic_response(language, Topic::Support),
            ReplyKind::Support,
        ),
        Intent::General => BotReply::plain(templates::fallback(language), ReplyKind::Fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionContext;

    fn session(language: Language) -> ChatSession {
        ChatSession::new(
            "test-session".to_string(),
            SessionContext::new(language, 0),
            30,
        )
    }

    #[test]
    fn test_pricing_beats_nfc() {
        let mut s = session(Language::En);
        let reply = generate_reply("how do NFC cards affect the price?", &mut s);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Pricing));
        assert!(reply.text.contains("three plans"));
    }

    #[test]
    fn test_fresh_pricing_question_no_lead_form() {
        let mut s = session(Language::En);
        let reply = generate_reply("What are your pricing plans?", &mut s);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Pricing));
        assert!(!reply.show_lead_form);
    }

    #[test]
    fn test_warm_pricing_question_attaches_lead_form() {
        let mut s = session(Language::En);
        s.context.questions_asked = 2;
        // Interest keyword ("price") present and two questions asked.
        let reply = generate_reply("What are your pricing plans?", &mut s);
        assert!(reply.show_lead_form);
    }

    #[test]
    fn test_inflected_pricing_words_still_match() {
        // "pricing" and "kostar" are not substrings of "price"/"kostnad".
        let mut s = session(Language::En);
        let reply = generate_reply("tell me about pricing", &mut s);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Pricing));

        let mut s = session(Language::Sv);
        let reply = generate_reply("vad kostar korten?", &mut s);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Pricing));
    }

    #[test]
    fn test_swedish_pricing_template() {
        let mut s = session(Language::Sv);
        let reply = generate_reply("vad kostar det?", &mut s);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Pricing));
        assert!(reply.text.contains("399 SEK/månad"));
    }

    #[test]
    fn test_booking_always_attaches_booking_form() {
        let mut s = session(Language::En);
        let reply = generate_reply("can I book a demo?", &mut s);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Booking));
        assert!(reply.show_booking_form);
    }

    #[test]
    fn test_repeated_topic_drills_down() {
        let mut s = session(Language::En);
        let first = generate_reply("what does it cost?", &mut s);
        let second = generate_reply("again, what's the price?", &mut s);
        assert_eq!(first.kind, ReplyKind::Topic(Topic::Pricing));
        assert_eq!(second.kind, ReplyKind::FollowUp(Topic::Pricing));
        assert_ne!(first.text, second.text);
    }

    #[test]
    fn test_topic_memory_is_per_session() {
        let mut a = session(Language::En);
        let mut b = session(Language::En);
        generate_reply("what does it cost?", &mut a);
        // A fresh session still gets the full paragraph.
        let reply = generate_reply("what does it cost?", &mut b);
        assert_eq!(reply.kind, ReplyKind::Topic(Topic::Pricing));
    }

    #[test]
    fn test_yes_after_trial_offers_lead_form() {
        let mut s = session(Language::En);
        generate_reply("can I get a free trial?", &mut s);
        let reply = generate_reply("yes!", &mut s);
        assert_eq!(reply.kind, ReplyKind::LeadPrompt);
        assert!(reply.show_lead_form);
    }

    #[test]
    fn test_yes_after_booking_offers_booking_form() {
        let mut s = session(Language::En);
        generate_reply("I'd like a demo", &mut s);
        let reply = generate_reply("yes", &mut s);
        assert!(reply.show_booking_form);
    }

    #[test]
    fn test_no_is_not_pushy() {
        let mut s = session(Language::En);
        generate_reply("can I get a free trial?", &mut s);
        let reply = generate_reply("no thanks", &mut s);
        assert!(!reply.show_lead_form);
        assert!(!reply.show_booking_form);
    }

    #[test]
    fn test_yes_with_no_prior_offer_falls_back() {
        let mut s = session(Language::En);
        let reply = generate_reply("yes", &mut s);
        assert_eq!(reply.kind, ReplyKind::Fallback);
    }

    #[test]
    fn test_greeting_personalizes_only_once_name_captured() {
        let mut s = session(Language::En);
        let before = generate_reply("hello there", &mut s);
        assert!(!before.text.contains("Anna"));

        s.context.name = Some("Anna".to_string());
        let after = generate_reply("hello again", &mut s);
        assert!(after.text.contains("Anna"));
    }

    #[test]
    fn test_sales_intent_forces_lead_form() {
        let mut s = session(Language::En);
        let reply = generate_reply("I want to buy this", &mut s);
        assert_eq!(reply.kind, ReplyKind::Conversion);
        assert!(reply.show_lead_form);
    }

    #[test]
    fn test_service_interest_lead_form_gated_on_first_question() {
        let mut s = session(Language::En);
        let cold = generate_reply("tell me more about the features", &mut s);
        assert_eq!(cold.kind, ReplyKind::Conversion);
        assert!(!cold.show_lead_form);

        s.context.questions_asked = 1;
        s.topics_discussed.clear();
        let warm = generate_reply("tell me more about the features", &mut s);
        assert!(warm.show_lead_form);
    }

    #[test]
    fn test_unmatched_message_gets_fallback() {
        let mut s = session(Language::En);
        let reply = generate_reply("lorem ipsum dolor", &mut s);
        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert!(reply.text.contains("NFC solutions"));
    }
}
