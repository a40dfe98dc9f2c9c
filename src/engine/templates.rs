//! Canned response tables, keyed by language and topic. One function per
//! table keeps the mapping exhaustive: adding a `Topic` variant will not
//! compile until every language has its paragraph.

use crate::models::{Language, Topic};

pub fn topic_response(language: Language, topic: Topic) -> &'static str {
    match (language, topic) {
        (Language::En, Topic::Pricing) => {
            "Great question! We offer three plans: Starter (399 SEK/month, up to 100 customers), \
             Professional (799 SEK/month, up to 500 customers), and Enterprise (custom pricing). \
             All include NFC cards and a 1-month free trial. Which plan interests you most?"
        }
        (Language::En, Topic::Trial) => {
            "Perfect! Our 1-month FREE trial gives you full access to test our NFC marketing \
             platform. You can cancel anytime with 3 months notice. Would you like me to help \
             you get started right now?"
        }
        (Language::En, Topic::Nfc) => {
            "Our NFC cards are game-changers! Customers just tap their phone to instantly \
             connect and opt-in to your marketing. No apps needed! Starter includes 1 card, \
             Professional gets 5, Enterprise gets custom designs. Pretty amazing, right?"
        }
        (Language::En, Topic::Booking) => {
            "I'd love to schedule a personalized demo for you! It only takes 15 minutes and I \
             can show you exactly how NFC marketing can grow your business. When would work \
             best for you?"
        }
        (Language::En, Topic::Marketing) => {
            "Our NFC platform revolutionizes customer engagement! When someone taps their phone \
             to your NFC card, they instantly connect to your business and can join your \
             marketing campaigns. The Professional plan even includes AI message generation!"
        }
        (Language::En, Topic::Support) => {
            "I'm here to help! We offer email support with Starter, priority support with \
             Professional, and dedicated support for Enterprise. What specific challenge can I \
             help you solve?"
        }
        (Language::Sv, Topic::Pricing) => {
            "Bra fråga! Vi erbjuder tre planer: Starter (399 SEK/månad, upp till 100 kunder), \
             Professional (799 SEK/månad, upp till 500 kunder), och Enterprise (anpassad \
             prissättning). Alla inkluderar NFC-kort och 1 månads gratis provperiod. Vilken \
             plan intresserar dig mest?"
        }
        (Language::Sv, Topic::Trial) => {
            "Perfekt! Vår 1 månads GRATIS provperiod ger dig full tillgång att testa vår \
             NFC-marknadsföringsplattform. Du kan avbryta när som helst med 3 månaders \
             uppsägning. Vill du att jag hjälper dig komma igång nu?"
        }
        (Language::Sv, Topic::Nfc) => {
            "Våra NFC-kort är fantastiska! Kunder trycker bara sin telefon för att omedelbart \
             ansluta och anmäla sig till din marknadsföring. Inga appar behövs! Starter \
             inkluderar 1 kort, Professional får 5, Enterprise får anpassade designer. Ganska \
             fantastiskt, eller hur?"
        }
        (Language::Sv, Topic::Booking) => {
            "Jag skulle gärna boka en personlig demo för dig! Det tar bara 15 minuter och jag \
             kan visa dig exakt hur NFC-marknadsföring kan få ditt företag att växa. När skulle \
             passa bäst för dig?"
        }
        (Language::Sv, Topic::Marketing) => {
            "Vår NFC-plattform revolutionerar kundengagemang! När någon trycker sin telefon mot \
             ditt NFC-kort ansluter de omedelbart till ditt företag och kan gå med i dina \
             marknadsföringskampanjer. Professional-planen inkluderar även \
             AI-meddelandegenerering!"
        }
        (Language::Sv, Topic::Support) => {
            "Jag är här för att hjälpa! Vi erbjuder e-poststöd med Starter, prioritetsstöd med \
             Professional och dedikerat stöd för Enterprise. Vilken specifik utmaning kan jag \
             hjälpa dig lösa?"
        }
    }
}

/// Drill-down question used instead of repeating a paragraph the session has
/// already seen.
pub fn topic_follow_up(language: Language, topic: Topic) -> &'static str {
    match (language, topic) {
        (Language::En, Topic::Pricing) => {
            "We covered the plans already - is there one you'd like me to compare in detail, \
             Starter, Professional or Enterprise?"
        }
        (Language::En, Topic::Trial) => {
            "Since the free trial came up before: shall I get you set up with it right now?"
        }
        (Language::En, Topic::Nfc) => {
            "You know the basics of our NFC cards now - curious about custom designs, or how \
             the tap-to-opt-in flow looks for your customers?"
        }
        (Language::En, Topic::Booking) => {
            "Happy to find a demo slot - which day this week suits you best?"
        }
        (Language::En, Topic::Marketing) => {
            "We touched on campaigns already - would you like to hear how the AI message \
             generation writes them for you?"
        }
        (Language::En, Topic::Support) => {
            "Still stuck on that? Tell me exactly what happens and I'll dig in."
        }
        (Language::Sv, Topic::Pricing) => {
            "Vi har gått igenom planerna - vill du att jag jämför någon i detalj, Starter, \
             Professional eller Enterprise?"
        }
        (Language::Sv, Topic::Trial) => {
            "Eftersom provperioden kom upp tidigare: ska jag hjälpa dig komma igång med den nu?"
        }
        (Language::Sv, Topic::Nfc) => {
            "Du kan grunderna om våra NFC-kort nu - nyfiken på anpassade designer, eller hur \
             opt-in-flödet ser ut för dina kunder?"
        }
        (Language::Sv, Topic::Booking) => {
            "Gärna! Vilken dag den här veckan passar dig bäst för en demo?"
        }
        (Language::Sv, Topic::Marketing) => {
            "Vi har pratat kampanjer - vill du höra hur AI-meddelandegenereringen skriver dem \
             åt dig?"
        }
        (Language::Sv, Topic::Support) => {
            "Fortfarande fast? Berätta exakt vad som händer så gräver jag vidare."
        }
    }
}

/// Greeting, personalized with the captured name once the lead form has
/// been submitted - never before.
pub fn greeting(language: Language, name: Option<&str>) -> String {
    let name_part = name.map(|n| format!(" {n}")).unwrap_or_default();
    match language {
        Language::En => format!(
            "Hello{name_part}! Nice to meet you! 😊 What can I help you with today?"
        ),
        Language::Sv => format!(
            "Hej{name_part}! Trevligt att träffa dig! 😊 Vad kan jag hjälpa dig med idag?"
        ),
    }
}

pub fn conversion(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Based on our conversation, I think KLARIO could really help your business grow! \
             Would you like to see a quick demo or speak with one of our NFC experts about \
             your specific needs?"
        }
        Language::Sv => {
            "Baserat på vår konversation tror jag att KLARIO verkligen kan hjälpa ditt företag \
             att växa! Vill du se en snabb demo eller prata med en av våra NFC-experter om \
             dina specifika behov?"
        }
    }
}

pub fn lead_capture_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            "To give you the most relevant information and keep you updated on how NFC \
             marketing can benefit your business, could you share a few quick details with me?"
        }
        Language::Sv => {
            "För att ge dig den mest relevanta informationen och hålla dig uppdaterad om hur \
             NFC-marknadsföring kan gynna ditt företag, kan du dela några snabba detaljer med \
             mig?"
        }
    }
}

pub fn fallback(language: Language) -> &'static str {
    match language {
        Language::En => {
            "That's a great question! I'd be happy to help you. Would you like to know more \
             about our NFC solutions, pricing, or book a quick demo to see how it can help \
             your business?"
        }
        Language::Sv => {
            "Det är en bra fråga! Jag hjälper gärna dig. Vill du veta mer om våra \
             NFC-lösningar, priser, eller boka en snabb demo för att se hur det kan hjälpa \
             ditt företag?"
        }
    }
}

/// After a bare "no": keep the door open without pushing a form.
pub fn no_problem(language: Language) -> &'static str {
    match language {
        Language::En => {
            "No problem at all! I'm here if anything else comes up - pricing, the free trial, \
             or how the NFC cards work."
        }
        Language::Sv => {
            "Inga problem alls! Jag finns här om något annat dyker upp - priser, provperioden, \
             eller hur NFC-korten fungerar."
        }
    }
}

pub fn welcome(language: Language, visit_seconds: u64) -> String {
    let opener = if visit_seconds > 30 {
        match language {
            Language::En => {
                "I notice you've been exploring - do you have any questions about our NFC \
                 solutions?"
            }
            Language::Sv => {
                "Jag märker att du har tittat runt lite - har du några frågor om våra \
                 NFC-lösningar?"
            }
        }
    } else {
        match language {
            Language::En => "Hi! Welcome to KLARIO! 👋",
            Language::Sv => "Hej! Välkommen till KLARIO! 👋",
        }
    };

    match language {
        Language::En => format!(
            "{opener} I'm Elena, your personal assistant. I help businesses grow with our \
             AI-powered NFC marketing platform. How can I help you today? 😊"
        ),
        Language::Sv => format!(
            "{opener} Jag är Elena, din personliga assistent. Jag hjälper företag att växa med \
             vår AI-drivna NFC-marknadsföringsplattform. Hur kan jag hjälpa dig idag? 😊"
        ),
    }
}

pub fn lead_thanks(language: Language, name: &str) -> String {
    match language {
        Language::En => format!(
            "Thank you {name}! I have your details and someone from our team will contact you \
             within 24 hours. Do you have any other questions right now?"
        ),
        Language::Sv => format!(
            "Tack {name}! Jag har dina uppgifter och någon från vårt team kommer att kontakta \
             dig inom 24 timmar. Har du några andra frågor just nu?"
        ),
    }
}

pub fn booking_confirmation(language: Language, date: &str, time: &str, timezone: &str) -> String {
    match language {
        Language::En => format!(
            "Perfect! Your demo meeting is booked for {date} at {time} ({timezone}). You'll \
             receive an email confirmation with all the details. Looking forward to meeting \
             you!"
        ),
        Language::Sv => format!(
            "Perfekt! Ditt demo-möte är bokat för {date} kl {time} ({timezone}). Du kommer att \
             få en bekräftelse via e-post med alla detaljer. Ser fram emot att träffa dig!"
        ),
    }
}

pub fn suggested_questions(language: Language) -> [&'static str; 4] {
    match language {
        Language::En => [
            "What are your pricing plans?",
            "How does NFC marketing work?",
            "Can I try it for free?",
            "Book a demo call",
        ],
        Language::Sv => [
            "Vilka prisplaner har ni?",
            "Hur fungerar NFC-marknadsföring?",
            "Kan jag testa gratis?",
            "Boka ett demo-samtal",
        ],
    }
}
