use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Language;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
// Loose on purpose: digits, spaces, dashes, parens, optional leading +.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]{8,}$").expect("phone regex"));

/// Field-level check results for a lead submission. All failures are
/// user-correctable; the handler turns them into a 422 with a toast.
pub fn validate_lead(
    name: &str,
    email: &str,
    phone: Option<&str>,
    language: Language,
) -> Result<(), String> {
    if name.trim().len() < 2 {
        return Err(match language {
            Language::En => "Name must be at least 2 characters".to_string(),
            Language::Sv => "Namnet måste vara minst 2 tecken".to_string(),
        });
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(match language {
            Language::En => "Please enter a valid email address".to_string(),
            Language::Sv => "Ange en giltig e-postadress".to_string(),
        });
    }
    if let Some(p) = phone {
        if !p.trim().is_empty() && !PHONE_RE.is_match(p.trim()) {
            return Err(match language {
                Language::En => "Please enter a valid phone number".to_string(),
                Language::Sv => "Ange ett giltigt telefonnummer".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_booking(
    date: &str,
    time: &str,
    timezone: &str,
    language: Language,
) -> Result<(), String> {
    if date.trim().is_empty() || time.trim().is_empty() || timezone.trim().is_empty() {
        return Err(match language {
            Language::En => "Please pick a date, time and timezone".to_string(),
            Language::Sv => "Välj datum, tid och tidszon".to_string(),
        });
    }
    Ok(())
}
