use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contact::models::ContactForm;

pub const READY_HINT: &str = "All set. You can book a call.";

/// A condition that keeps the "book a call" button disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingField {
    Name,
    Email,
    InvalidEmail,
    Needs,
    Terms,
}

impl MissingField {
    pub fn instruction(&self) -> &'static str {
        match self {
            MissingField::Name => "enter your name",
            MissingField::Email => "enter your work email",
            MissingField::InvalidEmail => "enter a valid work email",
            MissingField::Needs => "select at least one option above",
            MissingField::Terms => "accept the Terms & Conditions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGate {
    pub can_submit: bool,
    /// Unmet conditions, in form order.
    pub missing: Vec<MissingField>,
    pub hint: String,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// One `@`, non-blank local and domain parts, and a dot inside the domain.
pub fn is_plausible_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Evaluates the contact screen's submit gate.
///
/// Conditions, in order:
/// 1. name is non-blank
/// 2. email is non-blank and plausible
/// 3. at least one need is checked
/// 4. terms are accepted
pub fn evaluate_contact_gate(form: &ContactForm) -> ContactGate {
    let mut missing = Vec::new();

    if form.name.trim().is_empty() {
        missing.push(MissingField::Name);
    }

    let email = form.email.trim();
    if email.is_empty() {
        missing.push(MissingField::Email);
    } else if !is_plausible_email(email) {
        missing.push(MissingField::InvalidEmail);
    }

    if form.needs.is_empty() {
        missing.push(MissingField::Needs);
    }
    if !form.terms_accepted {
        missing.push(MissingField::Terms);
    }

    if missing.is_empty() {
        return ContactGate {
            can_submit: true,
            missing,
            hint: READY_HINT.to_string(),
        };
    }

    let instructions: Vec<&str> = missing.iter().map(|m| m.instruction()).collect();
    ContactGate {
        can_submit: false,
        hint: format!("To book a call, please {}.", format_list(&instructions)),
        missing,
    }
}

/// Joins items as prose: "a", "a and b", "a, b, and c".
pub fn format_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
