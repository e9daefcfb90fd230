//! Risk scoring - how close the call came to a disclosure.
//!
//! Three tiers of signals are searched in the merged, lower-cased history.
//! The highest tier with any hit wins: sensitive data beats remote access,
//! which beats urgency. The score is recomputed from the whole history on
//! every call, so with an append-only history it never goes down.

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::scenario::ConversationHistory;

/// Card numbers, bank identifiers, one-time codes, payments, passwords.
const SENSITIVE_SIGNALS: &[&str] = &[
    r"iban",
    r"carte",
    r"card number",
    r"credit card",
    r"bank account",
    r"sms",
    r"otp",
    r"one-time (pass)?code",
    r"verification code",
    r"paiement",
    r"payment",
    r"numéro de carte",
    r"virement",
    r"wire transfer",
    r"mot de passe",
    r"password",
];

/// Remote-control tooling.
const REMOTE_ACCESS_SIGNALS: &[&str] = &[
    r"teamviewer",
    r"anydesk",
    r"prise en main",
    r"take control",
    r"takes control",
    r"remote control",
    r"remote access",
    r"installer un logiciel",
    r"install (the |a )?software",
];

/// Urgency and haste.
const URGENCY_SIGNALS: &[&str] = &[
    r"urgence",
    r"urgent",
    r"immédiat",
    r"immediately",
    r"dépêche",
    r"hurry",
    r"vite",
    r"right now",
];

static SENSITIVE: Lazy<RegexSet> = Lazy::new(|| tier(SENSITIVE_SIGNALS));
static REMOTE_ACCESS: Lazy<RegexSet> = Lazy::new(|| tier(REMOTE_ACCESS_SIGNALS));
static URGENCY: Lazy<RegexSet> = Lazy::new(|| tier(URGENCY_SIGNALS));

fn tier(patterns: &[&str]) -> RegexSet {
    RegexSet::new(patterns.iter().map(|p| format!("(?i){}", p))).expect("valid risk patterns")
}

/// Discrete risk level, 0 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLevel {
    /// Nothing worrying yet.
    #[default]
    Low = 0,
    /// The scammer is pressing for haste.
    Moderate = 1,
    /// Remote-control software is on the table.
    High = 2,
    /// Card, bank, code or password talk.
    Critical = 3,
}

impl RiskLevel {
    /// Numeric value, 0 to 3.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RiskLevel::Low),
            1 => Ok(RiskLevel::Moderate),
            2 => Ok(RiskLevel::High),
            3 => Ok(RiskLevel::Critical),
            other => Err(format!("risk level must be 0-3, got {}", other)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

/// Scores the whole history.
pub fn score_risk(history: &ConversationHistory) -> RiskLevel {
    score_text(&history.merged_lowercase())
}

/// Scores a single block of text against the three tiers.
pub(crate) fn score_text(text: &str) -> RiskLevel {
    if SENSITIVE.is_match(text) {
        RiskLevel::Critical
    } else if REMOTE_ACCESS.is_match(text) {
        RiskLevel::High
    } else if URGENCY.is_match(text) {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
