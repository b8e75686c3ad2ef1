//! Heuristic extraction of a transaction draft from receipt text.
//!
//! The text comes from an OCR engine on the client side, so it is noisy:
//! every rule here is best-effort and the draft is meant to be reviewed by the
//! user before it is submitted as a transaction.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Money, TransactionKind};

const DESCRIPTION_MAX_CHARS: usize = 140;
const UNKNOWN_DESCRIPTION: &str = "Unknown";
const FALLBACK_CATEGORY: &str = "other";

/// Checked in order; the first category with a keyword hit wins
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "food",
        &["restaurant", "cafe", "pizza", "burger", "food", "snack", "starbucks", "diner", "kfc", "mcd"],
    ),
    (
        "transportation",
        &["uber", "ola", "bus", "train", "taxi", "flight", "cab", "metro", "fuel", "gas", "diesel"],
    ),
    ("shopping", &["mall", "store", "shopping", "amazon", "flipkart", "purchase"]),
    ("entertainment", &["movie", "cinema", "concert", "theatre", "ticket"]),
    (
        "utilities",
        &["electricity", "water", "internet", "broadband", "phone", "mobile", "utility", "bill"],
    ),
    ("healthcare", &["doctor", "medicine", "hospital", "pharmacy", "medical"]),
    ("education", &["book", "course", "school", "education", "learning"]),
];

static TOTAL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)grand\s*total|total\s*amount|amount\s*due|total").expect("valid total-line regex")
});

static AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:rs\.?\s*|inr\s*|₹\s*|\$\s*)?(\d{1,3}(?:[,\s]\d{2,3})*(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?)")
        .expect("valid amount regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}[/-]\d{2}[/-]\d{4}|\d{4}[/-]\d{2}[/-]\d{2})").expect("valid date regex")
});

/// Draft produced from one receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptDraft {
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
}

/// Parse receipt text. `today` is used when no usable date is printed.
pub fn parse(text: &str, today: NaiveDate) -> DomainResult<ReceiptDraft> {
    if text.trim().is_empty() {
        return Err(DomainError::validation("receipt text cannot be empty"));
    }

    let amount = extract_amount(text);
    Ok(ReceiptDraft {
        description: extract_description(text),
        category: pick_category(text).to_string(),
        kind: if amount.is_positive() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        },
        amount,
        date: extract_date(text).unwrap_or(today),
    })
}

fn pick_category(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Largest number on the first total line, else anywhere in the text
fn extract_amount(text: &str) -> Money {
    let total_line = text.lines().find(|line| TOTAL_LINE.is_match(line));

    let mut candidates = total_line.map(scan_amounts).unwrap_or_default();
    if candidates.is_empty() {
        candidates = scan_amounts(text);
    }
    candidates.into_iter().max().unwrap_or(Money::ZERO)
}

fn scan_amounts(haystack: &str) -> Vec<Money> {
    AMOUNT
        .captures_iter(haystack)
        .filter_map(|caps| {
            let raw: String = caps[1]
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            raw.parse::<f64>().ok().and_then(Money::from_decimal)
        })
        .collect()
}

fn extract_date(text: &str) -> Option<NaiveDate> {
    let raw = DATE.find(text)?.as_str().replace('/', "-");
    let format = if raw.as_bytes().get(4) == Some(&b'-') {
        "%Y-%m-%d"
    } else {
        "%d-%m-%Y"
    };
    NaiveDate::parse_from_str(&raw, format).ok()
}

fn extract_description(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(DESCRIPTION_MAX_CHARS).collect())
        .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string())
}
