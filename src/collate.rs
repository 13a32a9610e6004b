//! Locale aware string ordering.
//!
//! Table columns are sorted the way people read them, not by code point:
//! "apple" sits next to "Apple" and "Äpfel", not after "Zebra". The
//! [`Collator`] compares strings at three levels, each one only consulted
//! when the previous one ties:
//!
//! 1. base letters, ignoring case and accents,
//! 2. accents,
//! 3. case, lowercase first.
//!
//! A final comparison on the raw code points makes the order total.
//! In numeric mode runs of digits compare by their value ("item2" < "item10").

use std::cmp::Ordering;

// canonical decomposition splits "é" into "e" followed by a combining accent
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collator {
    numeric: bool,
}

impl Collator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn numeric(numeric: bool) -> Self {
        Self { numeric }
    }
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.key(a).cmp(&self.key(b))
    }
    /// Precomputes everything `compare` needs, for when one string takes
    /// part in many comparisons.
    pub fn key(&self, text: &str) -> CollationKey {
        let decomposed: Vec<char> = text.nfd().collect();
        let mut primary = Vec::with_capacity(decomposed.len());
        let mut secondary = Vec::with_capacity(decomposed.len());
        let mut tertiary = Vec::with_capacity(decomposed.len());
        let mut digits = String::new();
        for &c in &decomposed {
            secondary.extend(c.to_lowercase());
            if is_combining_mark(c) {
                continue;
            }
            tertiary.push(c.is_uppercase());
            if self.numeric && c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            flush_digits(&mut digits, &mut primary);
            primary.extend(c.to_lowercase().map(Unit::Char));
        }
        flush_digits(&mut digits, &mut primary);
        CollationKey {
            primary,
            secondary,
            tertiary,
            raw: text.to_string(),
        }
    }
}

fn flush_digits(digits: &mut String, primary: &mut Vec<Unit>) {
    if digits.is_empty() {
        return;
    }
    let trimmed = digits.trim_start_matches('0');
    let value = if trimmed.is_empty() { "0" } else { trimmed };
    primary.push(Unit::Digits {
        len: value.len(),
        digits: value.to_string(),
    });
    digits.clear();
}

/// Lowercases and strips accents; two strings that fold to the same text are
/// equal at the primary level.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

// digit runs order by length first, which for trimmed runs is their value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Digits { len: usize, digits: String },
    Char(char),
}

/// Sort key produced by [`Collator::key`]. Field order is comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<Unit>,
    secondary: Vec<char>,
    tertiary: Vec<bool>,
    raw: String,
}
