//! Ready made predicates for the filters dashboard screens keep needing.
//!
//! Each helper encodes its own "no constraint" convention: an inactive value
//! (empty text, null, undefined) accepts every record. Anything else, such as
//! treating `"all"` as a wildcard, is the business of the individual rule.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::collate::fold;
use crate::record::{FieldValue, Record};
use crate::value::FilterValue;

/// Field equals the value. Numbers and booleans compare by value, everything
/// else by text.
pub fn field_equals<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| value.is_inactive() || matches_value(&item.field(&path), value)
}

/// Like [`field_equals`], but the value `"all"` accepts every record.
pub fn field_equals_unless_all<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| {
        value.is_inactive() || value.as_text() == Some("all") || matches_value(&item.field(&path), value)
    }
}

/// Case and accent insensitive substring search over several fields.
pub fn text_search<R: Record + 'static>(paths: &[&str]) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    move |item, value| {
        if value.is_inactive() {
            return true;
        }
        let needle = fold(value.to_string().trim());
        if needle.is_empty() {
            return true;
        }
        paths.iter().any(|path| {
            let field = item.field(path);
            !field.is_nullish() && fold(&field.to_text()).contains(&needle)
        })
    }
}

/// Numeric field is greater than or equal to the value.
pub fn at_least<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| match value.as_number() {
        None => true,
        Some(min) => field_number(&item.field(&path)).is_some_and(|n| n >= min),
    }
}

/// Numeric field is less than or equal to the value.
pub fn at_most<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| match value.as_number() {
        None => true,
        Some(max) => field_number(&item.field(&path)).is_some_and(|n| n <= max),
    }
}

/// Date field falls on or after the value's date. A record whose field is not
/// a date is filtered out, a value that is not a date filters nothing.
pub fn on_or_after<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| match value.as_text().and_then(parse_date) {
        None => true,
        Some(from) => item.field(&path).as_text().and_then(parse_date).is_some_and(|d| d >= from),
    }
}

/// Date field falls on or before the value's date.
pub fn on_or_before<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| match value.as_text().and_then(parse_date) {
        None => true,
        Some(until) => item.field(&path).as_text().and_then(parse_date).is_some_and(|d| d <= until),
    }
}

/// Boolean field equals the boolean value.
pub fn flag<R: Record + 'static>(path: impl Into<String>) -> impl Fn(&R, &FilterValue) -> bool + 'static {
    let path = path.into();
    move |item, value| match value.as_bool() {
        None => true,
        Some(wanted) => item.field(&path).as_bool() == Some(wanted),
    }
}

fn matches_value(field: &FieldValue<'_>, value: &FilterValue) -> bool {
    match (field, value) {
        (FieldValue::Number(n), _) => value.as_number() == Some(*n),
        (FieldValue::Bool(b), _) => value.as_bool() == Some(*b),
        (FieldValue::Undefined | FieldValue::Null, _) => false,
        (field, value) => field.to_text() == value.to_string(),
    }
}

fn field_number(field: &FieldValue<'_>) -> Option<f64> {
    match field {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `2024-03-01`, `2024-03-01T10:00:00` and RFC 3339 timestamps.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|d| d.date_naive()))
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").ok().map(|d| d.date()))
}
