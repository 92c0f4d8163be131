//! Slot extractors, one per intent that carries an argument.
//!
//! Stripping is literal substring removal: trigger words are removed wherever
//! they occur, including inside other words ("remind me to add sugar" -> "sugar").

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::SlotDefaults;

static WEATHER_IN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)weather in (.+)").expect("valid weather-in regex"));
static WEATHER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)weather (.+)").expect("valid weather regex"));
static TOPIC_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)wiki|tell me about|what is").expect("valid topic regex"));
static TASK_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)task|todo|remind me to|add").expect("valid task regex"));
static NOTE_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)note|remember|save that").expect("valid note regex"));

static PLUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)plus").expect("valid plus regex"));
static MINUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)minus").expect("valid minus regex"));
static TIMES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)multiplied by|times").expect("valid times regex"));
static DIVIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)divided by|divide").expect("valid divide regex"));
static ARITHMETIC_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9+\-*/().\s]+").expect("valid arithmetic run regex"));

/// "weather in X", then "weather X", else the default city.
pub fn city(text: &str, defaults: &SlotDefaults) -> String {
    let captured = WEATHER_IN_RE
        .captures(text)
        .or_else(|| WEATHER_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    if captured.is_empty() {
        defaults.city.clone()
    } else {
        captured
    }
}

pub fn topic(text: &str, defaults: &SlotDefaults) -> String {
    let stripped = TOPIC_TRIGGER_RE.replace_all(text, "").trim().to_string();
    if stripped.is_empty() {
        defaults.topic.clone()
    } else {
        stripped
    }
}

/// May return an empty string; the caller asks for clarification in that case.
pub fn task_text(text: &str, _defaults: &SlotDefaults) -> String {
    TASK_TRIGGER_RE.replace_all(text, "").trim().to_string()
}

pub fn note_text(text: &str, _defaults: &SlotDefaults) -> String {
    NOTE_TRIGGER_RE.replace_all(text, "").trim().to_string()
}

/// Spoken operators become symbols first so that "25 plus 17" forms a single run.
/// The longest run of digits, operators, dots, parens and whitespace wins
/// (first one on ties), with whitespace removed.
pub fn expression(text: &str, _defaults: &SlotDefaults) -> String {
    let symbolic = substitute_operators(text);

    ARITHMETIC_RUN_RE
        .find_iter(&symbolic)
        .map(|m| m.as_str().split_whitespace().collect::<String>())
        .fold(String::new(), |best, candidate| {
            if candidate.len() > best.len() {
                candidate
            } else {
                best
            }
        })
}

pub fn none(_text: &str, _defaults: &SlotDefaults) -> String {
    String::new()
}

pub fn substitute_operators(text: &str) -> String {
    let text = PLUS_RE.replace_all(text, "+");
    let text = MINUS_RE.replace_all(&text, "-");
    let text = TIMES_RE.replace_all(&text, "*");
    DIVIDE_RE.replace_all(&text, "/").into_owned()
}
