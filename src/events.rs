//! Normalizes the per-card `eventData` payload into [`Event`]s.
//!
//! The payload maps a language key (`en`, `ja`) to a JSON-encoded string of
//! the form `{"random": [...], "arrows": [...]}`, where every event has a name
//! `n` and choices `c`, and every choice holds its effect list under `r`.

use crate::effects::extract_effects;
use crate::model::{Event, EventKind, EventOptions};
use crate::scoring::choose_default_preference;
use crate::skills::SkillLookup;
use serde_json::Value;
use tracing::debug;

/// Language keys tried in order.
const LANGUAGES: [&str; 2] = ["en", "ja"];

const UNKNOWN_RANDOM: &str = "Unknown Random Event";
const UNKNOWN_CHAIN: &str = "Unknown Chain Event";

/// Parses random events followed by chain events.
///
/// Random events all get `chain_step` 1. Chain events are numbered from 1 in
/// encounter order; an event without choices is dropped but still consumes
/// its step. Undecodable event data yields no events.
pub fn parse_events(event_data: &Value, skills: &SkillLookup) -> Vec<Event> {
    let Some((lang, encoded)) = LANGUAGES
        .iter()
        .find_map(|lang| event_data.get(*lang).map(|v| (*lang, v)))
    else {
        debug!("event data has no en/ja entry");
        return Vec::new();
    };

    let Some(events) = decode_language_entry(encoded) else {
        debug!("could not decode '{lang}' event data");
        return Vec::new();
    };

    let mut out = Vec::new();

    for raw in list(&events, "random") {
        if let Some(event) = build_event(raw, EventKind::Random, 1, skills) {
            debug!("parsed random event: {:?}", event.name);
            out.push(event);
        }
    }

    for (chain_step, raw) in (1..).zip(list(&events, "arrows")) {
        if let Some(event) = build_event(raw, EventKind::Chain, chain_step, skills) {
            debug!("parsed chain event: {:?} (step {chain_step})", event.name);
            out.push(event);
        }
    }

    out
}

/// The language entry is normally a JSON string; an already-decoded object is
/// accepted as well.
fn decode_language_entry(encoded: &Value) -> Option<Value> {
    match encoded {
        Value::String(s) => serde_json::from_str::<Value>(s)
            .ok()
            .filter(Value::is_object),
        Value::Object(_) => Some(encoded.clone()),
        _ => None,
    }
}

fn list<'a>(events: &'a Value, key: &str) -> &'a [Value] {
    events
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Builds one event; `None` when it has no choices.
fn build_event(raw: &Value, kind: EventKind, chain_step: u32, skills: &SkillLookup) -> Option<Event> {
    let fallback = match kind {
        EventKind::Random => UNKNOWN_RANDOM,
        EventKind::Chain => UNKNOWN_CHAIN,
    };
    let name = raw
        .get("n")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string();

    let options: EventOptions = (1..)
        .zip(list(raw, "c"))
        .map(|(key, choice)| (key, vec![extract_effects(choice, skills)]))
        .collect();

    if options.is_empty() {
        return None;
    }

    let default_preference = choose_default_preference(&options);
    Some(Event {
        kind,
        chain_step,
        name,
        options,
        default_preference,
    })
}
