//! Domain topic detection with window-based sentiment resolution

use super::sentiment::Lexicon;
use crate::types::TopicMention;

/// Fixed topic table: (topic name, keywords that signal it)
pub(crate) const TOPIC_TABLE: &[(&str, &[&str])] = &[
    (
        "service quality",
        &["service", "experience", "quality", "treatment", "care"],
    ),
    (
        "pricing",
        &["price", "pricing", "cost", "expensive", "cheap", "value", "overpriced", "money"],
    ),
    (
        "wait time",
        &["wait", "waiting", "queue", "slow", "delay", "delayed", "late", "hours"],
    ),
    (
        "cleanliness",
        &["clean", "dirty", "hygiene", "spotless", "filthy", "mess"],
    ),
    (
        "professionalism",
        &["professional", "unprofessional", "rude", "polite", "courteous", "staff", "team"],
    ),
    (
        "communication",
        &["communication", "responsive", "unresponsive", "called", "email", "contact", "informed"],
    ),
    (
        "booking",
        &["booking", "appointment", "schedule", "reservation", "availability", "cancel"],
    ),
];

/// Snap a byte offset back/forward to the nearest char boundary
fn snap_start(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn snap_end(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Count positive vs negative lexicon hits inside one keyword window
fn window_polarity(lexicon: &Lexicon, window: &str) -> i32 {
    super::sentiment::tokenize(window)
        .iter()
        .map(|w| lexicon.polarity_of(w))
        .sum()
}

/// Scan text for each topic's keywords. A topic is present on one or more
/// hits; its sentiment is resolved by tallying lexicon polarity in a
/// `window` chars slice either side of every hit, ties resolving to neutral.
pub fn extract_topics(lexicon: &Lexicon, text: &str, window: usize) -> Vec<TopicMention> {
    let lower = text.to_lowercase();
    let mut out = Vec::new();

    for (topic, keywords) in TOPIC_TABLE {
        let mut mentions = 0usize;
        let mut matched = Vec::new();
        let mut polarity = 0i32;

        for kw in *keywords {
            let mut hit = false;
            for (idx, _) in lower.match_indices(kw) {
                hit = true;
                mentions += 1;
                let start = snap_start(&lower, idx.saturating_sub(window));
                let end = snap_end(&lower, (idx + kw.len() + window).min(lower.len()));
                polarity += window_polarity(lexicon, &lower[start..end]);
            }
            if hit {
                matched.push(kw.to_string());
            }
        }

        if mentions > 0 {
            let sentiment = match polarity.cmp(&0) {
                std::cmp::Ordering::Greater => "positive",
                std::cmp::Ordering::Less => "negative",
                std::cmp::Ordering::Equal => "neutral",
            };
            out.push(TopicMention {
                topic: topic.to_string(),
                sentiment: sentiment.to_string(),
                mentions,
                keywords: matched,
            });
        }
    }

    out
}
