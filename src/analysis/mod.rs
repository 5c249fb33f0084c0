//! Review text analysis: lexicon scoring, topics, emotions, urgency.
//! Deterministic, dependency-free heuristics; no I/O anywhere in here.

pub mod emotions;
pub mod sentiment;
pub mod topics;

pub use sentiment::Lexicon;

use crate::types::{SentimentAnalysisResult, SentimentLevel, Urgency};

/// Phrases that force CRITICAL urgency regardless of score
const URGENCY_PHRASES: &[&str] = &[
    "immediately",
    "urgent",
    "legal",
    "lawyer",
    "never again",
    "health department",
    "report you",
];

fn classify_urgency(
    level: SentimentLevel,
    text_lower: &str,
    emotions: &[crate::types::EmotionSignal],
) -> Urgency {
    if level == SentimentLevel::VeryNegative || URGENCY_PHRASES.iter().any(|p| text_lower.contains(p))
    {
        return Urgency::Critical;
    }
    let angry = emotions
        .iter()
        .any(|e| e.emotion == "anger" && e.intensity > 0.5);
    if angry {
        return Urgency::High;
    }
    if level == SentimentLevel::Negative {
        return Urgency::Medium;
    }
    Urgency::Low
}

fn derive_insights(
    level: SentimentLevel,
    urgency: Urgency,
    topics: &[crate::types::TopicMention],
) -> Vec<String> {
    let mut insights = Vec::new();
    for t in topics.iter().filter(|t| t.sentiment == "negative") {
        insights.push(format!(
            "Address the {} concerns raised in this review ({} mention{})",
            t.topic,
            t.mentions,
            if t.mentions == 1 { "" } else { "s" }
        ));
    }
    if urgency == Urgency::Critical {
        insights.push("Route to a manager for immediate attention".to_string());
    }
    if level == SentimentLevel::VeryPositive {
        insights.push("Strong candidate for a testimonial or referral ask".to_string());
    }
    insights
}

/// Full sentiment analysis over one piece of review text. Pure function of
/// the lexicon, the window size, and the text; safe to call concurrently.
pub fn analyze(lexicon: &Lexicon, text: &str, topic_window: usize) -> SentimentAnalysisResult {
    let scored = sentiment::score_text(lexicon, text);
    let topic_mentions = topics::extract_topics(lexicon, text, topic_window);
    let emotion_signals = emotions::extract_emotions(text);
    let urgency = classify_urgency(scored.level, &text.to_lowercase(), &emotion_signals);
    let actionable_insights = derive_insights(scored.level, urgency, &topic_mentions);

    SentimentAnalysisResult {
        level: scored.level,
        score: scored.score,
        confidence: scored.confidence,
        keywords: scored.keywords,
        emotions: emotion_signals,
        topics: topic_mentions,
        urgency,
        actionable_insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> SentimentAnalysisResult {
        analyze(&Lexicon::default(), text, 30)
    }

    #[test]
    fn test_empty_text_degrades_cleanly() {
        let r = run("");
        assert_eq!(r.level, SentimentLevel::Neutral);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.urgency, Urgency::Low);
        assert!(r.topics.is_empty());
        assert!(r.emotions.is_empty());
    }

    #[test]
    fn test_very_negative_text_is_critical() {
        let r = run("Terrible experience, rude staff, total waste of money");
        assert_eq!(r.level, SentimentLevel::VeryNegative);
        assert_eq!(r.urgency, Urgency::Critical);
        assert!(!r.actionable_insights.is_empty());
    }

    #[test]
    fn test_urgency_phrase_forces_critical() {
        let r = run("It was fine but fix this immediately or I call my lawyer");
        assert_eq!(r.urgency, Urgency::Critical);
    }

    #[test]
    fn test_negative_text_is_medium_urgency() {
        let r = run("Pretty disappointing and the room was dirty");
        assert_eq!(r.level, SentimentLevel::Negative);
        assert_eq!(r.urgency, Urgency::Medium);
    }

    #[test]
    fn test_positive_text_is_low_urgency_with_referral_insight() {
        let r = run("Amazing crew, wonderful visit, fantastic all around");
        assert_eq!(r.urgency, Urgency::Low);
        assert!(r
            .actionable_insights
            .iter()
            .any(|i| i.contains("testimonial")));
    }
}
