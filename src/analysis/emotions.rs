//! Emotional marker detection over a fixed phrase table

use crate::types::EmotionSignal;

/// (emotion, phrases). Intensity is matched phrases over table size for the
/// category, capped at 1.0, so short tables saturate faster.
pub(crate) const EMOTION_TABLE: &[(&str, &[&str])] = &[
    (
        "frustration",
        &["frustrated", "frustrating", "annoyed", "annoying", "fed up", "irritating"],
    ),
    ("anger", &["angry", "furious", "outraged", "livid"]),
    (
        "disappointment",
        &["disappointed", "disappointing", "let down", "expected better", "underwhelmed"],
    ),
    (
        "satisfaction",
        &["satisfied", "pleased", "happy with", "met expectations", "no complaints"],
    ),
    (
        "delight",
        &["delighted", "thrilled", "blown away", "exceeded expectations", "made my day"],
    ),
    ("gratitude", &["thank", "thanks", "grateful", "appreciate"]),
    ("trust", &["trust", "reliable", "dependable", "honest", "count on"]),
    (
        "concern",
        &["worried", "concerned", "unsure", "hesitant", "skeptical"],
    ),
];

/// Detect emotional markers in review text. Only emotions with at least one
/// firing phrase are returned.
pub fn extract_emotions(text: &str) -> Vec<EmotionSignal> {
    let lower = text.to_lowercase();
    let mut out = Vec::new();

    for (emotion, phrases) in EMOTION_TABLE {
        let triggers: Vec<String> = phrases
            .iter()
            .filter(|p| lower.contains(*p))
            .map(|p| p.to_string())
            .collect();
        if triggers.is_empty() {
            continue;
        }
        let intensity = (triggers.len() as f32 / phrases.len() as f32).min(1.0);
        out.push(EmotionSignal {
            emotion: emotion.to_string(),
            intensity,
            triggers,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gratitude_detected_with_triggers() {
        let emotions = extract_emotions("Thanks so much, we really appreciate the help");
        let gratitude = emotions.iter().find(|e| e.emotion == "gratitude").unwrap();
        assert!(gratitude.intensity > 0.0);
        assert!(gratitude.triggers.contains(&"thanks".to_string()));
        assert!(gratitude.triggers.contains(&"appreciate".to_string()));
    }

    #[test]
    fn test_intensity_is_bounded() {
        let emotions = extract_emotions(
            "angry furious outraged livid frustrated annoyed fed up disappointed",
        );
        for e in &emotions {
            assert!(e.intensity > 0.0 && e.intensity <= 1.0);
        }
        let anger = emotions.iter().find(|e| e.emotion == "anger").unwrap();
        assert_eq!(anger.intensity, 1.0);
    }

    #[test]
    fn test_calm_text_has_no_emotions() {
        assert!(extract_emotions("The store opens at nine on weekdays").is_empty());
    }
}
