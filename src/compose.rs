//! Response composition: template selection, personalization, brand voice,
//! and SEO keyword injection.
//!
//! Variant selection is deliberately pseudo-random so repeated responses to
//! similar reviews do not read verbatim-identical on a public profile page.

use crate::config::EngineConfig;
use crate::types::{
    BrandTone, Review, SentimentAnalysisResult, SentimentLevel, StarRatingStrategy, TenantContext,
};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use std::collections::BTreeMap;

/// Five variants per sentiment level, keyed by level rather than star
/// rating: a 4-star rant and a 4-star rave need different words.
const VERY_POSITIVE_TEMPLATES: &[&str] = &[
    "Thank you so much, {{reviewer_name}}! Reviews like yours remind us why we love what we do at {{brand_name}}. We're thrilled that {{service_used}} exceeded your expectations.",
    "Wow - thank you, {{reviewer_name}}! The whole {{brand_name}} team is delighted you had such a great experience with {{service_used}}.",
    "{{reviewer_name}}, thank you for this wonderful review! We'll be sharing your kind words about {{service_used}} with the entire {{brand_name}} team.",
    "We are so thankful for your feedback, {{reviewer_name}}! Making {{service_used}} a standout experience is what {{brand_name}} aims for every day.",
    "Thank you for the glowing review, {{reviewer_name}}! It means a great deal to everyone at {{brand_name}} that {{service_used}} hit the mark for you.",
];

const POSITIVE_TEMPLATES: &[&str] = &[
    "Thank you for the kind review, {{reviewer_name}}! We're glad {{service_used}} worked well for you, and we hope to see you at {{brand_name}} again soon.",
    "Thanks so much, {{reviewer_name}}! It's great to hear you had a good experience with {{service_used}}.",
    "We appreciate you taking the time to review us, {{reviewer_name}}! Glad {{brand_name}} could deliver on {{service_used}}.",
    "Thank you, {{reviewer_name}}! Your feedback on {{service_used}} helps the {{brand_name}} team keep doing what works.",
    "Thanks for the positive words, {{reviewer_name}}! We look forward to your next visit to {{brand_name}}.",
];

const NEUTRAL_TEMPLATES: &[&str] = &[
    "Thank you for your feedback, {{reviewer_name}}. We're always working to make {{service_used}} better, and reviews like yours show us where to focus.",
    "Thanks for sharing your experience, {{reviewer_name}}. We'd love to hear what would have made {{service_used}} a five-star visit.",
    "We appreciate the honest review, {{reviewer_name}}. {{brand_name}} takes every piece of feedback on {{service_used}} seriously.",
    "Thank you for taking the time, {{reviewer_name}}. If there's anything we could have done better with {{service_used}}, we're listening.",
    "Thanks for the feedback, {{reviewer_name}}. We hope your next experience with {{brand_name}} earns the missing stars.",
];

const NEGATIVE_TEMPLATES: &[&str] = &[
    "{{reviewer_name}}, thank you for letting us know about your experience. We're sorry {{service_used}} fell short, particularly regarding {{issue_paraphrase}}.",
    "We're sorry to hear this, {{reviewer_name}}. This isn't the standard {{brand_name}} holds itself to, and we take {{issue_paraphrase}} seriously.",
    "Thank you for the honest feedback, {{reviewer_name}}. We apologize for the experience with {{service_used}} and we're looking into {{issue_paraphrase}}.",
    "{{reviewer_name}}, we apologize that your visit didn't meet expectations. {{issue_paraphrase}} is something we're actively addressing at {{brand_name}}.",
    "We're sorry your experience with {{service_used}} disappointed you, {{reviewer_name}}. Your comments about {{issue_paraphrase}} have been passed to our team.",
];

const VERY_NEGATIVE_TEMPLATES: &[&str] = &[
    "{{reviewer_name}}, we are truly sorry about your experience. What you describe, especially {{issue_paraphrase}}, is not acceptable to anyone at {{brand_name}}.",
    "We sincerely apologize, {{reviewer_name}}. {{manager_name}} has been made aware of your review and {{issue_paraphrase}} is being treated as a priority.",
    "{{reviewer_name}}, thank you for bringing this to our attention, and we are sorry it happened at all. {{issue_paraphrase}} is under review by {{manager_name}} personally.",
    "We owe you an apology, {{reviewer_name}}. Your experience with {{service_used}} does not reflect who {{brand_name}} wants to be, and {{issue_paraphrase}} is being investigated.",
    "{{reviewer_name}}, we are very sorry. {{brand_name}} takes reviews like yours extremely seriously and {{issue_paraphrase}} has been escalated immediately.",
];

/// Natural-language paraphrases for negatively-flagged topics
const ISSUE_PARAPHRASES: &[(&str, &str)] = &[
    ("service quality", "the service falling short of what you deserved"),
    ("pricing", "the concerns you raised about value for money"),
    ("wait time", "the longer wait than you should have faced"),
    ("cleanliness", "the cleanliness issues you encountered"),
    ("professionalism", "the way our team came across"),
    ("communication", "the gaps in our communication"),
    ("booking", "the trouble you had booking with us"),
];

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("regex should compile"));

fn templates_for(level: SentimentLevel) -> &'static [&'static str] {
    match level {
        SentimentLevel::VeryPositive => VERY_POSITIVE_TEMPLATES,
        SentimentLevel::Positive => POSITIVE_TEMPLATES,
        SentimentLevel::Neutral => NEUTRAL_TEMPLATES,
        SentimentLevel::Negative => NEGATIVE_TEMPLATES,
        SentimentLevel::VeryNegative => VERY_NEGATIVE_TEMPLATES,
    }
}

fn issue_paraphrase(analysis: &SentimentAnalysisResult) -> Option<String> {
    // The most-mentioned negatively-flagged topic wins
    let worst = analysis
        .topics
        .iter()
        .filter(|t| t.sentiment == "negative")
        .max_by_key(|t| t.mentions)?;
    ISSUE_PARAPHRASES
        .iter()
        .find(|(topic, _)| *topic == worst.topic)
        .map(|(_, phrase)| phrase.to_string())
}

/// Personalization context for `{{token}}` substitution
fn build_tokens(
    review: &Review,
    analysis: &SentimentAnalysisResult,
    strategy: &StarRatingStrategy,
    tenant: &TenantContext,
    config: &EngineConfig,
) -> BTreeMap<String, String> {
    let mut tokens = BTreeMap::new();
    let reviewer = if review.reviewer_name.trim().is_empty() {
        config.default_reviewer_name.clone()
    } else {
        review.reviewer_name.trim().to_string()
    };
    tokens.insert("reviewer_name".to_string(), reviewer);
    tokens.insert("brand_name".to_string(), tenant.brand_name.clone());
    tokens.insert(
        "service_used".to_string(),
        review
            .service_used
            .clone()
            .unwrap_or_else(|| config.default_service_name.clone()),
    );
    tokens.insert(
        "review_date".to_string(),
        review.review_date.format("%B %-d, %Y").to_string(),
    );
    // An empty signature reads worse than the brand name
    tokens.insert(
        "manager_name".to_string(),
        tenant
            .manager_name
            .clone()
            .unwrap_or_else(|| format!("the {} team", tenant.brand_name)),
    );
    tokens.insert(
        "sla_hours".to_string(),
        strategy.max_response_time_hours.to_string(),
    );
    if let Some(phrase) = issue_paraphrase(analysis) {
        tokens.insert("issue_paraphrase".to_string(), phrase);
    } else if analysis.level.is_negative() {
        tokens.insert(
            "issue_paraphrase".to_string(),
            "the experience not meeting your expectations".to_string(),
        );
    }
    tokens
}

/// Replace every `{{token}}`; unresolved tokens become empty strings rather
/// than leaking placeholder syntax to a customer.
fn substitute_tokens(template: &str, tokens: &BTreeMap<String, String>) -> String {
    let out = TOKEN_PATTERN.replace_all(template, |caps: &regex::Captures| {
        let name = &caps[1];
        match tokens.get(name) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(token = name, "unresolved personalization token");
                String::new()
            }
        }
    });
    out.to_string()
}

/// Tone-specific lexical substitutions, applied whole-word
fn tone_substitutions(tone: BrandTone) -> &'static [(&'static str, &'static str)] {
    match tone {
        BrandTone::Luxury => &[
            ("great", "exceptional"),
            ("good", "impeccable"),
            ("glad", "delighted"),
        ],
        BrandTone::Casual => &[
            ("We are", "We're"),
            ("we are", "we're"),
            ("It is", "It's"),
            ("it is", "it's"),
            ("do not", "don't"),
            ("cannot", "can't"),
        ],
        BrandTone::Friendly | BrandTone::Professional => &[],
    }
}

fn apply_brand_voice(text: &str, tenant: &TenantContext) -> String {
    let mut out = text.to_string();

    if !tenant.brand_voice.avoid_words.is_empty() {
        let alternation = tenant
            .brand_voice
            .avoid_words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        if let Ok(re) = Regex::new(&format!(r"(?i)\b({})\b", alternation)) {
            out = re.replace_all(&out, "").to_string();
        }
    }

    for (from, to) in tone_substitutions(tenant.brand_voice.tone) {
        let re = Regex::new(&format!(r"\b{}\b", regex::escape(from)))
            .expect("regex should compile");
        out = re.replace_all(&out, *to).to_string();
    }

    // Tidy the holes avoid-word removal leaves
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out.replace(" ,", ",").replace(" .", ".").trim().to_string()
}

/// One sentence embedding the tenant's top keyword, varied by polarity so it
/// reads naturally next to the template body.
fn seo_sentence(keyword: &str, tenant: &TenantContext, level: SentimentLevel) -> String {
    if level.is_negative() {
        format!(
            "We want every customer to count on {} for {}, and we clearly missed that mark here.",
            tenant.brand_name, keyword
        )
    } else {
        format!(
            "We're proud to be a trusted choice for {} in the {} space.",
            keyword, tenant.industry
        )
    }
}

/// Keyword occurrences over total words. Only affects the score; a stuffed
/// response is penalized, never rejected.
fn seo_score(text: &str, keyword: &str, config: &EngineConfig) -> f32 {
    let total_words = text.split_whitespace().count();
    if total_words == 0 {
        return 0.0;
    }
    let occurrences = text.to_lowercase().matches(&keyword.to_lowercase()).count();
    let density = occurrences as f32 / total_words as f32;
    if density < config.seo.partial_density {
        1.0
    } else if density < config.seo.stuffed_density {
        0.5
    } else {
        0.1
    }
}

/// Share of preferred phrases present, docked for any avoid-word that
/// survived removal. `None` when the tenant configured neither.
fn brand_voice_score(text: &str, tenant: &TenantContext) -> Option<f32> {
    let voice = &tenant.brand_voice;
    if voice.preferred_phrases.is_empty() && voice.avoid_words.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    let preferred = if voice.preferred_phrases.is_empty() {
        1.0
    } else {
        let present = voice
            .preferred_phrases
            .iter()
            .filter(|p| lower.contains(&p.to_lowercase()))
            .count();
        present as f32 / voice.preferred_phrases.len() as f32
    };
    let leaks = voice
        .avoid_words
        .iter()
        .filter(|w| lower.contains(&w.to_lowercase()))
        .count();
    Some((preferred - 0.25 * leaks as f32).clamp(0.0, 1.0))
}

/// Composer output, before platform formatting
#[derive(Debug, Clone)]
pub struct ComposedResponse {
    pub text: String,
    pub tokens: BTreeMap<String, String>,
    pub seo_score: Option<f32>,
    pub brand_voice_score: Option<f32>,
}

/// Assemble the response: template variant -> personalization -> brand voice
/// -> SEO injection -> rating-specific closes -> tenant length ceiling.
pub fn compose(
    review: &Review,
    analysis: &SentimentAnalysisResult,
    strategy: &StarRatingStrategy,
    tenant: &TenantContext,
    config: &EngineConfig,
) -> ComposedResponse {
    let variants = templates_for(analysis.level);
    let pick = rand::thread_rng().gen_range(0..variants.len());
    let mut body = variants[pick].to_string();

    body.push(' ');
    body.push_str(strategy.template_skeleton);

    let tokens = build_tokens(review, analysis, strategy, tenant, config);
    let mut text = substitute_tokens(&body, &tokens);
    text = apply_brand_voice(&text, tenant);

    let mut seo = None;
    if let Some(keyword) = tenant.seo_keywords.first() {
        text.push(' ');
        text.push_str(&seo_sentence(keyword, tenant, analysis.level));
        seo = Some(seo_score(&text, keyword, config));
    }

    if let Some(offer) = strategy.resolution_offer {
        text.push(' ');
        text.push_str(offer);
    }

    if tenant.response_settings.include_call_to_action {
        text.push(' ');
        if analysis.level.is_negative() {
            text.push_str("Please reach out to us directly so we can make this right.");
        } else {
            text.push_str(&format!(
                "We'd love to welcome you back to {} soon.",
                tenant.brand_name
            ));
        }
    }

    let max = tenant.response_settings.max_response_length;
    if max > 0 {
        text = crate::platform::truncate_at_word_boundary(&text, max);
    }

    let brand_voice = brand_voice_score(&text, tenant);

    ComposedResponse {
        text,
        tokens,
        seo_score: seo,
        brand_voice_score: brand_voice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, Lexicon};
    use crate::strategy::strategy_for;
    use crate::types::{BrandVoice, Platform, ResponseSettings};
    use chrono::Utc;

    fn review(rating: u8, text: &str) -> Review {
        Review {
            id: "r-1".to_string(),
            platform: Platform::Google,
            star_rating: rating,
            text: text.to_string(),
            reviewer_name: "Dana".to_string(),
            review_date: Utc::now(),
            verified: true,
            business_name: "Beanline".to_string(),
            service_used: Some("a tasting flight".to_string()),
        }
    }

    fn tenant() -> TenantContext {
        TenantContext {
            brand_name: "Beanline".to_string(),
            industry: "specialty coffee".to_string(),
            seo_keywords: vec!["organic coffee".to_string()],
            brand_voice: BrandVoice {
                tone: BrandTone::Professional,
                avoid_words: vec!["cheap".to_string()],
                preferred_phrases: vec!["thank".to_string()],
            },
            response_settings: ResponseSettings {
                auto_respond: true,
                min_rating_for_auto_response: 3,
                require_approval_below: 3,
                max_response_length: 3000,
                include_call_to_action: true,
            },
            manager_name: Some("Priya".to_string()),
        }
    }

    fn composed(rating: u8, text: &str) -> ComposedResponse {
        let r = review(rating, text);
        let t = tenant();
        let analysis = analyze(&Lexicon::default(), &r.text, 30);
        let strategy = strategy_for(rating).unwrap();
        compose(&r, &analysis, strategy, &t, &EngineConfig::default())
    }

    #[test]
    fn test_no_placeholder_leaks() {
        for rating in 1..=5u8 {
            let out = composed(rating, "Terrible rude staff, awful waste of money");
            assert!(!out.text.contains("{{"), "leaked token in: {}", out.text);
            assert!(!out.text.contains("}}"));
        }
    }

    #[test]
    fn test_reviewer_and_brand_are_personalized() {
        let out = composed(5, "Absolutely amazing service, the team was wonderful");
        assert!(out.text.contains("Dana"));
        assert!(out.text.contains("Beanline"));
        assert_eq!(out.tokens.get("reviewer_name").unwrap(), "Dana");
        assert_eq!(out.tokens.get("sla_hours").unwrap(), "24");
    }

    #[test]
    fn test_missing_reviewer_falls_back_to_default() {
        let mut r = review(5, "Amazing and wonderful");
        r.reviewer_name = "  ".to_string();
        let t = tenant();
        let analysis = analyze(&Lexicon::default(), &r.text, 30);
        let out = compose(
            &r,
            &analysis,
            strategy_for(5).unwrap(),
            &t,
            &EngineConfig::default(),
        );
        assert!(out.text.contains("Valued Customer"));
    }

    #[test]
    fn test_seo_keyword_appears_below_stuffing_threshold() {
        let out = composed(5, "Absolutely amazing service, the team was wonderful");
        assert!(out.text.to_lowercase().contains("organic coffee"));
        assert_eq!(out.seo_score, Some(1.0));
    }

    #[test]
    fn test_avoid_words_are_removed_whole_word_case_insensitive() {
        let mut t = tenant();
        t.brand_voice.avoid_words = vec!["cheap".to_string(), "deal".to_string()];
        let out = apply_brand_voice("A cheap DEAL for a cheaper crowd", &t);
        assert!(!out.to_lowercase().contains("cheap "));
        assert!(!out.to_lowercase().contains("deal"));
        // Word-boundary removal keeps "cheaper" intact
        assert!(out.contains("cheaper"));
    }

    #[test]
    fn test_negative_response_carries_resolution_offer() {
        let out = composed(1, "Terrible experience, rude staff, total waste of money");
        assert!(out.text.contains("make this right") || out.text.contains("manager"));
        // Negative CTA, not the welcome-back one
        assert!(!out.text.contains("welcome you back"));
    }

    #[test]
    fn test_negative_topic_is_paraphrased_not_echoed() {
        let out = composed(2, "The wait was slow and the price was terrible");
        // Paraphrase table entries, not raw review text
        assert!(
            out.text.contains("wait") || out.text.contains("value for money"),
            "no paraphrase in: {}",
            out.text
        );
    }

    #[test]
    fn test_luxury_tone_upgrades_wording() {
        let mut t = tenant();
        t.brand_voice.tone = BrandTone::Luxury;
        let r = review(4, "Great clean place, really good");
        let analysis = analyze(&Lexicon::default(), &r.text, 30);
        // Run enough times to cover every template variant
        for _ in 0..40 {
            let out = compose(
                &r,
                &analysis,
                strategy_for(4).unwrap(),
                &t,
                &EngineConfig::default(),
            );
            assert!(!out.text.contains("great"), "unupgraded: {}", out.text);
            assert!(!out.text.contains(" good "), "unupgraded: {}", out.text);
        }
    }

    #[test]
    fn test_casual_tone_contracts() {
        let mut t = tenant();
        t.brand_voice.tone = BrandTone::Casual;
        let r = review(5, "Amazing wonderful fantastic");
        let analysis = analyze(&Lexicon::default(), &r.text, 30);
        for _ in 0..40 {
            let out = compose(
                &r,
                &analysis,
                strategy_for(5).unwrap(),
                &t,
                &EngineConfig::default(),
            );
            assert!(!out.text.contains("We are"), "uncontracted: {}", out.text);
        }
    }

    #[test]
    fn test_tenant_length_ceiling_applies() {
        let mut t = tenant();
        t.response_settings.max_response_length = 120;
        let r = review(3, "It was okay, nothing special");
        let analysis = analyze(&Lexicon::default(), &r.text, 30);
        let out = compose(
            &r,
            &analysis,
            strategy_for(3).unwrap(),
            &t,
            &EngineConfig::default(),
        );
        assert!(out.text.chars().count() <= 120);
        assert!(out.text.ends_with("..."));
    }

    #[test]
    fn test_brand_voice_score_reflects_preferred_phrases() {
        let out = composed(5, "Amazing wonderful service");
        // Every template thanks the reviewer, and "cheap" never leaks
        assert_eq!(out.brand_voice_score, Some(1.0));
    }
}
