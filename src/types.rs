//! Core data model: reviews, tenants, analysis results, and generated responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A customer review as received from the ingestion layer. Read-only input;
/// the engine never mutates or persists these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub platform: Platform,
    /// Star rating 1-5; validated at strategy lookup, not at construction
    pub star_rating: u8,
    pub text: String,
    pub reviewer_name: String,
    pub review_date: DateTime<Utc>,
    pub verified: bool,
    pub business_name: String,
    pub service_used: Option<String>,
}

/// Review platforms the formatter knows profiles for. Anything else
/// deserializes to `Generic` and gets the conservative fallback profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Yelp,
    Facebook,
    TripAdvisor,
    Trustpilot,
    #[serde(other)]
    Generic,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Yelp => "yelp",
            Platform::Facebook => "facebook",
            Platform::TripAdvisor => "tripadvisor",
            Platform::Trustpilot => "trustpilot",
            Platform::Generic => "generic",
        }
    }
}

/// Five-step sentiment scale derived from lexicon scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLevel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLevel::VeryNegative => "very_negative",
            SentimentLevel::Negative => "negative",
            SentimentLevel::Neutral => "neutral",
            SentimentLevel::Positive => "positive",
            SentimentLevel::VeryPositive => "very_positive",
        }
    }

    /// True for Positive and VeryPositive
    pub fn is_positive(&self) -> bool {
        matches!(self, SentimentLevel::Positive | SentimentLevel::VeryPositive)
    }

    /// True for Negative and VeryNegative
    pub fn is_negative(&self) -> bool {
        matches!(self, SentimentLevel::Negative | SentimentLevel::VeryNegative)
    }
}

/// How fast a human needs to see this review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

/// Severity tag controlling whether a human must approve the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationLevel {
    None,
    Medium,
    High,
    Critical,
}

/// Lexicon words that matched during scoring, bucketed by polarity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordHits {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

/// One detected emotional marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionSignal {
    pub emotion: String,
    /// Normalized to [0, 1]
    pub intensity: f32,
    /// The phrases that fired for this emotion
    pub triggers: Vec<String>,
}

/// One domain topic found in the review text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicMention {
    pub topic: String,
    /// "positive", "negative", or "neutral", resolved from the text window
    /// around each keyword hit
    pub sentiment: String,
    pub mentions: usize,
    pub keywords: Vec<String>,
}

/// Full sentiment analysis for one piece of review text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysisResult {
    pub level: SentimentLevel,
    /// Normalized weighted lexicon score, roughly [-2, 2]
    pub score: f32,
    /// Confidence in the level, [0, 1]
    pub confidence: f32,
    pub keywords: KeywordHits,
    pub emotions: Vec<EmotionSignal>,
    pub topics: Vec<TopicMention>,
    pub urgency: Urgency,
    pub actionable_insights: Vec<String>,
}

/// Static response strategy for one star rating. Exactly one exists per
/// rating 1-5; never mutated at runtime.
#[derive(Debug, Serialize)]
pub struct StarRatingStrategy {
    pub rating: u8,
    /// Tones the response should carry, in priority order
    pub tones: &'static [&'static str],
    /// Ordered workflow actions for the caller's playbook
    pub actions: &'static [&'static str],
    /// Rating-specific closing line appended after the sentiment template
    pub template_skeleton: &'static str,
    pub follow_up_delay_days: Option<i64>,
    pub escalation: EscalationLevel,
    pub requires_manager_review: bool,
    pub auto_respond: bool,
    pub max_response_time_hours: u32,
    /// Distinct resolution/escalation copy appended for ratings 1-2
    pub resolution_offer: Option<&'static str>,
}

/// Tenant brand voice constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVoice {
    pub tone: BrandTone,
    pub avoid_words: Vec<String>,
    pub preferred_phrases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandTone {
    Professional,
    Friendly,
    Casual,
    Luxury,
}

/// Tenant response policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSettings {
    pub auto_respond: bool,
    pub min_rating_for_auto_response: u8,
    /// Ratings strictly below this always require approval, regardless of
    /// the strategy table
    pub require_approval_below: u8,
    pub max_response_length: usize,
    pub include_call_to_action: bool,
}

/// Per-invocation tenant context supplied by the caller; read-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantContext {
    pub brand_name: String,
    pub industry: String,
    pub seo_keywords: Vec<String>,
    pub brand_voice: BrandVoice,
    pub response_settings: ResponseSettings,
    pub manager_name: Option<String>,
}

/// The engine's output artifact for one review. Persistence and delivery
/// belong to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub response_text: String,
    pub tones: Vec<String>,
    pub personalized_tokens: BTreeMap<String, String>,
    pub estimated_sentiment: SentimentLevel,
    pub requires_approval: bool,
    pub follow_up_scheduled: Option<DateTime<Utc>>,
    pub escalation_level: EscalationLevel,
    /// Agreement between declared rating and derived sentiment, [0, 1].
    /// Advisory only; never gates behavior.
    pub confidence_score: f32,
    pub seo_score: Option<f32>,
    pub brand_voice_score: Option<f32>,
}

/// Follow-up outreach type, fixed per star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpType {
    ResolutionVerification,
    WinBack,
    CheckIn,
    ReferralRequest,
}

impl FollowUpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpType::ResolutionVerification => "resolution_verification",
            FollowUpType::WinBack => "win_back",
            FollowUpType::CheckIn => "check_in",
            FollowUpType::ReferralRequest => "referral_request",
        }
    }
}

/// Scheduled secondary outreach tied to one review, keyed by review id.
/// Upserted idempotently; only `completed` is ever mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpSequence {
    pub review_id: String,
    pub initial_response_date: DateTime<Utc>,
    pub follow_up_date: DateTime<Utc>,
    pub follow_up_type: FollowUpType,
    pub message: String,
    pub completed: bool,
}
