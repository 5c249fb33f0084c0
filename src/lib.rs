//! Sentiment-driven review response engine.
//!
//! Turns a raw customer review (platform, star rating, free text) into a
//! sentiment/topic analysis, a rating-keyed response strategy, a
//! personalized, keyword-optimized, platform-compliant response, and a
//! follow-up scheduling decision. Computationally pure: no network or disk
//! access anywhere in the pipeline; persistence, delivery, and orchestration
//! belong to the caller.

pub mod analysis;
pub mod bulk;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod followup;
pub mod platform;
pub mod strategy;
pub mod types;

pub use analysis::Lexicon;
pub use bulk::{bulk_analyze, BulkAnalysisReport, BulkSummary, ReviewAnalysis};
pub use config::EngineConfig;
pub use engine::{score_confidence, ResponseEngine, ReviewEngine};
pub use error::{Result, ReviewEngineError};
pub use followup::{schedule_follow_up, FollowUpStore};
pub use platform::{format_for_platform, profile_for, PlatformProfile};
pub use strategy::strategy_for;
pub use types::{
    BrandTone, BrandVoice, EscalationLevel, FollowUpSequence, FollowUpType, GeneratedResponse,
    Platform, ResponseSettings, Review, SentimentAnalysisResult, SentimentLevel,
    StarRatingStrategy, TenantContext, Urgency,
};

/// Standalone sentiment analysis with the default lexicon and window, for
/// analytics callers that don't need a generated response.
pub fn analyze_sentiment(text: &str) -> SentimentAnalysisResult {
    let config = EngineConfig::default();
    analysis::analyze(&Lexicon::default(), text, config.topic_window)
}
