//! The response engine: one concrete implementation behind a small
//! capability trait. Explicitly constructed, no singletons, no internal
//! caches; safe to share across threads.

use crate::analysis::{self, Lexicon};
use crate::compose;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::followup;
use crate::platform;
use crate::strategy;
use crate::types::{
    FollowUpSequence, GeneratedResponse, Review, SentimentAnalysisResult, StarRatingStrategy,
    TenantContext,
};
use chrono::Utc;

/// Capability contract the orchestration layer codes against
pub trait ResponseEngine {
    fn analyze(&self, text: &str) -> SentimentAnalysisResult;
    fn respond(&self, review: &Review, tenant: &TenantContext) -> Result<GeneratedResponse>;
    fn schedule_follow_up(
        &self,
        review: &Review,
        strategy: &StarRatingStrategy,
    ) -> Option<FollowUpSequence>;
}

/// Concrete engine. Construction takes the config and (optionally) a custom
/// lexicon so parallel instances can run different tables.
#[derive(Debug, Default)]
pub struct ReviewEngine {
    config: EngineConfig,
    lexicon: Lexicon,
}

impl ReviewEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            lexicon: Lexicon::default(),
        }
    }

    pub fn with_lexicon(config: EngineConfig, lexicon: Lexicon) -> Self {
        Self { config, lexicon }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Batch entry point; see [`crate::bulk::bulk_analyze`]
    pub fn bulk_analyze(
        &self,
        reviews: &[Review],
        tenant: &TenantContext,
    ) -> crate::bulk::BulkAnalysisReport {
        crate::bulk::bulk_analyze(self, reviews, tenant)
    }
}

/// Agreement between the declared star rating and the derived sentiment.
/// Base 0.5, +0.3 on polarity agreement, + lexicon confidence * 0.2,
/// clamped to [0, 1]. Advisory only.
pub fn score_confidence(star_rating: u8, analysis: &SentimentAnalysisResult) -> f32 {
    let mut confidence = 0.5f32;
    let agrees = (star_rating >= 4 && analysis.level.is_positive())
        || (star_rating <= 2 && analysis.level.is_negative());
    if agrees {
        confidence += 0.3;
    }
    confidence += analysis.confidence * 0.2;
    confidence.clamp(0.0, 1.0)
}

impl ResponseEngine for ReviewEngine {
    fn analyze(&self, text: &str) -> SentimentAnalysisResult {
        analysis::analyze(&self.lexicon, text, self.config.topic_window)
    }

    fn respond(&self, review: &Review, tenant: &TenantContext) -> Result<GeneratedResponse> {
        let strategy = strategy::strategy_for(review.star_rating)?;
        let analysis = self.analyze(&review.text);
        tracing::debug!(
            review_id = %review.id,
            level = analysis.level.as_str(),
            urgency = ?analysis.urgency,
            "analyzed review"
        );

        let composed = compose::compose(review, &analysis, strategy, tenant, &self.config);
        let profile = platform::profile_for(review.platform);
        let response_text = platform::format_for_platform(&composed.text, profile);

        let now = Utc::now();
        let follow_up_scheduled = followup::schedule_follow_up(review, strategy, now)
            .map(|seq| seq.follow_up_date);

        Ok(GeneratedResponse {
            response_text,
            tones: strategy.tones.iter().map(|t| t.to_string()).collect(),
            personalized_tokens: composed.tokens,
            estimated_sentiment: analysis.level,
            requires_approval: strategy::requires_approval(strategy, tenant),
            follow_up_scheduled,
            escalation_level: strategy.escalation,
            confidence_score: score_confidence(review.star_rating, &analysis),
            seo_score: composed.seo_score,
            brand_voice_score: composed.brand_voice_score,
        })
    }

    fn schedule_follow_up(
        &self,
        review: &Review,
        strategy: &StarRatingStrategy,
    ) -> Option<FollowUpSequence> {
        followup::schedule_follow_up(review, strategy, Utc::now())
    }
}
