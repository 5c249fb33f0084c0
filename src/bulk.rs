//! Batch analysis: fan out over reviews, fold into trend statistics

use crate::engine::{ResponseEngine, ReviewEngine};
use crate::strategy;
use crate::types::{GeneratedResponse, Review, SentimentAnalysisResult, TenantContext, Urgency};
use serde::Serialize;
use std::collections::BTreeMap;

/// Analysis (and optionally a generated response) for one review in a batch
#[derive(Debug, Clone, Serialize)]
pub struct ReviewAnalysis {
    pub review_id: String,
    pub analysis: SentimentAnalysisResult,
    /// Present only when the tenant's auto-respond gate let the engine
    /// generate a response
    pub response: Option<GeneratedResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicCount {
    pub topic: String,
    pub mentions: usize,
}

/// Batch-level trend and gap statistics
#[derive(Debug, Clone, Serialize)]
pub struct BulkSummary {
    pub total_reviews: usize,
    /// Counts keyed by sentiment level name
    pub sentiment_distribution: BTreeMap<String, usize>,
    pub average_score: f32,
    /// Top 5 topics by total mentions, ties broken by first appearance
    pub top_topics: Vec<TopicCount>,
    pub critical_review_ids: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkAnalysisReport {
    pub analyses: Vec<ReviewAnalysis>,
    pub summary: BulkSummary,
}

/// Fraction of negative reviews that triggers the service-quality
/// recommendation
const NEGATIVE_RATIO_ALERT: f32 = 0.30;

fn auto_respond_allowed(review: &Review, tenant: &TenantContext) -> bool {
    let settings = &tenant.response_settings;
    if !settings.auto_respond || review.star_rating < settings.min_rating_for_auto_response {
        return false;
    }
    match strategy::strategy_for(review.star_rating) {
        Ok(s) => s.auto_respond,
        Err(_) => false,
    }
}

fn recommendations(
    analyses: &[ReviewAnalysis],
    summary_negative: usize,
    critical: usize,
    average_score: f32,
) -> Vec<String> {
    let total = analyses.len();
    let mut out = Vec::new();
    if total == 0 {
        return out;
    }

    if summary_negative as f32 / total as f32 > NEGATIVE_RATIO_ALERT {
        out.push(
            "Over 30% of reviews in this batch are negative; schedule a service quality review with the team"
                .to_string(),
        );
    }

    // Dominant negatively-flagged topic, if any
    let mut negative_topics: BTreeMap<String, usize> = BTreeMap::new();
    for a in analyses {
        for t in a.analysis.topics.iter().filter(|t| t.sentiment == "negative") {
            *negative_topics.entry(t.topic.clone()).or_insert(0) += t.mentions;
        }
    }
    if let Some((topic, mentions)) = negative_topics.iter().max_by_key(|(_, m)| **m) {
        if *mentions >= 2 {
            out.push(format!(
                "'{}' is the most criticized topic ({} mentions); assign an owner to address it",
                topic, mentions
            ));
        }
    }

    if critical > 0 {
        out.push(format!(
            "{} review(s) flagged critical; route them to a manager within the response SLA",
            critical
        ));
    }

    if average_score >= 1.0 && summary_negative == 0 {
        out.push(
            "Sentiment is strongly positive across the batch; a referral or testimonial campaign would land well"
                .to_string(),
        );
    }

    out
}

/// Process a batch of reviews. Each review is analyzed independently (no
/// cross-review state, any order); responses are generated only where the
/// auto-respond gate allows. Reviews with out-of-range ratings still get
/// analyzed - only response generation needs the strategy table.
pub fn bulk_analyze(
    engine: &ReviewEngine,
    reviews: &[Review],
    tenant: &TenantContext,
) -> BulkAnalysisReport {
    let mut analyses = Vec::with_capacity(reviews.len());

    for review in reviews {
        let analysis = engine.analyze(&review.text);
        let response = if auto_respond_allowed(review, tenant) {
            match engine.respond(review, tenant) {
                Ok(r) => Some(r),
                Err(err) => {
                    tracing::warn!(review_id = %review.id, %err, "skipping auto-response");
                    None
                }
            }
        } else {
            None
        };
        analyses.push(ReviewAnalysis {
            review_id: review.id.clone(),
            analysis,
            response,
        });
    }

    let total = analyses.len();
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut score_sum = 0.0f32;
    let mut critical_review_ids = Vec::new();
    // First-seen order for the tie-break
    let mut topic_order: Vec<String> = Vec::new();
    let mut topic_mentions: BTreeMap<String, usize> = BTreeMap::new();
    let mut negative = 0usize;

    for a in &analyses {
        *distribution
            .entry(a.analysis.level.as_str().to_string())
            .or_insert(0) += 1;
        score_sum += a.analysis.score;
        if a.analysis.level.is_negative() {
            negative += 1;
        }
        if a.analysis.urgency == Urgency::Critical {
            critical_review_ids.push(a.review_id.clone());
        }
        for t in &a.analysis.topics {
            if !topic_mentions.contains_key(&t.topic) {
                topic_order.push(t.topic.clone());
            }
            *topic_mentions.entry(t.topic.clone()).or_insert(0) += t.mentions;
        }
    }

    let mut ranked: Vec<(usize, String, usize)> = topic_order
        .iter()
        .enumerate()
        .map(|(seen, topic)| (seen, topic.clone(), topic_mentions[topic]))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    let top_topics = ranked
        .into_iter()
        .take(5)
        .map(|(_, topic, mentions)| TopicCount { topic, mentions })
        .collect();

    let average_score = if total == 0 {
        0.0
    } else {
        score_sum / total as f32
    };
    let recommendations =
        recommendations(&analyses, negative, critical_review_ids.len(), average_score);

    BulkAnalysisReport {
        analyses,
        summary: BulkSummary {
            total_reviews: total,
            sentiment_distribution: distribution,
            average_score,
            top_topics,
            critical_review_ids,
            recommendations,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::{BrandTone, BrandVoice, Platform, ResponseSettings};
    use chrono::Utc;

    fn review(id: &str, rating: u8, text: &str) -> Review {
        Review {
            id: id.to_string(),
            platform: Platform::Google,
            star_rating: rating,
            text: text.to_string(),
            reviewer_name: "Kim".to_string(),
            review_date: Utc::now(),
            verified: true,
            business_name: "Acme".to_string(),
            service_used: None,
        }
    }

    fn tenant() -> TenantContext {
        TenantContext {
            brand_name: "Acme".to_string(),
            industry: "services".to_string(),
            seo_keywords: vec!["home repair".to_string()],
            brand_voice: BrandVoice {
                tone: BrandTone::Friendly,
                avoid_words: vec![],
                preferred_phrases: vec![],
            },
            response_settings: ResponseSettings {
                auto_respond: true,
                min_rating_for_auto_response: 3,
                require_approval_below: 3,
                max_response_length: 2000,
                include_call_to_action: false,
            },
            manager_name: None,
        }
    }

    fn batch() -> Vec<Review> {
        vec![
            review("a", 5, "Amazing service, wonderful team"),
            review("b", 4, "Good experience, friendly staff"),
            review("c", 1, "Terrible and rude, total waste of money"),
            review("d", 3, "It was okay, nothing special"),
        ]
    }

    #[test]
    fn test_distribution_and_critical_ids() {
        let engine = ReviewEngine::new(EngineConfig::default());
        let report = bulk_analyze(&engine, &batch(), &tenant());
        assert_eq!(report.summary.total_reviews, 4);
        assert_eq!(report.summary.sentiment_distribution["very_positive"], 1);
        assert_eq!(report.summary.sentiment_distribution["very_negative"], 1);
        assert_eq!(report.summary.critical_review_ids, vec!["c"]);
    }

    #[test]
    fn test_auto_respond_gate() {
        let engine = ReviewEngine::new(EngineConfig::default());
        let report = bulk_analyze(&engine, &batch(), &tenant());
        let by_id = |id: &str| report.analyses.iter().find(|a| a.review_id == id).unwrap();
        assert!(by_id("a").response.is_some());
        assert!(by_id("b").response.is_some());
        // Rating 1 is below the tenant minimum and the strategy forbids it
        assert!(by_id("c").response.is_none());
        assert!(by_id("d").response.is_some());
    }

    #[test]
    fn test_auto_respond_disabled_tenant() {
        let engine = ReviewEngine::new(EngineConfig::default());
        let mut t = tenant();
        t.response_settings.auto_respond = false;
        let report = bulk_analyze(&engine, &batch(), &t);
        assert!(report.analyses.iter().all(|a| a.response.is_none()));
    }

    #[test]
    fn test_top_topics_rank_by_mentions_with_first_seen_ties() {
        let engine = ReviewEngine::new(EngineConfig::default());
        let reviews = vec![
            review("a", 4, "Great service and friendly service desk"),
            review("b", 2, "The price was bad and the cost too high"),
            review("c", 3, "Service was fine"),
        ];
        let report = bulk_analyze(&engine, &reviews, &tenant());
        assert!(!report.summary.top_topics.is_empty());
        assert!(report.summary.top_topics.len() <= 5);
        // Mentions are non-increasing down the ranking
        let m: Vec<usize> = report.summary.top_topics.iter().map(|t| t.mentions).collect();
        assert!(m.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_negative_ratio_triggers_recommendation() {
        let engine = ReviewEngine::new(EngineConfig::default());
        let reviews = vec![
            review("a", 1, "Terrible rude awful waste"),
            review("b", 2, "Horrible and disgusting"),
            review("c", 5, "Amazing and wonderful"),
        ];
        let report = bulk_analyze(&engine, &reviews, &tenant());
        assert!(report
            .summary
            .recommendations
            .iter()
            .any(|r| r.contains("service quality")));
    }

    #[test]
    fn test_empty_batch_is_fine() {
        let engine = ReviewEngine::new(EngineConfig::default());
        let report = bulk_analyze(&engine, &[], &tenant());
        assert_eq!(report.summary.total_reviews, 0);
        assert_eq!(report.summary.average_score, 0.0);
        assert!(report.summary.recommendations.is_empty());
    }
}
