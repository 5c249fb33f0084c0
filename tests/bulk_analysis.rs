//! Batch analysis through the public API

use chrono::Utc;
use review_engine::{
    BrandTone, BrandVoice, EngineConfig, Platform, ResponseSettings, Review, ReviewEngine,
    TenantContext,
};

fn review(id: &str, rating: u8, text: &str) -> Review {
    Review {
        id: id.to_string(),
        platform: Platform::Yelp,
        star_rating: rating,
        text: text.to_string(),
        reviewer_name: String::new(),
        review_date: Utc::now(),
        verified: false,
        business_name: "Harbor Dental".to_string(),
        service_used: Some("a cleaning".to_string()),
    }
}

fn tenant() -> TenantContext {
    TenantContext {
        brand_name: "Harbor Dental".to_string(),
        industry: "dentistry".to_string(),
        seo_keywords: vec!["family dentist".to_string()],
        brand_voice: BrandVoice {
            tone: BrandTone::Professional,
            avoid_words: vec![],
            preferred_phrases: vec![],
        },
        response_settings: ResponseSettings {
            auto_respond: true,
            min_rating_for_auto_response: 4,
            require_approval_below: 3,
            max_response_length: 3000,
            include_call_to_action: false,
        },
        manager_name: None,
    }
}

#[test]
fn batch_summary_counts_and_averages() {
    let engine = ReviewEngine::new(EngineConfig::default());
    let reviews = vec![
        review("r1", 5, "Amazing hygienist, wonderful and professional care"),
        review("r2", 4, "Good clean office and friendly staff"),
        review("r3", 2, "Disappointing visit, the wait was slow and the office dirty"),
        review("r4", 1, "Terrible, rude receptionist, never again"),
        review("r5", 3, "It was fine, fairly standard"),
    ];
    let report = engine.bulk_analyze(&reviews, &tenant());

    assert_eq!(report.summary.total_reviews, 5);
    let counted: usize = report.summary.sentiment_distribution.values().sum();
    assert_eq!(counted, 5);

    // "never again" forces critical urgency on r4
    assert!(report
        .summary
        .critical_review_ids
        .contains(&"r4".to_string()));

    // Gate: only ratings >= 4 with an auto-respond strategy get responses
    for a in &report.analyses {
        let rating = reviews.iter().find(|r| r.id == a.review_id).unwrap().star_rating;
        assert_eq!(a.response.is_some(), rating >= 4, "gate broke for {}", a.review_id);
    }

    // Average score sits between the batch extremes
    assert!(report.summary.average_score > -2.0 && report.summary.average_score < 2.0);
}

#[test]
fn batch_surfaces_dominant_negative_topic() {
    let engine = ReviewEngine::new(EngineConfig::default());
    let reviews = vec![
        review("r1", 2, "The wait was slow, a long delay at every step"),
        review("r2", 1, "Terrible wait, we sat in the queue for two hours"),
        review("r3", 2, "Slow check-in and a late start again"),
    ];
    let report = engine.bulk_analyze(&reviews, &tenant());

    let top = &report.summary.top_topics[0];
    assert_eq!(top.topic, "wait time");
    assert!(report
        .summary
        .recommendations
        .iter()
        .any(|r| r.contains("wait time")));
    assert!(report
        .summary
        .recommendations
        .iter()
        .any(|r| r.contains("30%")));
}

#[test]
fn order_insensitive_analysis() {
    let engine = ReviewEngine::new(EngineConfig::default());
    let mut reviews = vec![
        review("r1", 5, "Amazing and wonderful"),
        review("r2", 1, "Terrible and rude"),
        review("r3", 3, "It was okay"),
    ];
    let forward = engine.bulk_analyze(&reviews, &tenant());
    reviews.reverse();
    let backward = engine.bulk_analyze(&reviews, &tenant());

    assert_eq!(
        forward.summary.sentiment_distribution,
        backward.summary.sentiment_distribution
    );
    assert_eq!(forward.summary.average_score, backward.summary.average_score);
    assert_eq!(
        forward.summary.critical_review_ids.len(),
        backward.summary.critical_review_ids.len()
    );
}
