//! Static star-rating strategy table.
//!
//! Five terminal states, one per rating; a review always maps to exactly one
//! strategy for its lifetime. Behavior lives in this data, not in subclasses.

use crate::error::{ReviewEngineError, Result};
use crate::types::{EscalationLevel, StarRatingStrategy, TenantContext};

static STRATEGIES: [StarRatingStrategy; 5] = [
    StarRatingStrategy {
        rating: 1,
        tones: &["apologetic", "urgent", "accountable"],
        actions: &[
            "acknowledge",
            "apologize",
            "offer_resolution",
            "escalate_to_manager",
            "schedule_follow_up",
        ],
        template_skeleton:
            "We take this seriously and a senior member of our team will review it within {{sla_hours}} hours.",
        follow_up_delay_days: Some(1),
        escalation: EscalationLevel::Critical,
        requires_manager_review: true,
        auto_respond: false,
        max_response_time_hours: 4,
        resolution_offer: Some(
            "Please contact us directly so we can make this right - your case will go straight to our manager.",
        ),
    },
    StarRatingStrategy {
        rating: 2,
        tones: &["apologetic", "empathetic"],
        actions: &[
            "acknowledge",
            "apologize",
            "offer_resolution",
            "schedule_follow_up",
        ],
        template_skeleton:
            "Your feedback has been shared with our team and we will respond within {{sla_hours}} hours.",
        follow_up_delay_days: Some(2),
        escalation: EscalationLevel::High,
        requires_manager_review: true,
        auto_respond: false,
        max_response_time_hours: 8,
        resolution_offer: Some(
            "We would welcome the chance to discuss what went wrong and put it right for you.",
        ),
    },
    StarRatingStrategy {
        rating: 3,
        tones: &["appreciative", "constructive"],
        actions: &["acknowledge", "thank", "invite_feedback", "schedule_follow_up"],
        template_skeleton: "We read every piece of feedback and use it to improve.",
        follow_up_delay_days: Some(5),
        escalation: EscalationLevel::Medium,
        requires_manager_review: false,
        auto_respond: true,
        max_response_time_hours: 24,
        resolution_offer: None,
    },
    StarRatingStrategy {
        rating: 4,
        tones: &["warm", "appreciative"],
        actions: &["thank", "reinforce_positives"],
        template_skeleton: "We look forward to welcoming you back.",
        follow_up_delay_days: None,
        escalation: EscalationLevel::None,
        requires_manager_review: false,
        auto_respond: true,
        max_response_time_hours: 48,
        resolution_offer: None,
    },
    StarRatingStrategy {
        rating: 5,
        tones: &["enthusiastic", "grateful"],
        actions: &["thank", "reinforce_positives", "invite_referral"],
        template_skeleton: "Reviews like yours make our day.",
        follow_up_delay_days: None,
        escalation: EscalationLevel::None,
        requires_manager_review: false,
        auto_respond: true,
        max_response_time_hours: 24,
        resolution_offer: None,
    },
];

/// O(1) lookup into the strategy table. Ratings outside 1-5 are rejected:
/// the table has no safe entry to default to.
pub fn strategy_for(rating: u8) -> Result<&'static StarRatingStrategy> {
    if !(1..=5).contains(&rating) {
        return Err(ReviewEngineError::Validation {
            message: format!("star rating {} is outside the 1-5 range", rating),
        });
    }
    Ok(&STRATEGIES[(rating - 1) as usize])
}

/// Approval gate: the strategy's manager-review flag, overridden by tenant
/// policy for ratings below `require_approval_below`.
pub fn requires_approval(strategy: &StarRatingStrategy, tenant: &TenantContext) -> bool {
    strategy.requires_manager_review
        || strategy.rating < tenant.response_settings.require_approval_below
}
