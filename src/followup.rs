//! Follow-up scheduling and the caller-owned sequence store

use crate::types::{FollowUpSequence, FollowUpType, Review, StarRatingStrategy};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed rating-to-type map. Ratings 4-5 map to referral requests, though
/// the current strategy table never schedules them (no delay configured).
pub fn follow_up_type_for(rating: u8) -> FollowUpType {
    match rating {
        1 => FollowUpType::ResolutionVerification,
        2 => FollowUpType::WinBack,
        3 => FollowUpType::CheckIn,
        _ => FollowUpType::ReferralRequest,
    }
}

fn message_for(follow_up_type: FollowUpType, review: &Review) -> String {
    let name = if review.reviewer_name.trim().is_empty() {
        "there".to_string()
    } else {
        review.reviewer_name.trim().to_string()
    };
    match follow_up_type {
        FollowUpType::ResolutionVerification => format!(
            "Hi {}, we wanted to confirm the issue you raised with {} has been fully resolved. If anything is still outstanding, reply and it goes straight to our manager.",
            name, review.business_name
        ),
        FollowUpType::WinBack => format!(
            "Hi {}, thank you again for your honest feedback. We've been working on the points you raised and would love a chance to win back your trust at {}.",
            name, review.business_name
        ),
        FollowUpType::CheckIn => format!(
            "Hi {}, just checking in after your last visit to {}. Has anything changed in how we could serve you better?",
            name, review.business_name
        ),
        FollowUpType::ReferralRequest => format!(
            "Hi {}, we're glad you enjoyed {}. If you know someone who'd love it too, a referral means the world to us.",
            name, review.business_name
        ),
    }
}

/// Decide whether a follow-up is due for this review. `None` when the
/// strategy has no delay (terminal for ratings 4-5 under the current table).
/// Pure given `now`; applying the result to a store is the caller's call.
pub fn schedule_follow_up(
    review: &Review,
    strategy: &StarRatingStrategy,
    now: DateTime<Utc>,
) -> Option<FollowUpSequence> {
    let delay_days = strategy.follow_up_delay_days?;
    let follow_up_type = follow_up_type_for(strategy.rating);
    Some(FollowUpSequence {
        review_id: review.id.clone(),
        initial_response_date: now,
        follow_up_date: now + Duration::days(delay_days),
        follow_up_type,
        message: message_for(follow_up_type, review),
        completed: false,
    })
}

/// Sequence store for the caller's reminder system. Keyed by review id with
/// atomic upsert semantics: scheduling twice for one review overwrites the
/// prior sequence. The engine itself never holds one of these.
#[derive(Debug, Default)]
pub struct FollowUpStore {
    inner: Mutex<HashMap<String, FollowUpSequence>>,
}

impl FollowUpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the sequence for its review id
    pub fn upsert(&self, sequence: FollowUpSequence) {
        let mut map = self.inner.lock().expect("follow-up store poisoned");
        map.insert(sequence.review_id.clone(), sequence);
    }

    /// All sequences, ordered by follow-up date for the poller
    pub fn sequences(&self) -> Vec<FollowUpSequence> {
        let map = self.inner.lock().expect("follow-up store poisoned");
        let mut out: Vec<FollowUpSequence> = map.values().cloned().collect();
        out.sort_by_key(|s| s.follow_up_date);
        out
    }

    /// Sequences due at or before `now` and not yet completed
    pub fn due(&self, now: DateTime<Utc>) -> Vec<FollowUpSequence> {
        self.sequences()
            .into_iter()
            .filter(|s| !s.completed && s.follow_up_date <= now)
            .collect()
    }

    /// Mark a sequence completed; false if the review id is unknown
    pub fn mark_completed(&self, review_id: &str) -> bool {
        let mut map = self.inner.lock().expect("follow-up store poisoned");
        match map.get_mut(review_id) {
            Some(seq) => {
                seq.completed = true;
                true
            }
            None => false,
        }
    }
}
