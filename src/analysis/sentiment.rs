//! Weighted lexicon scoring of review text

use crate::types::{KeywordHits, SentimentLevel};

const DEFAULT_VERY_POSITIVE: &str = "amazing,outstanding,exceptional,incredible,phenomenal,\
perfect,wonderful,fantastic,superb,excellent,flawless,love,loved";
const DEFAULT_POSITIVE: &str = "good,great,nice,helpful,friendly,clean,professional,quick,\
prompt,happy,pleased,satisfied,recommend,tasty,comfortable,courteous";
const DEFAULT_NEUTRAL: &str = "okay,fine,average,decent,alright,normal,standard,typical,fair";
const DEFAULT_NEGATIVE: &str = "bad,slow,expensive,dirty,disappointing,disappointed,unhelpful,\
mediocre,overpriced,problem,issue,late,poor,cold,noisy";
const DEFAULT_VERY_NEGATIVE: &str = "terrible,horrible,awful,disgusting,rude,worst,scam,\
unacceptable,nightmare,waste,appalling,atrocious,refund";

/// Lexicon bucket weights
const W_VERY_POSITIVE: f32 = 2.0;
const W_POSITIVE: f32 = 1.0;
const W_NEUTRAL: f32 = 0.0;
const W_NEGATIVE: f32 = -1.0;
const W_VERY_NEGATIVE: f32 = -2.0;

/// Weighted word lists driving the scorer. Injectable so tests and tenants
/// can run side-by-side instances with different tables; `Default` reads the
/// built-in lists with `REVIEW_LEXICON_*` env overrides.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub very_positive: Vec<String>,
    pub positive: Vec<String>,
    pub neutral: Vec<String>,
    pub negative: Vec<String>,
    pub very_negative: Vec<String>,
}

fn bucket(env_var: &str, default: &str) -> Vec<String> {
    std::env::var(env_var)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            very_positive: bucket("REVIEW_LEXICON_VERY_POSITIVE", DEFAULT_VERY_POSITIVE),
            positive: bucket("REVIEW_LEXICON_POSITIVE", DEFAULT_POSITIVE),
            neutral: bucket("REVIEW_LEXICON_NEUTRAL", DEFAULT_NEUTRAL),
            negative: bucket("REVIEW_LEXICON_NEGATIVE", DEFAULT_NEGATIVE),
            very_negative: bucket("REVIEW_LEXICON_VERY_NEGATIVE", DEFAULT_VERY_NEGATIVE),
        }
    }
}

impl Lexicon {
    /// Polarity of a single token: +1 positive-family, -1 negative-family,
    /// 0 for neutral or no hit. Used for window-level topic sentiment.
    pub(crate) fn polarity_of(&self, word: &str) -> i32 {
        if self.very_positive.iter().any(|w| w == word) || self.positive.iter().any(|w| w == word)
        {
            1
        } else if self.very_negative.iter().any(|w| w == word)
            || self.negative.iter().any(|w| w == word)
        {
            -1
        } else {
            0
        }
    }
}

/// Raw scorer output before topics/emotions are folded in
#[derive(Debug, Clone)]
pub struct LexiconScore {
    pub level: SentimentLevel,
    pub score: f32,
    pub confidence: f32,
    pub keywords: KeywordHits,
}

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphabetic())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn level_for(score: f32) -> SentimentLevel {
    if score >= 1.5 {
        SentimentLevel::VeryPositive
    } else if score >= 0.5 {
        SentimentLevel::Positive
    } else if score >= -0.5 {
        SentimentLevel::Neutral
    } else if score >= -1.5 {
        SentimentLevel::Negative
    } else {
        SentimentLevel::VeryNegative
    }
}

/// Score free text against the weighted lexicon. Pure and total: empty or
/// lexicon-free text scores 0.0 / Neutral with confidence 0.
pub fn score_text(lexicon: &Lexicon, text: &str) -> LexiconScore {
    let tokens = tokenize(text);
    let mut weighted_sum = 0.0f32;
    let mut matched = 0usize;
    let mut keywords = KeywordHits::default();

    for token in &tokens {
        let weight = if lexicon.very_positive.iter().any(|w| w == token) {
            keywords.positive.push(token.clone());
            W_VERY_POSITIVE
        } else if lexicon.positive.iter().any(|w| w == token) {
            keywords.positive.push(token.clone());
            W_POSITIVE
        } else if lexicon.very_negative.iter().any(|w| w == token) {
            keywords.negative.push(token.clone());
            W_VERY_NEGATIVE
        } else if lexicon.negative.iter().any(|w| w == token) {
            keywords.negative.push(token.clone());
            W_NEGATIVE
        } else if lexicon.neutral.iter().any(|w| w == token) {
            keywords.neutral.push(token.clone());
            W_NEUTRAL
        } else {
            continue;
        };
        weighted_sum += weight;
        matched += 1;
    }

    // Neutral hits count in the denominator at weight 0, pulling mixed
    // text toward the middle of the scale.
    let score = if matched == 0 {
        0.0
    } else {
        weighted_sum / matched as f32
    };
    let confidence = (matched as f32 / 5.0).min(1.0);

    LexiconScore {
        level: level_for(score),
        score,
        confidence,
        keywords,
    }
}
