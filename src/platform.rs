//! Per-platform formatting constraints: length, emoji, markup

use crate::types::Platform;
use once_cell::sync::Lazy;
use regex::Regex;

/// Formatting constraints for one review platform
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub max_length: usize,
    pub allows_emoji: bool,
    pub allows_markup: bool,
}

static PROFILES: [PlatformProfile; 6] = [
    PlatformProfile {
        platform: Platform::Google,
        max_length: 4096,
        allows_emoji: false,
        allows_markup: false,
    },
    PlatformProfile {
        platform: Platform::Yelp,
        max_length: 5000,
        allows_emoji: false,
        allows_markup: false,
    },
    PlatformProfile {
        platform: Platform::Facebook,
        max_length: 8000,
        allows_emoji: true,
        allows_markup: false,
    },
    PlatformProfile {
        platform: Platform::TripAdvisor,
        max_length: 5000,
        allows_emoji: false,
        allows_markup: false,
    },
    PlatformProfile {
        platform: Platform::Trustpilot,
        max_length: 4096,
        allows_emoji: false,
        allows_markup: false,
    },
    PlatformProfile {
        platform: Platform::Generic,
        max_length: 2000,
        allows_emoji: false,
        allows_markup: false,
    },
];

/// Profile lookup; unknown platforms are already folded into `Generic` at
/// deserialization, so this is total.
pub fn profile_for(platform: Platform) -> &'static PlatformProfile {
    PROFILES
        .iter()
        .find(|p| p.platform == platform)
        .unwrap_or(&PROFILES[5])
}

static MARKUP_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("regex should compile"));
static MARKUP_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*_`~#]").expect("regex should compile"));

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1F2FF   // enclosed symbols, mahjong, regional indicators
        | 0x1F300..=0x1FAFF // pictographs, emoticons, transport, supplemental
        | 0x2600..=0x27BF   // misc symbols and dingbats
        | 0x2B00..=0x2BFF   // stars and arrows
        | 0xFE0F            // variation selector-16
        | 0x200D            // zero-width joiner
    )
}

/// Truncate at the last whitespace boundary that keeps `text + "..."` within
/// `max` characters. Never cuts mid-word.
pub(crate) fn truncate_at_word_boundary(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(3);
    let head: String = text.chars().take(budget).collect();
    let cut = head
        .rfind(char::is_whitespace)
        .unwrap_or(head.len());
    let mut out = head[..cut].trim_end().to_string();
    out.push_str("...");
    out
}

/// Apply a platform profile: strip disallowed markup, strip disallowed
/// emoji, then truncate gracefully. Idempotent by construction - a formatted
/// string passes through unchanged.
pub fn format_for_platform(text: &str, profile: &PlatformProfile) -> String {
    let mut out = text.to_string();

    if !profile.allows_markup {
        out = MARKUP_TAGS.replace_all(&out, "").to_string();
        out = MARKUP_CHARS.replace_all(&out, "").to_string();
    }
    if !profile.allows_emoji {
        out = out.chars().filter(|c| !is_emoji(*c)).collect();
        // Collapse the double spaces emoji removal can leave behind
        while out.contains("  ") {
            out = out.replace("  ", " ");
        }
        out = out.trim().to_string();
    }
    truncate_at_word_boundary(&out, profile.max_length)
}
