// Trigger words used by the moderation rules.
//
// All matching is literal, case-sensitive substring containment: "SADLY"
// trips the "SAD" marker, "sad" does not.

use crate::core::blogs::Emoji;

/// Text that does not belong on a negative blog.
pub const POSITIVE_CONTENT_MARKERS: &[&str] = &["LOVE", "HAPPY", "TRUST"];

/// Text that does not belong on a positive blog.
pub const NEGATIVE_CONTENT_MARKERS: &[&str] = &["SAD", "FEAR", "LONELY"];

/// Emoji refused on a positive blog.
pub const POSITIVE_EMOJI_BLOCKLIST: &[Emoji] = &[Emoji::Sad, Emoji::Angry];

/// Emoji refused on a negative blog.
pub const NEGATIVE_EMOJI_BLOCKLIST: &[Emoji] = &[Emoji::Like, Emoji::Haha];

/// Purged by the all-blogs sweep only.
pub const GLOBAL_CLEANUP_MARKERS: &[&str] = &["rubbish", "hell"];

/// Purged by the single-blog sweep only.
pub const SCOPED_CLEANUP_MARKERS: &[&str] = &["rude", "lol", "rofl"];

/// First marker (in list order) that appears anywhere in `text`.
pub fn first_marker_in<'a>(text: &str, markers: &[&'a str]) -> Option<&'a str> {
    markers.iter().copied().find(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_match_is_substring_and_case_sensitive() {
        assert_eq!(
            first_marker_in("SADLY it rained", NEGATIVE_CONTENT_MARKERS),
            Some("SAD")
        );
        assert_eq!(first_marker_in("sad and lonely", NEGATIVE_CONTENT_MARKERS), None);
        assert_eq!(first_marker_in("shellfish", GLOBAL_CLEANUP_MARKERS), Some("hell"));
    }

    #[test]
    fn first_marker_follows_list_order() {
        // Both present; list order wins over position in the text.
        assert_eq!(
            first_marker_in("TRUST me, LOVE", POSITIVE_CONTENT_MARKERS),
            Some("LOVE")
        );
    }

    #[test]
    fn cleanup_lexicons_do_not_overlap() {
        for marker in GLOBAL_CLEANUP_MARKERS {
            assert!(!SCOPED_CLEANUP_MARKERS.contains(marker));
        }
    }
}
