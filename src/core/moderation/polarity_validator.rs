// Polarity validation - the gate every entry write passes before storage.
//
// A positive blog refuses sad emoji and sad words, a negative blog refuses
// cheerful ones. Blogs with no polarity accept anything.
//
// NO storage here: the caller resolves the parent blog and hands it in.

use super::lexicon::{
    first_marker_in, NEGATIVE_CONTENT_MARKERS, NEGATIVE_EMOJI_BLOCKLIST,
    POSITIVE_CONTENT_MARKERS, POSITIVE_EMOJI_BLOCKLIST,
};
use crate::core::blogs::{Blog, Emoji, Entry, Polarity};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Why an entry was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Blog {0} not found")]
    ParentBlogNotFound(u64),

    #[error("Invalid Emoji")]
    InvalidEmoji(Emoji),

    #[error("Invalid Content")]
    InvalidContent { marker: &'static str },
}

impl ValidationError {
    /// Machine-readable key reported to clients.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValidationError::ParentBlogNotFound(_) => "blogNotFound",
            ValidationError::InvalidEmoji(_) => "invalidEmoji",
            ValidationError::InvalidContent { .. } => "invalidContent",
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Decide whether `entry` may be written under `parent`.
///
/// The emoji check runs before the text check, and only the first
/// failure is reported. The text check looks at the content first and the
/// title only if the content is clean, so `InvalidContent::marker` is the
/// first blocked marker (in lexicon order) found in the content, or failing
/// that in the title.
pub fn validate(entry: &Entry, parent: Option<&Blog>) -> Result<(), ValidationError> {
    let blog = parent.ok_or(ValidationError::ParentBlogNotFound(entry.blog_id))?;

    let (blocked_emoji, blocked_markers) = match blog.polarity {
        Polarity::Unset => return Ok(()),
        Polarity::Positive => (POSITIVE_EMOJI_BLOCKLIST, NEGATIVE_CONTENT_MARKERS),
        Polarity::Negative => (NEGATIVE_EMOJI_BLOCKLIST, POSITIVE_CONTENT_MARKERS),
    };

    if blocked_emoji.contains(&entry.emoji) {
        return Err(ValidationError::InvalidEmoji(entry.emoji));
    }

    let marker = first_marker_in(&entry.content, blocked_markers)
        .or_else(|| first_marker_in(&entry.title, blocked_markers));
    if let Some(marker) = marker {
        return Err(ValidationError::InvalidContent { marker });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(polarity: Polarity) -> Blog {
        Blog {
            id: Some(1),
            ..Blog::new("Feelings", "feelings", polarity)
        }
    }

    fn entry(title: &str, content: &str, emoji: Emoji) -> Entry {
        Entry::new(1, title, content, emoji)
    }

    #[test]
    fn positive_blog_rejects_sad_content() {
        let result = validate(
            &entry("ok", "I feel SAD today", Emoji::Like),
            Some(&blog(Polarity::Positive)),
        );
        assert_eq!(result, Err(ValidationError::InvalidContent { marker: "SAD" }));
    }

    #[test]
    fn emoji_violation_wins_over_content_violation() {
        let result = validate(
            &entry("Great", "pure LOVE", Emoji::Haha),
            Some(&blog(Polarity::Negative)),
        );
        assert_eq!(result, Err(ValidationError::InvalidEmoji(Emoji::Haha)));
    }

    #[test]
    fn positive_blog_emoji_rule_matches_blocklist_exactly() {
        let parent = blog(Polarity::Positive);
        for emoji in Emoji::all() {
            let rejected = validate(&entry("title", "content", emoji), Some(&parent)).is_err();
            assert_eq!(
                rejected,
                matches!(emoji, Emoji::Sad | Emoji::Angry),
                "emoji {emoji} on positive blog"
            );
        }
    }

    #[test]
    fn negative_blog_emoji_rule_matches_blocklist_exactly() {
        let parent = blog(Polarity::Negative);
        for emoji in Emoji::all() {
            let rejected = validate(&entry("title", "content", emoji), Some(&parent)).is_err();
            assert_eq!(
                rejected,
                matches!(emoji, Emoji::Like | Emoji::Haha),
                "emoji {emoji} on negative blog"
            );
        }
    }

    #[test]
    fn markers_are_checked_in_title_too() {
        let positive = blog(Polarity::Positive);
        for marker in ["SAD", "FEAR", "LONELY"] {
            let result = validate(&entry(marker, "fine", Emoji::Wow), Some(&positive));
            assert_eq!(result, Err(ValidationError::InvalidContent { marker }));
        }

        let negative = blog(Polarity::Negative);
        for marker in ["LOVE", "HAPPY", "TRUST"] {
            let result = validate(&entry(marker, "fine", Emoji::Sad), Some(&negative));
            assert_eq!(result, Err(ValidationError::InvalidContent { marker }));
        }
    }

    #[test]
    fn content_marker_is_reported_before_title_marker() {
        let positive = blog(Polarity::Positive);
        let result = validate(&entry("SAD", "LONELY night", Emoji::Wow), Some(&positive));
        assert_eq!(result, Err(ValidationError::InvalidContent { marker: "LONELY" }));
    }

    #[test]
    fn marker_of_the_other_polarity_is_allowed() {
        assert!(validate(
            &entry("HAPPY days", "LOVE and TRUST", Emoji::Love),
            Some(&blog(Polarity::Positive))
        )
        .is_ok());
        assert!(validate(
            &entry("LONELY", "SAD and FEAR", Emoji::Angry),
            Some(&blog(Polarity::Negative))
        )
        .is_ok());
    }

    #[test]
    fn substring_inside_a_longer_word_still_matches() {
        let result = validate(
            &entry("SADLY", "nothing else", Emoji::Like),
            Some(&blog(Polarity::Positive)),
        );
        assert_eq!(result, Err(ValidationError::InvalidContent { marker: "SAD" }));
    }

    #[test]
    fn lowercase_markers_do_not_match() {
        assert!(validate(
            &entry("sad", "fear and lonely", Emoji::Like),
            Some(&blog(Polarity::Positive))
        )
        .is_ok());
    }

    #[test]
    fn unset_polarity_accepts_everything() {
        let parent = blog(Polarity::Unset);
        for emoji in Emoji::all() {
            let e = entry("SAD LOVE", "FEAR HAPPY LONELY TRUST", emoji);
            assert!(validate(&e, Some(&parent)).is_ok());
        }
    }

    #[test]
    fn missing_parent_is_reported() {
        let result = validate(&Entry::new(42, "t", "c", Emoji::Like), None);
        assert_eq!(result, Err(ValidationError::ParentBlogNotFound(42)));
    }

    #[test]
    fn reason_codes_match_client_keys() {
        assert_eq!(ValidationError::InvalidEmoji(Emoji::Sad).reason_code(), "invalidEmoji");
        assert_eq!(
            ValidationError::InvalidContent { marker: "SAD" }.reason_code(),
            "invalidContent"
        );
        assert_eq!(ValidationError::ParentBlogNotFound(1).reason_code(), "blogNotFound");
    }
}
