// Blog domain models - the two record types everything else works on.
//
// These are plain data types with no storage or transport dependencies.
// The infra layer maps them to rows, the api layer maps them to responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way a blog leans emotionally.
///
/// `Unset` is a real state, not a missing value: it switches polarity
/// validation off for every entry of the blog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    #[default]
    Unset,
}

impl Polarity {
    /// Storage form: the nullable `positive` column.
    pub fn as_positive_flag(&self) -> Option<bool> {
        match self {
            Polarity::Positive => Some(true),
            Polarity::Negative => Some(false),
            Polarity::Unset => None,
        }
    }

    pub fn from_positive_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Polarity::Positive,
            Some(false) => Polarity::Negative,
            None => Polarity::Unset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Unset => "unset",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Ok(Polarity::Positive),
            "negative" => Ok(Polarity::Negative),
            "unset" | "none" => Ok(Polarity::Unset),
            other => Err(format!("unknown polarity '{other}'")),
        }
    }
}

/// Reaction tag attached to every entry.
///
/// Serialized by its upper-case tag name (`"LIKE"`, `"SAD"`, ...), which is
/// also how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Emoji {
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

impl Emoji {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emoji::Like => "LIKE",
            Emoji::Love => "LOVE",
            Emoji::Haha => "HAHA",
            Emoji::Wow => "WOW",
            Emoji::Sad => "SAD",
            Emoji::Angry => "ANGRY",
        }
    }

    /// Every tag, in declaration order.
    pub fn all() -> [Emoji; 6] {
        [
            Emoji::Like,
            Emoji::Love,
            Emoji::Haha,
            Emoji::Wow,
            Emoji::Sad,
            Emoji::Angry,
        ]
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emoji {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_uppercase();
        Emoji::all()
            .into_iter()
            .find(|emoji| emoji.as_str() == wanted)
            .ok_or_else(|| format!("unknown emoji '{s}'"))
    }
}

/// A blog. Owns entries by reference: entries point back at it through `blog_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    /// Assigned by storage on first save.
    pub id: Option<u64>,
    pub name: String,
    pub handle: String,
    #[serde(default)]
    pub polarity: Polarity,
}

impl Blog {
    pub fn new(name: impl Into<String>, handle: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            id: None,
            name: name.into(),
            handle: handle.into(),
            polarity,
        }
    }
}

/// A single post inside a blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Assigned by storage on first save.
    pub id: Option<u64>,
    pub blog_id: u64,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub emoji: Emoji,
}

impl Entry {
    /// A not-yet-saved entry dated now.
    pub fn new(
        blog_id: u64,
        title: impl Into<String>,
        content: impl Into<String>,
        emoji: Emoji,
    ) -> Self {
        Self {
            id: None,
            blog_id,
            title: title.into(),
            content: content.into(),
            date: Utc::now(),
            emoji,
        }
    }
}
