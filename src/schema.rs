//! Core data model shared by the tagger, the categorizer and the wire protocol
//!
//! A [`Token`] is what the tagger emits for one contiguous piece of text.
//! A [`BucketKey`] is the closed set of semantic buckets tokens are grouped
//! into before they are sent back to the client.

use serde::Serialize;
use std::fmt;

/// A tagged piece of the original message
///
/// Serializes as `{"value", "type", "offset", "length"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Exact surface text
    pub value: String,
    /// Grammatical tag as emitted by the tagger (open vocabulary)
    #[serde(rename = "type")]
    pub tag: String,
    /// Character offset of the first character of `value` in the message
    pub offset: usize,
    /// Character count of `value`
    length: usize,
}

impl Token {
    /// Create a token; `length` is derived from `value`
    pub fn new(value: impl Into<String>, tag: impl Into<String>, offset: usize) -> Self {
        let value = value.into();
        let length = value.chars().count();
        Self {
            value,
            tag: tag.into(),
            offset,
            length,
        }
    }

    /// Character count of the surface text
    pub fn length(&self) -> usize {
        self.length
    }

    /// Bucket this token belongs to
    pub fn bucket(&self) -> BucketKey {
        BucketKey::for_tag(&self.tag)
    }
}

/// Semantic bucket a token is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKey {
    Noun,
    ProperNoun,
    Verb,
    Number,
    Symbol,
    Misc,
}

impl BucketKey {
    /// Number of buckets
    pub const COUNT: usize = 6;

    /// Every bucket, in wire order
    pub const ALL: [BucketKey; Self::COUNT] = [
        BucketKey::Noun,
        BucketKey::ProperNoun,
        BucketKey::Verb,
        BucketKey::Number,
        BucketKey::Symbol,
        BucketKey::Misc,
    ];

    /// Map a tagger tag to its bucket.
    ///
    /// Total over any tag vocabulary: anything not listed falls into `Misc`.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "NOUN" => Self::Noun,
            "PROPN" => Self::ProperNoun,
            "VERB" => Self::Verb,
            "NUM" => Self::Number,
            "SYM" => Self::Symbol,
            _ => Self::Misc,
        }
    }

    /// Wire name of the bucket
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::ProperNoun => "proper_noun",
            Self::Verb => "verb",
            Self::Number => "number",
            Self::Symbol => "symbol",
            Self::Misc => "misc",
        }
    }

    /// Position of the bucket in [`BucketKey::ALL`]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
