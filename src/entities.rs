//! Per-message bucket store and the categorizer that fills it
//!
//! A [`BucketStore`] is built fresh for every incoming message, populated by a
//! single [`categorize`] pass, serialized into the response and dropped.
//! Every token lands in `all_tokens` and in exactly one bucket, and each bucket
//! keeps the tokens in the order the tagger emitted them.

use crate::schema::{BucketKey, Token};
use crate::tagger::{Tagger, TaggingError};

/// All tokens of one message plus their bucket assignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketStore {
    all_tokens: Vec<Token>,
    buckets: [Vec<Token>; BucketKey::COUNT],
}

impl BucketStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// File a token under `key`
    pub fn add(&mut self, key: BucketKey, token: Token) {
        self.buckets[key.index()].push(token.clone());
        self.all_tokens.push(token);
    }

    /// Every token in tagger-emission order
    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }

    /// Tokens filed under `key`, in emission order
    pub fn bucket(&self, key: BucketKey) -> &[Token] {
        &self.buckets[key.index()]
    }

    /// Iterate `(key, tokens)` for every bucket, including empty ones
    pub fn buckets(&self) -> impl Iterator<Item = (BucketKey, &[Token])> {
        BucketKey::ALL
            .iter()
            .map(move |key| (*key, self.bucket(*key)))
    }

    /// Total token count
    pub fn len(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tokens.is_empty()
    }
}

/// Serializes as an object with all six bucket keys, empty buckets included
impl serde::Serialize for BucketStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BucketStore", BucketKey::COUNT)?;
        for (key, tokens) in self.buckets() {
            state.serialize_field(key.as_str(), tokens)?;
        }
        state.end()
    }
}

/// Group tokens into buckets by tag.
///
/// Never fails and never drops a token; unknown tags go to `misc`.
pub fn categorize<I>(tokens: I) -> BucketStore
where
    I: IntoIterator<Item = Token>,
{
    let mut store = BucketStore::new();
    for token in tokens {
        store.add(token.bucket(), token);
    }
    store
}

/// Tag `text` and categorize the tokens into a fresh store
pub fn classify(tagger: &dyn Tagger, text: &str) -> Result<BucketStore, TaggingError> {
    tagger.tag(text).map(categorize)
}
