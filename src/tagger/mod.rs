//! Tagger adapter boundary
//!
//! A [`Tagger`] turns raw text into an ordered list of [`Token`]s carrying a
//! grammatical tag, a character offset and a length. The service hands one
//! long-lived tagger to every session; implementations must be callable from
//! several sessions at once. Adapters that are not thread-safe can be wrapped
//! in [`Serialized`], which makes callers take turns.

pub mod rules;

use parking_lot::Mutex;
use thiserror::Error;

use crate::schema::Token;

pub use rules::RuleTagger;

/// Failure of the tagger on one message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggingError {
    #[error("message too long: {chars} characters (limit {limit})")]
    InputTooLong { chars: usize, limit: usize },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("tagger panicked: {message}")]
    Panicked { message: String },
}

/// Text to tokens, in left-to-right order
pub trait Tagger: Send + Sync {
    /// Tag `text`. Empty text yields an empty list.
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggingError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Blocking adapter that only supports `&mut` access
pub trait TaggerMut: Send {
    fn tag_mut(&mut self, text: &str) -> Result<Vec<Token>, TaggingError>;

    fn name(&self) -> &str;
}

/// Serializes access to a non-thread-safe adapter
///
/// Sessions calling [`Tagger::tag`] concurrently queue up on the mutex.
pub struct Serialized<T> {
    name: String,
    inner: Mutex<T>,
}

impl<T: TaggerMut> Serialized<T> {
    pub fn new(inner: T) -> Self {
        Self {
            name: format!("serialized({})", inner.name()),
            inner: Mutex::new(inner),
        }
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: TaggerMut> Tagger for Serialized<T> {
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggingError> {
        self.inner.lock().tag_mut(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
