//! Taggers with controllable behaviour for timing-sensitive tests

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use entity_stream::{RuleTagger, Tagger, TaggingError, Token};

/// Emits exactly the given `(value, tag)` pairs for any input
pub struct FixedTagger {
    pub tokens: Vec<(&'static str, &'static str)>,
}

impl Tagger for FixedTagger {
    fn tag(&self, _text: &str) -> Result<Vec<Token>, TaggingError> {
        let mut offset = 0;
        Ok(self
            .tokens
            .iter()
            .map(|(value, tag)| {
                let token = Token::new(*value, *tag, offset);
                offset += value.chars().count() + 1;
                token
            })
            .collect())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Rule tagger that blocks for `delay` on messages starting with "slow",
/// signalling `started` when it begins
pub struct SlowTagger {
    pub delay: Duration,
    pub started: Arc<Notify>,
}

impl SlowTagger {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: Arc::new(Notify::new()),
        }
    }
}

impl Tagger for SlowTagger {
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggingError> {
        if text.starts_with("slow") {
            self.started.notify_one();
            std::thread::sleep(self.delay);
        }
        RuleTagger::new().tag(text)
    }

    fn name(&self) -> &str {
        "slow"
    }
}
