//! Built-in rule-based tagger
//!
//! A small deterministic English tagger so the service runs without an
//! external model. It segments text with a single regex, then assigns
//! Universal POS style tags from a closed-class lexicon, word shape and
//! suffix heuristics, in that order. Accuracy is modest; the contract
//! (ordered tokens, character offsets, total tagging) is what matters.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Tagger, TaggingError};
use crate::schema::Token;

/// Default upper bound on message length, in characters
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Words, numbers (with inner separators), or any single non-space character
static SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \p{N}+(?:[.,:/]\p{N}+)*
        | \p{L}[\p{L}\p{M}\p{N}]*(?:['’\-]\p{L}[\p{L}\p{M}\p{N}]*)*
        | \S",
    )
    .expect("segment regex is valid")
});

static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{S}#@%§*]$").expect("symbol regex is valid"));
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}$").expect("punct regex is valid"));

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "either", "neither", "all", "both", "my", "your", "his", "her", "its", "our",
    "their", "whose", "which", "what",
];
const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "mine", "yours", "hers", "ours", "theirs", "someone", "something", "anyone", "anything",
    "everyone", "everything", "nobody", "nothing",
];
const ADPOSITIONS: &[&str] = &[
    "on", "in", "at", "of", "for", "with", "from", "by", "about", "into", "onto", "over",
    "under", "between", "through", "during", "without", "within", "against", "among",
    "across", "behind", "beyond", "near", "toward", "towards", "upon", "to", "off", "up",
    "down", "out", "around", "after", "before",
];
const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];
const SUBORDINATORS: &[&str] = &[
    "if", "because", "although", "though", "while", "whereas", "unless", "since", "until",
    "whether", "once", "than", "that",
];
const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have",
    "has", "had", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "isn't", "aren't", "wasn't", "weren't", "don't", "doesn't", "didn't", "won't", "can't",
];
const PARTICLES: &[&str] = &["not"];
const ADVERBS: &[&str] = &[
    "very", "too", "also", "just", "now", "then", "here", "there", "never", "always",
    "often", "soon", "again", "still", "already", "almost", "quite", "rather", "well",
    "when", "where", "why", "how",
];
const INTERJECTIONS: &[&str] = &[
    "oh", "hey", "hello", "hi", "wow", "yes", "ouch", "oops", "please",
];
const VERBS: &[&str] = &[
    "sat", "sit", "sits", "go", "goes", "went", "gone", "run", "runs", "ran", "see", "sees",
    "saw", "seen", "make", "makes", "made", "take", "takes", "took", "taken", "get", "gets",
    "got", "give", "gives", "gave", "given", "come", "comes", "came", "know", "knows",
    "knew", "known", "think", "thinks", "thought", "say", "says", "said", "tell", "tells",
    "told", "find", "finds", "found", "eat", "eats", "ate", "eaten", "write", "writes",
    "wrote", "written", "read", "reads", "buy", "buys", "bought", "bring", "brings",
    "brought", "keep", "keeps", "kept", "leave", "leaves", "left", "feel", "feels", "felt",
    "stand", "stands", "stood", "speak", "speaks", "spoke", "want", "wants", "like", "likes",
    "love", "loves", "need", "needs", "use", "uses", "put", "puts", "let", "lets", "begin",
    "began", "begun", "become", "became", "meet", "met", "pay", "paid", "sell", "sold",
    "send", "sent", "build", "built", "fall", "fell", "fallen", "hold", "held", "lose",
    "lost", "win", "won", "sleep", "slept", "drink", "drank", "drive", "drove", "fly",
    "flew", "swim", "swam", "sing", "sang", "jump", "jumps", "walk", "walks", "live",
    "lives", "work", "works", "play", "plays", "look", "looks", "seem", "seems", "help",
    "helps", "show", "shows", "try", "tries", "ask", "asks", "call", "calls",
];
const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
    "million", "billion",
];

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let groups: [(&[&str], &str); 11] = [
        (VERBS, "VERB"),
        (NUMBER_WORDS, "NUM"),
        (ADVERBS, "ADV"),
        (INTERJECTIONS, "INTJ"),
        (PARTICLES, "PART"),
        (SUBORDINATORS, "SCONJ"),
        (COORDINATORS, "CCONJ"),
        (ADPOSITIONS, "ADP"),
        (PRONOUNS, "PRON"),
        (AUXILIARIES, "AUX"),
        (DETERMINERS, "DET"),
    ];
    // Later groups win on overlap ("that" is DET, not SCONJ)
    let mut map = HashMap::new();
    for (words, tag) in groups {
        for word in words {
            map.insert(*word, tag);
        }
    }
    map
});

const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "ive", "less", "ical", "ish"];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ism", "ist", "ance", "ence",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify"];

/// Lexicon and heuristics tagger; `Sync`, shared directly across sessions
#[derive(Debug, Clone)]
pub struct RuleTagger {
    max_chars: usize,
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTagger {
    pub fn new() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Reject messages longer than `max_chars` characters
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    fn check_input(&self, text: &str) -> Result<(), TaggingError> {
        if text.contains('\0') {
            return Err(TaggingError::InvalidInput {
                reason: "message contains NUL characters".to_string(),
            });
        }
        let chars = text.chars().count();
        if chars > self.max_chars {
            return Err(TaggingError::InputTooLong {
                chars,
                limit: self.max_chars,
            });
        }
        Ok(())
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggingError> {
        self.check_input(text)?;

        let mut tokens = Vec::new();
        let mut last_byte = 0;
        let mut char_offset = 0;
        let mut prev_tag: Option<&'static str> = None;
        let mut sentence_start = true;

        for m in SEGMENT_RE.find_iter(text) {
            char_offset += text[last_byte..m.start()].chars().count();
            last_byte = m.start();

            let value = m.as_str();
            let tag = tag_word(value, prev_tag, sentence_start);
            sentence_start = tag == "PUNCT" && matches!(value, "." | "!" | "?");
            prev_tag = Some(tag);

            tokens.push(Token::new(value, tag, char_offset));
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        "rules"
    }
}

/// Tag one segment given the previous tag and whether a sentence starts here
fn tag_word(word: &str, prev_tag: Option<&str>, sentence_start: bool) -> &'static str {
    let mut chars = word.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return "X",
    };

    if first.is_numeric() {
        return "NUM";
    }
    if chars.next().is_none() && !first.is_alphabetic() {
        if SYMBOL_RE.is_match(word) {
            return "SYM";
        }
        if PUNCT_RE.is_match(word) {
            return "PUNCT";
        }
        return "X";
    }

    let lower = word.to_lowercase();
    if let Some(tag) = LEXICON.get(lower.as_str()) {
        return *tag;
    }

    if first.is_uppercase() {
        let all_caps = word.chars().count() > 1 && word.chars().all(|c| !c.is_lowercase());
        if all_caps || !sentence_start {
            return "PROPN";
        }
    }

    if lower.ends_with("ly") && lower.len() > 4 {
        return "ADV";
    }
    if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return "ADJ";
    }
    if NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return "NOUN";
    }

    let after_nominal_marker = matches!(prev_tag, Some("DET" | "ADJ" | "ADP" | "NUM"));
    if after_nominal_marker {
        return "NOUN";
    }
    if VERB_SUFFIXES.iter().any(|s| lower.ends_with(s))
        || (lower.len() > 4 && (lower.ends_with("ing") || lower.ends_with("ed")))
    {
        return "VERB";
    }
    if matches!(prev_tag, Some("PRON" | "AUX" | "PART")) {
        return "VERB";
    }

    "NOUN"
}
