//! Species label derived from a free-form identification answer.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest label kept when no sentence boundary is found.
const MAX_FALLBACK_CHARS: usize = 80;

static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid bold regex"));

static FIELD_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:fish\s+(?:type|species)|species|type|identification)\s*:\s*")
        .expect("valid prefix regex")
});

/// Opening clauses that carry no species, each ended by a comma.
static PREAMBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:based\s+on|judging\s+(?:by|from)|(?:in|from)\s+(?:this|the)\s+(?:image|photo(?:graph)?|picture)|yes|sure|certainly|okay|ok)\b[^,]*,\s*)+",
    )
    .expect("valid preamble regex")
});

static LEAD_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:(?:the\s+)?(?:fish|species|catch)(?:\s+(?:shown\s+)?in\s+(?:this|the)\s+(?:image|picture|photo(?:graph)?))?|this(?:\s+fish)?|it)\s+(?:appears\s+to\s+be|looks\s+like|seems\s+to\s+be|is\s+likely|is)|(?:you|i|we)\s+can\s+see|(?:the|this)\s+(?:image|picture|photo(?:graph)?)\s+(?:shows|contains|features|depicts))\s+(?:an?\s+|the\s+)?",
    )
    .expect("valid lead-in regex")
});

/// Labels that are still only an opening phrase after extraction.
static PREAMBLE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:based\s+on\b|(?:in|from)\s+(?:this|the)\s+(?:image|photo(?:graph)?|picture)$|(?:yes|sure|certainly|okay|ok)$|(?:the|this)\s+(?:image|picture|photo(?:graph)?)\b)",
    )
    .expect("valid preamble label regex")
});

/// Name of the fish as understood from the identification stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesLabel(String);

impl SpeciesLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a label from the model's answer.
    ///
    /// A bold span wins. Otherwise the first line is stripped of an opening
    /// clause such as "Based on the image," and of lead-ins such as "The fish
    /// in this image is a", then cut at the first sentence or clause boundary.
    /// When only an opening phrase survives, the whole first sentence is used.
    /// Returns `None` only for blank answers.
    pub fn from_identification(answer: &str) -> Option<Self> {
        let first_line = answer
            .lines()
            .map(|line| line.trim_start_matches(['#', '-', '>', ' ', '\t']).trim())
            .find(|line| !line.is_empty())?;

        if let Some(bold) = BOLD_SPAN.captures(answer).and_then(|c| c.get(1)) {
            let label = clean(bold.as_str());
            if !label.is_empty() {
                return Some(Self(label));
            }
        }

        let line = FIELD_PREFIX.replace(first_line, "");
        let line = PREAMBLE.replace(&line, "");
        let line = LEAD_IN.replace(&line, "");
        let label = clean(first_clause(&line));
        if !label.is_empty() && !PREAMBLE_LABEL.is_match(&label) {
            return Some(Self(label));
        }

        let sentence = clean(first_sentence(first_line));
        if !sentence.is_empty() {
            return Some(Self(sentence.chars().take(MAX_FALLBACK_CHARS).collect()));
        }

        Some(Self(first_line.chars().take(MAX_FALLBACK_CHARS).collect()))
    }
}

impl fmt::Display for SpeciesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text up to the first sentence end, comma, semicolon or dash separator.
fn first_clause(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            ',' | ';' => return &text[..i],
            '.' | '!' | '?' => {
                if ends_sentence(chars.peek()) {
                    return &text[..i];
                }
            }
            ' ' => {
                if text[i..].starts_with(" - ") || text[i..].starts_with(" – ") {
                    return &text[..i];
                }
            }
            _ => {}
        }
    }
    text
}

/// Text up to the first sentence end.
fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') && ends_sentence(chars.peek()) {
            return &text[..i];
        }
    }
    text
}

fn ends_sentence(next: Option<&(usize, char)>) -> bool {
    next.map(|(_, c)| c.is_whitespace()).unwrap_or(true)
}

fn clean(text: &str) -> String {
    text.trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '"' | '\'' | '`' | '.' | ':') || c.is_whitespace())
        .to_string()
}
