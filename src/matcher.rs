//! Suggestion matching for the type-blocking input field.
//!
//! [`Matcher::request_matching_rows`] runs three stages:
//!
//! 1. **Prefix pass**: every row that starts with the token (case-sensitive),
//!    in row order, capped at `max_matches`.
//! 2. **Candidate rules**: a pipeline of [`CandidateRule`]s that may reorder
//!    the list or append synthesized entries (numeric and string literals,
//!    the `"Text"` priority fix). The list is cut back to `max_matches`
//!    afterwards, so a synthesized literal can be dropped when the prefix
//!    pass already filled it.
//! 3. **Similarity fallback**: if the list is still empty and similarity is
//!    enabled, rows ranked by approximate closeness to the token.
//!
//! Matching is pure and synchronous; the matcher holds no per-query state.

use std::fmt;

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher as NucleoMatcher, Utf32Str};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of suggestions requested by the panel.
pub const DEFAULT_MAX_MATCHES: usize = 100;

static NUMBER_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]\d*(\.\d+)?$").expect("valid number regex"));
static STRING_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^["']"#).expect("valid quote regex"));

/// A token that stands for a new literal block rather than an indexed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralToken {
    /// `42`, `-3.5`, `0`
    Number,
    /// Anything starting with `"` or `'`.
    Text,
}

/// Classify `token` as a literal, if it is one.
pub fn classify_literal(token: &str) -> Option<LiteralToken> {
    if NUMBER_LITERAL.is_match(token) {
        Some(LiteralToken::Number)
    } else if STRING_LITERAL.is_match(token) {
        Some(LiteralToken::Text)
    } else {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate rules
// ────────────────────────────────────────────────────────────────────────────

/// A post-processing step applied to the prefix matches.
///
/// Rules run in order and may reorder `matches` or push synthesized entries.
pub trait CandidateRule: Send + Sync {
    fn apply(&self, token: &str, rows: &[String], matches: &mut Vec<String>);
}

/// Moves `label` to the front when the token is one of `triggers`.
///
/// Similarity-friendly labels such as `"Button1.Text"` otherwise sort ahead
/// of the plain `"Text"` block.
#[derive(Debug, Clone)]
pub struct PriorityLabel {
    pub triggers: Vec<String>,
    pub label: String,
}

impl PriorityLabel {
    pub fn text() -> Self {
        Self {
            triggers: vec!["text".to_string(), "Text".to_string()],
            label: "Text".to_string(),
        }
    }
}

impl CandidateRule for PriorityLabel {
    fn apply(&self, token: &str, rows: &[String], matches: &mut Vec<String>) {
        if !self.triggers.iter().any(|t| t == token) {
            return;
        }
        if !rows.iter().any(|r| *r == self.label) {
            return;
        }
        matches.retain(|m| *m != self.label);
        matches.insert(0, self.label.clone());
    }
}

/// Appends the token itself when it is a number literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberLiteral;

impl CandidateRule for NumberLiteral {
    fn apply(&self, token: &str, _rows: &[String], matches: &mut Vec<String>) {
        if classify_literal(token) == Some(LiteralToken::Number) {
            push_unique(matches, token);
        }
    }
}

/// Appends the token itself when it starts with a quote character.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringLiteral;

impl CandidateRule for StringLiteral {
    fn apply(&self, token: &str, _rows: &[String], matches: &mut Vec<String>) {
        if classify_literal(token) == Some(LiteralToken::Text) {
            push_unique(matches, token);
        }
    }
}

fn push_unique(matches: &mut Vec<String>, token: &str) {
    if !matches.iter().any(|m| m == token) {
        matches.push(token.to_string());
    }
}

/// The rule pipeline used by the panel.
pub fn default_rules() -> Vec<Box<dyn CandidateRule>> {
    vec![
        Box::new(PriorityLabel::text()),
        Box::new(NumberLiteral),
        Box::new(StringLiteral),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

/// Prefix/similarity matcher over a sorted list of labels.
pub struct Matcher {
    rows: Vec<String>,
    use_similar: bool,
    rules: Vec<Box<dyn CandidateRule>>,
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("rows", &self.rows.len())
            .field("use_similar", &self.use_similar)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Matcher {
    /// Matcher with the default rule pipeline.
    pub fn new(rows: Vec<String>, use_similar: bool) -> Self {
        Self::with_rules(rows, use_similar, default_rules())
    }

    pub fn with_rules(rows: Vec<String>, use_similar: bool, rules: Vec<Box<dyn CandidateRule>>) -> Self {
        Self {
            rows,
            use_similar,
            rules,
        }
    }

    /// Replace the rows matched against.
    pub fn set_rows(&mut self, rows: Vec<String>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Ordered suggestions for `token`.
    ///
    /// An empty token yields no suggestions.
    pub fn request_matching_rows(&self, token: &str, max_matches: usize) -> Vec<String> {
        if token.is_empty() {
            return Vec::new();
        }
        let mut matches = self.prefix_matches(token, max_matches);
        for rule in &self.rules {
            rule.apply(token, &self.rows, &mut matches);
        }
        matches.truncate(max_matches);
        if matches.is_empty() && self.use_similar {
            matches = self.similar_matches(token, max_matches);
        }
        matches
    }

    /// Rows starting with `token`, case-sensitive, in row order.
    pub fn prefix_matches(&self, token: &str, max_matches: usize) -> Vec<String> {
        if token.is_empty() {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter(|row| row.starts_with(token))
            .take(max_matches)
            .cloned()
            .collect()
    }

    /// Rows ranked by closeness to `token`.
    ///
    /// Rows the fuzzy matcher accepts come first, best score first. The rest
    /// follow, ordered by an in-order character penalty, so every row is
    /// ranked and the result is non-empty whenever rows exist.
    ///
    /// The token is matched as plain text: `!`, `^`, `$`, `'` and spaces carry
    /// no query meaning.
    pub fn similar_matches(&self, token: &str, max_matches: usize) -> Vec<String> {
        let atom = Atom::new(
            token,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
            false,
        );
        let mut nucleo = NucleoMatcher::new(Config::DEFAULT);
        let mut buf = Vec::new();
        let needle = token.to_lowercase();

        let mut fuzzy: Vec<(u16, usize)> = Vec::new();
        let mut rest: Vec<(usize, usize)> = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            buf.clear();
            match atom.score(Utf32Str::new(row, &mut buf), &mut nucleo) {
                Some(score) => fuzzy.push((score, index)),
                None => rest.push((order_penalty(&needle, &row.to_lowercase()), index)),
            }
        }
        fuzzy.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        rest.sort();

        fuzzy
            .into_iter()
            .map(|(_, i)| i)
            .chain(rest.into_iter().map(|(_, i)| i))
            .take(max_matches)
            .map(|i| self.rows[i].clone())
            .collect()
    }
}

/// Penalty for how far `needle`'s characters are from appearing in order in
/// `haystack`. A substring hit scores by its offset; otherwise each in-order
/// character costs its gap (capped) and each out-of-order one an escalating
/// penalty.
fn order_penalty(needle: &str, haystack: &str) -> usize {
    if let Some(pos) = haystack.find(needle) {
        return pos / 4;
    }
    let mut score = 0;
    let mut last: Option<usize> = None;
    let mut penalty = 10;
    for c in needle.chars() {
        match haystack.find(c) {
            Some(pos) if last.is_none_or(|l| pos > l) => {
                let gap = pos - last.map_or(0, |l| l + 1);
                score += gap.min(penalty - 5);
                last = Some(pos);
            }
            _ => {
                score += penalty;
                penalty += 5;
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(items: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_classify_literal() {
        assert_eq!(classify_literal("42"), Some(LiteralToken::Number));
        assert_eq!(classify_literal("-3.5"), Some(LiteralToken::Number));
        assert_eq!(classify_literal("0"), Some(LiteralToken::Number));
        assert_eq!(classify_literal("3."), None);
        assert_eq!(classify_literal("-"), None);
        assert_eq!(classify_literal("\"hi"), Some(LiteralToken::Text));
        assert_eq!(classify_literal("'"), Some(LiteralToken::Text));
        assert_eq!(classify_literal("abc"), None);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let m = Matcher::new(rows(&["call Button1.Click", "Call"]), false);
        assert_eq!(m.prefix_matches("call", 10), ["call Button1.Click"]);
    }

    #[test]
    fn test_prefix_respects_max() {
        let m = Matcher::new(rows(&["a1", "a2", "a3"]), false);
        assert_eq!(m.prefix_matches("a", 2), ["a1", "a2"]);
    }

    #[test]
    fn test_text_priority_only_when_indexed() {
        let m = Matcher::new(rows(&["text join"]), false);
        assert_eq!(m.request_matching_rows("text", 10), ["text join"]);
    }

    #[test]
    fn test_order_penalty_prefers_substring() {
        assert_eq!(order_penalty("click", "when button1.click"), 3);
        assert!(order_penalty("xyz", "abc") > order_penalty("ac", "abc"));
    }

    #[test]
    fn test_literal_rules_stay_within_max() {
        let m = Matcher::new(rows(&["42", "420", "4200"]), false);
        assert_eq!(m.request_matching_rows("4", 2), ["42", "420"]);
        assert_eq!(m.request_matching_rows("42", 3), ["42", "420", "4200"]);
    }

    #[test]
    fn test_similarity_treats_query_syntax_as_text() {
        let m = Matcher::new(
            rows(&["call Button1.Click", "set Label1.Text", "when Button1.Click"]),
            true,
        );
        let got = m.request_matching_rows("!click", 10);
        assert_eq!(got, ["when Button1.Click", "call Button1.Click", "set Label1.Text"]);

        let got = m.request_matching_rows("^set", 10);
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], "set Label1.Text");
    }

    #[test]
    fn test_empty_token_no_suggestions() {
        let m = Matcher::new(rows(&["a"]), true);
        assert!(m.request_matching_rows("", 10).is_empty());
    }
}
