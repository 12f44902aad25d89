//! Token catalog
//!
//! The catalog is the lexer's only source of truth about what a token looks
//! like. It is loaded from a small text resource:
//!
//! ```text
//! <definition count>
//! <max name length>
//! <max pattern length>
//! <NAME> <pattern>
//! ...
//! ```
//!
//! Fields are whitespace-separated, so neither names nor patterns may contain
//! spaces. Definitions are kept in file order, and that order is the match
//! priority: [`Catalog::lookup`] returns the *first* definition matching at the
//! start of the text, never the longest. Keywords therefore have to be listed
//! before the generic identifier pattern.
//!
//! Within one pattern the match is leftmost-longest, as in POSIX extended
//! regular expressions: `<|<=|<>` matches all of `<=`. Each pattern is compiled
//! to a DFA that only runs anchored at offset 0 and reports the last match
//! state it passes through.

use regex::Regex;
use regex_automata::dfa::{dense, Automaton, StartKind};
use regex_automata::{Anchored, Input, MatchKind};
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Name reserved for definitions whose matches are skipped by the lexer.
pub const COMMENT: &str = "COMMENT";

/// Fatal catalog loading failures. No tokenization is possible after any of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open token definition file: {0}")]
    Io(#[from] io::Error),

    #[error("token definition header is missing its {0}")]
    MissingHeader(&'static str),

    #[error("token definition header has an invalid {field}: '{value}'")]
    InvalidHeader { field: &'static str, value: String },

    #[error("expected {expected} token definition(s) but found only {found}")]
    MissingDefinition { expected: usize, found: usize },

    #[error("token name '{name}' is longer than the declared maximum of {max}")]
    NameTooLong { name: String, max: usize },

    #[error("pattern of token '{name}' is longer than the declared maximum of {max}")]
    PatternTooLong { name: String, max: usize },

    #[error("token '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("cannot compile regex pattern of token '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot build matcher for token '{name}': {source}")]
    UnsupportedPattern {
        name: String,
        #[source]
        source: Box<dense::BuildError>,
    },
}

/// A named pattern from the catalog.
#[derive(Debug, Clone)]
pub struct TokenDefinition {
    pub name: String,
    pub pattern: String,
    matcher: Matcher,
}

impl TokenDefinition {
    /// Compile `pattern` into a definition called `name`.
    pub fn new(name: &str, pattern: &str) -> Result<Self, LoadError> {
        let matcher = Matcher::new(pattern).map_err(|err| match err {
            MatcherError::Syntax(source) => LoadError::InvalidPattern {
                name: name.to_string(),
                source,
            },
            MatcherError::Build(source) => LoadError::UnsupportedPattern {
                name: name.to_string(),
                source: Box::new(source),
            },
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// Returns true for the reserved comment definition.
    pub fn is_comment(&self) -> bool {
        self.name == COMMENT
    }
}

impl PartialEq for TokenDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern == other.pattern
    }
}

impl Eq for TokenDefinition {}

enum MatcherError {
    Syntax(regex::Error),
    Build(dense::BuildError),
}

/// Anchored, longest-match form of one pattern.
#[derive(Debug, Clone)]
struct Matcher {
    dfa: dense::DFA<Vec<u32>>,
    /// Used when the DFA gives up on non-ASCII text next to a `\b`
    fallback: Regex,
}

impl Matcher {
    fn new(pattern: &str) -> Result<Self, MatcherError> {
        // Rejects malformed patterns before wrapping them below
        Regex::new(pattern).map_err(MatcherError::Syntax)?;
        let fallback =
            Regex::new(&format!("^(?:{})", pattern)).map_err(MatcherError::Syntax)?;

        let dfa = dense::Builder::new()
            .configure(
                dense::Config::new()
                    .match_kind(MatchKind::All)
                    .start_kind(StartKind::Anchored)
                    .unicode_word_boundary(true),
            )
            .build(pattern)
            .map_err(MatcherError::Build)?;

        Ok(Self { dfa, fallback })
    }

    /// End of the longest match starting at offset 0 of `text`, if any.
    fn longest_prefix(&self, text: &str) -> Option<usize> {
        let input = Input::new(text).anchored(Anchored::Yes);
        match self.dfa.try_search_fwd(&input) {
            Ok(found) => found.map(|m| m.offset()),
            Err(_) => self.fallback.find(text).map(|m| m.end()),
        }
    }
}

/// Ordered, immutable list of token definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: Vec<TokenDefinition>,
    ignored: usize,
}

impl Catalog {
    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse catalog text.
    ///
    /// Pairs beyond the declared count are not loaded; their number is
    /// available through [`Catalog::ignored_definitions`] so the caller can
    /// warn about a stale header.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut fields = text.split_whitespace();

        let count = header_field(fields.next(), "definition count")?;
        let max_name = header_field(fields.next(), "maximum name length")?;
        let max_pattern = header_field(fields.next(), "maximum pattern length")?;

        let mut definitions = Vec::with_capacity(count);
        let mut seen = FxHashSet::default();

        for found in 0..count {
            let (Some(name), Some(pattern)) = (fields.next(), fields.next()) else {
                return Err(LoadError::MissingDefinition {
                    expected: count,
                    found,
                });
            };

            if name.len() > max_name {
                return Err(LoadError::NameTooLong {
                    name: name.to_string(),
                    max: max_name,
                });
            }
            if pattern.len() > max_pattern {
                return Err(LoadError::PatternTooLong {
                    name: name.to_string(),
                    max: max_pattern,
                });
            }
            if !seen.insert(name) {
                return Err(LoadError::DuplicateName(name.to_string()));
            }

            let definition = TokenDefinition::new(name, pattern)?;
            debug!(name, pattern, "loaded token definition");
            definitions.push(definition);
        }

        // Leftover fields are counted as (name, pattern) pairs, rounding up
        let leftover = fields.count();
        let ignored = leftover.div_ceil(2);
        if ignored > 0 {
            warn!(
                declared = count,
                ignored,
                "catalog holds more definitions than its header declares"
            );
        }

        Ok(Self {
            definitions,
            ignored,
        })
    }

    /// Build a catalog directly from `(name, pattern)` pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, LoadError> {
        let mut definitions = Vec::new();
        let mut seen = FxHashSet::default();
        for (name, pattern) in pairs {
            if !seen.insert(name) {
                return Err(LoadError::DuplicateName(name.to_string()));
            }
            definitions.push(TokenDefinition::new(name, pattern)?);
        }
        Ok(Self {
            definitions,
            ignored: 0,
        })
    }

    /// Definitions in priority order.
    pub fn definitions(&self) -> &[TokenDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Number of surplus definitions that were present in the source but not loaded.
    pub fn ignored_definitions(&self) -> usize {
        self.ignored
    }

    /// Find a definition by name.
    pub fn get(&self, name: &str) -> Option<&TokenDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// End offset of the longest non-empty match of `definition` starting at
    /// offset 0 of `text`.
    ///
    /// A match found further into the text does not count.
    pub fn match_leftmost(text: &str, definition: &TokenDefinition) -> Option<usize> {
        definition
            .matcher
            .longest_prefix(text)
            .filter(|&end| end > 0)
    }

    /// First definition, in catalog order, that matches at offset 0 of `text`,
    /// together with the match's end offset.
    pub fn lookup(&self, text: &str) -> Option<(&TokenDefinition, usize)> {
        self.definitions
            .iter()
            .find_map(|d| Self::match_leftmost(text, d).map(|end| (d, end)))
    }
}

fn header_field(field: Option<&str>, name: &'static str) -> Result<usize, LoadError> {
    let value = field.ok_or(LoadError::MissingHeader(name))?;
    value.parse().map_err(|_| LoadError::InvalidHeader {
        field: name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_CATALOG: &str = include_str!("../../token_definition.txt");

    #[test]
    fn test_load_default_catalog() {
        let catalog = Catalog::parse(DEFAULT_CATALOG).unwrap();
        assert_eq!(catalog.len(), 22);
        assert_eq!(catalog.ignored_definitions(), 0);
        assert_eq!(catalog.definitions()[0].name, COMMENT);
        assert!(catalog.get("PROGNAME_VARIABLE").is_some());
    }

    #[test]
    fn test_lookup_prefers_catalog_order() {
        let keyword_first =
            Catalog::from_pairs([("BEGIN", "begin"), ("IDENT", "[a-z]+")]).unwrap();
        let (def, end) = keyword_first.lookup("beginning").unwrap();
        assert_eq!(def.name, "BEGIN");
        assert_eq!(end, 5);

        let ident_first =
            Catalog::from_pairs([("IDENT", "[a-z]+"), ("BEGIN", "begin")]).unwrap();
        let (def, end) = ident_first.lookup("beginning").unwrap();
        assert_eq!(def.name, "IDENT");
        assert_eq!(end, 9);
    }

    #[test]
    fn test_reordering_disjoint_patterns_is_neutral() {
        let a = Catalog::from_pairs([("NUM", "[0-9]+"), ("SEMI", ";")]).unwrap();
        let b = Catalog::from_pairs([("SEMI", ";"), ("NUM", "[0-9]+")]).unwrap();
        for text in ["42;", ";42", "x"] {
            let left = a.lookup(text).map(|(d, e)| (d.name.clone(), e));
            let right = b.lookup(text).map(|(d, e)| (d.name.clone(), e));
            assert_eq!(left, right, "lookup differs on {:?}", text);
        }
    }

    #[test]
    fn test_match_must_start_at_offset_zero() {
        let catalog = Catalog::from_pairs([("NUM", "[0-9]+")]).unwrap();
        let num = &catalog.definitions()[0];
        assert_eq!(Catalog::match_leftmost("123abc", num), Some(3));
        assert_eq!(Catalog::match_leftmost("abc123", num), None);
        assert!(catalog.lookup("  7").is_none());
    }

    #[test]
    fn test_alternation_takes_longest_match() {
        let catalog = Catalog::from_pairs([("RELATIONAL_OPERATOR", "<|<=|<>")]).unwrap();
        let (def, end) = catalog.lookup("<= 1").unwrap();
        assert_eq!(def.name, "RELATIONAL_OPERATOR");
        assert_eq!(end, 2);
        assert_eq!(catalog.lookup("<> 1").map(|(_, e)| e), Some(2));
        assert_eq!(catalog.lookup("< 1").map(|(_, e)| e), Some(1));
    }

    #[test]
    fn test_longest_match_across_optional_parts() {
        let catalog = Catalog::from_pairs([("NUM", "[0-9]|[0-9]+\\.[0-9]+")]).unwrap();
        assert_eq!(catalog.lookup("3.14;").map(|(_, e)| e), Some(4));
        assert_eq!(catalog.lookup("3;").map(|(_, e)| e), Some(1));
    }

    #[test]
    fn test_word_boundary_next_to_non_ascii() {
        let catalog = Catalog::from_pairs([("BEGIN", "begin\\b")]).unwrap();
        assert_eq!(catalog.lookup("begin x").map(|(_, e)| e), Some(5));
        assert!(catalog.lookup("beginé").is_none());
        assert_eq!(catalog.lookup("begin é").map(|(_, e)| e), Some(5));
    }

    #[test]
    fn test_empty_match_is_no_match() {
        let catalog = Catalog::from_pairs([("AS", "a*")]).unwrap();
        assert!(catalog.lookup("bbb").is_none());
        assert_eq!(catalog.lookup("aab").map(|(_, e)| e), Some(2));
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let err = Catalog::parse("1\n8\n8\nBAD [a-\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidPattern { ref name, .. } if name == "BAD"));
    }

    #[test]
    fn test_surplus_definitions_are_ignored() {
        let catalog = Catalog::parse("1\n8\n8\nA a\nB b\nC c\n").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.ignored_definitions(), 2);
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            Catalog::parse(""),
            Err(LoadError::MissingHeader("definition count"))
        ));
        assert!(matches!(
            Catalog::parse("two\n8\n8\n"),
            Err(LoadError::InvalidHeader { .. })
        ));
        assert!(matches!(
            Catalog::parse("2\n8\n8\nA a\n"),
            Err(LoadError::MissingDefinition { expected: 2, found: 1 })
        ));
        assert!(matches!(
            Catalog::parse("1\n3\n8\nLONGNAME a\n"),
            Err(LoadError::NameTooLong { .. })
        ));
        assert!(matches!(
            Catalog::parse("2\n8\n8\nA a\nA b\n"),
            Err(LoadError::DuplicateName(ref n)) if n == "A"
        ));
    }
}
