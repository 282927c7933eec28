//! Subcommands and their results

use clap::Subcommand;
use serde::Serialize;
use tarama_core::{levenshtein_distance, similarity, ScoredMatch, SearchEngine, Span};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace Turkish / Latin-extended diacritics with base letters
    Normalize,

    /// Exit 0 if the text contains the term after normalization
    Contains {
        term: String,
    },

    /// Exit 0 if the whole text is at least `threshold` similar to the term
    Fuzzy {
        term: String,

        /// Acceptance threshold (defaults to the configured value)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print edit distance and similarity of two strings
    Similarity {
        a: String,
        b: String,
    },

    /// Wrap query terms found in the text with highlight markup
    Highlight {
        query: String,

        /// Print byte spans instead of markup
        #[arg(long)]
        spans: bool,
    },

    /// Exit 0 if any of the terms is contained in the text
    Multi {
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Count (word, subterm) containment pairs
    Freq {
        term: String,
    },

    /// Rank the text's lines against the query
    Rank {
        query: String,
    },
}

impl Command {
    /// Whether the command reads the input text.
    pub fn needs_text(&self) -> bool {
        !matches!(self, Command::Similarity { .. })
    }
}

/// Result of running one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Text(String),
    Matched(bool),
    Count(usize),
    Similarity { distance: usize, score: f64 },
    Spans(Vec<Span>),
    Ranked(Vec<ScoredMatch>),
}

impl Outcome {
    /// Predicate commands fail the process when they do not match.
    pub fn success(&self) -> bool {
        !matches!(self, Outcome::Matched(false))
    }

    pub fn render(&self, json: bool) -> Result<String, serde_json::Error> {
        if json {
            return serde_json::to_string(self);
        }
        Ok(match self {
            Outcome::Text(text) => text.clone(),
            Outcome::Matched(matched) => matched.to_string(),
            Outcome::Count(count) => count.to_string(),
            Outcome::Similarity { distance, score } => format!("{}\t{:.4}", distance, score),
            Outcome::Spans(spans) => spans
                .iter()
                .map(|s| format!("{}\t{}", s.start, s.end))
                .collect::<Vec<_>>()
                .join("\n"),
            Outcome::Ranked(matches) => matches
                .iter()
                .map(|m| format!("{:.4}\t{}", m.score, m.value))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}

/// Run `command` against `text` with `engine`.
pub fn run(engine: &SearchEngine, command: &Command, text: &str) -> Outcome {
    match command {
        Command::Normalize => Outcome::Text(engine.normalize(text)),
        Command::Contains { term } => Outcome::Matched(engine.contains_normalized(text, term)),
        Command::Fuzzy { term, threshold } => Outcome::Matched(match threshold {
            Some(t) => engine.fuzzy_match_at(text, term, *t),
            None => engine.fuzzy_match(text, term),
        }),
        Command::Similarity { a, b } => Outcome::Similarity {
            distance: levenshtein_distance(a, b),
            score: similarity(a, b),
        },
        Command::Highlight { query, spans: true } => Outcome::Spans(engine.highlight_spans(text, query)),
        Command::Highlight { query, spans: false } => Outcome::Text(engine.highlight(text, query)),
        Command::Multi { terms } => Outcome::Matched(engine.multi_search(text, terms.as_slice())),
        Command::Freq { term } => Outcome::Count(engine.word_frequency(text, term)),
        Command::Rank { query } => {
            let candidates: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
            Outcome::Ranked(engine.rank(query, candidates.as_slice()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn engine() -> SearchEngine {
        SearchEngine::new()
    }

    #[test]
    fn test_normalize() {
        let out = run(&engine(), &Command::Normalize, "füyûzât");
        assert_eq!(out, Outcome::Text("fuyuzat".into()));
    }

    #[test]
    fn test_contains_exit_status() {
        let hit = run(&engine(), &Command::Contains { term: "fuyuzat".into() }, "füyûzât kitabı");
        let miss = run(&engine(), &Command::Contains { term: "zikir".into() }, "füyûzât kitabı");
        assert!(hit.success());
        assert!(!miss.success());
    }

    #[test]
    fn test_fuzzy_threshold_override() {
        let strict = Command::Fuzzy {
            term: "zikr".into(),
            threshold: Some(0.9),
        };
        let loose = Command::Fuzzy {
            term: "zikr".into(),
            threshold: None,
        };
        assert_eq!(run(&engine(), &strict, "zikir"), Outcome::Matched(false));
        assert_eq!(run(&engine(), &loose, "zikir"), Outcome::Matched(true));
    }

    #[test]
    fn test_similarity_render() {
        let cmd = Command::Similarity {
            a: "zikir".into(),
            b: "zikr".into(),
        };
        assert!(!cmd.needs_text());
        let out = run(&engine(), &cmd, "");
        assert_eq!(out.render(false).unwrap(), "1\t0.8000");
    }

    #[test]
    fn test_highlight_spans_render() {
        let cmd = Command::Highlight {
            query: "dervis".into(),
            spans: true,
        };
        let out = run(&engine(), &cmd, "Dervişler sohbet ediyordu");
        assert_eq!(out.render(false).unwrap(), "0\t7");
    }

    #[test]
    fn test_rank_lines() {
        let cmd = Command::Rank { query: "zikir".into() };
        let out = run(&engine(), &cmd, "zikr\n\nsohbet\nZikir\n");
        assert_eq!(out.render(false).unwrap(), "1.0000\tZikir\n0.8000\tzikr");
    }

    #[test]
    fn test_json_render() {
        let out = run(&engine(), &Command::Freq { term: "zikir".into() }, "zikir ve zikirhane");
        assert_eq!(out.render(true).unwrap(), r#"{"kind":"count","value":2}"#);
    }
}
