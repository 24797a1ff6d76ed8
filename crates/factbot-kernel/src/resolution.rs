//! Resolution engine: find a stored answer for `(subject, relation)`.
//!
//! Four strategies run in order and the first hit wins:
//! forward (subject → object), reverse (object → subject), then, only for a
//! blank relation, relation-agnostic forward and reverse.

use factbot_types::error::FactbotResult;
use factbot_types::fact::FactLookup;
use serde::Serialize;
use tracing::debug;

/// Which lookup produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Forward,
    Reverse,
    ForwardAny,
    ReverseAny,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Forward => "forward",
            MatchStrategy::Reverse => "reverse",
            MatchStrategy::ForwardAny => "forward_any",
            MatchStrategy::ReverseAny => "reverse_any",
        }
    }

    /// Strategies that ignore the relation; only tried when it is blank.
    fn relation_agnostic(&self) -> bool {
        matches!(self, MatchStrategy::ForwardAny | MatchStrategy::ReverseAny)
    }
}

/// Outcome of a resolution. A miss is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found {
        answer: String,
        strategy: MatchStrategy,
    },
    NotFound,
}

impl Resolution {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Resolution::Found { answer, .. } => Some(answer.as_str()),
            Resolution::NotFound => None,
        }
    }
}

const STRATEGIES: [MatchStrategy; 4] = [
    MatchStrategy::Forward,
    MatchStrategy::Reverse,
    MatchStrategy::ForwardAny,
    MatchStrategy::ReverseAny,
];

/// Resolve `(subject, relation)` against `lookup`.
///
/// A lookup error aborts the cascade and is returned as is.
pub fn resolve<L>(subject: &str, relation: &str, lookup: &L) -> FactbotResult<Resolution>
where
    L: FactLookup + ?Sized,
{
    let subject = subject.trim();
    let relation = relation.trim();
    let blank_relation = relation.is_empty();

    for strategy in STRATEGIES {
        if strategy.relation_agnostic() != blank_relation {
            continue;
        }
        let hit = match strategy {
            MatchStrategy::Forward => lookup.forward(subject, relation)?,
            MatchStrategy::Reverse => lookup.reverse(subject, relation)?,
            MatchStrategy::ForwardAny => lookup.forward_any(subject)?,
            MatchStrategy::ReverseAny => lookup.reverse_any(subject)?,
        };
        if let Some(answer) = hit {
            debug!(subject, relation, strategy = strategy.as_str(), "Resolved");
            return Ok(Resolution::Found { answer, strategy });
        }
    }
    debug!(subject, relation, "No stored fact");
    Ok(Resolution::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factbot_types::error::FactbotError;
    use std::cell::RefCell;

    /// In-memory lookup over a fixed fact list, recording which queries ran.
    #[derive(Default)]
    struct FakeLookup {
        facts: Vec<(&'static str, &'static str, &'static str)>,
        calls: RefCell<Vec<&'static str>>,
        fail: bool,
    }

    impl FakeLookup {
        fn with(facts: &[(&'static str, &'static str, &'static str)]) -> Self {
            Self {
                facts: facts.to_vec(),
                ..Default::default()
            }
        }

        fn record(&self, call: &'static str) -> FactbotResult<()> {
            self.calls.borrow_mut().push(call);
            if self.fail {
                return Err(FactbotError::Store("disk I/O error".to_string()));
            }
            Ok(())
        }
    }

    impl FactLookup for FakeLookup {
        fn forward(&self, subject: &str, relation: &str) -> FactbotResult<Option<String>> {
            self.record("forward")?;
            Ok(self
                .facts
                .iter()
                .find(|(s, r, _)| *s == subject && r.contains(relation))
                .map(|(_, _, o)| o.to_string()))
        }

        fn reverse(&self, object: &str, relation: &str) -> FactbotResult<Option<String>> {
            self.record("reverse")?;
            Ok(self
                .facts
                .iter()
                .find(|(_, r, o)| *o == object && r.contains(relation))
                .map(|(s, _, _)| s.to_string()))
        }

        fn forward_any(&self, subject: &str) -> FactbotResult<Option<String>> {
            self.record("forward_any")?;
            Ok(self
                .facts
                .iter()
                .find(|(s, _, _)| *s == subject)
                .map(|(_, _, o)| o.to_string()))
        }

        fn reverse_any(&self, object: &str) -> FactbotResult<Option<String>> {
            self.record("reverse_any")?;
            Ok(self
                .facts
                .iter()
                .find(|(_, _, o)| *o == object)
                .map(|(s, _, _)| s.to_string()))
        }
    }

    #[test]
    fn test_forward_match() {
        let lookup = FakeLookup::with(&[("Python", "founder", "Guido")]);
        let res = resolve("Python", "founder", &lookup).unwrap();
        assert_eq!(
            res,
            Resolution::Found {
                answer: "Guido".to_string(),
                strategy: MatchStrategy::Forward
            }
        );
        assert_eq!(*lookup.calls.borrow(), vec!["forward"]);
    }

    #[test]
    fn test_reverse_match_for_compound_subject() {
        let lookup = FakeLookup::with(&[("Beijing", "is", "China's capital")]);
        let res = resolve("China's capital", "is", &lookup).unwrap();
        assert_eq!(res.answer(), Some("Beijing"));
        assert!(matches!(
            res,
            Resolution::Found {
                strategy: MatchStrategy::Reverse,
                ..
            }
        ));
    }

    #[test]
    fn test_relation_agnostic_only_for_blank_relation() {
        let lookup = FakeLookup::with(&[("Einstein", "proposed", "relativity")]);
        assert_eq!(
            resolve("Einstein", "invented", &lookup).unwrap(),
            Resolution::NotFound
        );
        assert_eq!(*lookup.calls.borrow(), vec!["forward", "reverse"]);

        lookup.calls.borrow_mut().clear();
        let res = resolve("Einstein", "  ", &lookup).unwrap();
        assert_eq!(
            res,
            Resolution::Found {
                answer: "relativity".to_string(),
                strategy: MatchStrategy::ForwardAny
            }
        );
        assert_eq!(*lookup.calls.borrow(), vec!["forward_any"]);
    }

    #[test]
    fn test_reverse_any() {
        let lookup = FakeLookup::with(&[("Einstein", "proposed", "relativity")]);
        let res = resolve("relativity", "", &lookup).unwrap();
        assert_eq!(res.answer(), Some("Einstein"));
        assert_eq!(*lookup.calls.borrow(), vec!["forward_any", "reverse_any"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let lookup = FakeLookup::with(&[("Python", "founder", "Guido")]);
        let first = resolve("Python", "founder", &lookup).unwrap();
        let second = resolve("Python", "founder", &lookup).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_failure_stops_cascade() {
        let lookup = FakeLookup {
            fail: true,
            ..FakeLookup::with(&[("Python", "founder", "Guido")])
        };
        let err = resolve("Python", "founder", &lookup).unwrap_err();
        assert!(matches!(err, FactbotError::Store(_)));
        assert_eq!(*lookup.calls.borrow(), vec!["forward"]);
    }
}
