//! Fact model and the capabilities the engines are built against.
//!
//! The engines never talk to storage or to a terminal directly. They consume
//! [`FactLookup`], [`FactSink`] and [`InputSource`], and each front end or
//! store supplies its own implementation.

use crate::error::FactbotResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A stored `(subject, relation, object)` fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Unique fact ID.
    pub id: String,
    /// Entity the fact is about.
    pub subject: String,
    /// Labeled connection between subject and object.
    pub relation: String,
    /// The answer side of the fact.
    pub object: String,
    /// When this fact was first learned.
    pub created_at: DateTime<Utc>,
    /// When this fact was last re-learned.
    pub updated_at: DateTime<Utc>,
}

impl Fact {
    /// The fact's triple, without storage metadata.
    pub fn triple(&self) -> Triple {
        Triple::new(&self.subject, &self.relation, &self.object)
    }
}

/// A candidate fact produced while learning. Fields may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Triple {
    /// Build a triple, trimming every field.
    pub fn new(
        subject: impl AsRef<str>,
        relation: impl AsRef<str>,
        object: impl AsRef<str>,
    ) -> Self {
        Self {
            subject: subject.as_ref().trim().to_string(),
            relation: relation.as_ref().trim().to_string(),
            object: object.as_ref().trim().to_string(),
        }
    }

    /// True when no field is blank, i.e. the triple may be persisted.
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty()
            && !self.relation.trim().is_empty()
            && !self.object.trim().is_empty()
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}", self.subject, self.relation, self.object)
    }
}

/// A `(subject, relation)` pair extracted from a question. Both sides are
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPair {
    pub subject: String,
    pub relation: String,
}

impl QueryPair {
    /// Build a pair from trimmed parts. Returns `None` if either side is blank.
    pub fn new(subject: impl AsRef<str>, relation: impl AsRef<str>) -> Option<Self> {
        let subject = subject.as_ref().trim();
        let relation = relation.as_ref().trim();
        if subject.is_empty() || relation.is_empty() {
            return None;
        }
        Some(Self {
            subject: subject.to_string(),
            relation: relation.to_string(),
        })
    }
}

/// Point queries over the fact store.
///
/// Relation arguments are matched as case-sensitive substrings of the stored
/// relation. When several facts match, an exact relation match wins, then the
/// first inserted fact.
pub trait FactLookup {
    /// Object of a fact with `subject` whose relation contains `relation`.
    fn forward(&self, subject: &str, relation: &str) -> FactbotResult<Option<String>>;

    /// Subject of a fact whose object is `object` and whose relation contains
    /// `relation`.
    fn reverse(&self, object: &str, relation: &str) -> FactbotResult<Option<String>>;

    /// Object of any fact with `subject`.
    fn forward_any(&self, subject: &str) -> FactbotResult<Option<String>>;

    /// Subject of any fact whose object is `object`.
    fn reverse_any(&self, object: &str) -> FactbotResult<Option<String>>;
}

/// Write side of the fact store.
pub trait FactSink {
    /// Insert the triple, or update the object and timestamp of the fact that
    /// already holds its `(subject, relation)` pair. Returns whether a row was
    /// written.
    fn upsert(&self, triple: &Triple) -> FactbotResult<bool>;

    /// Every distinct relation phrase currently stored.
    fn all_relations(&self) -> FactbotResult<Vec<String>>;
}

/// Synchronous value acquisition from whoever is driving the conversation.
///
/// `None` means the source has no way to ask; an empty string means the user
/// answered with nothing.
pub trait InputSource {
    fn prompt(&mut self, label: &str) -> Option<String>;
}

impl<F> InputSource for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt(&mut self, label: &str) -> Option<String> {
        self(label)
    }
}

/// An input source that can never ask anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn prompt(&mut self, _label: &str) -> Option<String> {
        None
    }
}

/// Replays a fixed queue of answers and records every label it was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Labels of every prompt issued so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl InputSource for ScriptedInput {
    fn prompt(&mut self, label: &str) -> Option<String> {
        self.asked.push(label.to_string());
        self.answers.pop_front()
    }
}
