//! Acquisition flow: learning a fact after a resolution miss.
//!
//! ```text
//! Idle → AwaitingAnswer → Extracting → [AwaitingManualTriple] → Committing → Idle
//! ```
//!
//! A blank answer or a manual triple left incomplete cancels the flow before
//! anything is written. Store failures end the flow without retrying.

use crate::extraction::ExtractionEngine;
use factbot_types::fact::{FactSink, InputSource, Triple};
use tracing::{debug, info, warn};

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Idle,
    AwaitingAnswer,
    Extracting,
    AwaitingManualTriple,
    Committing,
}

/// Why an acquisition stopped before committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The user gave no answer.
    BlankAnswer,
    /// Subject, relation or object was still blank after manual entry.
    IncompleteTriple(Triple),
}

/// Terminal result of one acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    Learned(Triple),
    Cancelled(CancelReason),
    Failed { triple: Triple, reason: String },
}

impl AcquisitionOutcome {
    pub fn is_learned(&self) -> bool {
        matches!(self, AcquisitionOutcome::Learned(_))
    }

    /// User-facing message for this outcome.
    pub fn notification(&self, question: &str) -> String {
        match self {
            AcquisitionOutcome::Learned(triple) => {
                format!("Learned '{triple}'. Ask '{question}' again any time.")
            }
            AcquisitionOutcome::Cancelled(CancelReason::BlankAnswer) => {
                "The answer can't be empty, nothing was learned.".to_string()
            }
            AcquisitionOutcome::Cancelled(CancelReason::IncompleteTriple(_)) => {
                "Subject, relation and answer are all required, nothing was learned.".to_string()
            }
            AcquisitionOutcome::Failed { .. } => "Learning failed, please try again.".to_string(),
        }
    }
}

/// One learning conversation. Owns its state; the input source is supplied
/// per call so concurrent flows never share one.
#[derive(Debug)]
pub struct AcquisitionFlow<'e> {
    engine: &'e ExtractionEngine,
    question: String,
    state: AcquisitionState,
    history: Vec<AcquisitionState>,
}

impl<'e> AcquisitionFlow<'e> {
    pub fn new(engine: &'e ExtractionEngine) -> Self {
        Self {
            engine,
            question: String::new(),
            state: AcquisitionState::Idle,
            history: vec![AcquisitionState::Idle],
        }
    }

    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Every state entered so far, starting with `Idle`.
    pub fn history(&self) -> &[AcquisitionState] {
        &self.history
    }

    /// Start learning `question`; returns the prompt to show the user.
    pub fn begin(&mut self, question: &str) -> String {
        self.question = question.trim().to_string();
        self.enter(AcquisitionState::AwaitingAnswer);
        format!("I don't know yet. What is the answer to '{}'?", self.question)
    }

    /// Feed the user's answer and drive the flow to completion.
    pub fn submit_answer<S>(
        &mut self,
        answer: &str,
        input: &mut dyn InputSource,
        sink: &S,
    ) -> AcquisitionOutcome
    where
        S: FactSink + ?Sized,
    {
        let outcome = self.complete(answer, input, sink);
        self.enter(AcquisitionState::Idle);
        outcome
    }

    /// `begin` + ask `input` for the answer + `submit_answer`.
    pub fn run<S>(
        &mut self,
        question: &str,
        input: &mut dyn InputSource,
        sink: &S,
    ) -> AcquisitionOutcome
    where
        S: FactSink + ?Sized,
    {
        let prompt = self.begin(question);
        let answer = input.prompt(&prompt).unwrap_or_default();
        self.submit_answer(&answer, input, sink)
    }

    fn complete<S>(
        &mut self,
        answer: &str,
        input: &mut dyn InputSource,
        sink: &S,
    ) -> AcquisitionOutcome
    where
        S: FactSink + ?Sized,
    {
        if answer.trim().is_empty() {
            debug!(question = %self.question, "Blank answer, acquisition cancelled");
            return AcquisitionOutcome::Cancelled(CancelReason::BlankAnswer);
        }

        self.enter(AcquisitionState::Extracting);
        let triple = match self.engine.extract_query(&self.question) {
            Some(pair) => Triple::new(pair.subject, pair.relation, answer),
            None => {
                self.enter(AcquisitionState::AwaitingManualTriple);
                self.engine.ask_for_triple(answer, input)
            }
        };
        if !triple.is_complete() {
            debug!(%triple, "Incomplete triple, acquisition cancelled");
            return AcquisitionOutcome::Cancelled(CancelReason::IncompleteTriple(triple));
        }

        self.enter(AcquisitionState::Committing);
        match sink.upsert(&triple) {
            Ok(true) => {
                info!(%triple, "Learned fact");
                AcquisitionOutcome::Learned(triple)
            }
            Ok(false) => {
                warn!(%triple, "Store wrote nothing");
                AcquisitionOutcome::Failed {
                    triple,
                    reason: "store wrote nothing".to_string(),
                }
            }
            Err(e) => {
                warn!(%triple, error = %e, "Failed to store fact");
                AcquisitionOutcome::Failed {
                    triple,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn enter(&mut self, state: AcquisitionState) {
        self.state = state;
        self.history.push(state);
    }
}
