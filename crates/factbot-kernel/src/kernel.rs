//! FactbotKernel: assembles config, store and engines.

use crate::acquisition::{AcquisitionFlow, AcquisitionOutcome};
use crate::config::load_config;
use crate::error::{KernelError, KernelResult};
use crate::extraction::ExtractionEngine;
use crate::resolution::{resolve, MatchStrategy, Resolution};
use factbot_memory::FactStore;
use factbot_types::config::FactbotConfig;
use factbot_types::fact::{FactSink, InputSource, Triple};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a one-shot question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AskOutcome {
    /// A stored fact answered the question.
    Known {
        subject: String,
        relation: String,
        answer: String,
        strategy: MatchStrategy,
    },
    /// The question was understood but nothing is stored for it.
    NotFound { subject: String, relation: String },
    /// Neither subject nor relation could be recognized.
    Unrecognized,
}

/// The factbot kernel.
pub struct FactbotKernel {
    /// Configuration the kernel was booted with.
    pub config: FactbotConfig,
    /// Fact store.
    pub store: FactStore,
    extractor: Arc<ExtractionEngine>,
}

impl FactbotKernel {
    /// Boot from a config file (or the default path).
    pub fn boot(config_path: Option<&Path>) -> KernelResult<Self> {
        Self::boot_with_config(load_config(config_path))
    }

    /// Boot with an already loaded config: open the store and build the
    /// extraction engine.
    pub fn boot_with_config(config: FactbotConfig) -> KernelResult<Self> {
        let db_path = config.db_path();
        let store = FactStore::open(&db_path).map_err(|e| {
            KernelError::BootFailed(format!(
                "cannot open fact store at {}: {e}",
                db_path.display()
            ))
        })?;
        Self::with_store(config, store)
    }

    /// Assemble a kernel around an existing store.
    pub fn with_store(config: FactbotConfig, store: FactStore) -> KernelResult<Self> {
        let extractor = Arc::new(build_extractor(&config, &store)?);
        info!(
            language = %config.lexicon.language,
            relations = extractor.vocabulary().len(),
            "Factbot kernel ready"
        );
        Ok(Self {
            config,
            store,
            extractor,
        })
    }

    /// Shared handle to the extraction engine.
    pub fn extractor(&self) -> Arc<ExtractionEngine> {
        Arc::clone(&self.extractor)
    }

    /// Answer a question from stored facts. Never learns.
    pub fn ask(&self, question: &str) -> KernelResult<AskOutcome> {
        let Some(pair) = self.extractor.extract_query(question) else {
            return Ok(AskOutcome::Unrecognized);
        };
        let outcome = match resolve(&pair.subject, &pair.relation, &self.store)? {
            Resolution::Found { answer, strategy } => AskOutcome::Known {
                subject: pair.subject,
                relation: pair.relation,
                answer,
                strategy,
            },
            Resolution::NotFound => AskOutcome::NotFound {
                subject: pair.subject,
                relation: pair.relation,
            },
        };
        Ok(outcome)
    }

    /// Run an acquisition for `question`, prompting `input` for the answer
    /// and, when needed, the triple. A newly learned relation is merged into
    /// the vocabulary.
    pub fn learn(&mut self, question: &str, input: &mut dyn InputSource) -> AcquisitionOutcome {
        let outcome = AcquisitionFlow::new(&self.extractor).run(question, input, &self.store);
        if let AcquisitionOutcome::Learned(triple) = &outcome {
            self.observe_relation(&triple.relation);
        }
        outcome
    }

    /// Store a fact directly.
    pub fn teach(&mut self, triple: &Triple) -> KernelResult<bool> {
        let written = self.store.upsert(triple)?;
        if written {
            info!(%triple, "Taught fact");
            self.observe_relation(&triple.relation);
        }
        Ok(written)
    }

    fn observe_relation(&mut self, relation: &str) {
        if !self.config.learn_from_store || self.extractor.vocabulary().contains(relation) {
            return;
        }
        match build_extractor(&self.config, &self.store) {
            Ok(extractor) => {
                debug!(relation, "Vocabulary extended");
                self.extractor = Arc::new(extractor);
            }
            Err(e) => warn!(error = %e, "Failed to refresh vocabulary"),
        }
    }
}

fn build_extractor(config: &FactbotConfig, store: &FactStore) -> KernelResult<ExtractionEngine> {
    let observed = if config.learn_from_store {
        store.all_relations()?
    } else {
        Vec::new()
    };
    Ok(ExtractionEngine::from_config(&config.lexicon, observed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use factbot_types::config::Language;
    use factbot_types::fact::ScriptedInput;

    fn kernel() -> FactbotKernel {
        let store = FactStore::open_in_memory().unwrap();
        FactbotKernel::with_store(FactbotConfig::default(), store).unwrap()
    }

    #[test]
    fn test_boot_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = FactbotConfig {
            data_dir: dir.path().join("data"),
            ..Default::default()
        };
        let kernel = FactbotKernel::boot_with_config(config).unwrap();
        assert!(dir.path().join("data").join("factbot.db").exists());
        assert_eq!(kernel.store.count().unwrap(), 0);
    }

    #[test]
    fn test_ask_unrecognized() {
        let kernel = kernel();
        assert_eq!(kernel.ask("hello there").unwrap(), AskOutcome::Unrecognized);
    }

    #[test]
    fn test_store_relations_feed_vocabulary() {
        let store = FactStore::open_in_memory().unwrap();
        store.upsert(&Triple::new("Rust", "mascot", "Ferris")).unwrap();
        let kernel = FactbotKernel::with_store(FactbotConfig::default(), store).unwrap();
        assert!(kernel.extractor().vocabulary().contains("mascot"));
        assert_eq!(
            kernel.ask("Rust mascot?").unwrap(),
            AskOutcome::Known {
                subject: "Rust".to_string(),
                relation: "mascot".to_string(),
                answer: "Ferris".to_string(),
                strategy: MatchStrategy::Forward,
            }
        );
    }

    #[test]
    fn test_store_relations_ignored_when_disabled() {
        let store = FactStore::open_in_memory().unwrap();
        store.upsert(&Triple::new("Rust", "mascot", "Ferris")).unwrap();
        let config = FactbotConfig {
            learn_from_store: false,
            ..Default::default()
        };
        let kernel = FactbotKernel::with_store(config, store).unwrap();
        assert!(!kernel.extractor().vocabulary().contains("mascot"));
    }

    #[test]
    fn test_teach_extends_vocabulary() {
        let mut kernel = kernel();
        assert!(kernel.teach(&Triple::new("Rust", "mascot", "Ferris")).unwrap());
        assert!(kernel.extractor().vocabulary().contains("mascot"));
        assert!(kernel.teach(&Triple::new("Rust", "", "Ferris")).is_err());
    }

    #[test]
    fn test_learn_through_manual_entry() {
        let mut kernel = kernel();
        let mut input = ScriptedInput::new(["Ferris", "Rust", "mascot", ""]);
        let outcome = kernel.learn("hello there", &mut input);
        assert!(outcome.is_learned());
        assert_eq!(kernel.store.count().unwrap(), 1);
    }

    #[test]
    fn test_chinese_kernel() {
        let mut config = FactbotConfig::default();
        config.lexicon.language = Language::Zh;
        let kernel =
            FactbotKernel::with_store(config, FactStore::open_in_memory().unwrap()).unwrap();
        kernel
            .store
            .upsert(&Triple::new("中国", "首都", "北京"))
            .unwrap();
        match kernel.ask("中国的首都是什么？").unwrap() {
            AskOutcome::Known { answer, .. } => assert_eq!(answer, "北京"),
            other => panic!("expected a stored answer, got {other:?}"),
        }
    }

    #[test]
    fn test_ask_outcome_json() {
        let json = serde_json::to_value(AskOutcome::NotFound {
            subject: "Mars".to_string(),
            relation: "population".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["subject"], "Mars");
    }
}
