//! Store introspection: `facts`, `relations`, `status`.

use crate::table::Table;
use crate::{boot_kernel, ui};
use factbot_types::config::FactbotConfig;
use factbot_types::fact::{Fact, FactSink};

/// Number of sample facts shown by `status`.
const STATUS_SAMPLE: usize = 3;

pub fn cmd_facts(config: FactbotConfig, limit: usize, about: Option<&str>, json: bool) {
    let kernel = boot_kernel(config);
    let facts = match about {
        Some(entity) => kernel.store.facts_about(entity).map(|mut facts| {
            facts.truncate(limit);
            facts
        }),
        None => kernel.store.list_facts(limit),
    };
    let facts = match facts {
        Ok(facts) => facts,
        Err(e) => {
            ui::error(&format!("Failed to list facts: {e}"));
            std::process::exit(1);
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&facts).unwrap_or_default()
        );
        return;
    }
    if facts.is_empty() {
        ui::hint("No facts stored yet. Teach one with `factbot teach <subject> <relation> <object>`");
        return;
    }
    fact_table(&facts).print();
}

fn fact_table(facts: &[Fact]) -> Table {
    let mut table = Table::new(&["Subject", "Relation", "Object", "Updated"]);
    for fact in facts {
        let updated = fact.updated_at.format("%Y-%m-%d %H:%M").to_string();
        table.add_row(&[
            fact.subject.as_str(),
            fact.relation.as_str(),
            fact.object.as_str(),
            updated.as_str(),
        ]);
    }
    table
}

pub fn cmd_relations(config: FactbotConfig, json: bool) {
    let kernel = boot_kernel(config);
    let extractor = kernel.extractor();
    let stored = kernel.store.all_relations().unwrap_or_default();

    if json {
        let phrases: Vec<&str> = extractor.vocabulary().iter().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "language": kernel.config.lexicon.language,
                "vocabulary": phrases,
                "stored": stored,
            }))
            .unwrap_or_default()
        );
        return;
    }

    ui::section(&format!(
        "Relation vocabulary ({}, {} phrases)",
        kernel.config.lexicon.language,
        extractor.vocabulary().len()
    ));
    for phrase in extractor.vocabulary().iter() {
        if stored.iter().any(|s| s == phrase) {
            println!("    {phrase}  (stored)");
        } else {
            println!("    {phrase}");
        }
    }
}

pub fn cmd_status(config: FactbotConfig, json: bool) {
    let kernel = boot_kernel(config);
    let count = kernel.store.count();
    let sample = kernel.store.sample(STATUS_SAMPLE).unwrap_or_default();
    let db_path = kernel.config.db_path();
    let vocabulary = kernel.extractor().vocabulary().len();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "database": db_path.display().to_string(),
                "fact_count": count.as_ref().ok(),
                "language": kernel.config.lexicon.language,
                "vocabulary_size": vocabulary,
                "learn_from_store": kernel.config.learn_from_store,
                "sample": sample,
            }))
            .unwrap_or_default()
        );
        return;
    }

    ui::section("factbot status");
    ui::blank();
    ui::kv("Home", &kernel.config.home_dir.display().to_string());
    ui::kv("Database", &db_path.display().to_string());
    match &count {
        Ok(n) => ui::kv_ok("Facts", &n.to_string()),
        Err(e) => ui::kv_warn("Facts", &format!("unavailable ({e})")),
    }
    ui::kv("Language", &kernel.config.lexicon.language.to_string());
    ui::kv("Vocabulary", &format!("{vocabulary} relations"));

    if !sample.is_empty() {
        ui::blank();
        ui::section("Sample facts");
        for fact in &sample {
            println!("    {}", fact.triple());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_fact_table_rows() {
        let fact = Fact {
            id: "1".to_string(),
            subject: "Python".to_string(),
            relation: "founder".to_string(),
            object: "Guido".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let rendered = fact_table(&[fact]).render();
        let row = rendered.lines().nth(3).unwrap();
        assert!(row.contains("Python"));
        assert!(row.contains("founder"));
        assert!(row.contains("Guido"));
    }
}
