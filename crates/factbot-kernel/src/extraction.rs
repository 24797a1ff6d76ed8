//! Extraction engine: question text to `(subject, relation)`, and question +
//! answer to a full triple.
//!
//! Query extraction is a fixed-priority list of pure stages. The first stage
//! that produces a non-empty pair wins:
//!
//! 1. relation-first scan over the vocabulary (longest phrase first);
//! 2. canonical question patterns ("X is what");
//! 3. interrogative-word split, followed by keyword-based relation derivation.
//!
//! Stage 1 runs before stage 2 even when a vocabulary phrase sits inside what
//! the user meant as a compound subject: "China's capital is what" extracts
//! `("China", "capital")`, not `("China's capital", "is")`.
//!
//! Every lookup of a phrase, pattern, interrogative or keyword goes through
//! [`Lexicon::find_term`], so English terms only match whole words.

use crate::lexicon::Lexicon;
use crate::vocabulary::RelationVocabulary;
use factbot_types::config::LexiconConfig;
use factbot_types::fact::{InputSource, QueryPair, Triple};
use tracing::debug;

/// Which cascade stage produced a query pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    RelationFirst,
    QuestionPattern,
    InterrogativeSplit,
}

impl QueryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStage::RelationFirst => "relation_first",
            QueryStage::QuestionPattern => "question_pattern",
            QueryStage::InterrogativeSplit => "interrogative_split",
        }
    }
}

type StageFn = fn(&str, &Lexicon, &RelationVocabulary) -> Option<QueryPair>;

const QUERY_STAGES: [(QueryStage, StageFn); 3] = [
    (QueryStage::RelationFirst, relation_first),
    (QueryStage::QuestionPattern, question_pattern),
    (QueryStage::InterrogativeSplit, interrogative_split),
];

/// Dictionary-driven extractor. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ExtractionEngine {
    lexicon: &'static Lexicon,
    vocabulary: RelationVocabulary,
}

impl ExtractionEngine {
    pub fn new(lexicon: &'static Lexicon, vocabulary: RelationVocabulary) -> Self {
        Self {
            lexicon,
            vocabulary,
        }
    }

    /// Build the engine for a configured language: the lexicon's seed
    /// relations plus configured extras, merged with relations observed in
    /// the store.
    pub fn from_config<I>(config: &LexiconConfig, observed: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let lexicon = Lexicon::for_language(config.language);
        let seed = lexicon
            .seed_relations
            .iter()
            .map(|s| s.to_string())
            .chain(config.extra_relations.iter().cloned());
        Self::new(lexicon, RelationVocabulary::build(seed, observed))
    }

    pub fn lexicon(&self) -> &'static Lexicon {
        self.lexicon
    }

    pub fn vocabulary(&self) -> &RelationVocabulary {
        &self.vocabulary
    }

    /// Extract `(subject, relation)` from a question. `None` means neither an
    /// entity nor a relation could be recognized.
    pub fn extract_query(&self, question: &str) -> Option<QueryPair> {
        self.extract_query_with_stage(question).map(|(_, pair)| pair)
    }

    /// Like [`extract_query`](Self::extract_query), also reporting the stage
    /// that matched.
    pub fn extract_query_with_stage(&self, question: &str) -> Option<(QueryStage, QueryPair)> {
        let question = self.lexicon.normalize(question);
        if question.is_empty() {
            return None;
        }
        for (stage, run) in QUERY_STAGES {
            if let Some(pair) = run(&question, self.lexicon, &self.vocabulary) {
                debug!(
                    stage = stage.as_str(),
                    subject = %pair.subject,
                    relation = %pair.relation,
                    "Extracted query pair"
                );
                return Some((stage, pair));
            }
        }
        debug!(question = %question, "No subject/relation recognized");
        None
    }

    /// Extract a full triple for learning. The object is the trimmed answer.
    ///
    /// When the question cannot be parsed, subject and relation (and an
    /// optional override of the object) are requested from `input`. Nothing
    /// is guessed: if `input` cannot answer, the returned triple is
    /// incomplete and must be rejected by the caller.
    pub fn extract_triple(
        &self,
        question: &str,
        answer: &str,
        input: &mut dyn InputSource,
    ) -> Triple {
        match self.extract_query(question) {
            Some(pair) => Triple::new(pair.subject, pair.relation, answer),
            None => self.ask_for_triple(answer, input),
        }
    }

    /// Ask `input` for subject and relation, and for a confirmation of the
    /// object. A blank or missing confirmation keeps `answer`.
    pub fn ask_for_triple(&self, answer: &str, input: &mut dyn InputSource) -> Triple {
        let prompts = self.lexicon.prompts;
        let subject = input.prompt(prompts.subject).unwrap_or_default();
        let relation = input.prompt(prompts.relation).unwrap_or_default();
        let object = input
            .prompt(prompts.object)
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| answer.to_string());
        Triple::new(subject, relation, object)
    }
}

/// Stage 1: the first vocabulary phrase found in the question splits it; the
/// prefix is the subject.
fn relation_first(
    question: &str,
    lexicon: &Lexicon,
    vocabulary: &RelationVocabulary,
) -> Option<QueryPair> {
    for phrase in vocabulary.iter() {
        let Some(idx) = lexicon.find_term(question, phrase) else {
            continue;
        };
        let candidate = question[..idx].trim();
        if candidate.is_empty() {
            continue;
        }
        if let Some(pair) = QueryPair::new(lexicon.trim_particle(candidate), phrase) {
            return Some(pair);
        }
    }
    None
}

/// Stage 2: "X is what" style patterns with a fixed relation.
fn question_pattern(
    question: &str,
    lexicon: &Lexicon,
    _vocabulary: &RelationVocabulary,
) -> Option<QueryPair> {
    lexicon
        .question_patterns
        .iter()
        .find_map(|(pattern, relation)| {
            let idx = lexicon.find_term(question, pattern)?;
            QueryPair::new(&question[..idx], relation)
        })
}

/// Stage 3: split at the first interrogative word for a provisional subject,
/// then derive the relation from the keyword list.
fn interrogative_split(
    question: &str,
    lexicon: &Lexicon,
    _vocabulary: &RelationVocabulary,
) -> Option<QueryPair> {
    let subject = lexicon
        .interrogatives
        .iter()
        .find_map(|word| {
            lexicon
                .find_term(question, word)
                .map(|idx| question[..idx].trim())
        })?;
    if subject.is_empty() {
        return None;
    }
    let relation = derive_relation(question, subject, lexicon)?;
    QueryPair::new(subject, relation)
}

fn derive_relation<'q>(question: &'q str, subject: &str, lexicon: &Lexicon) -> Option<&'q str> {
    for &(keyword, fallback) in lexicon.relation_keywords {
        if !lexicon.contains_term(question, keyword) {
            continue;
        }

        let possessive = format!("{subject}{}", lexicon.particle);
        let relation = if let Some(pos) = question.rfind(&possessive) {
            // "<subject>'s <relation> <keyword>"
            let tail = &question[pos + possessive.len()..];
            let before = lexicon
                .find_term(tail, keyword)
                .map_or(tail, |i| &tail[..i])
                .trim();
            non_empty_or(before, fallback)
        } else {
            // "<subject> <relation> <keyword>"
            let rest = question
                .find(subject)
                .map_or("", |i| &question[i + subject.len()..])
                .trim_start();
            let rest = rest.strip_prefix(lexicon.particle).unwrap_or(rest).trim();
            match lexicon.find_term(rest, keyword) {
                Some(0) | None => fallback,
                Some(i) => non_empty_or(rest[..i].trim(), fallback),
            }
        };
        return Some(relation);
    }

    lexicon
        .contains_term(question, lexicon.is_particle)
        .then_some(lexicon.is_particle)
}

fn non_empty_or<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.is_empty() {
        fallback
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{CHINESE, ENGLISH};
    use factbot_types::config::Language;
    use factbot_types::fact::{NoInput, ScriptedInput};

    fn engine(lexicon: &'static Lexicon, phrases: &[&str]) -> ExtractionEngine {
        ExtractionEngine::new(
            lexicon,
            RelationVocabulary::build(phrases.iter().copied(), Vec::<&str>::new()),
        )
    }

    fn pair(subject: &str, relation: &str) -> Option<QueryPair> {
        QueryPair::new(subject, relation)
    }

    #[test]
    fn test_relation_phrase_splits_subject() {
        let engine = engine(&ENGLISH, &["founder", "capital", "is", "population"]);
        let cases = [
            ("Linux founder is who", "Linux", "founder"),
            ("Rust Lang population", "Rust Lang", "population"),
            ("Atlantis capital?", "Atlantis", "capital"),
        ];
        for (question, subject, relation) in cases {
            assert_eq!(
                engine.extract_query(question),
                pair(subject, relation),
                "question: {question}"
            );
        }
    }

    #[test]
    fn test_relation_first_precedes_question_pattern() {
        // Documented precedence: the vocabulary phrase inside the intended
        // compound subject wins over the "is what" pattern.
        let engine = engine(&ENGLISH, &["capital", "founder", "is"]);
        let (stage, found) = engine
            .extract_query_with_stage("China's capital is what")
            .unwrap();
        assert_eq!(stage, QueryStage::RelationFirst);
        assert_eq!(Some(found), pair("China", "capital"));

        let zh = engine_zh();
        assert_eq!(zh.extract_query("中国的首都是什么"), pair("中国", "首都"));
    }

    fn engine_zh() -> ExtractionEngine {
        ExtractionEngine::from_config(
            &LexiconConfig {
                language: Language::Zh,
                extra_relations: vec![],
            },
            Vec::<String>::new(),
        )
    }

    #[test]
    fn test_compound_subject_preserved_without_vocabulary_hit() {
        let engine = engine(&ENGLISH, &[]);
        let (stage, found) = engine
            .extract_query_with_stage("China's capital is what")
            .unwrap();
        assert_eq!(stage, QueryStage::QuestionPattern);
        assert_eq!(Some(found), pair("China's capital", "is"));

        let zh = engine_zh_empty();
        assert_eq!(zh.extract_query("中国的首都是什么"), pair("中国的首都", "是"));
    }

    fn engine_zh_empty() -> ExtractionEngine {
        engine(&CHINESE, &[])
    }

    #[test]
    fn test_long_possessive_head_keeps_particle() {
        let engine = engine(&ENGLISH, &["capital"]);
        assert_eq!(
            engine.extract_query("the United Kingdom's capital"),
            pair("the United Kingdom's", "capital")
        );
    }

    #[test]
    fn test_interrogative_prefix_is_not_subject() {
        let engine = ExtractionEngine::from_config(&LexiconConfig::default(), ["founder"]);
        assert_eq!(
            engine.extract_query("Who is Python's founder?"),
            pair("Python", "founder")
        );
        assert_eq!(
            engine.extract_query("What is Mars's population"),
            pair("Mars", "population")
        );
    }

    #[test]
    fn test_empty_prefix_hit_moves_to_next_phrase() {
        // "founder" sits at index 0 and gives an empty subject; "is" still hits.
        let engine = engine(&ENGLISH, &["founder", "is"]);
        assert_eq!(
            engine.extract_query("founder is Linus"),
            pair("founder", "is")
        );
    }

    #[test]
    fn test_every_english_seed_phrase_splits_after_subject() {
        let en = ExtractionEngine::from_config(&LexiconConfig::default(), Vec::<String>::new());
        // Subjects that embed seed phrases inside a word
        let subjects = ["Elvis", "Paris", "Tennis", "Heritage", "Felicity", "Camera"];
        for subject in subjects {
            for &phrase in ENGLISH.seed_relations {
                let question = format!("{subject}'s {phrase} today");
                assert_eq!(
                    en.extract_query(&question),
                    pair(subject, phrase),
                    "question: {question}"
                );
            }
        }
    }

    #[test]
    fn test_english_words_containing_is_are_not_split() {
        let en = ExtractionEngine::from_config(&LexiconConfig::default(), Vec::<String>::new());
        assert_eq!(en.extract_query("Who is Elvis's father?"), None);
        assert_eq!(en.extract_query("What is Paris's mayor?"), None);
        assert_eq!(en.extract_query("Tennis inventor"), None);
        assert_eq!(en.extract_query("Elvis is who"), pair("Elvis", "is"));
    }

    #[test]
    fn test_chinese_question_shapes() {
        let zh = engine_zh();
        assert_eq!(zh.extract_query("人工智能英文缩写"), pair("人工智能", "英文缩写"));
        assert_eq!(zh.extract_query("北京是中国的什么"), pair("北京", "是"));
        assert_eq!(zh.extract_query("爱因斯坦提出什么？"), pair("爱因斯坦", "提出"));
        // Head longer than two characters: the particle is kept.
        assert_eq!(
            zh.extract_query("Python的创始人是谁"),
            pair("Python的", "创始人")
        );
    }

    #[test]
    fn test_interrogative_split_relation_after_possessive() {
        let en = engine(&ENGLISH, &[]);
        let (stage, found) = en.extract_query_with_stage("Bob is Bob's father").unwrap();
        assert_eq!(stage, QueryStage::InterrogativeSplit);
        assert_eq!(Some(found), pair("Bob", "father"));

        let zh = engine(&CHINESE, &[]);
        assert_eq!(zh.extract_query("他是他的老师"), pair("他", "老师"));
    }

    #[test]
    fn test_interrogative_split_keyword_fallbacks() {
        let en = engine(&ENGLISH, &[]);
        // Remainder is the keyword itself.
        assert_eq!(en.extract_query("Mars is"), pair("Mars", "is"));
        let zh = engine(&CHINESE, &[]);
        assert_eq!(zh.extract_query("地球的卫星是月亮吗"), pair("地球的卫星", "是"));
    }

    #[test]
    fn test_interrogative_split_relation_before_keyword() {
        // Interrogative words are not removed from the derived relation.
        let en = engine(&ENGLISH, &[]);
        assert_eq!(
            en.extract_query("Python how originally developed"),
            pair("Python", "how originally")
        );
    }

    #[test]
    fn test_interrogative_split_without_keyword_or_copula_fails() {
        let en = engine(&ENGLISH, &[]);
        assert_eq!(en.extract_query("Rust how"), None);
    }

    #[test]
    fn test_unrecognized_question() {
        let en = engine(&ENGLISH, &["founder"]);
        assert_eq!(en.extract_query("hello there"), None);
        assert_eq!(en.extract_query("   "), None);
        // Interrogative at the very start yields an empty subject.
        assert_eq!(en.extract_query("how"), None);
    }

    #[test]
    fn test_extract_triple_uses_query_pair() {
        let en = ExtractionEngine::from_config(&LexiconConfig::default(), Vec::<String>::new());
        let mut input = ScriptedInput::default();
        let triple = en.extract_triple("What is Mars's population", "  none known ", &mut input);
        assert_eq!(triple, Triple::new("Mars", "population", "none known"));
        assert!(input.asked().is_empty());
    }

    #[test]
    fn test_extract_triple_asks_when_unrecognized() {
        let en = engine(&ENGLISH, &[]);
        let mut input = ScriptedInput::new(["Rust", "mascot", ""]);
        let triple = en.extract_triple("hello there", "Ferris", &mut input);
        assert_eq!(triple, Triple::new("Rust", "mascot", "Ferris"));
        assert_eq!(
            input.asked(),
            [
                ENGLISH.prompts.subject.to_string(),
                ENGLISH.prompts.relation.to_string(),
                ENGLISH.prompts.object.to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_triple_object_override() {
        let en = engine(&ENGLISH, &[]);
        let mut input = ScriptedInput::new(["Rust", "mascot", "Ferris the crab"]);
        let triple = en.extract_triple("hello there", "Ferris", &mut input);
        assert_eq!(triple.object, "Ferris the crab");
    }

    #[test]
    fn test_extract_triple_never_fabricates() {
        let en = engine(&ENGLISH, &[]);
        let triple = en.extract_triple("hello there", "Ferris", &mut NoInput);
        assert_eq!(triple, Triple::new("", "", "Ferris"));
        assert!(!triple.is_complete());
    }
}
