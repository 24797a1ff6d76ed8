//! Relation vocabulary: known relation phrases, longest first.

use std::collections::HashSet;

/// Distinct relation phrases ordered by descending character length, ties in
/// insertion order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationVocabulary {
    phrases: Vec<String>,
}

impl RelationVocabulary {
    /// Merge `seed` and `observed` (seed first), drop blanks and duplicates,
    /// then order longest first so greedy matching prefers the most specific
    /// phrase.
    pub fn build<S, O>(seed: S, observed: O) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        O: IntoIterator,
        O::Item: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut phrases: Vec<String> = Vec::new();
        let seed = seed.into_iter().map(|p| p.as_ref().trim().to_string());
        let observed = observed.into_iter().map(|p| p.as_ref().trim().to_string());
        for phrase in seed.chain(observed) {
            if phrase.is_empty() || !seen.insert(phrase.clone()) {
                continue;
            }
            phrases.push(phrase);
        }
        // Stable: equal lengths keep insertion order.
        phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
        Self { phrases }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|p| p == phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_first_with_stable_ties() {
        let vocab = RelationVocabulary::build(["is", "founder", "capital"], ["age", "prime minister"]);
        let order: Vec<&str> = vocab.iter().collect();
        assert_eq!(
            order,
            vec!["prime minister", "founder", "capital", "age", "is"]
        );
    }

    #[test]
    fn test_union_collapses_duplicates() {
        let vocab = RelationVocabulary::build(["founder", "is"], ["founder", " is ", "", "   "]);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("founder"));
        assert!(vocab.contains("is"));
    }

    #[test]
    fn test_empty_observed_falls_back_to_seed() {
        let vocab = RelationVocabulary::build(["首都", "英文缩写"], Vec::<String>::new());
        let order: Vec<&str> = vocab.iter().collect();
        assert_eq!(order, vec!["英文缩写", "首都"]);
    }

    #[test]
    fn test_length_is_in_chars_not_bytes() {
        // "首都" is 6 bytes but 2 chars; "GDP" is 3 chars.
        let vocab = RelationVocabulary::build(["首都", "GDP"], Vec::<&str>::new());
        let order: Vec<&str> = vocab.iter().collect();
        assert_eq!(order, vec!["GDP", "首都"]);
    }
}
