use crate::tokenizer::terms;
use std::collections::HashMap;

/// Bounded term vocabulary mapping term -> column index. Built once from the
/// full tag corpus and frozen.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    columns: HashMap<String, usize>,
}

impl Vocabulary {
    /// Keeps the `max_terms` most frequent terms across the corpus. Equal
    /// frequencies break lexicographically ascending on the term string, and
    /// columns are assigned in that same order, so identical corpora always
    /// yield identical vocabularies. The tie-break is a pinned rule, not a
    /// compatibility guarantee with any particular vectorizer library.
    pub fn build<'a, I>(tags: I, max_terms: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for tag in tags {
            for term in terms(tag) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_terms);

        let columns = ranked
            .into_iter()
            .enumerate()
            .map(|(col, (term, _))| (term, col))
            .collect();
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    /// Term occurrence counts for one tag under this vocabulary. Terms
    /// outside the vocabulary contribute nothing.
    pub fn count_vector(&self, tag: &str) -> Vec<u32> {
        let mut vector = vec![0u32; self.columns.len()];
        for term in terms(tag) {
            if let Some(&col) = self.columns.get(&term) {
                vector[col] += 1;
            }
        }
        vector
    }
}

/// Builds the frozen vocabulary and one count vector per movie tag, in
/// catalog order.
pub fn build_vectors<'a, I>(tags: I, max_terms: usize) -> (Vocabulary, Vec<Vec<u32>>)
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let vocabulary = Vocabulary::build(tags.clone(), max_terms);
    let vectors = tags
        .into_iter()
        .map(|tag| vocabulary.count_vector(tag))
        .collect();
    (vocabulary, vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_term_occurrences() {
        let tags = ["zebra zebra fox", "fox ant"];
        let (vocab, vectors) = build_vectors(tags, 100);
        assert_eq!(vocab.len(), 3);
        // zebra appears twice in the first tag
        let zebra = vocab.column("zebra").unwrap();
        assert_eq!(vectors[0][zebra], 2);
        assert_eq!(vectors[1][zebra], 0);
    }

    #[test]
    fn truncation_ties_break_lexicographically() {
        // zebra: 2 occurrences; ant and fox: 1 each. With max_terms = 2 the
        // tie between ant and fox keeps ant.
        let tags = ["zebra ant", "zebra fox"];
        let vocab = Vocabulary::build(tags, 2);
        assert_eq!(vocab.column("zebra"), Some(0));
        assert_eq!(vocab.column("ant"), Some(1));
        assert_eq!(vocab.column("fox"), None);
    }

    #[test]
    fn out_of_vocabulary_terms_are_ignored() {
        let vocab = Vocabulary::build(["zebra"], 10);
        let v = vocab.count_vector("zebra fox fox");
        assert_eq!(v, vec![1]);
    }

    #[test]
    fn empty_corpus_gives_empty_vocabulary() {
        let vocab = Vocabulary::build(["", "  "], 10);
        assert!(vocab.is_empty());
        assert!(vocab.count_vector("anything").is_empty());
    }
}
