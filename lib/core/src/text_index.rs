// Character-bigram inverted index for recipe name lookup.
// Korean names have no useful whitespace tokenization, so substring
// matching is approximated by intersecting bigram postings and then
// verifying the candidates with a real `contains` check.
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    // bigram -> sorted document positions
    postings: HashMap<(char, char), BTreeSet<usize>>,
    // position -> lowercased name
    names: Vec<String>,
}

impl NameIndex {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    fn bigrams(text: &str) -> Vec<(char, char)> {
        let chars: Vec<char> = text.chars().collect();
        chars.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Append a document; its position is the number of documents before it
    pub fn push(&mut self, name: &str) -> usize {
        let position = self.names.len();
        let normalized = Self::normalize(name);
        for bigram in Self::bigrams(&normalized) {
            self.postings.entry(bigram).or_default().insert(position);
        }
        self.names.push(normalized);
        position
    }

    /// Positions whose name contains `query` (case-insensitive), ascending, at most `limit`
    pub fn search(&self, query: &str, limit: usize) -> Vec<usize> {
        let query = Self::normalize(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let bigrams = Self::bigrams(&query);
        let candidates: Vec<usize> = if bigrams.is_empty() {
            (0..self.names.len()).collect()
        } else {
            let mut lists: Vec<&BTreeSet<usize>> = Vec::with_capacity(bigrams.len());
            for bigram in &bigrams {
                match self.postings.get(bigram) {
                    Some(list) => lists.push(list),
                    None => return Vec::new(),
                }
            }
            // Walk the shortest posting list and check the others
            lists.sort_by_key(|l| l.len());
            lists[0]
                .iter()
                .copied()
                .filter(|pos| lists[1..].iter().all(|l| l.contains(pos)))
                .collect()
        };

        candidates
            .into_iter()
            .filter(|&pos| self.names[pos].contains(&query))
            .take(limit)
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        let mut index = NameIndex::new();
        index.push("돼지고기 김치찌개");
        index.push("된장찌개");
        index.push("Kimchi Fried Rice");
        index.push("김치전");
        index
    }

    #[test]
    fn test_substring_match() {
        let index = index();
        assert_eq!(index.search("김치", 10), vec![0, 3]);
        assert_eq!(index.search("찌개", 10), vec![0, 1]);
    }

    #[test]
    fn test_case_insensitive() {
        let index = index();
        assert_eq!(index.search("KIMCHI", 10), vec![2]);
    }

    #[test]
    fn test_single_char_query_scans() {
        let index = index();
        assert_eq!(index.search("전", 10), vec![3]);
    }

    #[test]
    fn test_bigrams_present_but_not_contiguous() {
        let mut index = NameIndex::new();
        index.push("abxbc");
        // "ab" and "bc" both exist but "abc" does not
        assert!(index.search("abc", 10).is_empty());
    }

    #[test]
    fn test_limit_and_blank() {
        let index = index();
        assert_eq!(index.search("찌개", 1), vec![0]);
        assert!(index.search("   ", 10).is_empty());
        assert!(index.search("없음", 10).is_empty());
    }
}
