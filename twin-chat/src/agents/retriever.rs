// Retriever Agent: keyword-frequency scoring over the profile documents

use crate::models::Document;
use tracing::debug;

/// Returned by [`RetrieverAgent::build_context`] when nothing scores.
pub const NO_CONTEXT: &str = "No specific information found in Catherine's profile.";

pub const DEFAULT_TOP_K: usize = 5;

const MIN_TOKEN_CHARS: usize = 3;
const CONTENT_HIT_WEIGHT: u32 = 2;
const TITLE_HIT_BONUS: u32 = 5;

#[derive(Debug, Clone, Copy)]
pub struct ScoredMatch<'a> {
    pub document: &'a Document,
    pub score: u32,
}

pub struct RetrieverAgent {
    top_k: usize,
}

impl Default for RetrieverAgent {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl RetrieverAgent {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Scores every document against `query` and keeps the best `top_k`,
    /// highest first. Equal scores keep their order in `documents`.
    pub fn rank<'a>(&self, query: &str, documents: &'a [Document]) -> Vec<ScoredMatch<'a>> {
        let query = query.to_lowercase();
        let tokens: Vec<&str> = query
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .collect();

        if tokens.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<ScoredMatch<'a>> = documents
            .iter()
            .filter_map(|document| {
                let score = score_document(&tokens, document);
                (score > 0).then_some(ScoredMatch { document, score })
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(self.top_k);

        debug!("Retriever: {} of {} documents matched", matches.len(), documents.len());
        matches
    }

    pub fn search<'a>(&self, query: &str, documents: &'a [Document]) -> Vec<&'a Document> {
        self.rank(query, documents)
            .into_iter()
            .map(|m| m.document)
            .collect()
    }

    /// Renders the matches as `title: content` blocks separated by a blank
    /// line, or [`NO_CONTEXT`] when nothing matched.
    pub fn build_context(&self, query: &str, documents: &[Document]) -> String {
        let matches = self.search(query, documents);

        if matches.is_empty() {
            return NO_CONTEXT.to_string();
        }

        matches
            .iter()
            .map(|doc| format!("{}: {}\n", doc.title, doc.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// Literal, non-overlapping substring counts; "cat" also hits "category".
fn score_document(tokens: &[&str], document: &Document) -> u32 {
    let content = document.content.to_lowercase();
    let title = document.title.to_lowercase();

    tokens.iter().fold(0u32, |score, token| {
        let occurrences = u32::try_from(content.matches(token).count()).unwrap_or(u32::MAX);
        let title_bonus = if title.contains(token) { TITLE_HIT_BONUS } else { 0 };
        score
            .saturating_add(occurrences.saturating_mul(CONTENT_HIT_WEIGHT))
            .saturating_add(title_bonus)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            kind: "profile".to_string(),
            content: content.to_string(),
            tags: None,
        }
    }

    fn profile() -> Vec<Document> {
        vec![
            doc("exp-1", "Internship", "Web developer intern at AusBiz Consulting building Laravel dashboards."),
            doc("skills-1", "Technical Skills", "Python, SQL, MySQL, Laravel, NodeJS and React. Python for three years."),
            doc("lead-1", "Leadership", "JPCS Secretary and PSG SITE Representative."),
        ]
    }

    #[test]
    fn counts_content_occurrences_and_title_bonus() {
        let docs = profile();
        let ranked = RetrieverAgent::default().rank("python skills", &docs);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].document.id, "skills-1");
        // "python" twice in content (4) plus "skills" in the title (5).
        assert_eq!(ranked[0].score, 9);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let docs = profile();
        let ids: Vec<_> = RetrieverAgent::default()
            .search("LARAVEL", &docs)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["exp-1", "skills-1"]);
    }

    #[test]
    fn short_tokens_are_ignored() {
        let docs = profile();
        assert!(RetrieverAgent::default().rank("is a to of", &docs).is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let docs = profile();
        assert!(RetrieverAgent::default().rank("", &docs).is_empty());
        assert!(RetrieverAgent::default().rank("   \t ", &docs).is_empty());
    }

    #[test]
    fn substring_hits_inside_longer_words() {
        let docs = vec![doc("a", "", "category categories")];
        let ranked = RetrieverAgent::default().rank("cat", &docs);
        assert_eq!(ranked[0].score, 4);
    }

    #[test]
    fn regex_metacharacters_match_literally() {
        let docs = vec![doc("a", "Languages", "C++ and c# developer")];
        let ranked = RetrieverAgent::default().rank("c++", &docs);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 2);
    }

    #[test]
    fn missing_title_and_content_score_zero() {
        let docs = vec![Document::default(), doc("b", "Education", "")];
        let ranked = RetrieverAgent::default().rank("education", &docs);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].document.id, "b");
        assert_eq!(ranked[0].score, 5);
    }

    #[test]
    fn ties_keep_document_order() {
        let docs = vec![doc("first", "", "react"), doc("second", "", "react")];
        let ids: Vec<_> = RetrieverAgent::default()
            .search("react", &docs)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn returns_at_most_top_k() {
        let docs: Vec<_> = (0..8).map(|i| doc(&i.to_string(), "", &"python ".repeat(i + 1))).collect();
        let ranked = RetrieverAgent::default().rank("python", &docs);
        assert_eq!(ranked.len(), DEFAULT_TOP_K);
        assert_eq!(ranked[0].document.id, "7");
        assert_eq!(ranked[4].document.id, "3");
    }

    #[test]
    fn repeated_query_tokens_accumulate() {
        let docs = vec![doc("a", "Python", "python")];
        let query = "python ".repeat(10_000);
        let ranked = RetrieverAgent::default().rank(&query, &docs);
        assert_eq!(ranked[0].score, 10_000 * (CONTENT_HIT_WEIGHT + TITLE_HIT_BONUS));
    }

    #[test]
    fn context_without_documents_is_sentinel() {
        assert_eq!(RetrieverAgent::default().build_context("python", &[]), NO_CONTEXT);
    }

    #[test]
    fn context_joins_blocks_in_score_order() {
        let docs = profile();
        let context = RetrieverAgent::default().build_context("laravel python", &docs);
        assert_eq!(
            context,
            "Technical Skills: Python, SQL, MySQL, Laravel, NodeJS and React. Python for three years.\n\
             \n\
             Internship: Web developer intern at AusBiz Consulting building Laravel dashboards.\n"
        );
    }

    fn arb_document() -> impl Strategy<Value = Document> {
        ("[a-z ]{0,12}", "[a-z ]{0,60}").prop_map(|(title, content)| doc("d", &title, &content))
    }

    proptest! {
        #[test]
        fn short_token_queries_never_match(
            query in proptest::collection::vec("[a-zA-Z]{1,2}", 0..6),
            docs in proptest::collection::vec(arb_document(), 0..10),
        ) {
            let query = query.join(" ");
            prop_assert!(RetrieverAgent::default().rank(&query, &docs).is_empty());
        }

        #[test]
        fn ranking_is_bounded_and_non_increasing(
            query in "[a-z ]{0,30}",
            docs in proptest::collection::vec(arb_document(), 0..20),
        ) {
            let ranked = RetrieverAgent::default().rank(&query, &docs);
            prop_assert!(ranked.len() <= DEFAULT_TOP_K);
            prop_assert!(ranked.iter().all(|m| m.score > 0));
            prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }

        #[test]
        fn title_hit_strictly_outscores_plain_twin(
            token in "[a-z]{3,8}",
            content in "[a-z ]{0,40}",
        ) {
            let with_title = doc("t", &token, &content);
            let without_title = doc("p", "", &content);
            let agent = RetrieverAgent::default();
            let docs = [with_title, without_title];

            let titled = agent.rank(&token, &docs[..1]);
            prop_assert_eq!(titled.len(), 1);
            let plain_score = agent.rank(&token, &docs[1..]).first().map_or(0, |m| m.score);
            prop_assert_eq!(titled[0].score, plain_score + TITLE_HIT_BONUS);
        }
    }
}
