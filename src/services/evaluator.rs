use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::config::Settings;
use crate::db::models::{BookRecommendation, FollowUpQuestion, FollowUpResponses};
use crate::services::catalog;
use crate::services::scoring::round1;

/// Named evaluation dimensions, each nominally in `[0, 100]`.
pub(crate) type Dimensions = BTreeMap<String, f64>;

#[derive(Debug, Error)]
pub(crate) enum AnalyzerError {
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),
}

/// Understanding-evaluation backend used by the submission flows.
#[async_trait]
pub(crate) trait LearningAnalyzer: Send + Sync {
    async fn followup_questions(&self, text: &str) -> Result<Vec<FollowUpQuestion>, AnalyzerError>;

    async fn evaluate_understanding(
        &self,
        text: &str,
        responses: &FollowUpResponses,
    ) -> Result<Dimensions, AnalyzerError>;

    async fn extract_weak_topics(&self, text: &str) -> Result<Vec<String>, AnalyzerError>;

    async fn recommend_books(
        &self,
        weak_topics: &[String],
    ) -> Result<Vec<BookRecommendation>, AnalyzerError>;

    /// Likelihood in percent that the work was produced with AI help.
    async fn ai_dependency(
        &self,
        text: &str,
        responses: &FollowUpResponses,
    ) -> Result<f64, AnalyzerError>;
}

const PROBING_QUESTIONS: [(&str, &str); 3] = [
    (
        "q1",
        "You mentioned a recursive approach. Can you explain what happens when the input size \
         is zero? How does your base case handle it?",
    ),
    (
        "q2",
        "Your solution uses memoization. Can you describe the difference between top-down and \
         bottom-up approaches, and why you chose this one?",
    ),
    (
        "q3",
        "If the constraints changed to handle negative numbers, how would your algorithm need \
         to adapt?",
    ),
];

const DIMENSION_RANGES: [(&str, f64, f64); 7] = [
    ("concept_clarity", 65.0, 95.0),
    ("application", 60.0, 90.0),
    ("logical_consistency", 70.0, 95.0),
    ("depth", 55.0, 85.0),
    ("clarity", 70.0, 95.0),
    ("critical_thinking", 60.0, 90.0),
    ("retention", 65.0, 92.0),
];

const AI_DEPENDENCY_RANGE: (f64, f64) = (10.0, 65.0);
const MATCH_PERCENTAGE_RANGE: (u8, u8) = (78, 96);
const WEAK_TOPIC_COUNT: (usize, usize) = (2, 4);

/// Randomised stand-in for a model-backed analyzer.
pub(crate) struct SimulatedAnalyzer {
    rng: Mutex<StdRng>,
}

impl SimulatedAnalyzer {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng: Mutex::new(rng) }
    }

    fn rng(&self) -> Result<MutexGuard<'_, StdRng>, AnalyzerError> {
        self.rng
            .lock()
            .map_err(|_| AnalyzerError::Unavailable("random source poisoned".to_string()))
    }

    pub(crate) fn from_settings(settings: &Settings) -> Self {
        let ai = settings.ai();
        if !ai.gemini_api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is set but only the simulated analyzer is available");
        }
        let seed = ai.analyzer_seed;
        if seed.is_some() {
            tracing::info!(?seed, "Simulated analyzer running with a fixed seed");
        }
        Self::new(seed)
    }
}

#[async_trait]
impl LearningAnalyzer for SimulatedAnalyzer {
    async fn followup_questions(&self, _text: &str) -> Result<Vec<FollowUpQuestion>, AnalyzerError> {
        Ok(PROBING_QUESTIONS
            .iter()
            .map(|(id, question)| FollowUpQuestion {
                id: (*id).to_string(),
                question: (*question).to_string(),
            })
            .collect())
    }

    async fn evaluate_understanding(
        &self,
        _text: &str,
        _responses: &FollowUpResponses,
    ) -> Result<Dimensions, AnalyzerError> {
        let mut rng = self.rng()?;
        Ok(DIMENSION_RANGES
            .iter()
            .map(|(name, low, high)| ((*name).to_string(), round1(rng.gen_range(*low..=*high))))
            .collect())
    }

    async fn extract_weak_topics(&self, _text: &str) -> Result<Vec<String>, AnalyzerError> {
        let pool: Vec<&str> = catalog::catalog_topics().collect();
        let mut rng = self.rng()?;
        let count = rng.gen_range(WEAK_TOPIC_COUNT.0..=WEAK_TOPIC_COUNT.1);
        Ok(pool
            .choose_multiple(&mut *rng, count)
            .map(|topic| (*topic).to_string())
            .collect())
    }

    async fn recommend_books(
        &self,
        weak_topics: &[String],
    ) -> Result<Vec<BookRecommendation>, AnalyzerError> {
        let mut rng = self.rng()?;
        Ok(catalog::recommend_from_catalog(weak_topics, |_| {
            rng.gen_range(MATCH_PERCENTAGE_RANGE.0..=MATCH_PERCENTAGE_RANGE.1)
        }))
    }

    async fn ai_dependency(
        &self,
        _text: &str,
        _responses: &FollowUpResponses,
    ) -> Result<f64, AnalyzerError> {
        let mut rng = self.rng()?;
        Ok(round1(rng.gen_range(AI_DEPENDENCY_RANGE.0..=AI_DEPENDENCY_RANGE.1)))
    }
}

/// Deterministic analyzer for tests.
#[cfg(test)]
pub(crate) struct FixedAnalyzer {
    pub(crate) dimensions: Dimensions,
    pub(crate) weak_topics: Vec<String>,
    pub(crate) ai_dependency: f64,
}

#[cfg(test)]
impl Default for FixedAnalyzer {
    fn default() -> Self {
        let dimensions = [
            ("concept_clarity", 80.0),
            ("application", 70.0),
            ("logical_consistency", 90.0),
            ("depth", 60.0),
            ("clarity", 85.0),
            ("critical_thinking", 75.0),
            ("retention", 80.0),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        Self {
            dimensions,
            weak_topics: vec!["Recursion".to_string(), "Graph Theory".to_string()],
            ai_dependency: 42.0,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl LearningAnalyzer for FixedAnalyzer {
    async fn followup_questions(&self, _text: &str) -> Result<Vec<FollowUpQuestion>, AnalyzerError> {
        Ok(vec![FollowUpQuestion {
            id: "q1".to_string(),
            question: "Why?".to_string(),
        }])
    }

    async fn evaluate_understanding(
        &self,
        _text: &str,
        _responses: &FollowUpResponses,
    ) -> Result<Dimensions, AnalyzerError> {
        Ok(self.dimensions.clone())
    }

    async fn extract_weak_topics(&self, _text: &str) -> Result<Vec<String>, AnalyzerError> {
        Ok(self.weak_topics.clone())
    }

    async fn recommend_books(
        &self,
        weak_topics: &[String],
    ) -> Result<Vec<BookRecommendation>, AnalyzerError> {
        Ok(catalog::recommend_from_catalog(weak_topics, |_| 90))
    }

    async fn ai_dependency(
        &self,
        _text: &str,
        _responses: &FollowUpResponses,
    ) -> Result<f64, AnalyzerError> {
        Ok(self.ai_dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(value: f64, low: f64, high: f64) -> bool {
        (low..=high).contains(&value)
    }

    #[tokio::test]
    async fn simulated_dimensions_stay_in_their_ranges() {
        let analyzer = SimulatedAnalyzer::new(Some(7));
        for _ in 0..50 {
            let dims = analyzer
                .evaluate_understanding("text", &FollowUpResponses::new())
                .await
                .expect("dimensions");
            assert_eq!(dims.len(), DIMENSION_RANGES.len());
            for (name, low, high) in DIMENSION_RANGES {
                let value = dims[name];
                assert!(in_range(value, low, high), "{name} = {value}");
                assert_eq!(value, round1(value));
            }
        }
    }

    #[tokio::test]
    async fn simulated_weak_topics_are_distinct_catalog_topics() {
        let analyzer = SimulatedAnalyzer::new(Some(11));
        let pool: Vec<&str> = catalog::catalog_topics().collect();
        for _ in 0..50 {
            let topics = analyzer.extract_weak_topics("text").await.expect("topics");
            assert!((2..=4).contains(&topics.len()));
            assert!(topics.iter().all(|t| pool.contains(&t.as_str())));
            let mut deduped = topics.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), topics.len());
        }
    }

    #[tokio::test]
    async fn seeded_runs_are_reproducible() {
        let first = SimulatedAnalyzer::new(Some(42));
        let second = SimulatedAnalyzer::new(Some(42));
        let responses = FollowUpResponses::new();
        assert_eq!(
            first.evaluate_understanding("a", &responses).await.expect("first"),
            second.evaluate_understanding("b", &responses).await.expect("second"),
        );
        assert_eq!(
            first.ai_dependency("a", &responses).await.expect("first"),
            second.ai_dependency("b", &responses).await.expect("second"),
        );
    }

    #[tokio::test]
    async fn simulated_books_and_dependency_ranges() {
        let analyzer = SimulatedAnalyzer::new(Some(3));
        let books = analyzer
            .recommend_books(&["Recursion".to_string(), "Clean Architecture".to_string()])
            .await
            .expect("books");
        assert_eq!(books.len(), 3);
        assert!((78..=96).contains(&books[0].match_percentage));

        let dependency = analyzer
            .ai_dependency("text", &FollowUpResponses::new())
            .await
            .expect("dependency");
        assert!(in_range(dependency, 10.0, 65.0));
    }

    #[tokio::test]
    async fn simulated_questions_are_fixed() {
        let analyzer = SimulatedAnalyzer::new(None);
        let questions = analyzer.followup_questions("text").await.expect("questions");
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }
}
