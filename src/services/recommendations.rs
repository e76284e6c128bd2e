//! Weak-topic aggregation, performance buckets and intervention suggestions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub(crate) const NONE_IDENTIFIED: &str = "None identified";
pub(crate) const NO_DATA: &str = "No data";

const HIGH_AI_DEPENDENCY: f64 = 50.0;
const HIGH_SCORE: f64 = 80.0;
const MEDIUM_SCORE: f64 = 60.0;
const FOCUS_TOPIC_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WeakTopicCount {
    pub(crate) topic: String,
    pub(crate) count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TopicAverage {
    pub(crate) topic: String,
    pub(crate) avg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) struct PerformanceDistribution {
    pub(crate) high: u32,
    pub(crate) medium: u32,
    pub(crate) low: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct InterventionSuggestion {
    pub(crate) title: String,
    pub(crate) description: String,
}

impl InterventionSuggestion {
    fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Flattens per-assignment topic lists and counts occurrences.
///
/// Sorted by descending count; equal counts keep the order in which the topic
/// was first seen. Topics are compared by exact string equality.
pub(crate) fn aggregate_weak_topics<T: AsRef<str>>(topic_lists: &[Vec<T>]) -> Vec<WeakTopicCount> {
    let mut counts: Vec<WeakTopicCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for topic in topic_lists.iter().flatten() {
        let topic = topic.as_ref();
        match index.get(topic) {
            Some(&position) => counts[position].count += 1,
            None => {
                index.insert(topic, counts.len());
                counts.push(WeakTopicCount {
                    topic: topic.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub(crate) fn most_weak_topic(summary: &[WeakTopicCount]) -> String {
    summary
        .first()
        .map(|entry| entry.topic.clone())
        .unwrap_or_else(|| NONE_IDENTIFIED.to_string())
}

/// Topic with the highest average; the first maximum wins on ties.
pub(crate) fn strongest_topic(averages: &[TopicAverage]) -> String {
    let mut best: Option<&TopicAverage> = None;
    for candidate in averages {
        if best.map_or(true, |current| candidate.avg > current.avg) {
            best = Some(candidate);
        }
    }

    best.map(|entry| entry.topic.clone())
        .unwrap_or_else(|| NONE_IDENTIFIED.to_string())
}

pub(crate) fn compute_performance_distribution(scores: &[f64]) -> PerformanceDistribution {
    let mut distribution = PerformanceDistribution::default();
    for &score in scores {
        if score >= HIGH_SCORE {
            distribution.high += 1;
        } else if score >= MEDIUM_SCORE {
            distribution.medium += 1;
        } else {
            distribution.low += 1;
        }
    }
    distribution
}

/// Rules fire in order: high AI dependency, declining growth, then one focus
/// entry for each of the first two weak topics. The "Maintain Current Pace"
/// entry appears only when no rule fired.
pub(crate) fn generate_intervention_suggestions<T: AsRef<str>>(
    weak_topics: &[T],
    ai_dependency: f64,
    growth_trend: f64,
) -> Vec<InterventionSuggestion> {
    let mut suggestions = Vec::new();

    if ai_dependency > HIGH_AI_DEPENDENCY {
        suggestions.push(InterventionSuggestion::new(
            "Reduce AI Dependency",
            "This student shows high AI dependency. Recommend in-person assessments or \
             handwritten problem solving sessions to verify genuine understanding.",
        ));
    }

    if growth_trend < 0.0 {
        suggestions.push(InterventionSuggestion::new(
            "Declining Performance",
            "Performance is trending downward. Consider a one-on-one session to identify \
             blockers and adjust the learning pace.",
        ));
    }

    for topic in weak_topics.iter().take(FOCUS_TOPIC_LIMIT) {
        let topic = topic.as_ref();
        suggestions.push(InterventionSuggestion::new(
            format!("Focus on {topic}"),
            format!(
                "Consistently weak in {topic}. Recommend targeted exercises, peer tutoring, \
                 or supplementary materials for this topic."
            ),
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(InterventionSuggestion::new(
            "Maintain Current Pace",
            "Student is performing well. Encourage deeper exploration of advanced topics \
             to maintain engagement.",
        ));
    }

    suggestions
}
