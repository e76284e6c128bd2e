//! Read-side aggregates for the student dashboard and the teacher views.
//!
//! Every function takes assignment rows ordered oldest first and recomputes
//! its aggregates from scratch.

use std::collections::{HashMap, HashSet};

use crate::core::time::{format_day, format_rfc3339, format_week};
use crate::db::models::{Assignment, User};
use crate::schemas::analytics::{
    ClassAnalyticsResponse, DailyAverage, DashboardResponse, RosterEntry, ScorePoint,
    StudentAnalyticsResponse, TopicTimelineEntry,
};
use crate::schemas::assignment::stored_radar;
use crate::services::recommendations::{
    aggregate_weak_topics, compute_performance_distribution, generate_intervention_suggestions,
    most_weak_topic, strongest_topic, PerformanceDistribution, TopicAverage, NO_DATA,
};
use crate::services::scoring::{build_radar_scores, compute_growth_trend, mean, round1};

const AI_RISK_THRESHOLD: f64 = 50.0;
const DEFAULT_SUBJECT: &str = "General";
const NO_WEAK_TOPIC: &str = "N/A";

fn final_scores(assignments: &[Assignment]) -> Vec<f64> {
    assignments.iter().map(|a| a.final_score).collect()
}

fn score_history(assignments: &[Assignment]) -> Vec<ScorePoint> {
    assignments
        .iter()
        .map(|a| ScorePoint { date: format_rfc3339(a.created_at), score: a.final_score })
        .collect()
}

fn mean_ai_dependency(assignments: &[Assignment]) -> f64 {
    let values: Vec<f64> = assignments.iter().map(|a| a.ai_dependency_score).collect();
    mean(&values)
}

/// Groups values under a key, keeping keys in first-seen order.
fn group_in_order<I>(pairs: I) -> Vec<(String, Vec<f64>)>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (key, value) in pairs {
        match index.get(&key) {
            Some(&position) => groups[position].1.push(value),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![value]));
            }
        }
    }
    groups
}

pub(crate) fn student_dashboard(assignments: &[Assignment]) -> DashboardResponse {
    let Some(latest) = assignments.last() else {
        return DashboardResponse {
            overall_score: 0.0,
            total_assignments: 0,
            score_history: Vec::new(),
            weak_topic_summary: Vec::new(),
            ai_dependency_score: 0.0,
            growth_trend: 0.0,
        };
    };

    let topic_lists: Vec<Vec<String>> = assignments.iter().map(|a| a.weak_topics.0.clone()).collect();

    DashboardResponse {
        overall_score: round1(latest.final_score),
        total_assignments: assignments.len(),
        score_history: score_history(assignments),
        weak_topic_summary: aggregate_weak_topics(&topic_lists),
        ai_dependency_score: round1(mean_ai_dependency(assignments)),
        growth_trend: compute_growth_trend(&final_scores(assignments)),
    }
}

/// `registered_students` is the number of student accounts; the reported total
/// never drops below the number of distinct submitters.
pub(crate) fn class_analytics(
    registered_students: usize,
    assignments: &[Assignment],
) -> ClassAnalyticsResponse {
    if assignments.is_empty() {
        return ClassAnalyticsResponse {
            class_average: 0.0,
            total_students: registered_students,
            most_weak_topic: NO_DATA.to_string(),
            strongest_topic: NO_DATA.to_string(),
            performance_distribution: PerformanceDistribution::default(),
            score_trend: Vec::new(),
            topic_averages: Vec::new(),
            ai_risk_students: 0,
        };
    }

    // student id -> latest final score, in first-submission order
    let mut latest_by_student: Vec<(i64, f64)> = Vec::new();
    let mut student_index: HashMap<i64, usize> = HashMap::new();
    let mut at_risk: HashSet<i64> = HashSet::new();
    for assignment in assignments {
        match student_index.get(&assignment.student_id) {
            Some(&position) => latest_by_student[position].1 = assignment.final_score,
            None => {
                student_index.insert(assignment.student_id, latest_by_student.len());
                latest_by_student.push((assignment.student_id, assignment.final_score));
            }
        }
        if assignment.ai_dependency_score > AI_RISK_THRESHOLD {
            at_risk.insert(assignment.student_id);
        }
    }

    let topic_lists: Vec<Vec<String>> = assignments.iter().map(|a| a.weak_topics.0.clone()).collect();
    let weak_summary = aggregate_weak_topics(&topic_lists);

    let topic_averages: Vec<TopicAverage> = group_in_order(assignments.iter().map(|a| {
        let subject = if a.subject.is_empty() { DEFAULT_SUBJECT } else { a.subject.as_str() };
        (subject.to_string(), a.final_score)
    }))
    .into_iter()
    .map(|(topic, scores)| TopicAverage { topic, avg: round1(mean(&scores)) })
    .collect();

    let score_trend: Vec<DailyAverage> =
        group_in_order(assignments.iter().map(|a| (format_day(a.created_at), a.final_score)))
            .into_iter()
            .map(|(date, scores)| DailyAverage { date, avg: round1(mean(&scores)) })
            .collect();

    let latest_scores: Vec<f64> = latest_by_student.iter().map(|(_, score)| *score).collect();

    ClassAnalyticsResponse {
        class_average: round1(mean(&final_scores(assignments))),
        total_students: registered_students.max(latest_by_student.len()),
        most_weak_topic: most_weak_topic(&weak_summary),
        strongest_topic: strongest_topic(&topic_averages),
        performance_distribution: compute_performance_distribution(&latest_scores),
        score_trend,
        topic_averages,
        ai_risk_students: at_risk.len(),
    }
}

/// `None` when the student has no assignments.
pub(crate) fn student_analytics(
    student_id: i64,
    student_name: String,
    assignments: &[Assignment],
) -> Option<StudentAnalyticsResponse> {
    let latest = assignments.last()?;

    let stored = stored_radar(latest);
    let radar_scores = build_radar_scores(
        stored.clarity,
        stored.application,
        stored.logic,
        stored.critical_thinking,
        stored.retention,
    );

    let mut weak_topics: Vec<String> = Vec::new();
    for topic in assignments.iter().flat_map(|a| a.weak_topics.0.iter()) {
        if !weak_topics.contains(topic) {
            weak_topics.push(topic.clone());
        }
    }

    let topic_timeline = assignments
        .iter()
        .filter_map(|a| {
            let first = a.weak_topics.0.first()?;
            Some(TopicTimelineEntry {
                week: format_week(a.created_at),
                topics: a.weak_topics.0.join(", "),
                detail: format!("Struggled with {first} in this assignment."),
            })
        })
        .collect();

    let growth_trend = compute_growth_trend(&final_scores(assignments));
    let ai_dependency = mean_ai_dependency(assignments);

    Some(StudentAnalyticsResponse {
        student_id,
        student_name,
        overall_score: round1(latest.final_score),
        growth_trend,
        ai_dependency_score: round1(ai_dependency),
        score_history: score_history(assignments),
        radar_scores,
        intervention_suggestions: generate_intervention_suggestions(
            &weak_topics,
            ai_dependency,
            growth_trend,
        ),
        weak_topics,
        topic_timeline,
    })
}

/// Status label for a latest score.
pub(crate) fn status_label(score: f64) -> &'static str {
    if score >= 80.0 {
        "Strong"
    } else if score >= 60.0 {
        "Stable"
    } else {
        "At Risk"
    }
}

/// Signed percentage label such as `+30.8%` or `-5.0%`.
pub(crate) fn trend_label(growth: f64) -> String {
    let sign = if growth >= 0.0 { "+" } else { "" };
    format!("{sign}{growth:.1}%")
}

pub(crate) fn roster_entry(student: &User, assignments: &[Assignment]) -> RosterEntry {
    let latest = assignments.last();
    let score = latest.map_or(0.0, |a| a.final_score);
    let weak_topic = latest
        .and_then(|a| a.weak_topics.0.first().cloned())
        .unwrap_or_else(|| NO_WEAK_TOPIC.to_string());
    let growth = compute_growth_trend(&final_scores(assignments));

    RosterEntry {
        id: student.id,
        name: student.name.clone(),
        score: round1(score),
        weak_topic,
        trend: trend_label(growth),
        status: status_label(score).to_string(),
        ai_dependency: round1(latest.map_or(0.0, |a| a.ai_dependency_score)),
    }
}
