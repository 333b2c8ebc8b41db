//! Course and teacher list roll-ups.

use serde::Serialize;
use uni_core::entities::{Course, Teacher};
use uni_core::enums::TeacherRank;

use crate::aggregate::{AggregationSpec, Operation, aggregate, percent_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CourseTotals {
    pub courses: usize,
    pub credits: i64,
    /// Sum of `max_students`.
    pub capacity: i64,
}

impl CourseTotals {
    #[must_use]
    pub fn from_courses(courses: &[Course]) -> Self {
        Self {
            courses: courses.len(),
            credits: courses
                .iter()
                .filter_map(|c| c.credits)
                .fold(0, i64::saturating_add),
            capacity: courses
                .iter()
                .filter_map(|c| c.max_students)
                .fold(0, i64::saturating_add),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankShare {
    pub rank: TeacherRank,
    pub count: u64,
    pub percentage: f64,
}

/// Count and share of teachers per rank, in [`TeacherRank::ALL`] order.
///
/// Teachers without a known rank count toward the total but toward no rank.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn rank_distribution(teachers: &[Teacher]) -> Vec<RankShare> {
    let counts = aggregate(
        teachers,
        &AggregationSpec::new(Operation::Count)
            .group_by(|t: &Teacher| t.rank.map(TeacherRank::as_str).unwrap_or_default().to_string()),
    );
    let total = teachers.len() as f64;

    TeacherRank::ALL
        .iter()
        .map(|&rank| {
            let count = counts.get_or_zero(rank.as_str());
            RankShare {
                rank,
                count: count as u64,
                percentage: percent_of(count, total),
            }
        })
        .collect()
}
