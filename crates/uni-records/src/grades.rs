//! Grade statistics: score-band distribution and per-student summaries.

use serde::Serialize;
use serde_json::Value;
use uni_core::EntityRef;
use uni_core::entities::{Grade, Student};
use uni_core::enums::ScoreBand;
use uni_core::lenient::parse_number;

use crate::aggregate::{AggregationSpec, Operation, aggregate, percent_of};
use crate::resolve::{KeyFields, resolve};

/// Lowest passing score out of 20.
pub const PASSING_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandCount {
    pub band: ScoreBand,
    pub count: u64,
    /// Share of all grades, `0..=100`.
    pub percentage: f64,
}

/// Count and share of grades per [`ScoreBand`].
///
/// `bands` always lists all five bands, in [`ScoreBand::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDistribution {
    pub total: u64,
    pub bands: Vec<BandCount>,
}

impl GradeDistribution {
    /// Distribution of scores; `None` is a non-numeric score.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn from_scores(scores: &[Option<f64>]) -> Self {
        let spec = AggregationSpec::new(Operation::Count)
            .group_by(|score: &Option<f64>| ScoreBand::from_score(*score).as_str().to_string());
        let counts = aggregate(scores, &spec);
        let total = scores.len() as u64;

        let bands = ScoreBand::ALL
            .iter()
            .map(|&band| {
                let count = counts.get_or_zero(band.as_str());
                BandCount {
                    band,
                    count: count as u64,
                    percentage: percent_of(count, total as f64),
                }
            })
            .collect();

        Self { total, bands }
    }

    #[must_use]
    pub fn from_grades(grades: &[Grade]) -> Self {
        let scores: Vec<Option<f64>> = grades.iter().map(|g| g.score).collect();
        Self::from_scores(&scores)
    }

    /// Distribution of raw grade records, reading their `score` field.
    #[must_use]
    pub fn from_records(records: &[Value]) -> Self {
        let scores: Vec<Option<f64>> = records
            .iter()
            .map(|r| r.get("score").and_then(parse_number))
            .collect();
        Self::from_scores(&scores)
    }

    #[must_use]
    pub fn count(&self, band: ScoreBand) -> u64 {
        self.band(band).map_or(0, |b| b.count)
    }

    #[must_use]
    pub fn percentage(&self, band: ScoreBand) -> f64 {
        self.band(band).map_or(0.0, |b| b.percentage)
    }

    fn band(&self, band: ScoreBand) -> Option<&BandCount> {
        self.bands.iter().find(|b| b.band == band)
    }
}

/// One student's grades with their average and pass/fail counts.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGradeSummary<'a> {
    pub student: &'a Student,
    pub grades: Vec<&'a Grade>,
    /// Mean score; non-numeric scores count as `0`.
    pub average: f64,
    pub total: usize,
    pub passing: usize,
    pub failing: usize,
}

/// Group grades by the student they belong to, in first-seen order.
///
/// A grade's student is looked up through its `student` reference, then its
/// `student_id` code, then its `student_name`. Grades whose student is not in
/// `students` are left out.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_by_student<'a>(
    grades: &'a [Grade],
    students: &'a [Student],
) -> Vec<StudentGradeSummary<'a>> {
    let mut summaries: Vec<StudentGradeSummary<'a>> = Vec::new();

    for grade in grades {
        let Some(student) = student_of(grade, students) else {
            tracing::debug!(grade_id = ?grade.id, "grade has no resolvable student; skipped");
            continue;
        };
        match summaries
            .iter_mut()
            .find(|s| std::ptr::eq(s.student, student))
        {
            Some(summary) => summary.grades.push(grade),
            None => summaries.push(StudentGradeSummary {
                student,
                grades: vec![grade],
                average: 0.0,
                total: 0,
                passing: 0,
                failing: 0,
            }),
        }
    }

    for summary in &mut summaries {
        let sum: f64 = summary.grades.iter().map(|g| g.score.unwrap_or(0.0)).sum();
        summary.total = summary.grades.len();
        summary.passing = summary.grades.iter().filter(|g| g.is_passing()).count();
        summary.failing = summary.total - summary.passing;
        summary.average = if summary.total == 0 {
            0.0
        } else {
            sum / summary.total as f64
        };
    }

    summaries
}

fn student_of<'a>(grade: &Grade, students: &'a [Student]) -> Option<&'a Student> {
    let keys = KeyFields::STUDENT;
    resolve(&grade.student, students, &keys)
        .or_else(|| resolve(&text_ref(&grade.student_id), students, &keys))
        .or_else(|| resolve(&text_ref(&grade.student_name), students, &keys))
}

fn text_ref(text: &str) -> EntityRef {
    EntityRef::from(Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn distribution_lists_every_band_in_fixed_order() {
        let d = GradeDistribution::from_scores(&[Some(2.0), Some(18.0)]);
        assert_eq!(d.total, 2);
        assert_eq!(
            d.bands.iter().map(|b| b.band).collect::<Vec<_>>(),
            ScoreBand::ALL.to_vec()
        );
        assert_eq!(d.count(ScoreBand::Excellent), 1);
        assert_eq!(d.count(ScoreBand::Good), 0);
        assert_eq!(d.percentage(ScoreBand::Fail), 50.0);
    }

    #[test]
    fn empty_distribution_is_all_zero() {
        let d = GradeDistribution::from_grades(&[]);
        assert_eq!(d.total, 0);
        assert!(d.bands.iter().all(|b| b.count == 0 && b.percentage == 0.0));
    }

    #[test]
    fn records_with_text_scores() {
        let d = GradeDistribution::from_records(&[
            json!({"score": "15.00"}),
            json!({"score": "9.5"}),
            json!({"score": null}),
            json!({}),
        ]);
        assert_eq!(d.count(ScoreBand::Excellent), 1);
        assert_eq!(d.count(ScoreBand::Average), 1);
        assert_eq!(d.count(ScoreBand::Unknown), 2);
        assert_eq!(d.percentage(ScoreBand::Unknown), 50.0);
    }

    fn student(id: i64, code: &str, first: &str, last: &str) -> Student {
        Student {
            id: Some(id),
            student_id: code.into(),
            first_name: first.into(),
            last_name: last.into(),
            ..Student::default()
        }
    }

    fn grade(student: Value, score: Option<f64>) -> Grade {
        Grade {
            student: EntityRef::from(student),
            score,
            ..Grade::default()
        }
    }

    #[test]
    fn summaries_group_by_resolved_student() {
        let students = vec![
            student(1, "IT2024001", "Amine", "Ben Ali"),
            student(2, "IT2024002", "Sara", "Karoui"),
        ];
        let grades = vec![
            grade(json!(2), Some(12.0)),
            grade(json!(1), Some(8.0)),
            grade(json!({"id": 2}), Some(16.0)),
            grade(json!("IT2024001"), None),
            grade(json!(99), Some(20.0)),
        ];

        let summaries = summarize_by_student(&grades, &students);
        assert_eq!(summaries.len(), 2);

        let sara = &summaries[0];
        assert_eq!(sara.student.student_id, "IT2024002");
        assert_eq!(sara.total, 2);
        assert_eq!(sara.average, 14.0);
        assert_eq!((sara.passing, sara.failing), (2, 0));

        let amine = &summaries[1];
        assert_eq!(amine.total, 2);
        assert_eq!(amine.average, 4.0);
        assert_eq!((amine.passing, amine.failing), (0, 2));
    }

    #[test]
    fn summary_falls_back_to_code_then_name() {
        let students = vec![student(7, "IT2024007", "Lina", "Trabelsi")];
        let by_code = Grade {
            student_id: "IT2024007".into(),
            score: Some(11.0),
            ..Grade::default()
        };
        let by_name = Grade {
            student_name: "Lina Trabelsi".into(),
            score: Some(13.0),
            ..Grade::default()
        };
        let grades = [by_code, by_name];
        let summaries = summarize_by_student(&grades, &students);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total, 2);
        assert_eq!(summaries[0].average, 12.0);
    }
}
