//! Lenient decoding of backend payloads and serde roundtrips for all entity types.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use uni_core::EntityRef;
use uni_core::entities::*;
use uni_core::enums::*;

macro_rules! roundtrip {
    ($name:ident, $ty:ty, $payload:expr) => {
        #[test]
        fn $name() {
            let val: $ty = serde_json::from_value($payload).unwrap();
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );
        }
    };
}

roundtrip!(
    student_roundtrip,
    Student,
    json!({
        "id": 12, "student_id": "IT2024012", "first_name": "Amine", "last_name": "Ben Ali",
        "email": "amine@univ.tn", "enrollment_date": "2024-09-15", "gpa": "3.40",
        "current_year": 2, "status": "active"
    })
);
roundtrip!(
    teacher_roundtrip,
    Teacher,
    json!({
        "id": 3, "teacher_id": "T-003", "user_first_name": "Sara", "user_last_name": "Karoui",
        "rank": "associate", "hire_date": "2019-02-01"
    })
);
roundtrip!(
    course_roundtrip,
    Course,
    json!({"id": 5, "course_code": "INF101", "title": "Algorithms", "credits": 4, "teacher": 3, "semester": "fall"})
);
roundtrip!(
    enrollment_roundtrip,
    Enrollment,
    json!({"id": 1, "student": 12, "course": 5, "status": "enrolled", "grade": "B"})
);
roundtrip!(
    exam_roundtrip,
    Exam,
    json!({"id": 8, "course": 5, "exam_type": "midterm", "date": "2025-01-10", "time": "09:00", "duration": "2 heures"})
);
roundtrip!(
    grade_roundtrip,
    Grade,
    json!({"id": 2, "student": "IT2024012", "course": 5, "score": "14.50", "semester": "spring"})
);
roundtrip!(
    transaction_roundtrip,
    Transaction,
    json!({
        "id": 40, "transaction_number": "TRX-0040", "transaction_type": "scholarship",
        "category": "scholarship", "amount": "-500.000", "status": "paid",
        "student": {"id": 12, "student_id": "IT2024012", "full_name": "Amine Ben Ali"}
    })
);
roundtrip!(
    budget_roundtrip,
    Budget,
    json!({"id": 1, "department": "informatique", "budget_type": "operational", "year": 2025,
           "allocated_amount": "1000.000", "spent_amount": "1200.000", "is_active": true})
);
roundtrip!(
    profile_roundtrip,
    UserProfile,
    json!({"id": 1, "username": "admin", "first_name": "Admin", "user_type": "admin"})
);

#[test]
fn decimal_strings_become_numbers() {
    let budget: Budget = serde_json::from_value(json!({
        "allocated_amount": "15000.500",
        "spent_amount": 2000,
        "remaining_amount": "13000.500"
    }))
    .unwrap();
    assert_eq!(budget.allocated_amount, 15000.5);
    assert_eq!(budget.spent_amount, 2000.0);
    assert_eq!(budget.remaining_amount, Some(13000.5));
    assert_eq!(budget.committed_amount, 0.0);
}

#[test]
fn unknown_choices_and_blank_dates_do_not_fail_the_record() {
    let student: Student = serde_json::from_value(json!({
        "id": "7",
        "status": "on_leave",
        "graduation_date": "",
        "date_of_birth": null,
        "gpa": "N/A"
    }))
    .unwrap();
    assert_eq!(student.id, Some(7));
    assert_eq!(student.status, None);
    assert_eq!(student.graduation_date, None);
    assert_eq!(student.gpa, None);
}

#[test]
fn empty_object_decodes_to_defaults() {
    let grade: Grade = serde_json::from_value(json!({})).unwrap();
    assert_eq!(grade.id, None);
    assert!(grade.student.is_unrecognized());
    assert_eq!(grade.band(), ScoreBand::Unknown);
    assert!(!grade.is_passing());
}

#[test]
fn nested_student_reference_is_kept_as_object() {
    let tx: Transaction = serde_json::from_value(json!({
        "student": {"id": 12, "student_id": "IT2024012", "full_name": "Amine Ben Ali"},
        "amount": 250
    }))
    .unwrap();
    assert_eq!(tx.student.id(), Some(12));
    assert_eq!(tx.student.object_str("student_id"), Some("IT2024012"));
    assert_eq!(tx.teacher, EntityRef::Unrecognized);
}

#[test]
fn full_names_skip_blank_parts() {
    let teacher = Teacher {
        user_first_name: "Sara".into(),
        ..Teacher::default()
    };
    assert_eq!(teacher.full_name(), "Sara");

    let student = Student {
        first_name: "Amine".into(),
        last_name: "Ben Ali".into(),
        ..Student::default()
    };
    assert_eq!(student.full_name(), "Amine Ben Ali");
}

#[test]
fn profile_yields_identity() {
    let profile: UserProfile =
        serde_json::from_value(json!({"id": 4, "username": "sara", "user_type": "teacher"}))
            .unwrap();
    let identity = profile.identity();
    assert_eq!(identity.user_id, Some(4));
    assert_eq!(identity.username.as_deref(), Some("sara"));
    assert_eq!(identity.user_type, Some(UserType::Teacher));
    assert!(!identity.is_admin());

    let dated: Exam = serde_json::from_value(json!({"date": "2025-01-10"})).unwrap();
    assert_eq!(dated.date, NaiveDate::from_ymd_opt(2025, 1, 10));
}
