//! Every form rejects an untouched draft and reports which fields are missing.

use uni_forms::{
    BudgetForm, CourseForm, EnrollmentForm, ExamForm, FormController, GradeForm, StudentForm,
    TeacherForm, TransactionForm,
};

fn rejects_untouched<F: FormController + Default>(required: &[&str]) {
    let form = F::default();
    let errors = form.submit().unwrap_err();
    for field in required {
        assert!(errors.contains(field), "{}: {field} not reported", F::ENTITY);
    }
    assert!(form.changes().is_empty(), "{}: defaults count as changes", F::ENTITY);
}

#[test]
fn untouched_forms_are_invalid() {
    rejects_untouched::<StudentForm>(&["student_id", "email", "department"]);
    rejects_untouched::<TeacherForm>(&["teacher_id", "rank", "specialization"]);
    rejects_untouched::<CourseForm>(&["course_code", "title", "description"]);
    rejects_untouched::<EnrollmentForm>(&["student", "course"]);
    rejects_untouched::<ExamForm>(&["course", "title", "date", "time", "location"]);
    rejects_untouched::<GradeForm>(&["student", "course", "score"]);
    rejects_untouched::<TransactionForm>(&["student", "amount", "due_date"]);
    rejects_untouched::<BudgetForm>(&["department", "allocated_amount"]);
}

#[test]
fn error_display_lists_fields() {
    let errors = GradeForm::default().validate().unwrap_err();
    assert_eq!(errors.to_string(), "invalid fields: course, score, student");
}
