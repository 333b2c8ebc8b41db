//! Closed vocabularies used by UniDesk records.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and mirror the backend's choice lists. `as_str()` returns the wire value;
//! `FromStr` accepts exactly that value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// StudentStatus
// ---------------------------------------------------------------------------

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Suspended,
}

impl StudentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Graduated => "graduated",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "graduated" => Ok(Self::Graduated),
            "suspended" => Ok(Self::Suspended),
            other => Err(unknown("student status", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// TeacherRank
// ---------------------------------------------------------------------------

/// Academic rank of a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherRank {
    Professor,
    Associate,
    Assistant,
    Lecturer,
}

impl TeacherRank {
    /// Every rank, in the order rank distributions are listed.
    pub const ALL: [Self; 4] = [
        Self::Professor,
        Self::Associate,
        Self::Assistant,
        Self::Lecturer,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professor => "professor",
            Self::Associate => "associate",
            Self::Assistant => "assistant",
            Self::Lecturer => "lecturer",
        }
    }
}

impl fmt::Display for TeacherRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeacherRank {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professor" => Ok(Self::Professor),
            "associate" => Ok(Self::Associate),
            "assistant" => Ok(Self::Assistant),
            "lecturer" => Ok(Self::Lecturer),
            other => Err(unknown("teacher rank", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Semester
// ---------------------------------------------------------------------------

/// Teaching period of a course or grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semester {
    #[default]
    Fall,
    Spring,
    Summer,
}

impl Semester {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fall => "fall",
            Self::Spring => "spring",
            Self::Summer => "summer",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fall" => Ok(Self::Fall),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            other => Err(unknown("semester", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ExamType / ExamStatus
// ---------------------------------------------------------------------------

/// Kind of exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Final,
    Midterm,
    Quiz,
    Oral,
    Practical,
}

impl ExamType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Final => "final",
            Self::Midterm => "midterm",
            Self::Quiz => "quiz",
            Self::Oral => "oral",
            Self::Practical => "practical",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "final" => Ok(Self::Final),
            "midterm" => Ok(Self::Midterm),
            "quiz" => Ok(Self::Quiz),
            "oral" => Ok(Self::Oral),
            "practical" => Ok(Self::Practical),
            other => Err(unknown("exam type", other)),
        }
    }
}

/// Scheduling status of an exam.
///
/// ```text
/// upcoming → ongoing → completed
///          → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl ExamStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(unknown("exam status", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// EnrollmentStatus
// ---------------------------------------------------------------------------

/// Status of a student's enrollment in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrolled" => Ok(Self::Enrolled),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            other => Err(unknown("enrollment status", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Financial transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Tuition,
    ExamFee,
    LibraryFee,
    LabFee,
    Scholarship,
    Refund,
    Salary,
    Maintenance,
    Equipment,
    Other,
}

impl TransactionType {
    /// Whether amounts of this kind leave the university (sent as negative values).
    #[must_use]
    pub const fn is_outflow(self) -> bool {
        matches!(self, Self::Scholarship | Self::Refund)
    }

    /// Ledger category a transaction of this kind is filed under.
    #[must_use]
    pub const fn category(self) -> TransactionCategory {
        match self {
            Self::Tuition | Self::ExamFee | Self::LibraryFee | Self::LabFee => {
                TransactionCategory::Income
            }
            Self::Scholarship | Self::Refund => TransactionCategory::Scholarship,
            Self::Salary => TransactionCategory::Salary,
            Self::Maintenance | Self::Equipment | Self::Other => TransactionCategory::Expense,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tuition => "tuition",
            Self::ExamFee => "exam_fee",
            Self::LibraryFee => "library_fee",
            Self::LabFee => "lab_fee",
            Self::Scholarship => "scholarship",
            Self::Refund => "refund",
            Self::Salary => "salary",
            Self::Maintenance => "maintenance",
            Self::Equipment => "equipment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tuition" => Ok(Self::Tuition),
            "exam_fee" => Ok(Self::ExamFee),
            "library_fee" => Ok(Self::LibraryFee),
            "lab_fee" => Ok(Self::LabFee),
            "scholarship" => Ok(Self::Scholarship),
            "refund" => Ok(Self::Refund),
            "salary" => Ok(Self::Salary),
            "maintenance" => Ok(Self::Maintenance),
            "equipment" => Ok(Self::Equipment),
            "other" => Ok(Self::Other),
            other => Err(unknown("transaction type", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionStatus / PaymentMethod / TransactionCategory
// ---------------------------------------------------------------------------

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    Cancelled,
    Partial,
}

impl TransactionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            "cancelled" => Ok(Self::Cancelled),
            "partial" => Ok(Self::Partial),
            other => Err(unknown("transaction status", other)),
        }
    }
}

/// How a transaction was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    CreditCard,
    Cash,
    Check,
    MobilePayment,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::CreditCard => "credit_card",
            Self::Cash => "cash",
            Self::Check => "check",
            Self::MobilePayment => "mobile_payment",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank_transfer" => Ok(Self::BankTransfer),
            "credit_card" => Ok(Self::CreditCard),
            "cash" => Ok(Self::Cash),
            "check" => Ok(Self::Check),
            "mobile_payment" => Ok(Self::MobilePayment),
            other => Err(unknown("payment method", other)),
        }
    }
}

/// Accounting category of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    #[default]
    Income,
    Expense,
    Scholarship,
    Salary,
}

impl TransactionCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Scholarship => "scholarship",
            Self::Salary => "salary",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "scholarship" => Ok(Self::Scholarship),
            "salary" => Ok(Self::Salary),
            other => Err(unknown("transaction category", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// BudgetType
// ---------------------------------------------------------------------------

/// Budget line kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    #[default]
    Operational,
    Capital,
    Salary,
    Scholarship,
    Development,
}

impl BudgetType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Capital => "capital",
            Self::Salary => "salary",
            Self::Scholarship => "scholarship",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for BudgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(Self::Operational),
            "capital" => Ok(Self::Capital),
            "salary" => Ok(Self::Salary),
            "scholarship" => Ok(Self::Scholarship),
            "development" => Ok(Self::Development),
            other => Err(unknown("budget type", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ScoreBand
// ---------------------------------------------------------------------------

/// Band a grade score (out of 20) falls into.
///
/// ```text
/// score >= 15 → excellent
/// score >= 10 → good
/// score >=  5 → average
/// otherwise   → fail
/// not numeric → unknown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Fail,
    Unknown,
}

impl ScoreBand {
    /// Every band, in display order.
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Average,
        Self::Fail,
        Self::Unknown,
    ];

    /// Classify a score. `None` (unparseable score) is [`ScoreBand::Unknown`].
    #[must_use]
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= 15.0 => Self::Excellent,
            Some(s) if s >= 10.0 => Self::Good,
            Some(s) if s >= 5.0 => Self::Average,
            Some(_) => Self::Fail,
            None => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Fail => "fail",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserType
// ---------------------------------------------------------------------------

/// Account type of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Admin,
    #[default]
    Student,
    Teacher,
    Staff,
}

impl UserType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "staff" => Ok(Self::Staff),
            other => Err(unknown("user type", other)),
        }
    }
}

fn unknown(vocabulary: &'static str, value: &str) -> CoreError {
    CoreError::UnknownVariant {
        vocabulary,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_wire_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $wire:expr) => {
            #[test]
            fn $name() {
                let json = serde_json::to_string(&$variant).unwrap();
                assert_eq!(json, format!("\"{}\"", $wire));
                let back: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(back, $variant);
                assert_eq!($wire.parse::<$ty>().unwrap(), $variant);
            }
        };
    }

    test_wire_roundtrip!(student_status_graduated, StudentStatus, StudentStatus::Graduated, "graduated");
    test_wire_roundtrip!(teacher_rank_associate, TeacherRank, TeacherRank::Associate, "associate");
    test_wire_roundtrip!(semester_spring, Semester, Semester::Spring, "spring");
    test_wire_roundtrip!(exam_type_practical, ExamType, ExamType::Practical, "practical");
    test_wire_roundtrip!(exam_status_ongoing, ExamStatus, ExamStatus::Ongoing, "ongoing");
    test_wire_roundtrip!(enrollment_dropped, EnrollmentStatus, EnrollmentStatus::Dropped, "dropped");
    test_wire_roundtrip!(transaction_type_exam_fee, TransactionType, TransactionType::ExamFee, "exam_fee");
    test_wire_roundtrip!(transaction_status_partial, TransactionStatus, TransactionStatus::Partial, "partial");
    test_wire_roundtrip!(payment_method_mobile, PaymentMethod, PaymentMethod::MobilePayment, "mobile_payment");
    test_wire_roundtrip!(category_expense, TransactionCategory, TransactionCategory::Expense, "expense");
    test_wire_roundtrip!(budget_type_capital, BudgetType, BudgetType::Capital, "capital");
    test_wire_roundtrip!(user_type_staff, UserType, UserType::Staff, "staff");

    #[test]
    fn unknown_value_is_rejected_with_vocabulary_name() {
        let err = "emeritus".parse::<TeacherRank>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown teacher rank value: emeritus");
    }

    #[test]
    fn outflows_file_under_scholarship() {
        assert!(TransactionType::Refund.is_outflow());
        assert_eq!(TransactionType::Refund.category(), TransactionCategory::Scholarship);
        assert_eq!(TransactionType::LabFee.category(), TransactionCategory::Income);
        assert_eq!(TransactionType::Equipment.category(), TransactionCategory::Expense);
        assert!(!TransactionType::Salary.is_outflow());
    }

    #[test]
    fn score_band_thresholds() {
        assert_eq!(ScoreBand::from_score(Some(20.0)), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(Some(15.0)), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(Some(14.99)), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(Some(10.0)), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(Some(5.0)), ScoreBand::Average);
        assert_eq!(ScoreBand::from_score(Some(4.5)), ScoreBand::Fail);
        assert_eq!(ScoreBand::from_score(Some(0.0)), ScoreBand::Fail);
        assert_eq!(ScoreBand::from_score(None), ScoreBand::Unknown);
    }

    #[test]
    fn outflow_types() {
        assert!(TransactionType::Scholarship.is_outflow());
        assert!(TransactionType::Refund.is_outflow());
        assert!(!TransactionType::Tuition.is_outflow());
        assert!(!TransactionType::Salary.is_outflow());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", TransactionType::LibraryFee), "library_fee");
        assert_eq!(format!("{}", ScoreBand::Average), "average");
        assert_eq!(format!("{}", PaymentMethod::BankTransfer), "bank_transfer");
        assert_eq!(format!("{}", ExamStatus::Cancelled), "cancelled");
    }
}
