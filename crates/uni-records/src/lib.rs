//! # uni-records
//!
//! Pure, synchronous processing of fetched records:
//!
//! - [`envelope`]: normalize any list/record response shape
//! - [`resolve`]: resolve ambiguous entity references against a candidate list
//! - [`aggregate`]: the one group-by/sum/count/avg/percentage utility
//! - [`budget`], [`grades`], [`finance`], [`roster`]: statistics built on it
//!
//! Nothing in this crate fails: malformed input degrades to empty results,
//! unresolved references to `None`, and zero denominators to `0`.

pub mod aggregate;
pub mod budget;
pub mod envelope;
pub mod finance;
pub mod grades;
pub mod resolve;
pub mod roster;

pub use aggregate::{AggregationSpec, Aggregates, Operation, aggregate, percent_of};
pub use budget::BudgetUtilization;
pub use envelope::{Listing, Normalized, normalize, normalize_record, normalize_with};
pub use finance::FinanceSummary;
pub use grades::{GradeDistribution, StudentGradeSummary, summarize_by_student};
pub use resolve::{Identified, KeyFields, resolve, resolve_value};
