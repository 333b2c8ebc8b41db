//! # uni-core
//!
//! Core types and error types for UniDesk.
//!
//! This crate provides the foundational types shared across all UniDesk crates:
//! - Entity structs for every record the backend serves (students, teachers,
//!   courses, enrollments, exams, grades, transactions, budgets, user profiles)
//! - Closed vocabularies (statuses, semesters, transaction types, score bands)
//! - [`EntityRef`], the sum type for foreign keys embedded in records
//! - Lenient number/date coercion shared by deserializers and aggregations
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod lenient;
pub mod reference;

pub use errors::CoreError;
pub use reference::EntityRef;
