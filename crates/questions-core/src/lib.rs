//! # questions-core: Foundational Types for the Questions Service
//!
//! Defines the single domain entity of the service, the [`Question`], and
//! the validation rules that every create and update must satisfy before
//! anything is persisted. Every other crate in the workspace depends on
//! `questions-core`; it depends on nothing internal.
//!
//! ## Question Variants
//!
//! | Type | Required sub-document | Rule |
//! |------|----------------------|------|
//! | `dissertative` | `keyWords` (label → weight) | every weight > 0, weights sum to exactly 1 |
//! | `objective` | `alternatives` (label → is-correct) | exactly one alternative is correct |
//!
//! ## Key Design Principles
//!
//! 1. **Validation is a set of pure functions.** No registry, no hooks. The
//!    repository calls [`validation::validate_question`] (create) or
//!    [`validation::validate_patch`] (update) explicitly before writing.
//!
//! 2. **Typed failures.** Every violated rule is a distinct
//!    [`ValidationError`] variant with a stable machine code and the field
//!    it concerns. All violations of one write are collected into
//!    [`ValidationErrors`], first violated rule first.
//!
//! 3. **Partial updates are merged, then validated.** [`QuestionPatch`]
//!    distinguishes "not supplied" from "cleared" so that a patch can drop
//!    the sub-document of the old type when switching types.
//!
//! ## Crate Policy
//!
//! - No I/O and no async.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - OpenAPI schemas are derived only with the `openapi` feature.

pub mod error;
pub mod question;
pub mod validation;

// Re-export primary types for ergonomic imports.
pub use error::{ParseQuestionTypeError, ValidationError, ValidationErrors};
pub use question::{
    Alternatives, KeyWords, NewQuestion, Question, QuestionId, QuestionPatch, QuestionType,
    QuestionView,
};
pub use validation::{
    validate_alternatives, validate_description, validate_key_words, validate_patch,
    validate_question, validate_type_requirements,
};
