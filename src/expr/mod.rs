//! # Expression Algebra
//!
//! A minimal typed-lambda AST and the substitution fold that merges a chain
//! of single-argument lambdas into one composed expression. The composed
//! result is pure data — no delegate-call nesting — so it stays fully
//! inspectable for translation to an external query representation.

pub mod ast;
pub mod compose;

pub use ast::{Expr, Lambda, Literal, Param};
pub use compose::{compose, substitute};
