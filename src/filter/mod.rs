// SPDX-License-Identifier: MIT

//! Condition parsing and evaluation
//!
//! Conditions are single comparisons between a path into a JSON document
//! and a literal, like:
//! - `name = John`
//! - `user.age >= 21`
//! - `attr.'sub attr'.items[0].id != 'id 1'`

mod ast;
mod evaluator;
mod parser;

pub use ast::{Condition, Operator, Path, Segment};
pub use evaluator::{evaluate, matches, Evaluation};
pub use parser::parse;
