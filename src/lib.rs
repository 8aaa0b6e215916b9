// SPDX-License-Identifier: MIT

//! Filtering of newline-delimited JSON streams by a single condition
//!
//! A condition such as `user.age >= 21` is parsed once into a
//! [`filter::Condition`] and then evaluated against every line of the stream.

pub mod error;
pub mod filter;
pub mod stream;

pub use error::{ConditionError, ErrorKind, EvalError, StreamError};
pub use filter::{evaluate, matches, parse, Condition, Evaluation, Operator};
pub use stream::{filter_lines, FilterOptions, FilterStats};
