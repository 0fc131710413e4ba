//! Convenient imports for typical `ormsugar` usage.
//!
//! ```ignore
//! use ormsugar::prelude::*;
//! ```

pub use crate::{Args, Fields, Lookup, Path, Q, QFactory, SugarError, SugarResult, Value};
pub use crate::{path, q};
