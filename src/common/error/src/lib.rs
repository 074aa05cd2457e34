//! Error types and result aliases for mohair.
//!
//! Every fallible operation in the workspace returns [`MohairResult`]. Errors
//! are fail-fast: an operation that returns an error has performed no side
//! effects on its inputs.

mod error;

pub use error::{MohairError, MohairResult};
