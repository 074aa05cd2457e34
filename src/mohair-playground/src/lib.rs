//! Mohair Playground - sample data and plan writing
//!
//! Loads delimited sample data into a partition and writes the compiled
//! Substrait plan to a file.
//!
//! # Available Binaries
//!
//! - **`write-plan`**: load `resources/sample-data.tsv`, compile, write the plan
//!
//! # Usage
//!
//! ```bash
//! cargo run --package mohair-playground --bin write-plan -- --help
//! ```

pub mod data;
pub mod loader;

pub use data::{sample_metadata, sample_schema, set_partition_data, write_plan};
pub use loader::{read_delimited, read_delimited_file};
