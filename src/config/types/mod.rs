//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration errors and collected diagnostics |

mod error;

pub use error::{ConfigDiagnostics, ConfigError, FieldPath};
