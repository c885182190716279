//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `to_slash`)
//! - [`route`]: Link utilities (`is_external_link`, `split_path_fragment`, `resolve_relative`)
//! - [`slug`]: Anchor slugification (`slugify_fragment`)

pub mod fs;
pub mod route;
pub mod slug;

pub use fs::{normalize_path, to_slash};
