//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitelink.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `build`    | `[build]`      | Page sources, includes, slugs        |
//! | `validate` | `[validate]`   | Intra-site link validation           |

pub mod build;
mod validate;

// Re-export section configs
pub use build::{BuildSectionConfig, SlugCase, SlugConfig, SlugMode};
pub use validate::{ValidateConfig, ValidateLevel};
