//! Infrastructure layer for filesystem and text-handling utilities.
//!
//! - [`paths`]: Platform directories and tilde expansion
//! - [`text`]: Turkish-aware collation, ASCII folding and truncation

pub mod paths;
pub mod text;

pub use paths::{expand_tilde, get_config_dir, get_data_dir};
pub use text::{fold_turkish, truncate_chars, turkish_cmp};
