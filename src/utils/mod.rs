//! Shared helpers

pub mod encoding;
pub mod hashing;
pub mod text;
pub mod tokens;

pub use encoding::read_file_safe;
pub use hashing::stable_hash;
pub use text::{format_with_commas, max_width, pad_to_width};
pub use tokens::estimate_tokens;
