// Library crate root.
//
// This crate is used both as a binary (src/main.rs) and as a library.
// Keeping modules here prevents "dead_code" warnings for public APIs that are
// intentionally exported for downstream crates.

pub mod im;
pub mod desc;
pub mod field;
pub mod march;
pub mod stitch;
pub mod mpoly;
pub mod pipeline;
pub mod debug_ui;

#[cfg(test)]
pub mod test_helpers;
