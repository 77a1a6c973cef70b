//! License string standardization.
//!
//! - [`aliases`] — canonical labels, their known spellings and the flattened
//!   lookup table.
//! - [`standardizer`] — maps a raw license string to its canonical label.

pub mod aliases;
pub mod standardizer;
