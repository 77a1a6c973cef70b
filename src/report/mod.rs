//! Report renderers.
//!
//! - [`terminal`] — colored, tabular output for imports, license lookups and the
//!   alias table; respects `--quiet`.

pub mod terminal;
