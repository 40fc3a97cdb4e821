pub mod config;
pub mod dates;
pub mod error;
pub mod fields;
pub mod format;
pub mod indicators;
pub mod numeric;
