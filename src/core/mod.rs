//! Conversion engines.

pub mod md2latex;
