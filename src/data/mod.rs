//! Static lookup tables shared by the converters.

pub mod symbols;
