//! Utilities for working with the ID3v2 wire format

pub mod synchsafe;
