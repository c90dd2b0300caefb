//! Shared helpers for the rebrand pipeline.

pub mod fs;
