//! Outer surfaces: scripted actions and their CSV encoding.

pub mod actions;
pub mod csv;
