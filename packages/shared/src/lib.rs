//! Utilities shared by the classpoll binaries and their tests.

pub mod logger;
pub mod time;
