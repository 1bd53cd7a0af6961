//! Process-wide plumbing shared by the pegin binaries.

pub mod logging;
