//! Cassette format for recording and replaying capability interactions.

pub mod config;
pub mod format;
pub mod recorded;
pub mod recorder;
pub mod replayer;
pub mod session;
