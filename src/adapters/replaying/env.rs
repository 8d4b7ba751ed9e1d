//! Replaying adapter for the `Environment` port.

use std::sync::Mutex;

use super::{next_output, replay_value};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::env::Environment;

/// Replays recorded environment lookups from a cassette.
pub struct ReplayingEnvironment {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingEnvironment {
    /// Creates a new replaying environment from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl Environment for ReplayingEnvironment {
    fn get(&self, _name: &str) -> Option<String> {
        replay_value(next_output(&self.replayer, "env", "get"), "env::get")
    }
}
