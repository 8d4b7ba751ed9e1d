//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Interactions are queued per `(port, method)` pair.
type QueueKey = (String, String);

/// Serves a cassette's interactions back in recorded order, independently
/// for every port/method pair.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<QueueKey, VecDeque<Interaction>>,
    consumed: HashMap<QueueKey, u64>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<QueueKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self {
            queues,
            consumed: HashMap::new(),
        }
    }

    /// Interactions still waiting for `port`/`method`.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        self.queues
            .get(&(port.to_string(), method.to_string()))
            .map_or(0, VecDeque::len)
    }

    /// Take the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair. The
    /// message names what was requested and what the cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());

        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> = self
                .queues
                .keys()
                .map(|(p, m)| format!("{p}::{m}"))
                .collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let queue = self.queues.entry(key.clone()).or_default();
        let consumed = self.consumed.entry(key).or_insert(0);
        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all {consumed} interactions for port={port:?} \
                 method={method:?} have been consumed."
            );
        };
        *consumed += 1;
        interaction
    }
}
