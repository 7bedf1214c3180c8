// Cumulative interface counters via sysinfo

use crate::models::InterfaceCounters;
use sysinfo::Networks;

/// Opaque source of cumulative per-interface byte counters. Counters are
/// intended to be monotonic but are treated as unreliable; resets are
/// detected downstream, never assumed absent.
pub trait CounterSource {
    fn sample(&mut self) -> anyhow::Result<Vec<InterfaceCounters>>;
}

/// Live OS counters for every known interface.
pub struct SysinfoCounters {
    networks: Networks,
}

impl Default for SysinfoCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoCounters {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl CounterSource for SysinfoCounters {
    fn sample(&mut self) -> anyhow::Result<Vec<InterfaceCounters>> {
        self.networks.refresh(true);
        Ok(self
            .networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.clone(),
                bytes_recv: data.total_received(),
                bytes_sent: data.total_transmitted(),
            })
            .collect())
    }
}
