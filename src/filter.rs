// Interface-name filtering: include list, exclude list, docker-prefix heuristic.

use std::collections::HashSet;

/// Prefixes treated as docker-managed interfaces.
pub const DOCKER_PREFIXES: [&str; 3] = ["docker", "br-", "veth"];

pub fn is_docker_like(name: &str) -> bool {
    DOCKER_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Decides once per run whether an interface participates in that run.
/// A rejected interface gets neither a delta row nor a baseline update,
/// so its baseline goes stale while filtered.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include: HashSet<String>,
    exclude: HashSet<String>,
    exclude_docker: bool,
}

impl NameFilter {
    pub fn new<I, E>(include: I, exclude: E, exclude_docker: bool) -> Self
    where
        I: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            include: include.into_iter().collect(),
            exclude: exclude.into_iter().collect(),
            exclude_docker,
        }
    }

    /// Empty include set means no include restriction. Exclude wins over
    /// include; the docker heuristic wins over both.
    pub fn accepts(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.contains(name) {
            return false;
        }
        if self.exclude.contains(name) {
            return false;
        }
        if self.exclude_docker && is_docker_like(name) {
            return false;
        }
        true
    }
}

/// Parse a comma-separated name list from the command line, skipping blanks.
pub fn parse_name_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
