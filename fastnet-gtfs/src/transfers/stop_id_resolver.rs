use std::collections::HashMap;

/// capability supplied by the network's stop registry: maps a string stop
/// identifier to the dense integer id used by the routing extension.
pub trait StopIdResolver {
    /// the numeric id for a stop, or None when the registry has no entry
    fn resolve(&self, stop_id: &str) -> Option<usize>;
}

impl StopIdResolver for HashMap<String, usize> {
    fn resolve(&self, stop_id: &str) -> Option<usize> {
        self.get(stop_id).copied()
    }
}
