use std::collections::HashMap;
use std::hash::Hash;

use super::{ConnectionRecord, PatcherInstanceRecord, PresetRecord, SetRecord};

/// A set together with every row that references it
///
/// Child order is whatever the store returned; nothing downstream may
/// depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAggregate {
    pub set: SetRecord,
    pub connections: Vec<ConnectionRecord>,
    pub patcher_instances: Vec<PatcherInstanceRecord>,
    pub presets: Vec<PresetRecord>,
}

impl SetAggregate {
    /// Aggregate with no children
    pub fn new(set: SetRecord) -> Self {
        Self {
            set,
            connections: Vec::new(),
            patcher_instances: Vec::new(),
            presets: Vec::new(),
        }
    }

    /// `(connections, patcher_instances, presets)`
    pub fn child_counts(&self) -> (usize, usize, usize) {
        (
            self.connections.len(),
            self.patcher_instances.len(),
            self.presets.len(),
        )
    }

    /// True when every child row points at the root's identity
    pub fn is_owned_uniformly(&self) -> bool {
        let id = self.set.id;
        self.connections.iter().all(|c| c.set_id == id)
            && self.patcher_instances.iter().all(|p| p.set_id == id)
            && self.presets.iter().all(|p| p.set_id == id)
    }

    /// Patcher references held by instances and presets, in row order
    pub fn patcher_refs(&self) -> Vec<i64> {
        self.patcher_instances
            .iter()
            .map(|p| p.patcher_id)
            .chain(self.presets.iter().map(|p| p.patcher_id))
            .collect()
    }

    /// Record-level equality ignoring child ordering
    pub fn same_records(&self, other: &SetAggregate) -> bool {
        self.set == other.set
            && multiset_eq(&self.connections, &other.connections)
            && multiset_eq(&self.patcher_instances, &other.patcher_instances)
            && multiset_eq(&self.presets, &other.presets)
    }
}

fn multiset_eq<T: Eq + Hash>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts: HashMap<&T, isize> = HashMap::new();
    for item in a {
        *counts.entry(item).or_default() += 1;
    }
    for item in b {
        *counts.entry(item).or_default() -= 1;
    }
    counts.values().all(|c| *c == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Blob;

    fn set(id: i64) -> SetRecord {
        SetRecord {
            id,
            name: "Live-1".to_string(),
            filename: "live-1.json".to_string(),
            runner_rnbo_version: "1.3.3".to_string(),
            created_at: Some("2024-06-15 12:00:00".to_string()),
            meta: Blob::new("{}"),
        }
    }

    fn connection(id: i64, set_id: i64, port: &str) -> ConnectionRecord {
        ConnectionRecord {
            id,
            set_id,
            source_name: "synth".to_string(),
            source_instance_index: 0,
            source_port_name: port.to_string(),
            sink_name: "system".to_string(),
            sink_instance_index: 0,
            sink_port_name: "in1".to_string(),
        }
    }

    #[test]
    fn test_same_records_ignores_child_order() {
        let mut a = SetAggregate::new(set(1));
        a.connections = vec![connection(1, 1, "out1"), connection(2, 1, "out2")];
        let mut b = a.clone();
        b.connections.reverse();

        assert_ne!(a, b);
        assert!(a.same_records(&b));
    }

    #[test]
    fn test_same_records_counts_duplicates() {
        let mut a = SetAggregate::new(set(1));
        a.connections = vec![connection(1, 1, "out1"), connection(1, 1, "out1")];
        let mut b = SetAggregate::new(set(1));
        b.connections = vec![connection(1, 1, "out1"), connection(2, 1, "out2")];

        assert!(!a.same_records(&b));
    }

    #[test]
    fn test_is_owned_uniformly() {
        let mut agg = SetAggregate::new(set(7));
        agg.connections = vec![connection(1, 7, "out1")];
        assert!(agg.is_owned_uniformly());

        agg.connections.push(connection(2, 8, "out2"));
        assert!(!agg.is_owned_uniformly());
    }

    #[test]
    fn test_child_counts() {
        let mut agg = SetAggregate::new(set(1));
        agg.connections = vec![connection(1, 1, "a"), connection(2, 1, "b")];
        assert_eq!(agg.child_counts(), (2, 0, 0));
    }
}
