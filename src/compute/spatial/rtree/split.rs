//! Linear split of an overflowing node.

use super::RTree;
use super::node::{Entry, Node, NodeId};
use geosearch_types::Mbr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn low(self, mbr: &Mbr) -> f64 {
        match self {
            Axis::Latitude => mbr.min_lat(),
            Axis::Longitude => mbr.min_lon(),
        }
    }

    fn high(self, mbr: &Mbr) -> f64 {
        match self {
            Axis::Latitude => mbr.max_lat(),
            Axis::Longitude => mbr.max_lon(),
        }
    }
}

/// Pick the two seed entries for a linear split.
///
/// Per axis, the separation is `(highest low - lowest high) / width`. The
/// axis with the strictly greatest separation wins (latitude is tried
/// first). Axes with zero width are skipped; when both are, entries 0 and 1
/// are the seeds.
fn pick_seeds(mbrs: &[Mbr]) -> (usize, usize) {
    let mut best_separation = f64::NEG_INFINITY;
    let mut seeds = (0, usize::from(mbrs.len() > 1));

    for axis in [Axis::Latitude, Axis::Longitude] {
        let lowest_low = mbrs.iter().map(|m| axis.low(m)).fold(f64::INFINITY, f64::min);
        let highest_low = mbrs.iter().map(|m| axis.low(m)).fold(f64::NEG_INFINITY, f64::max);
        let lowest_high = mbrs.iter().map(|m| axis.high(m)).fold(f64::INFINITY, f64::min);
        let highest_high = mbrs.iter().map(|m| axis.high(m)).fold(f64::NEG_INFINITY, f64::max);

        let width = highest_high - lowest_low;
        if width <= 0.0 {
            continue;
        }

        let separation = (highest_low - lowest_high) / width;
        if separation > best_separation {
            best_separation = separation;
            for (i, mbr) in mbrs.iter().enumerate() {
                if axis.low(mbr) == highest_low {
                    seeds.0 = i;
                }
                if axis.high(mbr) == lowest_high {
                    seeds.1 = i;
                }
            }
        }
    }

    if seeds.0 == seeds.1 && mbrs.len() > 1 {
        seeds.1 = (seeds.0 + 1) % mbrs.len();
    }
    seeds
}

/// One half of a split under construction.
struct Group<T> {
    entries: Vec<Entry<T>>,
    mbr: Mbr,
}

impl<T> Group<T> {
    fn seeded(entry: Entry<T>) -> Self {
        Self {
            mbr: entry.mbr,
            entries: vec![entry],
        }
    }

    fn push(&mut self, entry: Entry<T>) {
        self.mbr = self.mbr.union(&entry.mbr);
        self.entries.push(entry);
    }
}

/// True when the next entry belongs in the first group: smaller enlargement,
/// then smaller area, then fewer entries (first group on a full tie).
fn prefers_first<T>(first: &Group<T>, second: &Group<T>, mbr: &Mbr) -> bool {
    let enlargement_first = first.mbr.enlargement(mbr);
    let enlargement_second = second.mbr.enlargement(mbr);
    if enlargement_first != enlargement_second {
        return enlargement_first < enlargement_second;
    }

    let area_first = first.mbr.area();
    let area_second = second.mbr.area();
    if area_first != area_second {
        return area_first < area_second;
    }

    first.entries.len() <= second.entries.len()
}

fn distribute<T>(entries: Vec<Entry<T>>) -> (Group<T>, Group<T>) {
    let mbrs: Vec<Mbr> = entries.iter().map(|e| e.mbr).collect();
    let (seed_a, seed_b) = pick_seeds(&mbrs);

    let mut slots: Vec<Option<Entry<T>>> = entries.into_iter().map(Some).collect();
    let (Some(a), Some(b)) = (slots[seed_a].take(), slots[seed_b].take()) else {
        unreachable!("linear split needs two distinct seeds");
    };
    let mut first = Group::seeded(a);
    let mut second = Group::seeded(b);

    for entry in slots.into_iter().flatten() {
        if prefers_first(&first, &second, &entry.mbr) {
            first.push(entry);
        } else {
            second.push(entry);
        }
    }
    (first, second)
}

impl<T> RTree<T> {
    /// Split a node in two. The first half keeps the node's arena slot, the
    /// second is freshly allocated; both keep the original parent handle.
    pub(super) fn split_node(&mut self, id: NodeId) -> (NodeId, NodeId) {
        let node = self.node_mut(id);
        let kind = node.kind;
        let parent = node.parent;
        let entries = std::mem::take(&mut node.entries);
        let total = entries.len();

        let (first, second) = distribute(entries);
        log::trace!(
            "split {:?} node of {} entries into {} + {}",
            kind,
            total,
            first.entries.len(),
            second.entries.len()
        );

        *self.node_mut(id) = Node::with_entries(kind, parent, first.entries);
        let second_id = self.alloc(Node::with_entries(kind, parent, second.entries));

        for half in [id, second_id] {
            let children: Vec<NodeId> = self
                .node(half)
                .entries
                .iter()
                .filter_map(|e| e.child_id())
                .collect();
            for child in children {
                self.node_mut(child).parent = Some(half);
            }
        }

        (id, second_id)
    }
}
