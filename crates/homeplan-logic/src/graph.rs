//! Rule-based room adjacency.
//!
//! Edges come only from explicit circulation rules: the hub and hallways
//! link to the rooms they touch, and stairwells link to the stairwell on
//! the floor above or below. Two filler rooms never link directly, so a
//! bedroom that touches neither the hub nor a hallway stays isolated.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::region::{touches, Room, RoomType};

/// Undirected adjacency keyed by room id. Every room has an entry, even
/// with no neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectivityGraph {
    adj: BTreeMap<u32, BTreeSet<u32>>,
}

impl ConnectivityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, id: u32) {
        self.adj.entry(id).or_default();
    }

    /// Insert an undirected edge. Self-loops are ignored.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        self.adj.entry(a).or_default().insert(b);
        self.adj.entry(b).or_default().insert(a);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.adj.contains_key(&id)
    }

    /// Neighbours of `id` in ascending order; empty for unknown ids.
    pub fn neighbors(&self, id: u32) -> impl Iterator<Item = u32> + '_ {
        self.adj.get(&id).into_iter().flatten().copied()
    }

    pub fn room_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.adj.keys().copied()
    }

    pub fn room_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Connected components by breadth-first traversal, each sorted, in
    /// order of their smallest id.
    pub fn components(&self) -> Vec<Vec<u32>> {
        let mut visited = BTreeSet::new();
        let mut components = Vec::new();

        for &start in self.adj.keys() {
            if !visited.insert(start) {
                continue;
            }
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for next in self.neighbors(current) {
                    if visited.insert(next) {
                        component.push(next);
                        queue.push_back(next);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }
}

/// Rooms a hub or hallway opens onto.
fn opens_onto_circulation(t: RoomType) -> bool {
    matches!(
        t,
        RoomType::Stair
            | RoomType::Living
            | RoomType::AttachedBedBath
            | RoomType::Studyroom
            | RoomType::Storage
    )
}

/// Same-floor rule: hub and hallways link to each other and to the rooms
/// they open onto. Hub-hub and hall-hall pairs do not link.
fn same_floor_rule(a: RoomType, b: RoomType) -> bool {
    use RoomType::{Hall, KitchenLivingDiningHub as Hub};
    match (a, b) {
        (Hub, Hall) | (Hall, Hub) => true,
        (Hub | Hall, other) | (other, Hub | Hall) => opens_onto_circulation(other),
        _ => false,
    }
}

fn stairs_align(a: &Room, b: &Room, tolerance: f32) -> bool {
    a.room_type == RoomType::Stair
        && b.room_type == RoomType::Stair
        && a.floor.abs_diff(b.floor) == 1
        && (a.x - b.x).abs() < tolerance
        && (a.y - b.y).abs() < tolerance
}

/// Build the adjacency graph for every room of the house.
pub fn build_connectivity_graph(rooms: &[Room], config: &GeneratorConfig) -> ConnectivityGraph {
    let mut graph = ConnectivityGraph::new();
    for room in rooms {
        graph.add_room(room.id);
    }

    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            let linked = if a.floor == b.floor {
                same_floor_rule(a.room_type, b.room_type)
                    && touches(&a.region(), &b.region(), config.edge_tolerance)
            } else {
                stairs_align(a, b, config.stair_tolerance)
            };
            if linked {
                graph.add_edge(a.id, b.id);
            }
        }
    }

    log::trace!(
        "built graph: {} rooms, {} edges",
        graph.room_count(),
        graph.edge_count()
    );
    graph
}

/// Human-readable adjacency dump, one line per room in id order.
///
/// ```text
/// Room 3 (HALL F0): [STAIR(F0), LIVING(F0)]
/// ```
pub fn describe_graph(rooms: &[Room], graph: &ConnectivityGraph) -> String {
    let by_id: BTreeMap<u32, &Room> = rooms.iter().map(|r| (r.id, r)).collect();
    let mut out = String::new();

    for (id, room) in &by_id {
        let neighbours: Vec<String> = graph
            .neighbors(*id)
            .filter_map(|n| by_id.get(&n))
            .map(|n| format!("{}(F{})", n.room_type, n.floor))
            .collect();
        out.push_str(&format!(
            "Room {} ({} F{}): [{}]\n",
            id,
            room.room_type,
            room.floor,
            neighbours.join(", ")
        ));
    }
    out
}
