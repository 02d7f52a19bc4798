//! Generation orchestrator.
//!
//! Each attempt builds a complete candidate from scratch (templates,
//! partitioning, type assignment, graph) and validates it. Attempts share
//! nothing but the random source, so a rejected candidate is simply
//! dropped and the next attempt starts clean.

use std::ops::Range;
use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assignment::{assign_zone_types, fill_unassigned, place_kitchen};
use crate::bsp::{partition_zone, PartitionParams};
use crate::config::GeneratorConfig;
use crate::distribution::{plan_floor_requirements, split_by_area, FloorRequirement};
use crate::error::GenerationError;
use crate::graph::{build_connectivity_graph, ConnectivityGraph};
use crate::region::{Region, Room, RoomType};
use crate::request::{validate_request, LayoutRequest, Scale};
use crate::template::{build_floor_template, FloorTemplate};
use crate::validation::{validate_layout, ValidationResult};

/// A committed house layout. Room geometry is in plan units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// House length in meters.
    pub length: f32,
    /// House width in meters.
    pub width: f32,
    pub floors: u32,
    pub rooms: Vec<Room>,
}

impl LayoutResult {
    pub fn scale(&self) -> Scale {
        Scale::for_house(self.length, self.width)
    }

    pub fn rooms_on_floor(&self, floor: u32) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(move |r| r.floor == floor)
    }

    pub fn count(&self, room_type: RoomType) -> usize {
        self.rooms.iter().filter(|r| r.room_type == room_type).count()
    }
}

/// A layout that passed validation, with the graph it was judged on.
#[derive(Debug, Clone)]
pub struct GeneratedLayout {
    pub layout: LayoutResult,
    pub graph: ConnectivityGraph,
    pub validation: ValidationResult,
    /// 1-based attempt that produced the layout.
    pub attempts: u32,
}

impl GeneratedLayout {
    pub fn response(&self) -> LayoutResponse {
        LayoutResponse::new(&self.layout, &self.graph)
    }
}

/// Outbound payload: every room annotated with its adjacency list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub length: f32,
    pub width: f32,
    pub floors: u32,
    pub rooms: Vec<RoomView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomView {
    #[serde(flatten)]
    pub room: Room,
    pub adj: Vec<u32>,
}

impl LayoutResponse {
    pub fn new(layout: &LayoutResult, graph: &ConnectivityGraph) -> Self {
        let rooms = layout
            .rooms
            .iter()
            .map(|room| RoomView {
                room: room.clone(),
                adj: graph.neighbors(room.id).collect(),
            })
            .collect();
        Self {
            length: layout.length,
            width: layout.width,
            floors: layout.floors,
            rooms,
        }
    }
}

// ── Candidate construction ──────────────────────────────────────────────

/// Leaves of one floor with the index range each zone occupies.
struct FloorLeaves {
    leaves: Vec<Region>,
    zones: Vec<Range<usize>>,
}

fn partition_floor<R: Rng + ?Sized>(
    template: &FloorTemplate,
    requirement: &FloorRequirement,
    params: &PartitionParams,
    rng: &mut R,
) -> FloorLeaves {
    let areas: Vec<f32> = template.zones.iter().map(Region::area).collect();
    let targets = split_by_area(&areas, requirement.leaf_budget);

    let mut leaves = Vec::new();
    let mut zones = Vec::with_capacity(template.zones.len());
    for (zone, target) in template.zones.iter().zip(targets) {
        let start = leaves.len();
        leaves.extend(partition_zone(zone, target, params, rng));
        zones.push(start..leaves.len());
    }
    FloorLeaves { leaves, zones }
}

/// Build one unvalidated candidate layout and its graph.
///
/// Room ids start at 1 and increase across floors in the order rooms are
/// emitted: each floor's structural rooms, then its leaves.
pub fn generate_candidate<R: Rng + ?Sized>(
    request: &LayoutRequest,
    config: &GeneratorConfig,
    rng: &mut R,
) -> (LayoutResult, ConnectivityGraph) {
    let scale = request.scale();
    let params = PartitionParams::for_request(request, config);

    let templates: Vec<FloorTemplate> = (0..request.floors)
        .map(|f| build_floor_template(request.width, request.floors, f))
        .collect();
    let counts: Vec<usize> = templates.iter().map(FloorTemplate::structural_count).collect();
    let requirements = plan_floor_requirements(request.rooms, request.total_bedrooms, &counts);

    let mut rooms = Vec::new();
    let mut next_id = 1;

    for (template, mut requirement) in templates.iter().zip(requirements) {
        let FloorLeaves { mut leaves, zones } = partition_floor(template, &requirement, &params, rng);

        if requirement.floor == 0
            && requirement.kitchen
            && leaves.len() > requirement.bedrooms as usize
        {
            place_kitchen(
                &mut leaves,
                request.kitchen_size,
                scale,
                config.kitchen_min_fraction,
            );
        }

        for zone in zones {
            assign_zone_types(&mut leaves[zone], &mut requirement, rng);
        }
        fill_unassigned(&mut leaves);

        log::trace!(
            "floor {} ({}): {} structural, {} leaves, {} bedrooms unplaced",
            requirement.floor,
            template.layout_case,
            template.structural_count(),
            leaves.len(),
            requirement.bedrooms
        );

        for region in template.structural.iter().chain(leaves.iter()) {
            if let Some(room) = Room::from_region(next_id, region) {
                rooms.push(room);
                next_id += 1;
            }
        }
    }

    let graph = build_connectivity_graph(&rooms, config);
    let layout = LayoutResult {
        length: request.length,
        width: request.width,
        floors: request.floors,
        rooms,
    };
    (layout, graph)
}

// ── Retry loop ──────────────────────────────────────────────────────────

/// Generate a layout that passes validation, retrying up to
/// `config.max_attempts` times.
///
/// Invalid requests are refused before any attempt is spent. A failed run
/// never yields a layout.
pub fn generate_layout<R: Rng + ?Sized>(
    request: &LayoutRequest,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GeneratedLayout, GenerationError> {
    let problems = validate_request(request);
    if !problems.is_empty() {
        return Err(GenerationError::InvalidRequest(problems));
    }

    let started = Instant::now();
    let mut last_errors = Vec::new();

    for attempt in 1..=config.max_attempts {
        if let Some(budget) = config.time_budget {
            if started.elapsed() >= budget {
                log::error!(
                    "Layout generation ran out of time after {} attempts",
                    attempt - 1
                );
                return Err(GenerationError::DeadlineExceeded {
                    attempts: attempt - 1,
                    budget,
                });
            }
        }

        log::debug!("Layout attempt {}/{}", attempt, config.max_attempts);
        let (layout, graph) = generate_candidate(request, config, rng);
        let validation = validate_layout(
            &graph,
            &layout.rooms,
            request.floors,
            request.width,
            Some(request.total_bedrooms),
            config,
        );

        if validation.is_valid {
            log::info!(
                "Generated layout: {} rooms on {} floors, {} components (attempt {})",
                layout.rooms.len(),
                layout.floors,
                validation.components,
                attempt
            );
            return Ok(GeneratedLayout {
                layout,
                graph,
                validation,
                attempts: attempt,
            });
        }

        last_errors = validation.messages();
        log::warn!("Attempt {} rejected: {}", attempt, last_errors.join("; "));
    }

    log::error!(
        "Could not generate a valid layout after {} attempts",
        config.max_attempts
    );
    Err(GenerationError::Exhausted {
        attempts: config.max_attempts,
        last_errors,
    })
}

/// Rebuild the graph of a stored layout and validate it.
///
/// No bedroom quota is known for a stored layout, so that check is skipped.
pub fn validate_existing_layout(
    layout: &LayoutResult,
    config: &GeneratorConfig,
) -> (ConnectivityGraph, ValidationResult) {
    let graph = build_connectivity_graph(&layout.rooms, config);
    let validation = validate_layout(
        &graph,
        &layout.rooms,
        layout.floors,
        layout.width,
        None,
        config,
    );
    (graph, validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;
    use std::time::Duration;

    #[test]
    fn test_candidate_ids_unique_and_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (layout, graph) =
            generate_candidate(&LayoutRequest::default(), &GeneratorConfig::default(), &mut rng);
        let ids: Vec<u32> = layout.rooms.iter().map(|r| r.id).collect();
        let expected: Vec<u32> = (1..=ids.len() as u32).collect();
        assert_eq!(ids, expected);
        assert_eq!(graph.room_count(), ids.len());
    }

    #[test]
    fn test_candidate_rooms_are_typed_and_in_bounds() {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (layout, _) =
                generate_candidate(&LayoutRequest::default(), &GeneratorConfig::default(), &mut rng);
            for r in &layout.rooms {
                assert!(r.region().within_plan(1e-3), "seed {seed}: {r:?}");
                assert!(r.floor < layout.floors);
            }
            assert_eq!(layout.count(RoomType::KitchenLivingDiningHub), 1);
        }
    }

    #[test]
    fn test_default_request_places_kitchen_and_bedrooms() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (layout, _) =
            generate_candidate(&LayoutRequest::default(), &GeneratorConfig::default(), &mut rng);
        assert_eq!(layout.count(RoomType::Kitchen), 1);
        assert_eq!(layout.count(RoomType::AttachedBedBath), 4);
        let kitchen = layout
            .rooms
            .iter()
            .find(|r| r.room_type == RoomType::Kitchen)
            .unwrap();
        assert_eq!(kitchen.floor, 0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let request = LayoutRequest::default();
        let config = GeneratorConfig::default();
        let a = generate_layout(&request, &config, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = generate_layout(&request, &config, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.graph, b.graph);
        assert_eq!(a.attempts, b.attempts);
    }

    #[test]
    fn test_invalid_request_is_refused_up_front() {
        let request = LayoutRequest {
            width: 120.0,
            ..LayoutRequest::default()
        };
        let err = generate_layout(&request, &GeneratorConfig::default(), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(ref v) if !v.is_empty()));
    }

    #[test]
    fn test_zero_time_budget_stops_before_first_attempt() {
        let config = GeneratorConfig::default().with_time_budget(Duration::ZERO);
        let err = generate_layout(&LayoutRequest::default(), &config, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, GenerationError::DeadlineExceeded { attempts: 0, .. }));
    }

    #[test]
    fn test_attempt_cap_is_configurable() {
        let request = LayoutRequest {
            floors: 1,
            rooms: 2,
            total_bedrooms: 10,
            ..LayoutRequest::default()
        };
        let config = GeneratorConfig::default().with_max_attempts(3);
        match generate_layout(&request, &config, &mut ChaCha8Rng::seed_from_u64(0)) {
            Err(GenerationError::Exhausted { attempts, last_errors }) => {
                assert_eq!(attempts, 3);
                assert!(last_errors.iter().any(|e| e.contains("requested")));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_response_annotates_adjacency() {
        let generated = generate_layout(
            &LayoutRequest::default(),
            &GeneratorConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();
        let response = generated.response();
        assert_eq!(response.rooms.len(), generated.layout.rooms.len());
        for view in &response.rooms {
            let expected: Vec<u32> = generated.graph.neighbors(view.room.id).collect();
            assert_eq!(view.adj, expected);
        }
        let json = serde_json::to_value(&response).unwrap();
        let first = &json["rooms"][0];
        assert!(first["type"].is_string());
        assert!(first["adj"].is_array());
        assert!(first["id"].is_u64());
    }

    #[test]
    fn test_existing_layout_revalidates() {
        let generated = generate_layout(
            &LayoutRequest::default(),
            &GeneratorConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(9),
        )
        .unwrap();
        let (graph, validation) =
            validate_existing_layout(&generated.layout, &GeneratorConfig::default());
        assert_eq!(graph, generated.graph);
        assert!(validation.is_valid);

        let mut broken = generated.layout.clone();
        broken.rooms.retain(|r| r.room_type != RoomType::Stair);
        let (_, validation) = validate_existing_layout(&broken, &GeneratorConfig::default());
        assert!(!validation.distribution_valid);
    }

    #[test]
    fn test_rooms_on_floor_partitions_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (layout, _) =
            generate_candidate(&LayoutRequest::default(), &GeneratorConfig::default(), &mut rng);
        let floors: BTreeSet<u32> = layout.rooms.iter().map(|r| r.floor).collect();
        assert_eq!(floors, BTreeSet::from([0, 1]));
        let total: usize = (0..layout.floors).map(|f| layout.rooms_on_floor(f).count()).sum();
        assert_eq!(total, layout.rooms.len());
    }
}
