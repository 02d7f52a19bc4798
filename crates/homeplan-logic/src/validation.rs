//! Layout validation.
//!
//! Pure checks over a room list and its connectivity graph. Each check
//! returns the errors it found; [`validate_layout`] runs them all and
//! folds the result. Nothing here mutates its inputs, so validating the
//! same layout twice yields identical results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::graph::ConnectivityGraph;
use crate::region::{Room, RoomType};
use crate::template::{detect_layout_case, hall_exempt, has_stair};

/// A failed layout rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// `"connectivity"` or `"distribution"`.
    pub category: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Outcome of validating one candidate layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub connectivity_valid: bool,
    pub distribution_valid: bool,
    /// Connected components found in the graph.
    pub components: usize,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

fn count_per_floor(rooms: &[Room], room_type: RoomType) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for r in rooms.iter().filter(|r| r.room_type == room_type) {
        *counts.entry(r.floor).or_insert(0) += 1;
    }
    counts
}

fn distribution(message: String) -> ValidationError {
    ValidationError {
        category: "distribution",
        message,
    }
}

// ── Connectivity ────────────────────────────────────────────────────────

/// Fail when there are more than `max_components` connected components.
pub fn check_connectivity(components: &[Vec<u32>], max_components: usize) -> Vec<ValidationError> {
    if components.len() <= max_components {
        return Vec::new();
    }
    vec![ValidationError {
        category: "connectivity",
        message: format!(
            "{} connected components exceed the limit of {} (e.g. isolated group starting at room #{})",
            components.len(),
            max_components,
            components.last().and_then(|c| c.first()).copied().unwrap_or(0)
        ),
    }]
}

// ── Distribution ────────────────────────────────────────────────────────

/// A layout with no floors or no rooms has nothing to validate.
pub fn check_not_empty(rooms: &[Room], floors: u32) -> Vec<ValidationError> {
    if rooms.is_empty() || floors == 0 {
        vec![distribution("No rooms or floors provided".into())]
    } else {
        Vec::new()
    }
}

/// Every floor needs at least one bedroom suite.
pub fn check_bedrooms_per_floor(rooms: &[Room], floors: u32) -> Vec<ValidationError> {
    let counts = count_per_floor(rooms, RoomType::AttachedBedBath);
    (0..floors)
        .filter(|f| !counts.contains_key(f))
        .map(|f| distribution(format!("Floor {f} has no ATTACHED_BED_BATH")))
        .collect()
}

/// Every floor needs a hallway unless its case replaces the corridor.
pub fn check_halls_per_floor(rooms: &[Room], floors: u32, width_m: f32) -> Vec<ValidationError> {
    let case = detect_layout_case(width_m);
    let counts = count_per_floor(rooms, RoomType::Hall);
    (0..floors)
        .filter(|&f| !hall_exempt(case, floors, f) && !counts.contains_key(&f))
        .map(|f| distribution(format!("Floor {f} has no HALL ({case})")))
        .collect()
}

/// At most one hub in the whole house.
pub fn check_single_hub(rooms: &[Room]) -> Vec<ValidationError> {
    let hubs = rooms
        .iter()
        .filter(|r| r.room_type == RoomType::KitchenLivingDiningHub)
        .count();
    if hubs > 1 {
        vec![distribution(format!(
            "{hubs} KITCHEN_LIVING_DINING_HUB rooms, at most one allowed"
        ))]
    } else {
        Vec::new()
    }
}

/// Multi-floor houses need a stairwell on every floor but the top.
pub fn check_stairs(rooms: &[Room], floors: u32) -> Vec<ValidationError> {
    let counts = count_per_floor(rooms, RoomType::Stair);
    (0..floors)
        .filter(|&f| has_stair(floors, f) && !counts.contains_key(&f))
        .map(|f| distribution(format!("Floor {f} has no STAIR")))
        .collect()
}

/// The house must hold exactly the requested number of bedroom suites.
pub fn check_bedroom_quota(rooms: &[Room], expected: u32) -> Vec<ValidationError> {
    let placed = rooms
        .iter()
        .filter(|r| r.room_type == RoomType::AttachedBedBath)
        .count();
    if placed == expected as usize {
        Vec::new()
    } else {
        vec![distribution(format!(
            "{placed} ATTACHED_BED_BATH placed, {expected} requested"
        ))]
    }
}

// ── Master validation ───────────────────────────────────────────────────

/// Run every check against a candidate layout.
///
/// `expected_bedrooms` enables the bedroom quota check; pass `None` to
/// validate a layout without a known request.
pub fn validate_layout(
    graph: &ConnectivityGraph,
    rooms: &[Room],
    floors: u32,
    width_m: f32,
    expected_bedrooms: Option<u32>,
    config: &GeneratorConfig,
) -> ValidationResult {
    let components = graph.components();
    let connectivity = check_connectivity(&components, config.max_components);

    let mut dist = check_not_empty(rooms, floors);
    dist.extend(check_bedrooms_per_floor(rooms, floors));
    dist.extend(check_halls_per_floor(rooms, floors, width_m));
    dist.extend(check_single_hub(rooms));
    dist.extend(check_stairs(rooms, floors));
    if let Some(expected) = expected_bedrooms {
        dist.extend(check_bedroom_quota(rooms, expected));
    }

    let connectivity_valid = connectivity.is_empty();
    let distribution_valid = dist.is_empty();
    let mut errors = connectivity;
    errors.extend(dist);

    ValidationResult {
        is_valid: connectivity_valid && distribution_valid,
        connectivity_valid,
        distribution_valid,
        components: components.len(),
        errors,
    }
}
