//! Layout cases and the fixed structural skeleton of each floor.
//!
//! A house's width picks one of three archetypes. For each floor the
//! archetype places the fixed-purpose regions (hub, hallway, stairwell)
//! and leaves the rest of the footprint as rectangular zones for the
//! partitioner.
//!
//! ```text
//!  DOUBLE_SIDED_HALL        SINGLE_SIDED_HALL        COMPACT
//!  ┌─────┬──┬─────┐         ┌──┬──────────┐          ┌────────┬───┐
//!  │ hub │st│     │         │st│          │          │  hub   │st │
//!  ├─────┤──┤zone │         ├──┤   zone   │          ├────────┴───┤
//!  │zone │H │     │         │H │          │          │    zone    │
//!  │     │  │     │         │  │          │          │            │
//!  └─────┴──┴─────┘         └──┴──────────┘          └────────────┘
//! ```
//!
//! The stairwell sits at the same coordinates on every floor that has
//! one, which is what lets the graph builder link stairs vertically.

use serde::{Deserialize, Serialize};

use crate::region::{Region, RoomType, PLAN_EXTENT};

/// Structural archetype chosen from the house width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutCase {
    /// Central full-height corridor with rooms on both sides.
    DoubleSidedHall,
    /// Corridor along one side of the house.
    SingleSidedHall,
    /// Narrow house with a single top band for hub and stairs.
    Compact,
}

impl LayoutCase {
    pub fn name(self) -> &'static str {
        match self {
            LayoutCase::DoubleSidedHall => "DOUBLE_SIDED_HALL",
            LayoutCase::SingleSidedHall => "SINGLE_SIDED_HALL",
            LayoutCase::Compact => "COMPACT",
        }
    }
}

impl std::fmt::Display for LayoutCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a footprint by its width in meters.
pub fn detect_layout_case(width_m: f32) -> LayoutCase {
    if width_m > 70.0 {
        LayoutCase::DoubleSidedHall
    } else if width_m > 50.0 {
        LayoutCase::SingleSidedHall
    } else {
        LayoutCase::Compact
    }
}

// ── Template geometry (plan units) ──────────────────────────────────────

/// Central corridor of the double-sided case: 10% of the plan, centred.
const DOUBLE_CORRIDOR_X: f32 = 45.0;
const DOUBLE_CORRIDOR_W: f32 = 10.0;
/// Ground-floor hub depth in the double-sided case.
const DOUBLE_HUB_H: f32 = 30.0;

/// Side corridor of the single-sided case: 20% of the plan.
const SINGLE_CORRIDOR_W: f32 = 20.0;
/// Ground-floor hub depth when a single-floor house keeps its corridor.
const SINGLE_HUB_H: f32 = 30.0;

/// Top band of the compact case.
const COMPACT_BAND_H: f32 = 20.0;
const COMPACT_STAIR_W: f32 = 30.0;

/// Stairwell depth for the corridor cases.
const STAIR_H: f32 = 15.0;

/// Fixed regions and leftover zones for one floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorTemplate {
    pub layout_case: LayoutCase,
    /// Pre-typed hub, hallway and stair regions.
    pub structural: Vec<Region>,
    /// Untyped rectangles left for the partitioner.
    pub zones: Vec<Region>,
}

impl FloorTemplate {
    pub fn structural_count(&self) -> usize {
        self.structural.len()
    }
}

/// Whether `floor` carries a stairwell: multi-floor houses, every floor but the top.
pub fn has_stair(total_floors: u32, floor: u32) -> bool {
    total_floors > 1 && floor + 1 < total_floors
}

/// Floors whose corridor is replaced by the hub/stair band and so carry no hallway.
pub fn hall_exempt(case: LayoutCase, total_floors: u32, floor: u32) -> bool {
    floor == 0
        && match case {
            LayoutCase::DoubleSidedHall => false,
            LayoutCase::SingleSidedHall => total_floors > 1,
            LayoutCase::Compact => true,
        }
}

/// The stairwell rectangle for a case. Identical on every floor.
pub fn stair_slot(case: LayoutCase, floor: u32) -> Region {
    match case {
        LayoutCase::DoubleSidedHall => Region::typed(
            DOUBLE_CORRIDOR_X,
            0.0,
            DOUBLE_CORRIDOR_W,
            STAIR_H,
            floor,
            RoomType::Stair,
        ),
        LayoutCase::SingleSidedHall => {
            Region::typed(0.0, 0.0, SINGLE_CORRIDOR_W, STAIR_H, floor, RoomType::Stair)
        }
        LayoutCase::Compact => Region::typed(
            PLAN_EXTENT - COMPACT_STAIR_W,
            0.0,
            COMPACT_STAIR_W,
            COMPACT_BAND_H,
            floor,
            RoomType::Stair,
        ),
    }
}

/// Build the structural template for one floor of a house `width_m` wide.
///
/// House length does not influence the template; it only enters through
/// the meter scale used by the partitioner and kitchen placement.
pub fn build_floor_template(width_m: f32, total_floors: u32, floor: u32) -> FloorTemplate {
    let case = detect_layout_case(width_m);
    build_case_template(case, total_floors, floor)
}

/// Template lookup keyed by (case, ground floor, multi-floor).
pub fn build_case_template(case: LayoutCase, total_floors: u32, floor: u32) -> FloorTemplate {
    let ground = floor == 0;
    let multi = total_floors > 1;
    let stair = has_stair(total_floors, floor);

    let mut structural = Vec::new();
    let mut zones = Vec::new();

    match case {
        LayoutCase::DoubleSidedHall => {
            let hall_y = if stair { STAIR_H } else { 0.0 };
            if stair {
                structural.push(stair_slot(case, floor));
            }
            structural.push(Region::typed(
                DOUBLE_CORRIDOR_X,
                hall_y,
                DOUBLE_CORRIDOR_W,
                PLAN_EXTENT - hall_y,
                floor,
                RoomType::Hall,
            ));

            let right_x = DOUBLE_CORRIDOR_X + DOUBLE_CORRIDOR_W;
            if ground {
                structural.push(Region::typed(
                    0.0,
                    0.0,
                    DOUBLE_CORRIDOR_X,
                    DOUBLE_HUB_H,
                    floor,
                    RoomType::KitchenLivingDiningHub,
                ));
                zones.push(Region::new(
                    0.0,
                    DOUBLE_HUB_H,
                    DOUBLE_CORRIDOR_X,
                    PLAN_EXTENT - DOUBLE_HUB_H,
                    floor,
                ));
            } else {
                zones.push(Region::new(0.0, 0.0, DOUBLE_CORRIDOR_X, PLAN_EXTENT, floor));
            }
            zones.push(Region::new(
                right_x,
                0.0,
                PLAN_EXTENT - right_x,
                PLAN_EXTENT,
                floor,
            ));
        }
        LayoutCase::SingleSidedHall => {
            let zone_w = PLAN_EXTENT - SINGLE_CORRIDOR_W;
            if ground && multi {
                // Corridor strip becomes the hub below the stairwell.
                structural.push(stair_slot(case, floor));
                structural.push(Region::typed(
                    0.0,
                    STAIR_H,
                    SINGLE_CORRIDOR_W,
                    PLAN_EXTENT - STAIR_H,
                    floor,
                    RoomType::KitchenLivingDiningHub,
                ));
                zones.push(Region::new(SINGLE_CORRIDOR_W, 0.0, zone_w, PLAN_EXTENT, floor));
            } else if ground {
                structural.push(Region::typed(
                    0.0,
                    0.0,
                    SINGLE_CORRIDOR_W,
                    PLAN_EXTENT,
                    floor,
                    RoomType::Hall,
                ));
                structural.push(Region::typed(
                    SINGLE_CORRIDOR_W,
                    0.0,
                    zone_w,
                    SINGLE_HUB_H,
                    floor,
                    RoomType::KitchenLivingDiningHub,
                ));
                zones.push(Region::new(
                    SINGLE_CORRIDOR_W,
                    SINGLE_HUB_H,
                    zone_w,
                    PLAN_EXTENT - SINGLE_HUB_H,
                    floor,
                ));
            } else {
                let hall_y = if stair { STAIR_H } else { 0.0 };
                if stair {
                    structural.push(stair_slot(case, floor));
                }
                structural.push(Region::typed(
                    0.0,
                    hall_y,
                    SINGLE_CORRIDOR_W,
                    PLAN_EXTENT - hall_y,
                    floor,
                    RoomType::Hall,
                ));
                zones.push(Region::new(SINGLE_CORRIDOR_W, 0.0, zone_w, PLAN_EXTENT, floor));
            }
        }
        LayoutCase::Compact => {
            let band_w = if stair {
                structural.push(stair_slot(case, floor));
                PLAN_EXTENT - COMPACT_STAIR_W
            } else {
                PLAN_EXTENT
            };
            let band_type = if ground {
                RoomType::KitchenLivingDiningHub
            } else {
                RoomType::Hall
            };
            structural.push(Region::typed(0.0, 0.0, band_w, COMPACT_BAND_H, floor, band_type));
            zones.push(Region::new(
                0.0,
                COMPACT_BAND_H,
                PLAN_EXTENT,
                PLAN_EXTENT - COMPACT_BAND_H,
                floor,
            ));
        }
    }

    FloorTemplate {
        layout_case: case,
        structural,
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(t: &FloorTemplate, rt: RoomType) -> usize {
        t.structural
            .iter()
            .filter(|r| r.room_type == Some(rt))
            .count()
    }

    fn total_area(t: &FloorTemplate) -> f32 {
        t.structural
            .iter()
            .chain(t.zones.iter())
            .map(Region::area)
            .sum()
    }

    const CASES: [LayoutCase; 3] = [
        LayoutCase::DoubleSidedHall,
        LayoutCase::SingleSidedHall,
        LayoutCase::Compact,
    ];

    #[test]
    fn test_detect_layout_case() {
        assert_eq!(detect_layout_case(80.0), LayoutCase::DoubleSidedHall);
        assert_eq!(detect_layout_case(60.0), LayoutCase::SingleSidedHall);
        assert_eq!(detect_layout_case(45.0), LayoutCase::Compact);
    }

    #[test]
    fn test_detect_layout_case_boundaries() {
        assert_eq!(detect_layout_case(70.0), LayoutCase::SingleSidedHall);
        assert_eq!(detect_layout_case(70.1), LayoutCase::DoubleSidedHall);
        assert_eq!(detect_layout_case(50.0), LayoutCase::Compact);
        assert_eq!(detect_layout_case(100.0), LayoutCase::DoubleSidedHall);
        assert_eq!(detect_layout_case(40.0), LayoutCase::Compact);
    }

    #[test]
    fn test_templates_tile_the_footprint() {
        for case in CASES {
            for floors in 1..=3 {
                for floor in 0..floors {
                    let t = build_case_template(case, floors, floor);
                    assert!(
                        (total_area(&t) - PLAN_EXTENT * PLAN_EXTENT).abs() < 1e-2,
                        "{case} floors={floors} floor={floor} covers {}",
                        total_area(&t)
                    );
                    let all: Vec<&Region> = t.structural.iter().chain(t.zones.iter()).collect();
                    for i in 0..all.len() {
                        assert!(all[i].within_plan(1e-3));
                        assert_eq!(all[i].floor, floor);
                        for j in (i + 1)..all.len() {
                            assert!(!all[i].overlaps(all[j], 1e-3), "{case} overlap");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_always_at_least_one_zone() {
        for case in CASES {
            for floors in 1..=3 {
                for floor in 0..floors {
                    let t = build_case_template(case, floors, floor);
                    assert!(!t.zones.is_empty());
                    assert!(t.zones.iter().all(|z| z.room_type.is_none()));
                }
            }
        }
    }

    #[test]
    fn test_hub_only_on_ground_floor() {
        for case in CASES {
            let ground = build_case_template(case, 3, 0);
            assert_eq!(count(&ground, RoomType::KitchenLivingDiningHub), 1);
            for floor in 1..3 {
                let upper = build_case_template(case, 3, floor);
                assert_eq!(count(&upper, RoomType::KitchenLivingDiningHub), 0);
            }
        }
    }

    #[test]
    fn test_stairs_on_every_floor_but_top() {
        for case in CASES {
            let single = build_case_template(case, 1, 0);
            assert_eq!(count(&single, RoomType::Stair), 0);

            for floor in 0..3 {
                let t = build_case_template(case, 3, floor);
                let expected = if floor < 2 { 1 } else { 0 };
                assert_eq!(count(&t, RoomType::Stair), expected, "{case} floor {floor}");
            }
        }
    }

    #[test]
    fn test_stair_position_is_fixed_across_floors() {
        for case in CASES {
            let positions: Vec<(f32, f32)> = (0..3)
                .flat_map(|floor| build_case_template(case, 4, floor).structural)
                .filter(|r| r.room_type == Some(RoomType::Stair))
                .map(|r| (r.x, r.y))
                .collect();
            assert_eq!(positions.len(), 3);
            assert!(positions.windows(2).all(|w| w[0] == w[1]));
        }
    }

    #[test]
    fn test_hall_exemptions_match_case() {
        // Ground floor of multi-floor single-sided and all compact ground floors lose the corridor.
        assert_eq!(count(&build_case_template(LayoutCase::SingleSidedHall, 2, 0), RoomType::Hall), 0);
        assert_eq!(count(&build_case_template(LayoutCase::SingleSidedHall, 1, 0), RoomType::Hall), 1);
        assert_eq!(count(&build_case_template(LayoutCase::Compact, 1, 0), RoomType::Hall), 0);
        assert_eq!(count(&build_case_template(LayoutCase::Compact, 2, 1), RoomType::Hall), 1);
        assert_eq!(count(&build_case_template(LayoutCase::DoubleSidedHall, 2, 0), RoomType::Hall), 1);

        for case in CASES {
            for floors in 1..=3 {
                for floor in 0..floors {
                    let halls = count(&build_case_template(case, floors, floor), RoomType::Hall);
                    assert_eq!(halls == 0, hall_exempt(case, floors, floor), "{case} {floors} {floor}");
                }
            }
        }
    }

    #[test]
    fn test_double_sided_has_two_zones() {
        let t = build_floor_template(80.0, 2, 1);
        assert_eq!(t.layout_case, LayoutCase::DoubleSidedHall);
        assert_eq!(t.zones.len(), 2);
    }
}
