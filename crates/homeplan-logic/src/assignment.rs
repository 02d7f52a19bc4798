//! Room type assignment for partitioned regions.
//!
//! Structural regions arrive already typed; this module fills in the
//! partitioner's leaves. The kitchen is placed first by a dedicated area
//! match on the ground floor, then each zone is filled in floor-role
//! priority order, and a last pass turns anything still untyped into a
//! living room.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distribution::FloorRequirement;
use crate::region::{Region, RoomType};
use crate::request::Scale;

/// Pick the ground-floor region whose real area best matches `kitchen_size_m2`.
///
/// Only untyped regions of at least `min_fraction × kitchen_size_m2` qualify.
/// Closest area wins; ties go to the larger region. Returns the index of
/// the region that became the kitchen.
pub fn place_kitchen(
    regions: &mut [Region],
    kitchen_size_m2: f32,
    scale: Scale,
    min_fraction: f32,
) -> Option<usize> {
    let floor_area = kitchen_size_m2 * min_fraction;

    let best = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.floor == 0 && r.room_type.is_none())
        .map(|(i, r)| (i, r.real_area(scale.x, scale.y), r.area()))
        .filter(|&(_, real, _)| real >= floor_area)
        .min_by(|a, b| {
            let da = (a.1 - kitchen_size_m2).abs();
            let db = (b.1 - kitchen_size_m2).abs();
            da.total_cmp(&db).then(b.2.total_cmp(&a.2))
        })
        .map(|(i, _, _)| i)?;

    regions[best].room_type = Some(RoomType::Kitchen);
    Some(best)
}

/// Type the untyped regions of one zone against the floor's requirement.
///
/// Ground floor: study, storage, then bedroom suites up to quota (the study
/// and storage room only take regions beyond the bedroom quota); whatever
/// is left waits for [`fill_unassigned`]. Upper floors: bedroom suites
/// first, then study, storage, and every remaining region becomes a living
/// room. Bedrooms take the largest regions, study and storage the
/// smallest. Equal areas are ordered randomly.
///
/// Decrements the requirement as rooms are placed and returns the number
/// of bedroom suites placed in this zone.
pub fn assign_zone_types<R: Rng + ?Sized>(
    regions: &mut [Region],
    requirement: &mut FloorRequirement,
    rng: &mut R,
) -> u32 {
    let mut pending: Vec<usize> = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.room_type.is_none())
        .map(|(i, _)| i)
        .collect();
    pending.shuffle(rng);
    // Stable sort keeps the shuffled order among equal areas.
    pending.sort_by(|&a, &b| regions[b].area().total_cmp(&regions[a].area()));

    if requirement.floor == 0 {
        assign_extras(regions, &mut pending, requirement);
        return assign_bedrooms(regions, &mut pending, requirement);
    }

    let placed = assign_bedrooms(regions, &mut pending, requirement);
    assign_extras(regions, &mut pending, requirement);
    for i in pending.drain(..) {
        regions[i].room_type = Some(RoomType::Living);
    }
    placed
}

/// Largest-first bedroom suites up to the remaining quota.
fn assign_bedrooms(regions: &mut [Region], pending: &mut Vec<usize>, req: &mut FloorRequirement) -> u32 {
    let count = (req.bedrooms as usize).min(pending.len());
    for i in pending.drain(..count) {
        regions[i].room_type = Some(RoomType::AttachedBedBath);
    }
    req.bedrooms -= count as u32;
    count as u32
}

/// Study then storage, each from the smallest remaining region. Neither
/// takes a region the floor's outstanding bedroom quota still needs.
fn assign_extras(regions: &mut [Region], pending: &mut Vec<usize>, req: &mut FloorRequirement) {
    if req.study > 0 && pending.len() > req.bedrooms as usize {
        if let Some(i) = pending.pop() {
            regions[i].room_type = Some(RoomType::Studyroom);
            req.study -= 1;
        }
    }
    if req.storage > 0 && pending.len() > req.bedrooms as usize {
        if let Some(i) = pending.pop() {
            regions[i].room_type = Some(RoomType::Storage);
            req.storage -= 1;
        }
    }
}

/// Turn every still-untyped region into a living room. Returns how many changed.
pub fn fill_unassigned(regions: &mut [Region]) -> usize {
    let mut filled = 0;
    for r in regions.iter_mut().filter(|r| r.room_type.is_none()) {
        r.room_type = Some(RoomType::Living);
        filled += 1;
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn req(floor: u32, bedrooms: u32, study: u32, storage: u32) -> FloorRequirement {
        FloorRequirement {
            floor,
            bedrooms,
            study,
            storage,
            living: 0,
            kitchen: floor == 0,
            leaf_budget: 0,
        }
    }

    fn types(regions: &[Region]) -> Vec<Option<RoomType>> {
        regions.iter().map(|r| r.room_type).collect()
    }

    #[test]
    fn test_kitchen_picks_closest_qualifying_area() {
        // scale 1 m/unit: areas 400, 300, 200 m²; ask for 280, min 224
        let mut regions = vec![
            Region::new(0.0, 0.0, 20.0, 20.0, 0),
            Region::new(20.0, 0.0, 15.0, 20.0, 0),
            Region::new(35.0, 0.0, 10.0, 20.0, 0),
        ];
        let picked = place_kitchen(&mut regions, 280.0, Scale { x: 1.0, y: 1.0 }, 0.8);
        assert_eq!(picked, Some(1));
        assert_eq!(regions[1].room_type, Some(RoomType::Kitchen));
        assert!(regions[0].room_type.is_none());
    }

    #[test]
    fn test_kitchen_rejects_undersized_regions() {
        // 200 m² is closest to 280 but below 80%
        let mut regions = vec![
            Region::new(0.0, 0.0, 10.0, 20.0, 0),
            Region::new(10.0, 0.0, 30.0, 30.0, 0),
        ];
        let picked = place_kitchen(&mut regions, 280.0, Scale { x: 1.0, y: 1.0 }, 0.8);
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn test_kitchen_tie_prefers_larger_raw_area() {
        // Real areas 200 and 400 m² are both 100 m² from 300.
        let mut regions = vec![
            Region::new(0.0, 0.0, 5.0, 20.0, 0),
            Region::new(10.0, 0.0, 10.0, 20.0, 0),
        ];
        let picked = place_kitchen(&mut regions, 300.0, Scale { x: 2.0, y: 1.0 }, 0.5);
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn test_no_kitchen_when_nothing_fits() {
        let mut regions = vec![Region::new(0.0, 0.0, 5.0, 5.0, 0)];
        assert_eq!(
            place_kitchen(&mut regions, 280.0, Scale { x: 1.0, y: 1.0 }, 0.8),
            None
        );
        assert!(regions[0].room_type.is_none());
    }

    #[test]
    fn test_kitchen_ignores_upper_floors_and_typed_regions() {
        let mut regions = vec![
            Region::new(0.0, 0.0, 17.0, 17.0, 1),
            Region::typed(0.0, 0.0, 17.0, 17.0, 0, RoomType::Hall),
        ];
        assert_eq!(
            place_kitchen(&mut regions, 280.0, Scale { x: 1.0, y: 1.0 }, 0.8),
            None
        );
    }

    #[test]
    fn test_ground_floor_priority() {
        let mut regions = vec![
            Region::new(0.0, 0.0, 10.0, 10.0, 0), // 100
            Region::new(0.0, 0.0, 30.0, 10.0, 0), // 300
            Region::new(0.0, 0.0, 20.0, 10.0, 0), // 200
            Region::new(0.0, 0.0, 40.0, 10.0, 0), // 400
        ];
        let mut r = req(0, 1, 1, 1);
        let placed = assign_zone_types(&mut regions, &mut r, &mut StepRng::new(0, 0));
        assert_eq!(placed, 1);
        assert_eq!(
            types(&regions),
            vec![
                Some(RoomType::Studyroom),
                None,
                Some(RoomType::Storage),
                Some(RoomType::AttachedBedBath),
            ]
        );
        assert_eq!((r.bedrooms, r.study, r.storage), (0, 0, 0));
    }

    #[test]
    fn test_ground_extras_do_not_starve_bedrooms() {
        let mut regions = vec![
            Region::new(0.0, 0.0, 10.0, 10.0, 0),
            Region::new(0.0, 0.0, 30.0, 10.0, 0),
        ];
        let mut r = req(0, 1, 1, 1);
        let placed = assign_zone_types(&mut regions, &mut r, &mut StepRng::new(0, 0));
        assert_eq!(placed, 1);
        assert_eq!(
            types(&regions),
            vec![Some(RoomType::Studyroom), Some(RoomType::AttachedBedBath)]
        );
        assert_eq!(r.storage, 1);

        let mut single = vec![Region::new(0.0, 0.0, 10.0, 10.0, 0)];
        let mut r = req(0, 1, 1, 0);
        assign_zone_types(&mut single, &mut r, &mut StepRng::new(0, 0));
        assert_eq!(single[0].room_type, Some(RoomType::AttachedBedBath));
        assert_eq!(r.study, 1);
    }

    #[test]
    fn test_upper_floor_priority() {
        let mut regions = vec![
            Region::new(0.0, 0.0, 10.0, 10.0, 1),
            Region::new(0.0, 0.0, 30.0, 10.0, 1),
            Region::new(0.0, 0.0, 20.0, 10.0, 1),
            Region::new(0.0, 0.0, 40.0, 10.0, 1),
        ];
        let mut r = req(1, 2, 1, 0);
        let placed = assign_zone_types(&mut regions, &mut r, &mut StepRng::new(0, 0));
        assert_eq!(placed, 2);
        assert_eq!(
            types(&regions),
            vec![
                Some(RoomType::Studyroom),
                Some(RoomType::AttachedBedBath),
                Some(RoomType::Living),
                Some(RoomType::AttachedBedBath),
            ]
        );
    }

    #[test]
    fn test_quota_carries_across_zones() {
        let mut r = req(1, 3, 0, 0);
        let mut zone_a = vec![
            Region::new(0.0, 0.0, 20.0, 20.0, 1),
            Region::new(20.0, 0.0, 20.0, 20.0, 1),
        ];
        let mut zone_b = vec![
            Region::new(60.0, 0.0, 20.0, 20.0, 1),
            Region::new(80.0, 0.0, 20.0, 20.0, 1),
        ];
        let mut rng = StepRng::new(0, 0);
        assert_eq!(assign_zone_types(&mut zone_a, &mut r, &mut rng), 2);
        assert_eq!(assign_zone_types(&mut zone_b, &mut r, &mut rng), 1);
        assert_eq!(r.bedrooms, 0);
        let living = zone_b
            .iter()
            .filter(|x| x.room_type == Some(RoomType::Living))
            .count();
        assert_eq!(living, 1);
    }

    #[test]
    fn test_preassigned_regions_untouched() {
        let mut regions = vec![
            Region::typed(0.0, 0.0, 50.0, 50.0, 1, RoomType::Hall),
            Region::new(50.0, 0.0, 10.0, 10.0, 1),
        ];
        let mut r = req(1, 5, 0, 0);
        assert_eq!(assign_zone_types(&mut regions, &mut r, &mut StepRng::new(0, 0)), 1);
        assert_eq!(regions[0].room_type, Some(RoomType::Hall));
        assert_eq!(r.bedrooms, 4);
    }

    #[test]
    fn test_fill_unassigned_makes_living_rooms() {
        let mut regions = vec![
            Region::new(0.0, 0.0, 10.0, 10.0, 0),
            Region::typed(10.0, 0.0, 10.0, 10.0, 0, RoomType::Kitchen),
            Region::new(20.0, 0.0, 10.0, 10.0, 0),
        ];
        assert_eq!(fill_unassigned(&mut regions), 2);
        assert_eq!(regions[0].room_type, Some(RoomType::Living));
        assert_eq!(regions[1].room_type, Some(RoomType::Kitchen));
        assert_eq!(fill_unassigned(&mut regions), 0);
    }
}
