//! Per-floor room quotas.
//!
//! Splits the house-wide bedroom and room budgets across floors and turns
//! them into a [`FloorRequirement`] per floor that the type assigner
//! consumes as it fills regions.

use serde::{Deserialize, Serialize};

/// What one floor still needs from its partitioned regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRequirement {
    pub floor: u32,
    /// Bedroom suites still to place.
    pub bedrooms: u32,
    /// 0 or 1.
    pub study: u32,
    /// 0 or 1.
    pub storage: u32,
    /// Leftover budget that ends up as living rooms.
    pub living: u32,
    /// Whether the floor's budget reserves a region for the kitchen.
    pub kitchen: bool,
    /// Leaf count the partitioner is asked for across the floor's zones.
    pub leaf_budget: u32,
}

/// Allocate `total` bedroom suites across `floors`.
///
/// The ground floor gets `max(1, total / (floors + 1))`, deliberately less
/// than the upper floors, which share the rest with earlier floors taking
/// the remainder. If the ground floor still ends up above the busiest
/// upper floor it is clamped down and the surplus handed out one unit at a
/// time, earliest upper floor first.
pub fn distribute_bedrooms(total: u32, floors: u32) -> Vec<u32> {
    match floors {
        0 => return Vec::new(),
        1 => return vec![total],
        _ => {}
    }

    let uppers = (floors - 1) as usize;
    let mut ground = (total / (floors + 1)).max(1).min(total);
    let mut upper = split_evenly(total - ground, uppers);

    let busiest = upper.iter().copied().max().unwrap_or(0);
    if ground > busiest {
        let mut surplus = ground - busiest;
        ground = busiest;
        let mut i = 0;
        while surplus > 0 {
            upper[i % uppers] += 1;
            surplus -= 1;
            i += 1;
        }
    }

    let mut counts = Vec::with_capacity(floors as usize);
    counts.push(ground);
    counts.extend(upper);
    counts
}

/// Divide `total` into `parts` near-equal shares, earlier shares taking the remainder.
pub fn split_evenly(total: u32, parts: usize) -> Vec<u32> {
    if parts == 0 {
        return Vec::new();
    }
    let base = total / parts as u32;
    let rem = (total % parts as u32) as usize;
    (0..parts).map(|i| base + u32::from(i < rem)).collect()
}

/// Share `total` leaves across zones in proportion to their areas.
///
/// Uses largest-remainder rounding, then lifts every zone to at least one
/// leaf since a zone always yields itself.
pub fn split_by_area(areas: &[f32], total: u32) -> Vec<usize> {
    let sum: f32 = areas.iter().sum();
    if areas.is_empty() || sum <= 0.0 {
        return vec![1; areas.len()];
    }

    let exact: Vec<f32> = areas.iter().map(|a| total as f32 * a / sum).collect();
    let mut shares: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();
    let assigned: usize = shares.iter().sum();

    let mut order: Vec<usize> = (0..areas.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for &i in order.iter().take((total as usize).saturating_sub(assigned)) {
        shares[i] += 1;
    }

    shares.into_iter().map(|s| s.max(1)).collect()
}

/// Build each floor's requirement from the house budgets.
///
/// `structural_counts[f]` is the number of template regions on floor `f`;
/// they count against that floor's share of `total_rooms`. What is left
/// after bedrooms funds, in order, the kitchen (ground floor only), one
/// study, one storage room and finally living rooms.
pub fn plan_floor_requirements(
    total_rooms: u32,
    total_bedrooms: u32,
    structural_counts: &[usize],
) -> Vec<FloorRequirement> {
    let floors = structural_counts.len() as u32;
    let bedrooms = distribute_bedrooms(total_bedrooms, floors);
    let budgets = split_evenly(total_rooms, floors as usize);

    structural_counts
        .iter()
        .enumerate()
        .map(|(f, &structural)| {
            let procedural = budgets[f].saturating_sub(structural as u32);
            let mut spare = procedural.saturating_sub(bedrooms[f]);

            let mut take = |wanted: bool| -> bool {
                if wanted && spare > 0 {
                    spare -= 1;
                    true
                } else {
                    false
                }
            };
            let kitchen = take(f == 0);
            let study = u32::from(take(true));
            let storage = u32::from(take(true));

            FloorRequirement {
                floor: f as u32,
                bedrooms: bedrooms[f],
                study,
                storage,
                living: spare,
                kitchen,
                leaf_budget: procedural,
            }
        })
        .collect()
}
