//! Binary space partitioning of template zones into room-sized leaves.
//!
//! Uses a work queue instead of an explicit tree: the front leaf is popped,
//! split in two along its longer axis and both halves are pushed to the
//! back. Leaves that are too small to split are re-queued unchanged and
//! flagged as done. The loop stops once the target count is reached, all
//! leaves are done, or the iteration cap is hit.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::GeneratorConfig;
use crate::region::Region;
use crate::request::{LayoutRequest, Scale};

/// Size limits and split policy for one house, in plan units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionParams {
    /// Minimum room extent along x.
    pub min_width: f32,
    /// Minimum room extent along y.
    pub min_height: f32,
    pub split_ratio_min: f32,
    pub split_ratio_max: f32,
    pub splittable_factor: f32,
    pub max_iterations: usize,
}

impl PartitionParams {
    /// Convert meter minimums into plan units using the house scale.
    pub fn new(min_room_length_m: f32, min_room_width_m: f32, scale: Scale, config: &GeneratorConfig) -> Self {
        Self {
            min_width: min_room_width_m / scale.x,
            min_height: min_room_length_m / scale.y,
            split_ratio_min: config.split_ratio_min,
            split_ratio_max: config.split_ratio_max,
            splittable_factor: config.splittable_factor,
            max_iterations: config.max_split_iterations,
        }
    }

    pub fn for_request(request: &LayoutRequest, config: &GeneratorConfig) -> Self {
        Self::new(
            request.min_room_length,
            request.min_room_width,
            request.scale(),
            config,
        )
    }

    /// Minimum room area in plan units².
    pub fn min_room_area(&self) -> f32 {
        self.min_width * self.min_height
    }

    /// Whether a leaf is still large enough to split.
    pub fn can_split(&self, region: &Region) -> bool {
        region.width >= self.min_width * self.splittable_factor
            && region.height >= self.min_height * self.splittable_factor
    }

    /// Most leaves a zone can physically hold.
    pub fn capacity(&self, zone: &Region) -> usize {
        let min_area = self.min_room_area();
        if min_area <= 0.0 {
            return usize::MAX;
        }
        (zone.area() / (2.0 * min_area)).floor().max(0.0) as usize
    }

    fn sample_ratio<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.split_ratio_min < self.split_ratio_max {
            rng.gen_range(self.split_ratio_min..=self.split_ratio_max)
        } else {
            self.split_ratio_min
        }
    }
}

/// Direction of the cut line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Horizontal cut: children are stacked along y.
    Horizontal,
    /// Vertical cut: children sit side by side along x.
    Vertical,
}

/// Cut across the longer side; squares are cut horizontally.
pub fn split_axis(region: &Region) -> SplitAxis {
    if region.width > region.height {
        SplitAxis::Vertical
    } else {
        SplitAxis::Horizontal
    }
}

/// Split `region` at `ratio` of its extent along the cut axis.
///
/// The second child takes the exact remainder so the pair tiles the parent.
pub fn split_region(region: &Region, axis: SplitAxis, ratio: f32) -> (Region, Region) {
    match axis {
        SplitAxis::Horizontal => {
            let first_h = region.height * ratio;
            let first = Region::new(region.x, region.y, region.width, first_h, region.floor);
            let second = Region::new(
                region.x,
                region.y + first_h,
                region.width,
                region.height - first_h,
                region.floor,
            );
            (first, second)
        }
        SplitAxis::Vertical => {
            let first_w = region.width * ratio;
            let first = Region::new(region.x, region.y, first_w, region.height, region.floor);
            let second = Region::new(
                region.x + first_w,
                region.y,
                region.width - first_w,
                region.height,
                region.floor,
            );
            (first, second)
        }
    }
}

/// Subdivide `zone` into up to `target_leaves` leaves.
///
/// Returns fewer leaves than requested when the zone is too small; a zone
/// that cannot be split at all comes back as a single leaf.
pub fn partition_zone<R: Rng + ?Sized>(
    zone: &Region,
    target_leaves: usize,
    params: &PartitionParams,
    rng: &mut R,
) -> Vec<Region> {
    let actual_target = target_leaves.min(params.capacity(zone));

    // (leaf, done)
    let mut leaves: VecDeque<(Region, bool)> = VecDeque::new();
    leaves.push_back((zone.clone(), false));

    let mut iterations = 0;
    while leaves.len() < actual_target && iterations < params.max_iterations {
        iterations += 1;
        let Some((leaf, done)) = leaves.pop_front() else {
            break;
        };

        if done || !params.can_split(&leaf) {
            leaves.push_back((leaf, true));
            if leaves.iter().all(|(_, done)| *done) {
                break;
            }
            continue;
        }

        let ratio = params.sample_ratio(rng);
        let (a, b) = split_region(&leaf, split_axis(&leaf), ratio);
        leaves.push_back((a, false));
        leaves.push_back((b, false));
    }

    log::trace!(
        "partitioned zone ({:.1},{:.1} {:.1}×{:.1}) into {} of {} leaves in {} iterations",
        zone.x,
        zone.y,
        zone.width,
        zone.height,
        leaves.len(),
        target_leaves,
        iterations
    );

    leaves.into_iter().map(|(leaf, _)| leaf).collect()
}
