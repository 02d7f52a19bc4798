//! Rectangles in plan space and the rooms built from them.
//!
//! Every coordinate lives in a normalized `[0, 100] × [0, 100]` percentage
//! space. The x axis runs along the house length, the y axis along its
//! width; [`crate::request::Scale`] converts back to meters.

use serde::{Deserialize, Serialize};

/// Side length of the normalized plan space.
pub const PLAN_EXTENT: f32 = 100.0;

/// Closed set of room categories a region can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    AttachedBedBath,
    Kitchen,
    /// Combined kitchen/living/dining hub, one per house.
    KitchenLivingDiningHub,
    Living,
    Hall,
    Stair,
    Studyroom,
    Storage,
}

impl RoomType {
    pub const ALL: [RoomType; 8] = [
        RoomType::AttachedBedBath,
        RoomType::Kitchen,
        RoomType::KitchenLivingDiningHub,
        RoomType::Living,
        RoomType::Hall,
        RoomType::Stair,
        RoomType::Studyroom,
        RoomType::Storage,
    ];

    /// Wire name, as used in the response payload.
    pub fn name(self) -> &'static str {
        match self {
            RoomType::AttachedBedBath => "ATTACHED_BED_BATH",
            RoomType::Kitchen => "KITCHEN",
            RoomType::KitchenLivingDiningHub => "KITCHEN_LIVING_DINING_HUB",
            RoomType::Living => "LIVING",
            RoomType::Hall => "HALL",
            RoomType::Stair => "STAIR",
            RoomType::Studyroom => "STUDYROOM",
            RoomType::Storage => "STORAGE",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An axis-aligned rectangle on one floor, optionally typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub floor: u32,
    pub room_type: Option<RoomType>,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32, floor: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            floor,
            room_type: None,
        }
    }

    pub fn typed(x: f32, y: f32, width: f32, height: f32, floor: u32, room_type: RoomType) -> Self {
        Self {
            room_type: Some(room_type),
            ..Self::new(x, y, width, height, floor)
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area in plan units².
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Area in square meters given meters-per-unit scale factors.
    pub fn real_area(&self, scale_x: f32, scale_y: f32) -> f32 {
        self.width * scale_x * self.height * scale_y
    }

    /// True when the two regions' interiors intersect.
    pub fn overlaps(&self, other: &Region, tolerance: f32) -> bool {
        self.floor == other.floor
            && self.right() - tolerance > other.x
            && other.right() - tolerance > self.x
            && self.bottom() - tolerance > other.y
            && other.bottom() - tolerance > self.y
    }

    /// True when the region lies inside the plan square.
    pub fn within_plan(&self, tolerance: f32) -> bool {
        self.x >= -tolerance
            && self.y >= -tolerance
            && self.right() <= PLAN_EXTENT + tolerance
            && self.bottom() <= PLAN_EXTENT + tolerance
    }
}

/// Shared-edge test for two regions on the same floor.
///
/// One pair of opposite sides must coincide within `tolerance` and the
/// projections on the perpendicular axis must overlap by more than
/// `tolerance`, so corner-only contact does not count.
pub fn touches(a: &Region, b: &Region, tolerance: f32) -> bool {
    if a.floor != b.floor {
        return false;
    }

    let vertical_edge = ((a.right() - b.x).abs() < tolerance
        || (b.right() - a.x).abs() < tolerance)
        && span_overlap(a.y, a.bottom(), b.y, b.bottom()) > tolerance;

    let horizontal_edge = ((a.bottom() - b.y).abs() < tolerance
        || (b.bottom() - a.y).abs() < tolerance)
        && span_overlap(a.x, a.right(), b.x, b.right()) > tolerance;

    vertical_edge || horizontal_edge
}

fn span_overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    a1.min(b1) - a0.max(b0)
}

/// A finalized, typed region with a house-wide unique id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub floor: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Room {
    /// Promote a typed region. Returns `None` when no type was assigned.
    pub fn from_region(id: u32, region: &Region) -> Option<Self> {
        Some(Self {
            id,
            room_type: region.room_type?,
            floor: region.floor,
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
        })
    }

    pub fn region(&self) -> Region {
        Region::typed(
            self.x,
            self.y,
            self.width,
            self.height,
            self.floor,
            self.room_type,
        )
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}
