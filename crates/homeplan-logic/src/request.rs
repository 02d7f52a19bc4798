//! Layout generation request and its upstream constraints.
//!
//! The request arrives already deserialized; this module owns the data
//! model and the constraint checks so callers can reject a request before
//! spending any generation attempts on it.
//!
//! ```
//! use homeplan_logic::request::{validate_request, LayoutRequest};
//!
//! let request = LayoutRequest::default();
//! assert!(validate_request(&request).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::PLAN_EXTENT;

/// Narrowest house footprint the templates are designed for, in meters.
pub const MIN_HOUSE_WIDTH: f32 = 40.0;
/// Widest house footprint the templates are designed for, in meters.
pub const MAX_HOUSE_WIDTH: f32 = 100.0;
/// Shortest allowed length as a fraction of width.
pub const MIN_LENGTH_RATIO: f32 = 0.75;

/// User-facing generation parameters. Dimensions are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    /// House depth (x axis).
    pub length: f32,
    /// House width (y axis); selects the layout case.
    pub width: f32,
    pub floors: u32,
    /// Total rooms in the house, structural rooms included.
    pub rooms: u32,
    pub min_room_length: f32,
    pub min_room_width: f32,
    /// Requested kitchen area in m².
    pub kitchen_size: f32,
    pub total_bedrooms: u32,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            length: 80.0,
            width: 80.0,
            floors: 2,
            rooms: 10,
            min_room_length: 15.0,
            min_room_width: 15.0,
            kitchen_size: 280.0,
            total_bedrooms: 4,
        }
    }
}

impl LayoutRequest {
    pub fn scale(&self) -> Scale {
        Scale::for_house(self.length, self.width)
    }
}

/// Meters per plan unit along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub fn for_house(length_m: f32, width_m: f32) -> Self {
        Self {
            x: length_m / PLAN_EXTENT,
            y: width_m / PLAN_EXTENT,
        }
    }
}

/// A violated request constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("width {0}m is outside [40, 100]")]
    WidthOutOfRange(f32),
    #[error("length {length}m must lie between 0.75×width and width ({width}m)")]
    LengthOutOfRange { length: f32, width: f32 },
    #[error("a house needs at least one floor")]
    NoFloors,
    #[error("totalBedrooms must be positive")]
    NoBedrooms,
    #[error("kitchenSize must be positive, got {0}")]
    NonPositiveKitchen(f32),
    #[error("minimum room dimensions must be positive, got {length}×{width}")]
    NonPositiveMinRoom { length: f32, width: f32 },
}

/// Finite and strictly positive; NaN fails.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Check a request against the upstream constraints, returning all errors found.
pub fn validate_request(request: &LayoutRequest) -> Vec<RequestError> {
    let mut errors = Vec::new();

    if !(MIN_HOUSE_WIDTH..=MAX_HOUSE_WIDTH).contains(&request.width) {
        errors.push(RequestError::WidthOutOfRange(request.width));
    }
    if !(MIN_LENGTH_RATIO * request.width..=request.width).contains(&request.length) {
        errors.push(RequestError::LengthOutOfRange {
            length: request.length,
            width: request.width,
        });
    }
    if request.floors == 0 {
        errors.push(RequestError::NoFloors);
    }
    if request.total_bedrooms == 0 {
        errors.push(RequestError::NoBedrooms);
    }
    if !is_positive(request.kitchen_size) {
        errors.push(RequestError::NonPositiveKitchen(request.kitchen_size));
    }
    if !is_positive(request.min_room_length) || !is_positive(request.min_room_width) {
        errors.push(RequestError::NonPositiveMinRoom {
            length: request.min_room_length,
            width: request.min_room_width,
        });
    }

    errors
}
