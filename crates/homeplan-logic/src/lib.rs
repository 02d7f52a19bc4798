//! Procedural floor-plan generation for HomePlan.
//!
//! This crate turns a house request (footprint, floors, room and bedroom
//! counts) into a validated multi-floor layout of typed rectangular rooms
//! plus the adjacency graph that connects them. It has no I/O, storage or
//! runtime dependency: functions take plain data and a caller-supplied
//! random source, so every layout is reproducible from a seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assignment`] | Kitchen placement and priority-ordered room typing |
//! | [`bsp`] | Queue-based binary space partitioning of zones |
//! | [`config`] | Generator tunables (attempts, tolerances, split policy) |
//! | [`distribution`] | Per-floor bedroom and room quotas |
//! | [`error`] | Orchestrator failure modes |
//! | [`generator`] | Candidate construction, retry loop, response payload |
//! | [`graph`] | Rule-based connectivity graph and diagnostics dump |
//! | [`region`] | Plan-space rectangles, room types, shared-edge test |
//! | [`request`] | Request schema and upstream constraint checks |
//! | [`template`] | Layout cases and per-floor structural skeletons |
//! | [`validation`] | Connectivity and distribution checks |
//!
//! ```
//! use homeplan_logic::{generate_layout, GeneratorConfig, LayoutRequest};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let generated = generate_layout(&LayoutRequest::default(), &GeneratorConfig::default(), &mut rng)
//!     .expect("default request always has a valid layout");
//! assert_eq!(generated.layout.floors, 2);
//! ```

pub mod assignment;
pub mod bsp;
pub mod config;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod graph;
pub mod region;
pub mod request;
pub mod template;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use generator::{generate_layout, GeneratedLayout, LayoutResponse, LayoutResult};
pub use region::{Room, RoomType};
pub use request::LayoutRequest;
