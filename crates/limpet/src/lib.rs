#![forbid(unsafe_code)]

//! Headless placement of ring markers inside a rectangular zone.
//!
//! A ring marker is a [`Circle`] with an inner radius (the marker itself) and an outer radius
//! (the clearance it needs from other markers). `limpet` positions every marker so that outer
//! disks do not overlap each other, stay inside the zone and avoid the exclusion areas. An inner
//! disk may lean against a zone or exclusion boundary, letting the clearance ring cross it.
//!
//! The engine is a deterministic greedy heuristic: [`place`] returns `None` when it cannot place
//! every circle, even if some placement exists.

pub mod algo;
pub mod error;
pub mod geom;

pub use algo::{
    Algorithm, GridBasedAlgorithm, GridBasedOptions, GridMode, LayoutAlignment, Traversal,
};
pub use error::{Error, Result};
pub use geom::{Circle, Point, PositionedCircle, Rectangle, ResultData, Scene, SceneSpace, point};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless placement entry point. `None` means not every circle could be placed.
pub fn place(scene: &Scene, algorithm: Algorithm) -> Option<ResultData> {
    match algorithm {
        Algorithm::GridBased(opts) => GridBasedAlgorithm::new(opts).calculate(scene),
    }
}
