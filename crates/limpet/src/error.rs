use crate::geom::Point;

/// Construction-time validation failures ("invalid object" errors).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid object: unnormalized rectangle {min:?} .. {max:?}")]
    UnnormalizedRectangle { min: Point, max: Point },

    #[error("invalid object: circle {id} has incorrect radii (inner={inner}, outer={outer})")]
    InvalidCircleRadii { id: i64, inner: f64, outer: f64 },

    #[error("invalid object: exclusion area #{index} is not contained in the placement zone")]
    ExclusionOutsideZone { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
