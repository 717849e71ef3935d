#![forbid(unsafe_code)]

use crate::error::{Error, Result};

/// Coordinate space of the placement zone (the caller's space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSpace {}

pub type Point = euclid::Point2D<f64, SceneSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Axis-aligned rectangle with `min < max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    min: Point,
    max: Point,
}

impl Rectangle {
    pub fn new(min: Point, max: Point) -> Result<Self> {
        // Written as a negation so NaN coordinates are rejected too.
        if !(min.x < max.x && min.y < max.y) {
            return Err(Error::UnnormalizedRectangle { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        Self::new(point(min_x, min_y), point(max_x, max_y))
    }

    pub fn min_point(&self) -> Point {
        self.min
    }

    pub fn max_point(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Closed containment: `other` may touch this rectangle's boundary.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// A ring marker: the inner disk is the marker itself, the outer disk is its clearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    id: i64,
    inner_radius: f64,
    outer_radius: f64,
}

impl Circle {
    pub fn new(id: i64, inner_radius: f64, outer_radius: f64) -> Result<Self> {
        if !(inner_radius > 0.0 && inner_radius <= outer_radius) {
            return Err(Error::InvalidCircleRadii {
                id,
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self {
            id,
            inner_radius,
            outer_radius,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedCircle {
    pub circle: Circle,
    /// Center of the circle.
    pub position: Point,
}

impl PositionedCircle {
    pub fn new(circle: Circle, position: Point) -> Self {
        Self { circle, position }
    }

    pub fn id(&self) -> i64 {
        self.circle.id()
    }

    pub fn inner_radius(&self) -> f64 {
        self.circle.inner_radius()
    }

    pub fn outer_radius(&self) -> f64 {
        self.circle.outer_radius()
    }
}

/// Validated placement input. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    zone: Rectangle,
    exclusion_areas: Vec<Rectangle>,
    circles: Vec<Circle>,
}

impl Scene {
    /// Builds a scene; every exclusion area must lie inside `zone`. Exclusions may overlap.
    pub fn new(
        zone: Rectangle,
        exclusion_areas: Vec<Rectangle>,
        circles: Vec<Circle>,
    ) -> Result<Self> {
        if let Some(index) = exclusion_areas
            .iter()
            .position(|area| !zone.contains_rect(area))
        {
            return Err(Error::ExclusionOutsideZone { index });
        }
        Ok(Self {
            zone,
            exclusion_areas,
            circles,
        })
    }

    pub fn zone(&self) -> &Rectangle {
        &self.zone
    }

    pub fn exclusion_areas(&self) -> &[Rectangle] {
        &self.exclusion_areas
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }
}

/// Placement output, ordered layout by layout (not in input order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultData {
    pub circles: Vec<PositionedCircle>,
}

impl ResultData {
    pub fn get(&self, id: i64) -> Option<&PositionedCircle> {
        self.circles.iter().find(|c| c.id() == id)
    }
}
