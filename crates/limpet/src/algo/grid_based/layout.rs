use crate::algo::LayoutAlignment;
use crate::geom::{Circle, PositionedCircle, SceneSpace};

/// Coordinate space of a single layout: origin at the layout's min corner, circles stacked
/// along +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LayoutSpace {}

pub(crate) type LocalPoint = euclid::Point2D<f64, LayoutSpace>;
pub(crate) type LocalToScene = euclid::Transform2D<f64, LayoutSpace, SceneSpace>;
type LocalTransform = euclid::Transform2D<f64, LayoutSpace, LayoutSpace>;

pub(crate) fn local_point(x: f64, y: f64) -> LocalPoint {
    euclid::point2(x, y)
}

/// Exchanges the local x and y axes.
fn axis_swap() -> LocalTransform {
    LocalTransform::new(0.0, 1.0, 1.0, 0.0, 0.0, 0.0)
}

/// Sides of a layout where a circle may rest on its inner radius instead of its outer one.
///
/// Only zone and exclusion boundaries are leanable; seams between layouts never are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Leaning {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl Leaning {
    fn transposed(self) -> Self {
        Self {
            left: self.bottom,
            right: self.top,
            bottom: self.left,
            top: self.right,
        }
    }
}

/// Distance a circle must keep from a side.
pub(crate) fn clearance(leaning: bool, inner: f64, outer: f64) -> f64 {
    if leaning { inner } else { outer }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LocalCircle {
    pub circle: Circle,
    pub position: LocalPoint,
}

/// A free rectangle of the zone, filled bottom-up with a single column of circles.
#[derive(Debug, Clone)]
pub(crate) struct AreaLayout {
    pub(super) to_scene: LocalToScene,
    pub(super) width: f64,
    pub(super) height: f64,
    pub(super) filled_width: f64,
    pub(super) filled_height: f64,
    pub(super) filled: bool,
    pub(super) leaning: Leaning,
    pub(super) circles: Vec<LocalCircle>,
}

impl AreaLayout {
    pub(super) fn new(to_scene: LocalToScene, width: f64, height: f64, leaning: Leaning) -> Self {
        Self {
            to_scene,
            width,
            height,
            filled_width: 0.0,
            filled_height: 0.0,
            filled: false,
            leaning,
            circles: Vec::new(),
        }
    }

    /// Whether the local axes are swapped relative to the scene axes.
    pub(super) fn is_inverted(&self) -> bool {
        self.to_scene.m11 == 0.0
    }

    pub(super) fn remaining_width(&self) -> f64 {
        self.width - self.filled_width
    }

    pub(super) fn remaining_height(&self) -> f64 {
        self.height - self.filled_height
    }

    /// Puts the layout into the canonical orientation requested by `alignment`.
    pub(super) fn apply_alignment(&mut self, alignment: LayoutAlignment) {
        debug_assert!(self.circles.is_empty());
        let swap = match alignment {
            LayoutAlignment::WidthLess => self.width > self.height,
            LayoutAlignment::HeightLess => self.height > self.width,
            LayoutAlignment::None => false,
        };
        if swap {
            std::mem::swap(&mut self.width, &mut self.height);
            self.leaning = self.leaning.transposed();
            self.to_scene = axis_swap().then(&self.to_scene);
        }
    }

    /// Carves a layout of exactly `split_width` off the far (local right) edge.
    ///
    /// The new seam is an internal boundary, so neither piece may lean on it.
    pub(super) fn split(&mut self, split_width: f64) -> AreaLayout {
        let offset = self.width - split_width;
        let to_scene = LocalTransform::translation(offset, 0.0).then(&self.to_scene);
        let piece = AreaLayout::new(
            to_scene,
            split_width,
            self.height,
            Leaning {
                left: false,
                ..self.leaning
            },
        );

        self.width = offset;
        self.leaning.right = false;
        piece
    }

    /// Appends a circle above every circle already in the layout.
    pub(super) fn push(&mut self, circle: Circle, position: LocalPoint) {
        let outer = circle.outer_radius();
        self.filled_width = self.filled_width.max(position.x + outer);
        self.filled_height = position.y + outer;
        self.circles.push(LocalCircle { circle, position });
    }

    pub(super) fn update_filled(&mut self, min_radius: f64) {
        if self.remaining_width() < min_radius && self.remaining_height() < min_radius {
            self.filled = true;
        }
    }

    pub(super) fn into_positioned(self) -> impl Iterator<Item = PositionedCircle> {
        let to_scene = self.to_scene;
        self.circles
            .into_iter()
            .map(move |c| PositionedCircle::new(c.circle, to_scene.transform_point(c.position)))
    }
}

impl std::fmt::Display for AreaLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let origin = self.to_scene.transform_point(local_point(0.0, 0.0));
        writeln!(
            f,
            "({} {}) w: {}/{} h: {}/{}",
            origin.x, origin.y, self.filled_width, self.width, self.filled_height, self.height
        )?;
        write!(
            f,
            "inverted: {} filled: {} LRBT: {} {} {} {}",
            self.is_inverted(),
            self.filled,
            self.leaning.left,
            self.leaning.right,
            self.leaning.bottom,
            self.leaning.top
        )?;
        for c in &self.circles {
            write!(
                f,
                "\n  id {} R {}/{} at ({} {})",
                c.circle.id(),
                c.circle.inner_radius(),
                c.circle.outer_radius(),
                c.position.x,
                c.position.y
            )?;
        }
        Ok(())
    }
}
