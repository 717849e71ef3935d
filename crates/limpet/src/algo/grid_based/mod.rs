use crate::algo::{GridBasedOptions, Traversal};
use crate::geom::{Circle, PositionedCircle, ResultData, Scene};

mod grid;
mod layout;

use grid::AreasGrid;
use layout::{AreaLayout, clearance, local_point};

#[derive(Debug, Default, Clone)]
struct PlacementTimings {
    total: std::time::Duration,
    grid: std::time::Duration,
    fill: std::time::Duration,
    relax: std::time::Duration,
    output: std::time::Duration,
}

/// Where a circle ended up during [`place_circle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    /// The layout the search settled on; the next search starts from here.
    layout: usize,
    /// Index of the sub-layout split off `layout` to hold the circle, if any.
    split: Option<usize>,
}

/// Greedy placement over the free strips of an occupancy grid.
#[derive(Debug, Clone, Default)]
pub struct GridBasedAlgorithm {
    options: GridBasedOptions,
}

impl GridBasedAlgorithm {
    pub fn new(options: GridBasedOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GridBasedOptions {
        &self.options
    }

    /// Places every circle of `scene`, or returns `None` if some circle does not fit.
    ///
    /// The result is ordered layout by layout, not in the scene's circle order.
    pub fn calculate(&self, scene: &Scene) -> Option<ResultData> {
        let timing_enabled =
            std::env::var("LIMPET_PLACEMENT_TIMING").ok().as_deref() == Some("1");
        let mut timings = PlacementTimings::default();
        let total_start = timing_enabled.then(std::time::Instant::now);

        let grid_start = timing_enabled.then(std::time::Instant::now);
        let grid = AreasGrid::new(scene.zone(), scene.exclusion_areas());
        tracing::trace!("occupancy grid:\n{grid}");
        let mut layouts = grid.allowed_areas(self.options.mode, self.options.alignment);
        if let Some(s) = grid_start {
            timings.grid = s.elapsed();
        }
        tracing::debug!(
            layouts = layouts.len(),
            circles = scene.circles().len(),
            exclusions = scene.exclusion_areas().len(),
            "derived free layouts"
        );

        let fill_start = timing_enabled.then(std::time::Instant::now);
        let placed = self.fill_layouts(&mut layouts, scene.circles());
        if let Some(s) = fill_start {
            timings.fill = s.elapsed();
        }
        if tracing::enabled!(tracing::Level::TRACE) {
            for (i, layout) in layouts.iter().enumerate() {
                tracing::trace!("layout #{i}: {layout}");
            }
        }
        if !placed {
            tracing::debug!("could not place all circles");
            return None;
        }

        let relax_start = timing_enabled.then(std::time::Instant::now);
        if self.options.relax {
            relax_circle_distribution(&mut layouts);
        }
        if let Some(s) = relax_start {
            timings.relax = s.elapsed();
        }

        let output_start = timing_enabled.then(std::time::Instant::now);
        let circles = recalculate_circles_positions(layouts);
        if let Some(s) = output_start {
            timings.output = s.elapsed();
        }

        if let Some(s) = total_start {
            timings.total = s.elapsed();
            tracing::info!(
                "[limpet-placement-timing] total={:?} grid={:?} fill={:?} relax={:?} output={:?} circles={}",
                timings.total,
                timings.grid,
                timings.fill,
                timings.relax,
                timings.output,
                circles.len(),
            );
        }

        Some(ResultData { circles })
    }

    fn fill_layouts(&self, layouts: &mut Vec<AreaLayout>, circles: &[Circle]) -> bool {
        let Some(min_radius) = circles
            .iter()
            .map(Circle::inner_radius)
            .min_by(f64::total_cmp)
        else {
            return true;
        };

        // Stable sorts: ties keep grid scan order and caller circle order.
        layouts.sort_by(|a, b| b.width.total_cmp(&a.width));
        let mut circles = circles.to_vec();
        circles.sort_by(|a, b| b.outer_radius().total_cmp(&a.outer_radius()));

        // Narrower layouts cannot hold even the smallest circle.
        let keep = layouts.partition_point(|l| l.width >= 2.0 * min_radius);
        if keep < layouts.len() {
            tracing::debug!(discarded = layouts.len() - keep, "dropping narrow layouts");
            layouts.truncate(keep);
        }

        let mut current = 0;
        for circle in &circles {
            let Some(placement) = place_circle(layouts, circle, current) else {
                tracing::debug!(id = circle.id(), "no layout can hold circle");
                return false;
            };

            layouts[placement.layout].update_filled(min_radius);
            if let Some(split) = placement.split {
                layouts[split].update_filled(min_radius);
            }

            current = match self.options.traversal {
                Traversal::Sticky => placement.layout,
                Traversal::RoundRobin => placement.layout + 1,
            };
        }
        true
    }
}

/// Tries the layouts circularly from `start`; splits a layout when the circle only fits beside
/// its current column.
fn place_circle(
    layouts: &mut Vec<AreaLayout>,
    circle: &Circle,
    start: usize,
) -> Option<Placement> {
    let (inner, outer) = (circle.inner_radius(), circle.outer_radius());
    let count = layouts.len();

    for step in 0..count {
        let index = (start + step) % count;
        let layout = &mut layouts[index];
        if layout.filled {
            continue;
        }

        if let (Some(x), Some(y)) = (
            find_min_width(layout, inner, outer),
            find_min_height(layout, inner, outer),
        ) {
            layout.push(*circle, local_point(x, y));
            tracing::trace!(id = circle.id(), layout = index, x, y, "placed circle");
            return Some(Placement {
                layout: index,
                split: None,
            });
        }

        let split_width = 2.0 * outer;
        if layout.remaining_width() >= split_width {
            // The split piece is empty and keeps the layout's height and bottom/top leaning.
            let leaning = layout.leaning;
            let Some(y) = first_offset(leaning.bottom, leaning.top, layout.height, inner, outer)
            else {
                continue;
            };
            let mut piece = layout.split(split_width);
            piece.push(*circle, local_point(outer, y));
            tracing::trace!(
                id = circle.id(),
                layout = index,
                y,
                "placed circle in split layout"
            );
            layouts.push(piece);
            return Some(Placement {
                layout: index,
                split: Some(layouts.len() - 1),
            });
        }
    }
    None
}

/// Smallest admissible local x for a circle, if the layout is wide enough.
fn find_min_width(layout: &AreaLayout, inner: f64, outer: f64) -> Option<f64> {
    let leaning = layout.leaning;
    first_offset(leaning.left, leaning.right, layout.width, inner, outer)
}

/// Smallest admissible local y for a circle stacked above the layout's current circles.
fn find_min_height(layout: &AreaLayout, inner: f64, outer: f64) -> Option<f64> {
    let leaning = layout.leaning;
    if layout.circles.is_empty() {
        return first_offset(leaning.bottom, leaning.top, layout.height, inner, outer);
    }
    // Stacked circles need full clearance from the one below.
    let min = layout.filled_height + outer;
    let needed = min + clearance(leaning.top, inner, outer);
    (layout.height >= needed).then_some(min)
}

/// Offset from the low side along one axis, given which of the two sides are leanable.
fn first_offset(
    lean_low: bool,
    lean_high: bool,
    extent: f64,
    inner: f64,
    outer: f64,
) -> Option<f64> {
    let min = clearance(lean_low, inner, outer);
    let needed = min + clearance(lean_high, inner, outer);
    (extent >= needed).then_some(min)
}

/// Spreads each layout's circles over its unused space.
///
/// Circle `i` moves up by `(i + 1)` shares of the vertical slack, so gaps only grow. A circle
/// with room for its full outer disk on both sides is centered; a tighter circle is shifted
/// right by the layout's unused width.
fn relax_circle_distribution(layouts: &mut [AreaLayout]) {
    for layout in layouts.iter_mut().filter(|l| !l.circles.is_empty()) {
        let step = layout.remaining_height().max(0.0) / layout.circles.len() as f64;
        let shift = layout.remaining_width().max(0.0);
        let width = layout.width;

        for (i, placed) in layout.circles.iter_mut().enumerate() {
            placed.position.y += step * (i + 1) as f64;
            if width > 2.0 * placed.circle.outer_radius() {
                placed.position.x = width / 2.0;
            } else {
                placed.position.x += shift;
            }
        }
    }
}

/// Maps every circle into scene coordinates, layout by layout.
fn recalculate_circles_positions(layouts: Vec<AreaLayout>) -> Vec<PositionedCircle> {
    layouts
        .into_iter()
        .flat_map(AreaLayout::into_positioned)
        .collect()
}
