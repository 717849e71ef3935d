pub mod grid_based;

pub use grid_based::GridBasedAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Free-strip grid partitioning with greedy largest-first placement.
    GridBased(GridBasedOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::GridBased(GridBasedOptions::default())
    }
}

/// How free cells of the occupancy grid are merged into layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridMode {
    /// One layout per maximal run of free cells in a grid row.
    #[default]
    Horizontal,
    /// One layout per maximal run of free cells in a grid column.
    Vertical,
}

/// Canonical orientation applied to every layout before placement.
///
/// Placement always stacks circles along the local y axis, so `WidthLess` (local width is the
/// shorter side) stacks along the long side of each free area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutAlignment {
    #[default]
    WidthLess,
    HeightLess,
    None,
}

/// Which layout the next circle's search starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Start from the layout that received the previous circle.
    #[default]
    Sticky,
    /// Start from the layout after the one that received the previous circle.
    RoundRobin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBasedOptions {
    pub mode: GridMode,
    pub alignment: LayoutAlignment,
    pub traversal: Traversal,
    /// Spread circles over the unused space of their layouts after placement.
    pub relax: bool,
}

impl Default for GridBasedOptions {
    fn default() -> Self {
        Self {
            mode: GridMode::Horizontal,
            alignment: LayoutAlignment::WidthLess,
            traversal: Traversal::Sticky,
            relax: true,
        }
    }
}
