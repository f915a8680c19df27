use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Physical axis carrying time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Responsive timeline orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Desktop: time runs left to right.
    Horizontal,
    /// Mobile: time runs top to bottom.
    Vertical,
}

/// Block edge as the pointer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysicalEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Which bound of a span an edge drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanEdge {
    Start,
    End,
}

impl Layout {
    /// Picks the layout for a viewport: narrower than `breakpoint_px` is vertical.
    #[must_use]
    pub fn for_viewport_width(width_px: f64, breakpoint_px: f64) -> Self {
        if width_px < breakpoint_px {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::X,
            Self::Vertical => Axis::Y,
        }
    }

    #[must_use]
    pub fn active_edges(self) -> SmallVec<[PhysicalEdge; 2]> {
        match self {
            Self::Horizontal => smallvec![PhysicalEdge::Left, PhysicalEdge::Right],
            Self::Vertical => smallvec![PhysicalEdge::Top, PhysicalEdge::Bottom],
        }
    }

    /// Maps a physical edge to the span bound it drags, or `None` when the
    /// edge is not exposed in this layout.
    #[must_use]
    pub fn logical_edge(self, edge: PhysicalEdge) -> Option<SpanEdge> {
        match (self, edge) {
            (Self::Horizontal, PhysicalEdge::Left) | (Self::Vertical, PhysicalEdge::Top) => {
                Some(SpanEdge::Start)
            }
            (Self::Horizontal, PhysicalEdge::Right) | (Self::Vertical, PhysicalEdge::Bottom) => {
                Some(SpanEdge::End)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewports_switch_to_vertical() {
        assert_eq!(Layout::for_viewport_width(390.0, 1440.0), Layout::Vertical);
        assert_eq!(Layout::for_viewport_width(1440.0, 1440.0), Layout::Horizontal);
    }

    #[test]
    fn layouts_never_expose_both_edge_pairs() {
        let horizontal = Layout::Horizontal;
        assert_eq!(horizontal.logical_edge(PhysicalEdge::Left), Some(SpanEdge::Start));
        assert_eq!(horizontal.logical_edge(PhysicalEdge::Bottom), None);
        let vertical = Layout::Vertical;
        assert_eq!(vertical.logical_edge(PhysicalEdge::Bottom), Some(SpanEdge::End));
        assert_eq!(vertical.logical_edge(PhysicalEdge::Right), None);
        assert!(!vertical.active_edges().contains(&PhysicalEdge::Left));
    }
}
