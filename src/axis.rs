use crate::{MeasureSpec, Orientation, Padding, Size, ViewBounds};

/// A rectangle in flow coordinates.
///
/// `start..end` runs along the scroll axis from the head edge of the viewport toward the tail, in
/// the direction adapter positions grow. `cross_start..cross_end` runs along the lanes, from the
/// first span toward the last one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FlowRect {
    pub start: i32,
    pub end: i32,
    pub cross_start: i32,
    pub cross_end: i32,
}

impl FlowRect {
    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    pub fn offset(&self, delta: i32) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
            ..*self
        }
    }
}

/// Maps flow coordinates to viewport coordinates for one orientation.
///
/// Rows, columns and grids share a single fill algorithm; everything that depends on the
/// orientation, `reverse_layout` or right-to-left text goes through this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Axis {
    orientation: Orientation,
    /// Positions grow toward the low edge of the primary axis.
    reverse: bool,
    /// Lanes start at the high edge of the cross axis.
    mirror_cross: bool,
    width: i32,
    height: i32,
    padding: Padding,
}

impl Axis {
    pub fn new(
        orientation: Orientation,
        reverse_layout: bool,
        right_to_left: bool,
        width: i32,
        height: i32,
        padding: Padding,
    ) -> Self {
        let horizontal = !orientation.is_vertical();
        Self {
            orientation,
            reverse: reverse_layout ^ (horizontal && right_to_left),
            mirror_cross: !horizontal && right_to_left,
            width: width.max(0),
            height: height.max(0),
            padding,
        }
    }

    pub fn primary_extent(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }

    pub fn cross_extent(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.width,
            Orientation::Horizontal => self.height,
        }
    }

    /// Padding at the (head, tail) edges of the scroll axis.
    pub fn primary_padding(&self) -> (i32, i32) {
        let (low, high) = match self.orientation {
            Orientation::Vertical => (self.padding.top, self.padding.bottom),
            Orientation::Horizontal => (self.padding.left, self.padding.right),
        };
        if self.reverse {
            (high, low)
        } else {
            (low, high)
        }
    }

    /// Padding before the first lane and after the last one.
    pub fn cross_padding(&self) -> (i32, i32) {
        let (low, high) = match self.orientation {
            Orientation::Vertical => (self.padding.left, self.padding.right),
            Orientation::Horizontal => (self.padding.top, self.padding.bottom),
        };
        if self.mirror_cross {
            (high, low)
        } else {
            (low, high)
        }
    }

    /// Space available to the lanes.
    pub fn cross_space(&self) -> i32 {
        let (start, end) = self.cross_padding();
        (self.cross_extent() - start - end).max(0)
    }

    pub fn primary_size(&self, size: Size) -> i32 {
        match self.orientation {
            Orientation::Vertical => size.height,
            Orientation::Horizontal => size.width,
        }
    }

    /// Fixes the cross axis to the lane width and leaves the scroll axis unconstrained.
    pub fn measure_spec(&self, cross_size: i32) -> MeasureSpec {
        match self.orientation {
            Orientation::Vertical => MeasureSpec {
                width: Some(cross_size),
                height: None,
            },
            Orientation::Horizontal => MeasureSpec {
                width: None,
                height: Some(cross_size),
            },
        }
    }

    pub fn to_bounds(&self, rect: FlowRect) -> ViewBounds {
        let primary = self.primary_extent();
        let cross = self.cross_extent();
        let (p0, p1) = if self.reverse {
            (primary - rect.end, primary - rect.start)
        } else {
            (rect.start, rect.end)
        };
        let (c0, c1) = if self.mirror_cross {
            (cross - rect.cross_end, cross - rect.cross_start)
        } else {
            (rect.cross_start, rect.cross_end)
        };
        match self.orientation {
            Orientation::Vertical => ViewBounds::new(c0, p0, c1, p1),
            Orientation::Horizontal => ViewBounds::new(p0, c0, p1, c1),
        }
    }

    pub fn to_flow(&self, bounds: ViewBounds) -> FlowRect {
        let primary = self.primary_extent();
        let cross = self.cross_extent();
        let ((p0, p1), (c0, c1)) = match self.orientation {
            Orientation::Vertical => (
                (bounds.top, bounds.bottom),
                (bounds.left, bounds.right),
            ),
            Orientation::Horizontal => (
                (bounds.left, bounds.right),
                (bounds.top, bounds.bottom),
            ),
        };
        let (start, end) = if self.reverse {
            (primary - p1, primary - p0)
        } else {
            (p0, p1)
        };
        let (cross_start, cross_end) = if self.mirror_cross {
            (cross - c1, cross - c0)
        } else {
            (c0, c1)
        };
        FlowRect {
            start,
            end,
            cross_start,
            cross_end,
        }
    }
}
