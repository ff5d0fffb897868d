use crate::Orientation;

/// A navigation request, as reported by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
    /// Next in reading order.
    Forward,
    /// Previous in reading order.
    Backward,
}

/// A navigation request in layout terms.
///
/// Item moves are along the scroll axis, column moves along the lanes. "Next" follows the visual
/// flow of the layout: right-to-left text is folded in, `reverse_layout` is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemDirection {
    PreviousItem,
    NextItem,
    PreviousColumn,
    NextColumn,
}

impl ItemDirection {
    pub fn is_item(self) -> bool {
        matches!(self, Self::PreviousItem | Self::NextItem)
    }

    pub fn is_next(self) -> bool {
        matches!(self, Self::NextItem | Self::NextColumn)
    }
}

pub fn resolve(
    direction: FocusDirection,
    orientation: Orientation,
    right_to_left: bool,
) -> ItemDirection {
    let absolute = match direction {
        FocusDirection::Forward => forward_direction(orientation, right_to_left),
        FocusDirection::Backward => opposite(forward_direction(orientation, right_to_left)),
        other => other,
    };
    match (orientation, absolute) {
        (Orientation::Vertical, FocusDirection::Down) => ItemDirection::NextItem,
        (Orientation::Vertical, FocusDirection::Up) => ItemDirection::PreviousItem,
        (Orientation::Vertical, FocusDirection::Right) => {
            if right_to_left {
                ItemDirection::PreviousColumn
            } else {
                ItemDirection::NextColumn
            }
        }
        (Orientation::Vertical, _) => {
            if right_to_left {
                ItemDirection::NextColumn
            } else {
                ItemDirection::PreviousColumn
            }
        }
        (Orientation::Horizontal, FocusDirection::Right) => {
            if right_to_left {
                ItemDirection::PreviousItem
            } else {
                ItemDirection::NextItem
            }
        }
        (Orientation::Horizontal, FocusDirection::Left) => {
            if right_to_left {
                ItemDirection::NextItem
            } else {
                ItemDirection::PreviousItem
            }
        }
        (Orientation::Horizontal, FocusDirection::Down) => ItemDirection::NextColumn,
        (Orientation::Horizontal, _) => ItemDirection::PreviousColumn,
    }
}

fn forward_direction(orientation: Orientation, right_to_left: bool) -> FocusDirection {
    match orientation {
        Orientation::Vertical => FocusDirection::Down,
        Orientation::Horizontal if right_to_left => FocusDirection::Left,
        Orientation::Horizontal => FocusDirection::Right,
    }
}

fn opposite(direction: FocusDirection) -> FocusDirection {
    match direction {
        FocusDirection::Up => FocusDirection::Down,
        FocusDirection::Down => FocusDirection::Up,
        FocusDirection::Left => FocusDirection::Right,
        FocusDirection::Right => FocusDirection::Left,
        FocusDirection::Forward => FocusDirection::Backward,
        FocusDirection::Backward => FocusDirection::Forward,
    }
}
