use crate::ConfigError;

/// Which data-set edges clamp the keyline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// The keyline never falls before the head padding.
    Min,
    /// The keyline never falls after the tail padding.
    Max,
    #[default]
    MinMax,
    /// No clamping. The pivot may be aligned arbitrarily close to an edge ("peek" layouts).
    None,
}

impl Edge {
    pub fn clamps_min(self) -> bool {
        matches!(self, Self::Min | Self::MinMax)
    }

    pub fn clamps_max(self) -> bool {
        matches!(self, Self::Max | Self::MinMax)
    }
}

/// Where the keyline sits inside the viewport.
///
/// The keyline is measured along the scroll axis from the head edge of the viewport, so a ratio of
/// `0.25` sits a quarter of the way in from wherever the first item is laid out (the bottom edge
/// for reversed vertical lists).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParentAlignment {
    pub edge: Edge,
    pub offset: i32,
    pub offset_ratio: f32,
    pub offset_ratio_enabled: bool,
    /// When `false`, a `Min` (`Max`) edge pins the first (last) item to the head (tail) padding
    /// instead of letting it reach the keyline.
    pub prefer_keyline_over_edge: bool,
}

impl Default for ParentAlignment {
    fn default() -> Self {
        Self {
            edge: Edge::MinMax,
            offset: 0,
            offset_ratio: 0.5,
            offset_ratio_enabled: true,
            prefer_keyline_over_edge: true,
        }
    }
}

impl ParentAlignment {
    pub fn new(edge: Edge, offset: i32, offset_ratio: f32) -> Result<Self, ConfigError> {
        let alignment = Self {
            edge,
            offset,
            offset_ratio,
            ..Self::default()
        };
        alignment.validate()?;
        Ok(alignment)
    }

    pub fn with_offset_ratio_enabled(mut self, enabled: bool) -> Self {
        self.offset_ratio_enabled = enabled;
        self
    }

    pub fn with_prefer_keyline_over_edge(mut self, prefer: bool) -> Self {
        self.prefer_keyline_over_edge = prefer;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio(self.offset_ratio)
    }
}

/// Which point inside an item lands on the keyline, and which sub-view takes focus.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildAlignment {
    pub offset: i32,
    pub offset_ratio: f32,
    pub offset_ratio_enabled: bool,
    /// Sub-view whose bounds are aligned instead of the whole item.
    pub alignment_view_id: Option<u32>,
    /// Sub-view that should receive input focus for this sub-position.
    pub focus_view_id: Option<u32>,
}

impl Default for ChildAlignment {
    fn default() -> Self {
        Self {
            offset: 0,
            offset_ratio: 0.5,
            offset_ratio_enabled: true,
            alignment_view_id: None,
            focus_view_id: None,
        }
    }
}

impl ChildAlignment {
    pub fn new(offset: i32, offset_ratio: f32) -> Result<Self, ConfigError> {
        let alignment = Self {
            offset,
            offset_ratio,
            ..Self::default()
        };
        alignment.validate()?;
        Ok(alignment)
    }

    pub fn with_offset_ratio_enabled(mut self, enabled: bool) -> Self {
        self.offset_ratio_enabled = enabled;
        self
    }

    pub fn with_alignment_view(mut self, view_id: Option<u32>) -> Self {
        self.alignment_view_id = view_id;
        self
    }

    pub fn with_focus_view(mut self, view_id: Option<u32>) -> Self {
        self.focus_view_id = view_id;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio(self.offset_ratio)
    }
}

fn check_ratio(ratio: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRatio(ratio))
    }
}

/// `floor(size * ratio)`; sizes are clamped to be non-negative so the cast always floors.
fn scaled(size: i32, ratio: f32, enabled: bool) -> i32 {
    if !enabled {
        return 0;
    }
    (f64::from(size.max(0)) * f64::from(ratio)) as i32
}

/// Computes the keyline, measured from the head edge of the viewport.
pub fn compute_keyline(
    viewport_size: i32,
    min_padding: i32,
    max_padding: i32,
    alignment: &ParentAlignment,
) -> i32 {
    let mut keyline =
        scaled(viewport_size, alignment.offset_ratio, alignment.offset_ratio_enabled)
            + alignment.offset;
    if alignment.edge.clamps_min() {
        keyline = keyline.max(min_padding);
    }
    if alignment.edge.clamps_max() {
        keyline = keyline.min(viewport_size - max_padding);
    }
    keyline
}

/// Computes the aligned point inside a child, measured from its head edge.
pub fn compute_child_offset(child_size: i32, alignment: &ChildAlignment) -> i32 {
    scaled(child_size, alignment.offset_ratio, alignment.offset_ratio_enabled) + alignment.offset
}
