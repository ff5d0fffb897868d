use alloc::vec::Vec;

use crate::ItemHandle;
use crate::layout::PivotLayout;

/// The part of a layout worth keeping across configuration changes.
///
/// Offsets are not saved: restoring re-aligns the selection on the next pass, which puts it
/// exactly where it was as long as the geometry did not change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedLayoutState {
    pub selected_position: usize,
    pub sub_position: usize,
    /// Remembered span index per span group, sorted by group.
    pub span_focus: Vec<(usize, usize)>,
    pub last_span_index: Option<usize>,
}

impl<H: ItemHandle> PivotLayout<H> {
    pub fn save_state(&self) -> SavedLayoutState {
        SavedLayoutState {
            selected_position: self.pivot_position,
            sub_position: self.sub_position,
            span_focus: self.span_focus.entries(),
            last_span_index: self.span_focus.last_span_index(),
        }
    }

    /// Restores a saved selection. Takes effect on the next layout pass, which reports the restored
    /// selection as a fresh `Selected` event.
    pub fn restore_state(&mut self, state: &SavedLayoutState) {
        self.pivot_position = state.selected_position;
        self.sub_position = state.sub_position;
        self.span_focus
            .restore(&state.span_focus, state.last_span_index);
        self.pending.reset();
        self.selected = None;
        self.aligned = None;
        self.on_reached = None;
        self.needs_layout = true;
        ldebug!(
            position = state.selected_position,
            sub_position = state.sub_position,
            "restored layout state"
        );
    }
}
