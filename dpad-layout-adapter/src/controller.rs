use dpad_layout::{
    ConfigError, FocusDirection, ItemHandle, LayoutOptions, PivotLayout, RecyclerPool,
};

use crate::{Easing, Tween};

/// A framework-neutral controller that wraps a [`PivotLayout`] and animates its scrolling.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `navigate` / `select` when directional input or a programmatic selection arrives
/// - `tick(now_ms, pool)` each frame/timer tick while `is_animating()`
///
/// Smooth selections only move the pivot; the controller then tweens the content toward the
/// keyline and follows the pivot when queued moves advance it mid-animation.
#[derive(Debug)]
pub struct Controller<H> {
    layout: PivotLayout<H>,
    tween: Option<Tween>,
    /// Content scrolled since the controller was created, in the tween's coordinate space.
    scrolled: i64,
    duration_ms: u64,
    easing: Easing,
}

impl<H: ItemHandle> Controller<H> {
    pub fn new(options: LayoutOptions) -> Result<Self, ConfigError> {
        Ok(Self::from_layout(PivotLayout::new(options)?))
    }

    pub fn from_layout(layout: PivotLayout<H>) -> Self {
        Self {
            layout,
            tween: None,
            scrolled: 0,
            duration_ms: 200,
            easing: Easing::default(),
        }
    }

    pub fn with_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.set_animation(duration_ms, easing);
        self
    }

    pub fn set_animation(&mut self, duration_ms: u64, easing: Easing) {
        self.duration_ms = duration_ms.max(1);
        self.easing = easing;
    }

    pub fn layout(&self) -> &PivotLayout<H> {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut PivotLayout<H> {
        &mut self.layout
    }

    pub fn into_layout(self) -> PivotLayout<H> {
        self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Total content offset applied through this controller.
    pub fn scrolled(&self) -> i64 {
        self.scrolled
    }

    pub fn on_viewport_size<P>(&mut self, width: i32, height: i32, pool: &mut P)
    where
        P: RecyclerPool<Item = H>,
    {
        self.cancel_animation();
        self.layout.set_viewport(width, height);
        self.layout.relayout(pool);
    }

    /// Moves the selection and starts (or retargets) the scroll animation.
    pub fn navigate<P>(&mut self, direction: FocusDirection, now_ms: u64, pool: &mut P) -> bool
    where
        P: RecyclerPool<Item = H>,
    {
        let moved = self.layout.navigate(direction, true, pool);
        self.follow_selection(now_ms);
        moved
    }

    /// Selects `position` and animates toward it when it is laid out; otherwise jumps.
    pub fn select<P>(&mut self, position: usize, now_ms: u64, pool: &mut P)
    where
        P: RecyclerPool<Item = H>,
    {
        self.layout.set_selected_position(position, true, pool);
        self.follow_selection(now_ms);
    }

    /// Selects `position` without animating.
    pub fn jump_to<P>(&mut self, position: usize, pool: &mut P)
    where
        P: RecyclerPool<Item = H>,
    {
        self.cancel_animation();
        self.layout.set_selected_position(position, false, pool);
    }

    /// Applies a user-driven scroll. This cancels any active tween.
    ///
    /// Returns the consumed part of `delta`.
    pub fn on_scroll<P>(&mut self, delta: i32, pool: &mut P) -> i32
    where
        P: RecyclerPool<Item = H>,
    {
        self.cancel_animation();
        let consumed = self.layout.scroll_by(delta, pool);
        self.scrolled += i64::from(consumed);
        consumed
    }

    fn follow_selection(&mut self, now_ms: u64) {
        match self.layout.alignment_delta() {
            Some(delta) if delta != 0 => {
                let to = self.scrolled + i64::from(delta);
                match &mut self.tween {
                    Some(tween) if tween.to == to => {}
                    Some(tween) => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(
                            target: "dpad_layout_adapter",
                            from = tween.to,
                            to,
                            "retarget tween"
                        );
                        tween.retarget(now_ms, to, self.duration_ms);
                    }
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(
                            target: "dpad_layout_adapter",
                            from = self.scrolled,
                            to,
                            "start tween"
                        );
                        self.tween = Some(Tween::new(
                            self.scrolled,
                            to,
                            now_ms,
                            self.duration_ms,
                            self.easing,
                        ));
                    }
                }
            }
            _ => {
                self.tween = None;
                self.layout.finish_alignment();
            }
        }
    }

    /// Advances the animation.
    ///
    /// Returns `true` while the controller still needs ticks.
    pub fn tick<P>(&mut self, now_ms: u64, pool: &mut P) -> bool
    where
        P: RecyclerPool<Item = H>,
    {
        let Some(tween) = self.tween else {
            return false;
        };

        let target = tween.sample(now_ms);
        let step = i32::try_from(target - self.scrolled).unwrap_or(if target > self.scrolled {
            i32::MAX
        } else {
            i32::MIN
        });
        if step != 0 {
            let consumed = self.layout.scroll_by(step, pool);
            self.scrolled += i64::from(consumed);
        }

        if tween.is_done(now_ms) {
            if let Some(delta) = self.layout.alignment_delta() {
                if delta != 0 {
                    let consumed = self.layout.scroll_by(delta, pool);
                    self.scrolled += i64::from(consumed);
                }
            }
            self.tween = None;
        }

        // Queued moves may have advanced the pivot while scrolling.
        if self.layout.alignment_delta().is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "dpad_layout_adapter", "selection detached; relayout");
            self.tween = None;
            self.layout.relayout(pool);
            return false;
        }
        self.follow_selection(now_ms);
        self.tween.is_some()
    }
}
