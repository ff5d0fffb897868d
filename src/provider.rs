use alloc::vec::Vec;

use crate::{LayoutRequest, ProviderError, RecyclerPool};

/// An item detached at the start of a layout pass.
#[derive(Debug)]
pub struct ScrapItem<H> {
    /// Position after the pass's item changes were applied. Removed items keep the position of the
    /// slot they were removed from.
    pub position: usize,
    pub item: H,
    pub removed: bool,
}

/// An item handed out by a [`ViewProvider`].
#[derive(Debug)]
pub struct ProvidedItem<H> {
    pub position: usize,
    pub item: H,
}

/// Supplies items to a fill, one position at a time.
///
/// Contract: `next()` must only be called after `has_next()` returned `true` for the same request.
pub trait ViewProvider {
    type Item;

    fn has_next(&mut self, request: &LayoutRequest) -> bool;

    /// Position `next()` would return, without taking anything.
    fn next_position(&self, request: &LayoutRequest) -> Option<usize>;

    /// Returns the next item and advances the request's cursor past it.
    fn next(
        &mut self,
        request: &mut LayoutRequest,
    ) -> Result<ProvidedItem<Self::Item>, ProviderError>;
}

/// Pulls items from the host's pool, re-using this pass's scrap for exact positions.
pub struct PoolProvider<'a, P: RecyclerPool> {
    pool: &'a mut P,
    scrap: &'a mut Vec<ScrapItem<P::Item>>,
    item_count: usize,
}

impl<'a, P: RecyclerPool> PoolProvider<'a, P> {
    pub fn new(pool: &'a mut P, scrap: &'a mut Vec<ScrapItem<P::Item>>) -> Self {
        let item_count = pool.item_count();
        Self {
            pool,
            scrap,
            item_count,
        }
    }
}

impl<P: RecyclerPool> ViewProvider for PoolProvider<'_, P> {
    type Item = P::Item;

    fn has_next(&mut self, request: &LayoutRequest) -> bool {
        request.position_in(self.item_count).is_some()
    }

    fn next_position(&self, request: &LayoutRequest) -> Option<usize> {
        request.position_in(self.item_count)
    }

    fn next(
        &mut self,
        request: &mut LayoutRequest,
    ) -> Result<ProvidedItem<P::Item>, ProviderError> {
        let next = request.position_in(self.item_count);
        let Some(position) = next else {
            lwarn!(
                position = request.current_position,
                item_count = self.item_count,
                "PoolProvider: next() past the end of the data set"
            );
            debug_assert!(
                next.is_some(),
                "PoolProvider: next() past the end of the data set (position={}, item_count={})",
                request.current_position,
                self.item_count
            );
            return Err(ProviderError::OutOfRange {
                position: request.current_position,
                item_count: self.item_count,
            });
        };

        let reusable = self
            .scrap
            .iter()
            .position(|s| s.position == position && !s.removed);
        let item = match reusable {
            Some(index) => self.scrap.swap_remove(index).item,
            None => self.pool.acquire(position),
        };
        request.advance();
        Ok(ProvidedItem { position, item })
    }
}

/// Re-offers scrap items of the current pass, closest first in the direction of travel.
pub struct ScrapProvider<'a, H> {
    scrap: &'a mut Vec<ScrapItem<H>>,
    matched: Option<usize>,
}

impl<'a, H> ScrapProvider<'a, H> {
    pub fn new(scrap: &'a mut Vec<ScrapItem<H>>) -> Self {
        Self {
            scrap,
            matched: None,
        }
    }

    /// Index of the closest scrap item at or ahead of the cursor. Exact matches win, then the
    /// smallest distance; items behind the cursor are never picked.
    fn closest(&self, request: &LayoutRequest) -> Option<usize> {
        self.scrap
            .iter()
            .enumerate()
            .filter_map(|(index, s)| {
                let position = isize::try_from(s.position).ok()?;
                let distance = (position - request.current_position) * request.item_step;
                (distance >= 0).then_some((distance, index))
            })
            .min()
            .map(|(_, index)| index)
    }
}

impl<H> ViewProvider for ScrapProvider<'_, H> {
    type Item = H;

    fn has_next(&mut self, request: &LayoutRequest) -> bool {
        self.matched = self.closest(request);
        self.matched.is_some()
    }

    fn next_position(&self, request: &LayoutRequest) -> Option<usize> {
        self.closest(request).map(|index| self.scrap[index].position)
    }

    fn next(&mut self, request: &mut LayoutRequest) -> Result<ProvidedItem<H>, ProviderError> {
        let matched = self.matched.take();
        let Some(index) = matched else {
            lwarn!("ScrapProvider: next() called without a successful has_next()");
            debug_assert!(
                matched.is_some(),
                "ScrapProvider: next() called without a successful has_next()"
            );
            return Err(ProviderError::NextWithoutHasNext);
        };
        let scrap = self.scrap.swap_remove(index);
        request.seek(scrap.position);
        request.advance();
        Ok(ProvidedItem {
            position: scrap.position,
            item: scrap.item,
        })
    }
}
