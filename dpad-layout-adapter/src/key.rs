#[cfg(feature = "std")]
pub trait StateKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq> StateKey for T {}

#[cfg(not(feature = "std"))]
pub trait StateKey: Ord {}
#[cfg(not(feature = "std"))]
impl<T: Ord> StateKey for T {}

#[cfg(feature = "std")]
pub(crate) type StateMap<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type StateMap<K, V> = alloc::collections::BTreeMap<K, V>;
