#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Span group -> remembered span index.
#[cfg(feature = "std")]
pub(crate) type SpanIndexMap = HashMap<usize, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type SpanIndexMap = BTreeMap<usize, usize>;
