#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

#[cfg(feature = "std")]
pub(crate) type KnownSet<I> = HashSet<I>;
#[cfg(not(feature = "std"))]
pub(crate) type KnownSet<I> = BTreeSet<I>;

/// Bound for grouping identifiers.
///
/// Equality must be a true equivalence relation (reflexive, symmetric, transitive) and stable for
/// the lifetime of the index. Grouping is undefined for identifiers that break this; nothing is
/// validated at runtime.
#[cfg(feature = "std")]
pub trait IdentifierKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<I: core::hash::Hash + Eq + Clone> IdentifierKey for I {}

/// Bound for grouping identifiers.
///
/// Equality must be a true equivalence relation (reflexive, symmetric, transitive) and stable for
/// the lifetime of the index. Grouping is undefined for identifiers that break this; nothing is
/// validated at runtime.
#[cfg(not(feature = "std"))]
pub trait IdentifierKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<I: Ord + Clone> IdentifierKey for I {}
