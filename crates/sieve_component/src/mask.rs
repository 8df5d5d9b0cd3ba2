//! Per-entity membership masks.
//!
//! A [`ComponentMask`] records which component types an entity currently
//! holds: bit `i` is set iff the entity has a component of
//! `ComponentIndex(i)`. Masks are backed by a [`FixedBitSet`] that grows on
//! demand, so there is no cap on the number of registered component types.

use fixedbitset::FixedBitSet;

use crate::registry::ComponentIndex;

/// Bit-set of [`ComponentIndex`]es.
#[derive(Debug, Clone, Default)]
pub struct ComponentMask {
    bits: FixedBitSet,
}

impl ComponentMask {
    /// The empty mask.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mask pre-sized for `len` component types.
    #[must_use]
    pub fn with_capacity(len: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(len),
        }
    }

    /// Builds a mask with exactly the given indices set.
    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = ComponentIndex>) -> Self {
        let mut mask = Self::new();
        for index in indices {
            mask.insert(index);
        }
        mask
    }

    /// Sets the bit for `index`, growing the mask if needed.
    pub fn insert(&mut self, index: ComponentIndex) {
        let bit = index.as_usize();
        if bit >= self.bits.len() {
            self.bits.grow(bit + 1);
        }
        self.bits.insert(bit);
    }

    /// Clears the bit for `index`. Clearing an unset bit is a no-op.
    pub fn remove(&mut self, index: ComponentIndex) {
        let bit = index.as_usize();
        if bit < self.bits.len() {
            self.bits.set(bit, false);
        }
    }

    #[must_use]
    pub fn contains(&self, index: ComponentIndex) -> bool {
        self.bits.contains(index.as_usize())
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    #[must_use]
    pub fn contains_all(&self, other: &ComponentMask) -> bool {
        self.bits.is_superset(&other.bits)
    }

    /// Returns `true` if `self` and `other` share at least one set bit.
    #[must_use]
    pub fn intersects(&self, other: &ComponentMask) -> bool {
        !self.bits.is_disjoint(&other.bits)
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterates set indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = ComponentIndex> + '_ {
        self.bits.ones().map(|bit| ComponentIndex(bit as u32))
    }
}

/// Masks compare by their set bits, regardless of how far each has grown.
impl PartialEq for ComponentMask {
    fn eq(&self, other: &Self) -> bool {
        self.indices().eq(other.indices())
    }
}

impl Eq for ComponentMask {}

impl FromIterator<ComponentIndex> for ComponentMask {
    fn from_iter<I: IntoIterator<Item = ComponentIndex>>(iter: I) -> Self {
        Self::from_indices(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(bits: &[u32]) -> ComponentMask {
        bits.iter().map(|&b| ComponentIndex(b)).collect()
    }

    #[test]
    fn test_insert_grows_and_remove_clears() {
        let mut m = ComponentMask::new();
        assert!(m.is_empty());
        m.insert(ComponentIndex(70));
        assert!(m.contains(ComponentIndex(70)));
        assert!(!m.contains(ComponentIndex(3)));
        assert_eq!(m.count(), 1);

        m.remove(ComponentIndex(70));
        m.remove(ComponentIndex(500));
        assert!(m.is_empty());
    }

    #[test]
    fn test_insert_twice_keeps_one_bit() {
        let mut m = ComponentMask::new();
        m.insert(ComponentIndex(2));
        m.insert(ComponentIndex(2));
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn test_contains_all_is_superset_test() {
        let entity = mask(&[0, 1, 4]);
        assert!(entity.contains_all(&mask(&[0, 1])));
        assert!(entity.contains_all(&mask(&[4])));
        assert!(entity.contains_all(&ComponentMask::new()));
        assert!(!entity.contains_all(&mask(&[0, 2])));
        // A required bit beyond the entity's current width.
        assert!(!entity.contains_all(&mask(&[0, 130])));
    }

    #[test]
    fn test_intersects() {
        assert!(mask(&[1, 5]).intersects(&mask(&[5, 9])));
        assert!(!mask(&[1, 5]).intersects(&mask(&[2, 99])));
        assert!(!mask(&[1]).intersects(&ComponentMask::new()));
    }

    #[test]
    fn test_equality_ignores_width() {
        let mut wide = ComponentMask::with_capacity(256);
        wide.insert(ComponentIndex(3));
        assert_eq!(wide, mask(&[3]));
        assert_ne!(wide, mask(&[3, 4]));
    }

    #[test]
    fn test_indices_ascending() {
        let m = mask(&[9, 0, 64]);
        let got: Vec<_> = m.indices().map(|i| i.0).collect();
        assert_eq!(got, vec![0, 9, 64]);
    }
}
