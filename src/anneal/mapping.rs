//! Original-index / tour-position bookkeeping.

/// Two mutually inverse permutations relating a vertex's original index
/// (its slot in the point list the spatial index was built from) to its
/// current position in the tour.
///
/// Invariant: `current_to_orig[orig_to_current[i]] == i` for every `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMapping {
    orig_to_current: Vec<usize>,
    current_to_orig: Vec<usize>,
}

impl IndexMapping {
    /// Identity mapping over `n` vertices.
    pub fn identity(n: usize) -> Self {
        Self {
            orig_to_current: (0..n).collect(),
            current_to_orig: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.current_to_orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current_to_orig.is_empty()
    }

    #[inline]
    pub fn to_current(&self, original: usize) -> usize {
        self.orig_to_current[original]
    }

    #[inline]
    pub fn to_original(&self, position: usize) -> usize {
        self.current_to_orig[position]
    }

    pub fn orig_to_current(&self) -> &[usize] {
        &self.orig_to_current
    }

    pub fn current_to_orig(&self) -> &[usize] {
        &self.current_to_orig
    }

    /// Mirrors a tour reversal of positions `begin..=end`.
    ///
    /// O(end - begin): the position slice is flipped, then only the
    /// original indices inside it are rewritten.
    pub fn reverse(&mut self, begin: usize, end: usize) {
        let segment = &mut self.current_to_orig[begin..=end];
        segment.reverse();
        for (offset, &original) in segment.iter().enumerate() {
            self.orig_to_current[original] = begin + offset;
        }
    }

    /// Checks the inverse invariant over every index.
    pub fn is_consistent(&self) -> bool {
        self.orig_to_current.len() == self.current_to_orig.len()
            && self
                .orig_to_current
                .iter()
                .enumerate()
                .all(|(i, &pos)| self.current_to_orig.get(pos) == Some(&i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_consistent() {
        let m = IndexMapping::identity(6);
        assert!(m.is_consistent());
        assert_eq!(m.to_current(3), 3);
        assert_eq!(m.to_original(5), 5);
    }

    #[test]
    fn test_reverse_updates_both_directions() {
        let mut m = IndexMapping::identity(6);
        m.reverse(1, 4);
        assert_eq!(m.current_to_orig(), &[0, 4, 3, 2, 1, 5]);
        assert_eq!(m.orig_to_current(), &[0, 4, 3, 2, 1, 5]);
        m.reverse(0, 2);
        assert_eq!(m.current_to_orig(), &[3, 4, 0, 2, 1, 5]);
        assert_eq!(m.to_current(3), 0);
        assert_eq!(m.to_current(0), 2);
        assert!(m.is_consistent());
    }

    #[test]
    fn test_reverse_twice_restores() {
        let mut m = IndexMapping::identity(8);
        m.reverse(2, 6);
        m.reverse(2, 6);
        assert_eq!(m, IndexMapping::identity(8));
    }
}
