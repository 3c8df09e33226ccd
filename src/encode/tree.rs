//! LZW dictionary arena
//!
//! The dictionary is a tree keyed by `(code, symbol)`. Each node owns one
//! link per alphabet symbol, stored in a flat arena where the node's code is
//! its index. A link value of 0 means "no child": code 0 is a root symbol
//! and can never be assigned as a child, so it doubles as the empty marker.

use crate::common::MAX_CODE_ENTRIES;

/// Flat-array code tree sized for the full 12-bit code space
#[derive(Debug, Clone)]
pub(crate) struct CodeTree {
    /// Alphabet size (links per node)
    alphabet: usize,
    /// `links[code * alphabet + symbol]` holds the child code
    links: Vec<u16>,
}

impl CodeTree {
    /// Create an empty tree for an alphabet of `alphabet` symbols
    pub(crate) fn new(alphabet: usize) -> Self {
        Self {
            alphabet,
            links: vec![0; alphabet * MAX_CODE_ENTRIES],
        }
    }

    /// Alphabet size this tree was built for
    pub(crate) fn alphabet(&self) -> usize {
        self.alphabet
    }

    /// Look up the code for `code` extended by `symbol`
    #[inline]
    pub(crate) fn child(&self, code: u16, symbol: u8) -> Option<u16> {
        match self.links[code as usize * self.alphabet + symbol as usize] {
            0 => None,
            next => Some(next),
        }
    }

    /// Record that `code` extended by `symbol` is `next`
    #[inline]
    pub(crate) fn insert(&mut self, code: u16, symbol: u8, next: u16) {
        self.links[code as usize * self.alphabet + symbol as usize] = next;
    }

    /// Drop every entry
    pub(crate) fn clear(&mut self) {
        self.links.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = CodeTree::new(4);
        assert_eq!(tree.child(1, 2), None);

        tree.insert(1, 2, 6);
        tree.insert(6, 3, 7);
        assert_eq!(tree.child(1, 2), Some(6));
        assert_eq!(tree.child(6, 3), Some(7));
        assert_eq!(tree.child(2, 1), None);
    }

    #[test]
    fn test_clear_resets_all_links() {
        let mut tree = CodeTree::new(256);
        tree.insert(4095, 255, 4000);
        tree.insert(0, 0, 258);
        tree.clear();
        assert_eq!(tree.child(4095, 255), None);
        assert_eq!(tree.child(0, 0), None);
        assert_eq!(tree.alphabet(), 256);
    }
}
