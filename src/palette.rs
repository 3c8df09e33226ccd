//! Color palette shared by every frame of an animation

use crate::common::{GifError, Result, MAX_BIT_DEPTH, TRANSPARENT_INDEX};

/// RGB color table with a power-of-two size
///
/// Entry 0 is the transparency slot. It is resolved like any other entry
/// during delta encoding, but is always written as black in the global
/// color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    bit_depth: u8,
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Create a palette of `2^bit_depth` entries
    ///
    /// Missing trailing entries are filled with black.
    pub fn new(bit_depth: u8, colors: &[[u8; 3]]) -> Result<Self> {
        if bit_depth == 0 {
            return Err(GifError::InvalidBitDepth(bit_depth));
        }
        if bit_depth > MAX_BIT_DEPTH || colors.len() > 1usize << bit_depth {
            return Err(GifError::PaletteTooLarge {
                bit_depth,
                entries: colors.len(),
            });
        }

        let mut table = vec![[0u8; 3]; 1 << bit_depth];
        table[..colors.len()].copy_from_slice(colors);

        Ok(Self {
            bit_depth,
            colors: table,
        })
    }

    /// Create a palette from packed RGB triples
    pub fn from_rgb_bytes(bit_depth: u8, rgb: &[u8]) -> Result<Self> {
        if rgb.len() % 3 != 0 {
            return Err(GifError::BufferLength {
                expected: rgb.len() - rgb.len() % 3,
                actual: rgb.len(),
            });
        }
        let colors: Vec<[u8; 3]> = rgb.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(bit_depth, &colors)
    }

    /// Create the smallest palette that holds `colors` after the transparency slot
    pub fn with_transparent_slot(colors: &[[u8; 3]]) -> Result<Self> {
        let needed = colors.len() + 1;
        let bit_depth = (1..=MAX_BIT_DEPTH)
            .find(|&depth| 1usize << depth >= needed)
            .ok_or(GifError::PaletteTooLarge {
                bit_depth: MAX_BIT_DEPTH + 1,
                entries: needed,
            })?;

        let mut table = Vec::with_capacity(needed);
        table.push([0, 0, 0]);
        table.extend_from_slice(colors);
        Self::new(bit_depth, &table)
    }

    /// Bit depth (log2 of the table size)
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least two entries
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Resolve an index to its color
    pub fn color(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(index as usize).copied()
    }

    /// All entries, transparency slot included
    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// Table bytes as stored in the container, with the transparency slot blacked out
    pub fn table_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.colors.len() * 3);
        for (index, color) in self.colors.iter().enumerate() {
            if index == TRANSPARENT_INDEX as usize {
                bytes.extend_from_slice(&[0, 0, 0]);
            } else {
                bytes.extend_from_slice(color);
            }
        }
        bytes
    }

    /// Check that every index in `pixels` addresses the table
    pub(crate) fn check_indices(&self, pixels: &[u8]) -> Result<()> {
        let size = self.colors.len();
        if size > u8::MAX as usize {
            return Ok(());
        }
        match pixels.iter().find(|&&index| index as usize >= size) {
            Some(&index) => Err(GifError::InvalidPixelIndex {
                index,
                palette_size: size,
            }),
            None => Ok(()),
        }
    }
}
