//! LZW compression of palette index streams
//!
//! This module implements the variable-width LZW variant used by GIF image
//! data: a clear code opens every dictionary epoch, code width grows by one
//! bit whenever the last assigned code no longer fits, and the dictionary is
//! cleared once code 4095 has been assigned.

use super::{bits::CodeSink, tree::CodeTree};
use crate::common::{GifError, MAX_CODE, MAX_CODE_SIZE};
use crate::Result;

/// Smallest LZW minimum code size the format allows
pub const MIN_LZW_CODE_SIZE: u8 = 2;

/// Per-frame compression statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LzwStats {
    /// Input symbols consumed
    pub symbols: usize,
    /// Codes emitted, including clear and end codes
    pub codes: usize,
    /// Dictionary resets forced by a full code table
    pub dictionary_resets: usize,
}

/// LZW compressor owning a reusable dictionary arena
#[derive(Debug, Clone)]
pub struct LzwCompressor {
    tree: CodeTree,
    min_code_size: u8,
}

impl LzwCompressor {
    /// Create a compressor for indices of a `bit_depth`-bit palette
    pub fn new(bit_depth: u8) -> Self {
        let min_code_size = bit_depth.max(MIN_LZW_CODE_SIZE);
        Self {
            tree: CodeTree::new(1 << min_code_size),
            min_code_size,
        }
    }

    /// Minimum code size byte written before the image data
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }

    /// Code that resets the dictionary
    pub fn clear_code(&self) -> u16 {
        1 << self.min_code_size
    }

    /// Code that terminates the image data
    pub fn end_code(&self) -> u16 {
        self.clear_code() + 1
    }

    /// Compress `symbols` into `sink`
    ///
    /// Every symbol must be below `2^min_code_size`; a larger symbol stops
    /// the stream with `InvalidPixelIndex`.
    pub fn compress<S, I>(&mut self, symbols: I, sink: &mut S) -> Result<LzwStats>
    where
        S: CodeSink,
        I: IntoIterator<Item = u8>,
    {
        let clear_code = self.clear_code();
        let end_code = self.end_code();
        let min_width = self.min_code_size + 1;
        let alphabet = self.tree.alphabet();

        let mut stats = LzwStats::default();
        let mut width = min_width;
        let mut max_code = end_code;
        let mut current: Option<u16> = None;

        self.tree.clear();
        sink.put_code(clear_code, width)?;
        stats.codes += 1;

        for symbol in symbols {
            if symbol as usize >= alphabet {
                return Err(GifError::InvalidPixelIndex {
                    index: symbol,
                    palette_size: alphabet,
                });
            }
            stats.symbols += 1;

            let run = match current {
                None => {
                    current = Some(symbol as u16);
                    continue;
                }
                Some(run) => run,
            };

            if let Some(next) = self.tree.child(run, symbol) {
                current = Some(next);
                continue;
            }

            sink.put_code(run, width)?;
            stats.codes += 1;

            max_code += 1;
            self.tree.insert(run, symbol, max_code);

            if max_code as u32 >= 1u32 << width {
                width += 1;
            }

            if max_code == MAX_CODE {
                sink.put_code(clear_code, width)?;
                stats.codes += 1;
                stats.dictionary_resets += 1;
                log::trace!("LZW dictionary full after {} symbols, reset", stats.symbols);

                self.tree.clear();
                width = min_width;
                max_code = end_code;
            }

            current = Some(symbol as u16);
        }

        if let Some(run) = current {
            sink.put_code(run, width)?;
            stats.codes += 1;

            // Reading the run adds entry `max_code` on the decoder side, which
            // widens its codes before the closing clear when the table fills
            if max_code > end_code
                && max_code as u32 + 1 >= 1u32 << width
                && width < MAX_CODE_SIZE
            {
                width += 1;
            }
        }
        sink.put_code(clear_code, width)?;
        sink.put_code(end_code, min_width)?;
        stats.codes += 2;

        Ok(stats)
    }
}
