//! Per-session encoder state
//!
//! Holds everything an open session owns across frames: the palette copy,
//! the previous-frame buffer used for delta comparison, and the LZW
//! dictionary arena reused by every frame.

use super::{bits::BlockWriter, delta::DeltaFrame, header, lzw::LzwCompressor, lzw::LzwStats};
use crate::common::{EncoderOptions, GifError, Result, TRANSPARENT_INDEX};
use crate::palette::Palette;
use std::io::Write;

/// Result of encoding one frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameStats {
    /// Pixels carried over from the previous frame
    pub(crate) transparent_pixels: usize,
    /// Compressor statistics
    pub(crate) lzw: LzwStats,
    /// Compressed bytes, excluding block length prefixes
    pub(crate) compressed_bytes: usize,
    /// Data sub-blocks written
    pub(crate) blocks: usize,
}

/// Owned state of an open encoder session
#[derive(Debug)]
pub(crate) struct EncoderState {
    /// Logical screen width
    pub(crate) width: u16,
    /// Logical screen height
    pub(crate) height: u16,
    /// Palette shared by every frame
    pub(crate) palette: Palette,
    /// Colors currently on screen
    pub(crate) previous: DeltaFrame,
    /// No frame has been written yet
    pub(crate) first_frame: bool,
    /// Session configuration
    pub(crate) options: EncoderOptions,
    compressor: LzwCompressor,
}

impl EncoderState {
    /// Create the state for a `width` x `height` animation
    pub(crate) fn new(width: u16, height: u16, palette: &Palette, options: EncoderOptions) -> Self {
        Self {
            width,
            height,
            palette: palette.clone(),
            previous: DeltaFrame::new(width, height),
            first_frame: true,
            options,
            compressor: LzwCompressor::new(palette.bit_depth()),
        }
    }

    /// Validate an indexed frame against the session
    pub(crate) fn check_frame(&self, pixels: &[u8], width: u16, height: u16) -> Result<()> {
        if (width, height) != (self.width, self.height) {
            return Err(GifError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (width, height),
            });
        }

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(GifError::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }

        if self.options.strict_transparency {
            if let Some(position) = pixels.iter().position(|&i| i == TRANSPARENT_INDEX) {
                return Err(GifError::ReservedIndex { position });
            }
        }

        self.palette.check_indices(pixels)
    }

    /// Delta-encode `pixels` and write the frame blocks
    ///
    /// The frame must already have passed `check_frame`.
    pub(crate) fn encode_frame<W: Write>(
        &mut self,
        writer: &mut W,
        pixels: &[u8],
        delay: u16,
    ) -> Result<FrameStats> {
        let transparent_pixels =
            self.previous.apply_unchecked(!self.first_frame, pixels, &self.palette);
        self.first_frame = false;

        header::write_graphic_control(writer, delay)?;
        header::write_image_descriptor(writer, 0, 0, self.width, self.height)?;
        writer.write_all(&[self.compressor.min_code_size()])?;

        let mut blocks = BlockWriter::new(writer);
        let lzw = self.compressor.compress(self.previous.indices(), &mut blocks)?;
        let (compressed_bytes, blocks) = blocks.finish()?;

        Ok(FrameStats {
            transparent_pixels,
            lzw,
            compressed_bytes,
            blocks,
        })
    }
}
