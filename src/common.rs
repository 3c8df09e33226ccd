//! Common types and constants for the GIF animation encoder
//!
//! This module defines the error type, format constants, and the configuration
//! and statistics structures shared by the encoder pipeline.

use thiserror::Error;

/// Error type for encoder operations
#[derive(Debug, Error)]
pub enum GifError {
    /// The sink rejected the container header in `begin`
    #[error("Output sink unavailable: {0}")]
    SinkUnavailable(#[source] std::io::Error),

    /// Operation on a session that has already been ended
    #[error("Encoder session is not open")]
    SessionNotOpen,

    /// Frame dimensions differ from the session's logical screen
    #[error("Frame dimensions {actual:?} do not match session dimensions {expected:?}")]
    DimensionMismatch {
        /// Session width and height
        expected: (u16, u16),
        /// Width and height passed with the frame
        actual: (u16, u16),
    },

    /// Palette bit depth above 8 or more entries than the depth allows
    #[error("Palette too large: bit depth {bit_depth}, {entries} entries")]
    PaletteTooLarge {
        /// Requested bit depth
        bit_depth: u8,
        /// Number of entries supplied
        entries: usize,
    },

    /// Palette bit depth of zero
    #[error("Invalid palette bit depth: {0} (expected 1..=8)")]
    InvalidBitDepth(u8),

    /// Pixel refers to an entry beyond the palette table
    #[error("Pixel index {index} outside palette of {palette_size} entries")]
    InvalidPixelIndex {
        /// Offending palette index
        index: u8,
        /// Number of palette entries
        palette_size: usize,
    },

    /// Opaque pixel uses the reserved transparency index
    #[error("Pixel {position} uses the reserved transparency index")]
    ReservedIndex {
        /// Pixel offset in the frame
        position: usize,
    },

    /// Pixel buffer length does not match the frame dimensions
    #[error("Pixel buffer length {actual} does not match expected {expected}")]
    BufferLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, GifError>;

// GIF89a format constants

/// File signature and version
pub const GIF_SIGNATURE: &[u8; 6] = b"GIF89a";

/// Application identifier of the looping extension
pub const LOOP_APPLICATION_ID: &[u8; 11] = b"NETSCAPE2.0";

/// Palette index reserved for "pixel unchanged from previous frame"
pub const TRANSPARENT_INDEX: u8 = 0;

/// Maximum palette bit depth
pub const MAX_BIT_DEPTH: u8 = 8;

/// Maximum LZW code width in bits
pub const MAX_CODE_SIZE: u8 = 12;

/// Number of codes addressable at the maximum code width
pub const MAX_CODE_ENTRIES: usize = 1 << MAX_CODE_SIZE as usize;

/// Last assignable code before the dictionary must be cleared
pub const MAX_CODE: u16 = 4095;

/// Maximum data bytes in one sub-block
pub const MAX_BLOCK_SIZE: usize = 255;

/// Extension introducer byte
pub const EXTENSION_INTRODUCER: u8 = 0x21;

/// Application extension label
pub const APPLICATION_LABEL: u8 = 0xFF;

/// Graphics control extension label
pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;

/// Image descriptor separator
pub const IMAGE_SEPARATOR: u8 = 0x2C;

/// Container trailer byte
pub const TRAILER: u8 = 0x3B;

/// Session-level encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Loop count written in the looping extension (0 = forever)
    pub loop_count: u16,
    /// Reject frames that place the transparency index on an opaque pixel
    pub strict_transparency: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            loop_count: 0,
            strict_transparency: true,
        }
    }
}

impl EncoderOptions {
    /// Set the loop count
    pub fn with_loop_count(mut self, loop_count: u16) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Enable or disable the reserved-index check
    pub fn with_strict_transparency(mut self, strict: bool) -> Self {
        self.strict_transparency = strict;
        self
    }
}

/// Statistics accumulated over an encoder session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncoderStats {
    /// Frames written
    pub frames: usize,
    /// Pixels processed across all frames
    pub pixels: usize,
    /// Pixels replaced with the transparency index
    pub transparent_pixels: usize,
    /// LZW codes emitted, including clear and end codes
    pub codes: usize,
    /// Dictionary resets forced by a full code table
    pub dictionary_resets: usize,
    /// Compressed image bytes, excluding block length prefixes
    pub compressed_bytes: usize,
    /// Data sub-blocks written, excluding terminators
    pub blocks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(GIF_SIGNATURE, b"GIF89a");
        assert_eq!(LOOP_APPLICATION_ID.len(), 11);
        assert_eq!(MAX_CODE_ENTRIES, 4096);
        assert_eq!(MAX_CODE as usize, MAX_CODE_ENTRIES - 1);
        assert_eq!(MAX_BLOCK_SIZE, 0xFF);
    }

    #[test]
    fn test_options_builder() {
        let options = EncoderOptions::default()
            .with_loop_count(3)
            .with_strict_transparency(false);
        assert_eq!(options.loop_count, 3);
        assert!(!options.strict_transparency);

        let defaults = EncoderOptions::default();
        assert_eq!(defaults.loop_count, 0);
        assert!(defaults.strict_transparency);
    }

    #[test]
    fn test_error_display() {
        let err = GifError::DimensionMismatch {
            expected: (4, 4),
            actual: (2, 2),
        };
        assert!(err.to_string().contains("(2, 2)"));
        assert_eq!(
            GifError::SessionNotOpen.to_string(),
            "Encoder session is not open"
        );
    }
}
