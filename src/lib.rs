//! deltagif - Animated GIF encoder with delta-frame transparency
//!
//! This crate writes GIF89a animations from paletted (or RGBA) frames. Each
//! frame is compared with the image already on screen, and pixels that did
//! not change are written as transparent so the decoder keeps the old pixel.
//! The resulting index stream is LZW-compressed and packed into the
//! container's 255-byte data sub-blocks.
//!
//! # Features
//!
//! - Delta encoding against the previously emitted frame
//! - GIF-compatible variable-width LZW with automatic dictionary resets
//! - One shared global palette, index 0 reserved for transparency
//! - Looping animation extension
//! - Streaming output to any `Write` sink
//!
//! # Example
//!
//! ```no_run
//! use deltagif::{GifEncoder, Palette};
//! use std::fs::File;
//!
//! let palette = Palette::new(2, &[[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]])?;
//! let file = File::create("animation.gif")?;
//!
//! let mut encoder = GifEncoder::begin(file, 2, 2, 10, &palette)?;
//! encoder.write_frame(&[1, 2, 3, 1], 2, 2, 10)?;
//! encoder.write_frame(&[1, 2, 3, 2], 2, 2, 10)?;
//! encoder.end()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - In-memory encoding
//!
//! ```
//! use deltagif::{encode_indexed_frames, Palette};
//!
//! let palette = Palette::new(1, &[[0, 0, 0], [255, 255, 255]])?;
//! let gif = encode_indexed_frames(4, 1, 0, &palette, &[[1u8, 1, 1, 1]])?;
//! assert_eq!(&gif[..6], b"GIF89a");
//! # Ok::<(), deltagif::GifError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod encode;
pub mod error;
pub mod palette;
pub mod quantize;

// Re-export commonly used types
pub use common::{
    EncoderOptions, EncoderStats, GifError, Result, MAX_BLOCK_SIZE, MAX_CODE, MAX_CODE_SIZE,
    TRANSPARENT_INDEX,
};
pub use encode::{
    delta_encode, encode_indexed_frames, DeltaFrame, GifEncoder, LzwCompressor, LzwStats,
};
pub use palette::Palette;
pub use quantize::{NearestColor, Quantizer};
