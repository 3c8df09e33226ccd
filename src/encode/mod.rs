//! GIF animation encoding pipeline
//!
//! Frames flow through the delta encoder, the LZW compressor and the bit
//! writer, framed by the fixed-field blocks of the container format.

pub mod bits;
pub mod delta;
pub mod header;
pub mod lzw;
mod state;
mod tree;
mod writer;

pub use bits::{BlockWriter, CodeSink};
pub use delta::{delta_encode, DeltaFrame, DeltaPixel};
pub use lzw::{LzwCompressor, LzwStats, MIN_LZW_CODE_SIZE};
pub use writer::GifEncoder;

use crate::{Palette, Result};

/// Convenience function to encode a whole animation in memory
///
/// Every frame is `width * height` palette indices and shares `delay`.
pub fn encode_indexed_frames<F: AsRef<[u8]>>(
    width: u16,
    height: u16,
    delay: u16,
    palette: &Palette,
    frames: &[F],
) -> Result<Vec<u8>> {
    let mut encoder = GifEncoder::begin(Vec::new(), width, height, delay, palette)?;
    for frame in frames {
        encoder.write_frame(frame.as_ref(), width, height, delay)?;
    }
    encoder.end()
}
