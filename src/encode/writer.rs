//! GifEncoder - Animated GIF encoder session
//!
//! A session writes the container header on `begin`, one delta-encoded frame
//! per `write_frame` call, and the trailer on `end`.

use super::{header, state::EncoderState};
use crate::common::{EncoderOptions, EncoderStats, GifError, Result};
use crate::palette::Palette;
use crate::quantize::{NearestColor, Quantizer};
use std::io::Write;

#[derive(Debug)]
struct Session<W: Write> {
    writer: W,
    state: EncoderState,
}

/// Encoder session writing one animation to a sink
#[derive(Debug)]
pub struct GifEncoder<W: Write> {
    session: Option<Session<W>>,
    stats: EncoderStats,
}

impl<W: Write> GifEncoder<W> {
    /// Open a session and write the container header
    ///
    /// `delay` only decides whether the looping extension is written; each
    /// frame carries its own delay.
    pub fn begin(writer: W, width: u16, height: u16, delay: u16, palette: &Palette) -> Result<Self> {
        Self::begin_with_options(
            writer,
            width,
            height,
            delay,
            palette,
            EncoderOptions::default(),
        )
    }

    /// Open a session with explicit options
    pub fn begin_with_options(
        mut writer: W,
        width: u16,
        height: u16,
        delay: u16,
        palette: &Palette,
        options: EncoderOptions,
    ) -> Result<Self> {
        header::write_screen(&mut writer, width, height, palette)
            .map_err(GifError::SinkUnavailable)?;
        if delay != 0 {
            header::write_loop_extension(&mut writer, options.loop_count)
                .map_err(GifError::SinkUnavailable)?;
        }

        log::debug!(
            "GIF session opened: {}x{}, {}-bit palette, looping: {}",
            width,
            height,
            palette.bit_depth(),
            delay != 0
        );

        Ok(Self {
            session: Some(Session {
                writer,
                state: EncoderState::new(width, height, palette, options),
            }),
            stats: EncoderStats::default(),
        })
    }

    /// Write one frame of palette indices
    ///
    /// Pixels identical on screen to the previous frame are written as
    /// transparent. Nothing is written when validation fails. A sink error
    /// while the frame is being written closes the session without a trailer.
    pub fn write_frame(&mut self, pixels: &[u8], width: u16, height: u16, delay: u16) -> Result<()> {
        let session = self.session.as_mut().ok_or(GifError::SessionNotOpen)?;
        session.state.check_frame(pixels, width, height)?;

        let frame = match session
            .state
            .encode_frame(&mut session.writer, pixels, delay)
        {
            Ok(frame) => frame,
            Err(e) => {
                // The stream is truncated mid-frame, nothing more can follow
                log::debug!("frame write failed, closing session: {}", e);
                self.session = None;
                return Err(e);
            }
        };

        self.stats.frames += 1;
        self.stats.pixels += pixels.len();
        self.stats.transparent_pixels += frame.transparent_pixels;
        self.stats.codes += frame.lzw.codes;
        self.stats.dictionary_resets += frame.lzw.dictionary_resets;
        self.stats.compressed_bytes += frame.compressed_bytes;
        self.stats.blocks += frame.blocks;

        log::debug!(
            "frame {}: {} of {} pixels unchanged, {} bytes in {} blocks",
            self.stats.frames,
            frame.transparent_pixels,
            pixels.len(),
            frame.compressed_bytes,
            frame.blocks
        );

        Ok(())
    }

    /// Write one frame of RGBA pixels, mapped to the palette by nearest color
    pub fn write_frame_rgba(&mut self, rgba: &[u8], width: u16, height: u16, delay: u16) -> Result<()> {
        self.write_frame_rgba_with(&NearestColor, rgba, width, height, delay)
    }

    /// Write one frame of RGBA pixels using a custom quantizer
    pub fn write_frame_rgba_with<Q: Quantizer>(
        &mut self,
        quantizer: &Q,
        rgba: &[u8],
        width: u16,
        height: u16,
        delay: u16,
    ) -> Result<()> {
        let session = self.session.as_ref().ok_or(GifError::SessionNotOpen)?;
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GifError::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }

        let mut indices = Vec::with_capacity(expected / 4);
        quantizer.quantize(rgba, &session.state.palette, &mut indices)?;
        self.write_frame(&indices, width, height, delay)
    }

    /// Write the trailer and close the session, returning the sink
    pub fn end(&mut self) -> Result<W> {
        let mut session = self.session.take().ok_or(GifError::SessionNotOpen)?;
        header::write_trailer(&mut session.writer)?;
        session.writer.flush()?;

        log::debug!(
            "GIF session closed after {} frames, {} compressed bytes",
            self.stats.frames,
            self.stats.compressed_bytes
        );

        Ok(session.writer)
    }

    /// Whether frames can still be written
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Logical screen size of an open session
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        self.session
            .as_ref()
            .map(|session| (session.state.width, session.state.height))
    }

    /// Statistics accumulated so far
    pub fn stats(&self) -> &EncoderStats {
        &self.stats
    }
}

impl<W: Write> Drop for GifEncoder<W> {
    fn drop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            // Try to terminate the file, but ignore errors in drop
            let _ = header::write_trailer(&mut session.writer);
            let _ = session.writer.flush();
        }
    }
}
