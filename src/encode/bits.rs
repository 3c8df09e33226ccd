//! Bit packing and sub-block chunking for LZW image data
//!
//! Codes are packed least-significant bit first into bytes, and bytes are
//! collected into length-prefixed sub-blocks of at most 255 bytes.

use crate::common::MAX_BLOCK_SIZE;
use crate::Result;
use std::io::Write;

/// Destination for variable-width LZW codes
pub trait CodeSink {
    /// Append `code` using its low `width` bits
    fn put_code(&mut self, code: u16, width: u8) -> Result<()>;
}

/// Bit writer that emits GIF data sub-blocks to an underlying writer
#[derive(Debug)]
pub struct BlockWriter<'a, W: Write> {
    writer: &'a mut W,
    /// Number of bits already placed in `byte`
    bit_index: u8,
    /// Current partial byte
    byte: u8,
    /// Completed bytes waiting for a block flush
    chunk: [u8; MAX_BLOCK_SIZE],
    chunk_len: usize,
    /// Data bytes flushed so far
    bytes_written: usize,
    /// Data blocks flushed so far, not counting the terminator
    blocks_written: usize,
}

impl<'a, W: Write> BlockWriter<'a, W> {
    /// Create a new bit writer
    pub fn new(writer: &'a mut W) -> Self {
        Self {
            writer,
            bit_index: 0,
            byte: 0,
            chunk: [0; MAX_BLOCK_SIZE],
            chunk_len: 0,
            bytes_written: 0,
            blocks_written: 0,
        }
    }

    /// Append a single bit to the partial byte
    ///
    /// A block is flushed as soon as it holds 255 completed bytes.
    pub fn write_bit(&mut self, bit: u32) -> Result<()> {
        self.byte |= ((bit & 1) as u8) << self.bit_index;
        self.bit_index += 1;

        if self.bit_index > 7 {
            self.chunk[self.chunk_len] = self.byte;
            self.chunk_len += 1;
            self.bit_index = 0;
            self.byte = 0;

            if self.chunk_len == MAX_BLOCK_SIZE {
                self.flush_chunk()?;
            }
        }
        Ok(())
    }

    /// Append `length` bits of `code`, least significant first
    pub fn write_code(&mut self, mut code: u32, length: u8) -> Result<()> {
        for _ in 0..length {
            self.write_bit(code)?;
            code >>= 1;
        }
        Ok(())
    }

    /// Write the pending bytes as one length-prefixed block
    fn flush_chunk(&mut self) -> Result<()> {
        self.writer.write_all(&[self.chunk_len as u8])?;
        self.writer.write_all(&self.chunk[..self.chunk_len])?;
        self.bytes_written += self.chunk_len;
        self.blocks_written += 1;
        self.chunk_len = 0;
        Ok(())
    }

    /// Pad the last byte, flush the last block and write the block terminator
    ///
    /// Returns `(data bytes, data blocks)` written by this writer.
    pub fn finish(mut self) -> Result<(usize, usize)> {
        while self.bit_index != 0 {
            self.write_bit(0)?;
        }
        if self.chunk_len > 0 {
            self.flush_chunk()?;
        }
        self.writer.write_all(&[0])?;
        Ok((self.bytes_written, self.blocks_written))
    }
}

impl<W: Write> CodeSink for BlockWriter<'_, W> {
    fn put_code(&mut self, code: u16, width: u8) -> Result<()> {
        self.write_code(code as u32, width)
    }
}
