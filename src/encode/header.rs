//! Fixed-field container blocks
//!
//! Every multi-byte field is a little-endian u16.

use crate::common::{
    APPLICATION_LABEL, EXTENSION_INTRODUCER, GIF_SIGNATURE, GRAPHIC_CONTROL_LABEL,
    IMAGE_SEPARATOR, LOOP_APPLICATION_ID, TRAILER, TRANSPARENT_INDEX,
};
use crate::palette::Palette;
use std::io::{self, Write};

/// Signature, logical screen descriptor and global color table
pub fn write_screen<W: Write>(
    writer: &mut W,
    width: u16,
    height: u16,
    palette: &Palette,
) -> io::Result<()> {
    writer.write_all(GIF_SIGNATURE)?;
    writer.write_all(&width.to_le_bytes())?;
    writer.write_all(&height.to_le_bytes())?;
    // global table present, color resolution 8 bits, table size
    writer.write_all(&[0xF0 | (palette.bit_depth() - 1), 0, 0])?;
    writer.write_all(&palette.table_bytes())
}

/// Looping animation application extension
pub fn write_loop_extension<W: Write>(writer: &mut W, loop_count: u16) -> io::Result<()> {
    writer.write_all(&[EXTENSION_INTRODUCER, APPLICATION_LABEL, 11])?;
    writer.write_all(LOOP_APPLICATION_ID)?;
    writer.write_all(&[3, 1])?;
    writer.write_all(&loop_count.to_le_bytes())?;
    writer.write_all(&[0])
}

/// Graphics control extension: leave frame in place, transparency enabled
pub fn write_graphic_control<W: Write>(writer: &mut W, delay: u16) -> io::Result<()> {
    writer.write_all(&[EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, 4, 0x05])?;
    writer.write_all(&delay.to_le_bytes())?;
    writer.write_all(&[TRANSPARENT_INDEX, 0])
}

/// Image descriptor without a local color table
pub fn write_image_descriptor<W: Write>(
    writer: &mut W,
    left: u16,
    top: u16,
    width: u16,
    height: u16,
) -> io::Result<()> {
    writer.write_all(&[IMAGE_SEPARATOR])?;
    for field in [left, top, width, height] {
        writer.write_all(&field.to_le_bytes())?;
    }
    writer.write_all(&[0])
}

/// Container trailer
pub fn write_trailer<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.write_all(&[TRAILER])
}
