//! Mapping of RGBA pixels onto an existing palette
//!
//! Picking the palette itself is left to the caller. A [`Quantizer`] only
//! decides which entry of a given palette each pixel uses, and must never
//! choose the transparency slot.

use crate::common::{GifError, Result, TRANSPARENT_INDEX};
use crate::palette::Palette;
use std::collections::HashMap;

/// Maps 32-bit pixels to palette indices
pub trait Quantizer {
    /// Append one index per 4-byte pixel of `rgba` to `out`
    fn quantize(&self, rgba: &[u8], palette: &Palette, out: &mut Vec<u8>) -> Result<()>;
}

/// Exhaustive nearest-color search by squared RGB distance; alpha is ignored
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestColor;

impl NearestColor {
    fn nearest(palette: &Palette, rgb: [u8; 3]) -> u8 {
        let mut best = (u32::MAX, TRANSPARENT_INDEX + 1);
        for (index, color) in palette.colors().iter().enumerate() {
            if index == TRANSPARENT_INDEX as usize {
                continue;
            }
            let distance: u32 = color
                .iter()
                .zip(rgb)
                .map(|(&a, b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum();
            if distance < best.0 {
                best = (distance, index as u8);
                if distance == 0 {
                    break;
                }
            }
        }
        best.1
    }
}

impl Quantizer for NearestColor {
    fn quantize(&self, rgba: &[u8], palette: &Palette, out: &mut Vec<u8>) -> Result<()> {
        if rgba.len() % 4 != 0 {
            return Err(GifError::BufferLength {
                expected: rgba.len() - rgba.len() % 4,
                actual: rgba.len(),
            });
        }

        // Frames tend to reuse few distinct colors
        let mut cache: HashMap<[u8; 3], u8> = HashMap::new();
        out.reserve(rgba.len() / 4);
        for pixel in rgba.chunks_exact(4) {
            let rgb = [pixel[0], pixel[1], pixel[2]];
            let index = *cache
                .entry(rgb)
                .or_insert_with(|| Self::nearest(palette, rgb));
            out.push(index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::new(2, &[[0, 0, 0], [250, 0, 0], [0, 0, 250], [10, 10, 10]]).unwrap()
    }

    #[test]
    fn test_exact_and_nearest_matches() {
        let mut out = Vec::new();
        let rgba = [
            250, 0, 0, 255, // exact red
            0, 0, 200, 255, // near blue
            12, 9, 11, 0, // near dark grey, alpha ignored
        ];
        NearestColor.quantize(&rgba, &palette(), &mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_never_picks_transparent_slot() {
        let mut out = Vec::new();
        NearestColor
            .quantize(&[0, 0, 0, 255], &palette(), &mut out)
            .unwrap();
        assert_eq!(out, vec![3]);
    }

    #[test]
    fn test_rejects_partial_pixel() {
        let mut out = Vec::new();
        assert!(matches!(
            NearestColor.quantize(&[1, 2, 3], &palette(), &mut out),
            Err(GifError::BufferLength { .. })
        ));
    }
}
