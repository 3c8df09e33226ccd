//! Delta encoding against the previously emitted frame
//!
//! Pixels whose resolved color matches the color already on screen are
//! replaced by the transparency index, so the decoder keeps the old pixel.

use crate::common::{GifError, Result, TRANSPARENT_INDEX};
use crate::palette::Palette;

/// One resolved pixel of a delta frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaPixel {
    /// Color shown on screen after this frame
    pub rgb: [u8; 3],
    /// Palette index to encode, or the transparency index when unchanged
    pub index: u8,
}

impl DeltaPixel {
    /// Whether this pixel is carried over from the previous frame
    pub fn is_unchanged(&self) -> bool {
        self.index == TRANSPARENT_INDEX
    }
}

/// Resolved frame buffer; also serves as the "previous frame" of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaFrame {
    width: u16,
    height: u16,
    pixels: Vec<DeltaPixel>,
}

impl DeltaFrame {
    /// Allocate a blank frame
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![DeltaPixel::default(); width as usize * height as usize],
        }
    }

    /// Frame width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Frame height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resolved pixels in row-major order
    pub fn pixels(&self) -> &[DeltaPixel] {
        &self.pixels
    }

    /// Index channel in row-major order, as fed to the compressor
    pub fn indices(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().map(|pixel| pixel.index)
    }

    /// Number of pixels carried over from the previous frame
    pub fn unchanged_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| pixel.is_unchanged()).count()
    }

    /// Replace this frame with the delta of `next` against its current contents
    ///
    /// With `has_previous` false every pixel is emitted as opaque. The buffer
    /// is updated in place, so afterwards it holds the colors on screen.
    pub fn apply(&mut self, has_previous: bool, next: &[u8], palette: &Palette) -> Result<usize> {
        if next.len() != self.pixels.len() {
            return Err(GifError::BufferLength {
                expected: self.pixels.len(),
                actual: next.len(),
            });
        }
        palette.check_indices(next)?;
        Ok(self.apply_unchecked(has_previous, next, palette))
    }

    /// `apply` for pixels already checked against the frame size and palette
    pub(crate) fn apply_unchecked(
        &mut self,
        has_previous: bool,
        next: &[u8],
        palette: &Palette,
    ) -> usize {
        let colors = palette.colors();
        let mut unchanged = 0;

        for (pixel, &index) in self.pixels.iter_mut().zip(next) {
            let rgb = colors[index as usize];
            if has_previous && pixel.rgb == rgb {
                pixel.index = TRANSPARENT_INDEX;
                unchanged += 1;
            } else {
                *pixel = DeltaPixel { rgb, index };
            }
        }

        unchanged
    }
}

/// Compute the delta frame of `next` against `previous`
///
/// `previous` is `None` for the first frame of an animation.
pub fn delta_encode(
    previous: Option<&DeltaFrame>,
    next: &[u8],
    width: u16,
    height: u16,
    palette: &Palette,
) -> Result<DeltaFrame> {
    let mut frame = match previous {
        Some(previous) => {
            if (previous.width, previous.height) != (width, height) {
                return Err(GifError::DimensionMismatch {
                    expected: (previous.width, previous.height),
                    actual: (width, height),
                });
            }
            previous.clone()
        }
        None => DeltaFrame::new(width, height),
    };
    frame.apply(previous.is_some(), next, palette)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::new(2, &[[0, 0, 0], [255, 0, 0], [0, 255, 0], [255, 0, 0]]).unwrap()
    }

    #[test]
    fn test_first_frame_is_fully_opaque() {
        let frame = delta_encode(None, &[1, 2, 2, 1], 2, 2, &palette()).unwrap();
        assert_eq!(frame.unchanged_count(), 0);
        assert_eq!(frame.indices().collect::<Vec<_>>(), vec![1, 2, 2, 1]);
        assert_eq!(frame.pixels()[1].rgb, [0, 255, 0]);
    }

    #[test]
    fn test_identical_frame_is_fully_transparent() {
        let pal = palette();
        let first = delta_encode(None, &[1, 2, 2, 1], 2, 2, &pal).unwrap();
        let second = delta_encode(Some(&first), &[1, 2, 2, 1], 2, 2, &pal).unwrap();
        assert!(second.indices().all(|index| index == TRANSPARENT_INDEX));
        assert_eq!(second.unchanged_count(), 4);
        // Colors stay resolved so the next frame can diff against them
        assert_eq!(second.pixels()[0].rgb, [255, 0, 0]);
    }

    #[test]
    fn test_changed_pixels_stay_opaque() {
        let pal = palette();
        let first = delta_encode(None, &[1, 1, 1, 1], 2, 2, &pal).unwrap();
        let second = delta_encode(Some(&first), &[1, 2, 1, 2], 2, 2, &pal).unwrap();
        assert_eq!(second.indices().collect::<Vec<_>>(), vec![0, 2, 0, 2]);
    }

    #[test]
    fn test_comparison_uses_resolved_color() {
        // Indices 1 and 3 share a color, so switching between them is a no-op
        let pal = palette();
        let first = delta_encode(None, &[1, 3], 2, 1, &pal).unwrap();
        let second = delta_encode(Some(&first), &[3, 1], 2, 1, &pal).unwrap();
        assert_eq!(second.unchanged_count(), 2);
    }

    #[test]
    fn test_apply_in_place_tracks_screen() {
        let pal = palette();
        let mut screen = DeltaFrame::new(3, 1);
        assert_eq!(screen.apply(false, &[1, 2, 3], &pal).unwrap(), 0);
        assert_eq!(screen.apply(true, &[2, 2, 3], &pal).unwrap(), 2);
        assert_eq!(screen.indices().collect::<Vec<_>>(), vec![2, 0, 0]);
        assert_eq!(screen.pixels()[0].rgb, [0, 255, 0]);
    }

    #[test]
    fn test_unchecked_apply_matches_checked() {
        let pal = palette();
        let mut checked = DeltaFrame::new(2, 2);
        let mut unchecked = DeltaFrame::new(2, 2);
        for (has_previous, frame) in [(false, [1, 2, 3, 1]), (true, [1, 1, 3, 2])] {
            let expected = checked.apply(has_previous, &frame, &pal).unwrap();
            assert_eq!(unchecked.apply_unchecked(has_previous, &frame, &pal), expected);
            assert_eq!(checked, unchecked);
        }
    }

    #[test]
    fn test_errors() {
        let pal = palette();
        assert!(matches!(
            delta_encode(None, &[1, 2, 3], 2, 2, &pal),
            Err(GifError::BufferLength {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            delta_encode(None, &[1, 2, 3, 4], 2, 2, &pal),
            Err(GifError::InvalidPixelIndex { index: 4, .. })
        ));
        let first = delta_encode(None, &[1, 1, 1, 1], 2, 2, &pal).unwrap();
        assert!(matches!(
            delta_encode(Some(&first), &[1, 1, 1, 1], 4, 1, &pal),
            Err(GifError::DimensionMismatch { .. })
        ));
    }
}
