//! Property-based tests for the GIF animation encoder
//!
//! These tests use randomized frames and palettes to verify that encoded
//! animations always decode back to the frames that were written.

use deltagif::encode::BlockWriter;
use deltagif::{encode_indexed_frames, LzwCompressor, Palette, TRANSPARENT_INDEX};
use proptest::prelude::*;

/// Strategy: bit depth, dimensions and 1..4 frames of valid opaque indices
fn animation() -> impl Strategy<Value = (u8, u16, u16, Vec<Vec<u8>>)> {
    (1u8..=8, 1u16..24, 1u16..24).prop_flat_map(|(bit_depth, width, height)| {
        let len = width as usize * height as usize;
        let max_index = ((1u16 << bit_depth) - 1) as u8;
        let frame = prop::collection::vec(1..=max_index, len);
        (
            Just(bit_depth),
            Just(width),
            Just(height),
            prop::collection::vec(frame, 1..4),
        )
    })
}

fn distinct_palette(bit_depth: u8) -> Palette {
    let colors: Vec<[u8; 3]> = (0..1usize << bit_depth)
        .map(|i| [i as u8, (i * 7) as u8, 255 - i as u8])
        .collect();
    Palette::new(bit_depth, &colors).unwrap()
}

fn decode_indexed(data: &[u8]) -> Vec<(Option<u8>, Vec<u8>)> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(data).unwrap();
    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        frames.push((frame.transparent, frame.buffer.to_vec()));
    }
    frames
}

proptest! {
    #[test]
    fn test_animation_round_trip((bit_depth, width, height, frames) in animation()) {
        let palette = distinct_palette(bit_depth);
        let data = encode_indexed_frames(width, height, 5, &palette, &frames).unwrap();
        let decoded = decode_indexed(&data);
        prop_assert_eq!(decoded.len(), frames.len());

        let mut screen = vec![TRANSPARENT_INDEX; width as usize * height as usize];
        for (expected, (transparent, buffer)) in frames.iter().zip(&decoded) {
            for (pixel, &index) in screen.iter_mut().zip(buffer) {
                if Some(index) != *transparent {
                    *pixel = index;
                }
            }
            prop_assert_eq!(&screen, expected);
        }
    }
}

proptest! {
    #[test]
    fn test_first_frame_has_no_transparency((bit_depth, width, height, frames) in animation()) {
        let palette = distinct_palette(bit_depth);
        let data = encode_indexed_frames(width, height, 0, &palette, &frames[..1]).unwrap();
        let decoded = decode_indexed(&data);
        prop_assert!(decoded[0].1.iter().all(|&index| index != TRANSPARENT_INDEX));
    }
}

/// Strategy: bit depth and an index stream, either random or one long run
fn lzw_input() -> impl Strategy<Value = (u8, Vec<u8>)> {
    let mixed = (1u8..=8, prop::collection::vec(any::<u8>(), 0..6000));
    let run = (1u8..=8, any::<u8>(), 2usize..200)
        .prop_map(|(bit_depth, symbol, len)| (bit_depth, vec![symbol; len]));
    prop_oneof![mixed, run].prop_map(|(bit_depth, raw)| {
        let mask = ((1u16 << bit_depth) - 1) as u8;
        (bit_depth, raw.iter().map(|&b| b & mask).collect())
    })
}

proptest! {
    #[test]
    fn test_lzw_stream_decodes((bit_depth, symbols) in lzw_input()) {

        let mut compressor = LzwCompressor::new(bit_depth);
        let mut blocks = Vec::new();
        {
            let mut writer = BlockWriter::new(&mut blocks);
            compressor.compress(symbols.iter().copied(), &mut writer).unwrap();
            writer.finish().unwrap();
        }

        let mut data = Vec::new();
        let mut rest = &blocks[..];
        while rest[0] != 0 {
            let len = rest[0] as usize;
            prop_assert!(len <= 255);
            data.extend_from_slice(&rest[1..=len]);
            rest = &rest[len + 1..];
        }
        prop_assert_eq!(rest.len(), 1);

        let decoded = weezl::decode::Decoder::new(weezl::BitOrder::Lsb, compressor.min_code_size())
            .decode(&data)
            .unwrap();
        prop_assert_eq!(decoded, symbols);
    }
}

proptest! {
    #[test]
    fn test_encoding_deterministic((bit_depth, width, height, frames) in animation()) {
        let palette = distinct_palette(bit_depth);
        let first = encode_indexed_frames(width, height, 3, &palette, &frames).unwrap();
        let second = encode_indexed_frames(width, height, 3, &palette, &frames).unwrap();
        prop_assert_eq!(first, second);
    }
}
