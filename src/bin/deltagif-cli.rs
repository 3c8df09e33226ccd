//! deltagif-cli - Command-line interface for deltagif
//!
//! A command-line tool for assembling animated GIFs from raw frame files and
//! inspecting the block structure of existing GIFs.

use clap::{Parser, Subcommand};
use deltagif::{EncoderOptions, GifEncoder, Palette};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "deltagif-cli")]
#[command(about = "A CLI tool for encoding and inspecting animated GIFs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode raw frames into an animated GIF
    Encode {
        /// Output GIF file
        output: PathBuf,

        /// Raw frame files, one palette index (or RGBA quad) per pixel
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Frame width in pixels
        #[arg(long)]
        width: u16,

        /// Frame height in pixels
        #[arg(long)]
        height: u16,

        /// Palette file of packed RGB triples; entry 0 is the transparency slot
        #[arg(short, long)]
        palette: PathBuf,

        /// Frame delay in hundredths of a second (0 writes a still image)
        #[arg(short, long, default_value_t = 10)]
        delay: u16,

        /// Number of loops (0 = forever)
        #[arg(long, default_value_t = 0)]
        loop_count: u16,

        /// Frames are RGBA and are mapped to the palette by nearest color
        #[arg(long)]
        rgba: bool,

        /// Accept palette index 0 in indexed frames
        #[arg(long)]
        lenient: bool,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a GIF file
    Info {
        /// GIF file to analyze
        input: PathBuf,
    },
}

/// Settings for one `encode` run
struct EncodeJob<'a> {
    output: &'a Path,
    frames: &'a [PathBuf],
    width: u16,
    height: u16,
    palette: &'a Path,
    delay: u16,
    options: EncoderOptions,
    rgba: bool,
    force: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = match &cli.command {
        Commands::Encode {
            output,
            frames,
            width,
            height,
            palette,
            delay,
            loop_count,
            rgba,
            lenient,
            force,
        } => encode_file(
            &EncodeJob {
                output,
                frames,
                width: *width,
                height: *height,
                palette,
                delay: *delay,
                options: EncoderOptions::default()
                    .with_loop_count(*loop_count)
                    .with_strict_transparency(!*lenient),
                rgba: *rgba,
                force: *force,
            },
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { input } => show_file_info(input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Smallest bit depth whose table holds `entries` colors
fn bit_depth_for(entries: usize) -> u8 {
    (1..=8u8).find(|&depth| 1usize << depth >= entries).unwrap_or(8)
}

fn load_palette(path: &Path) -> Result<Palette, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() || bytes.len() % 3 != 0 {
        return Err(format!(
            "Palette file '{}' must hold packed RGB triples ({} bytes)",
            path.display(),
            bytes.len()
        )
        .into());
    }
    Ok(Palette::from_rgb_bytes(bit_depth_for(bytes.len() / 3), &bytes)?)
}

fn encode_file(
    job: &EncodeJob<'_>,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Check if output file exists and force flag
    if job.output.exists() && !job.force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            job.output.display()
        )
        .into());
    }

    let palette = load_palette(job.palette)?;

    if verbose {
        println!(
            "Encoding {} frames to '{}'",
            job.frames.len(),
            job.output.display()
        );
        println!(
            "Size: {}x{}, Palette: {} entries ({} bits), Delay: {}",
            job.width,
            job.height,
            palette.len(),
            palette.bit_depth(),
            job.delay
        );
    }

    let start_time = Instant::now();

    // Show progress bar for longer animations
    let progress = if !quiet && job.frames.len() > 16 {
        let pb = ProgressBar::new(job.frames.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("Encoding...");
        Some(pb)
    } else {
        None
    };

    let sink = BufWriter::new(File::create(job.output)?);
    let mut encoder = GifEncoder::begin_with_options(
        sink,
        job.width,
        job.height,
        job.delay,
        &palette,
        job.options,
    )?;

    for path in job.frames {
        let pixels = fs::read(path)
            .map_err(|e| format!("Failed to read frame '{}': {}", path.display(), e))?;

        let written = if job.rgba {
            encoder.write_frame_rgba(&pixels, job.width, job.height, job.delay)
        } else {
            encoder.write_frame(&pixels, job.width, job.height, job.delay)
        };
        written.map_err(|e| format!("Frame '{}' rejected: {}", path.display(), e))?;

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    encoder.end()?;

    if let Some(ref pb) = progress {
        pb.finish_with_message("Encoding complete");
    }

    let stats = encoder.stats();
    let elapsed = start_time.elapsed();
    let output_size = fs::metadata(job.output)?.len();
    let unchanged = if stats.pixels > 0 {
        (stats.transparent_pixels as f64 / stats.pixels as f64) * 100.0
    } else {
        0.0
    };

    if !quiet {
        println!("✓ Encoding successful!");
        println!("  Frames:    {}", stats.frames);
        println!("  Output:    {} bytes", output_size);
        println!("  Unchanged: {:.1}% of pixels", unchanged);
        println!("  Resets:    {}", stats.dictionary_resets);
        println!("  Time:      {:.2?}", elapsed);
    }

    Ok(())
}

/// Summary of one image in a GIF stream
struct FrameInfo {
    delay: Option<u16>,
    transparent: Option<u8>,
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    min_code_size: u8,
    data_bytes: usize,
}

/// Summary of a GIF stream
struct GifInfo {
    version: String,
    width: u16,
    height: u16,
    global_table: Option<usize>,
    loop_count: Option<u16>,
    frames: Vec<FrameInfo>,
    trailer: bool,
}

fn read_u16(data: &[u8], pos: usize) -> Result<u16, String> {
    data.get(pos..pos + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| format!("Unexpected end of file at offset {pos}"))
}

fn byte_at(data: &[u8], pos: usize) -> Result<u8, String> {
    data.get(pos)
        .copied()
        .ok_or_else(|| format!("Unexpected end of file at offset {pos}"))
}

/// Walk a sub-block chain, returning the payload size and the offset past it
fn skip_sub_blocks(data: &[u8], mut pos: usize) -> Result<(usize, usize), String> {
    let mut total = 0;
    loop {
        let len = byte_at(data, pos)? as usize;
        pos += 1;
        if len == 0 {
            return Ok((total, pos));
        }
        if pos + len > data.len() {
            return Err(format!("Truncated sub-block at offset {}", pos - 1));
        }
        total += len;
        pos += len;
    }
}

fn parse_gif(data: &[u8]) -> Result<GifInfo, String> {
    if data.len() < 13 || &data[..3] != b"GIF" {
        return Err("Not a GIF file".to_string());
    }

    let flags = data[10];
    let global_table = (flags & 0x80 != 0).then(|| 1usize << ((flags & 0x07) + 1));
    let mut info = GifInfo {
        version: String::from_utf8_lossy(&data[3..6]).into_owned(),
        width: read_u16(data, 6)?,
        height: read_u16(data, 8)?,
        global_table,
        loop_count: None,
        frames: Vec::new(),
        trailer: false,
    };

    let mut pos = 13 + global_table.map_or(0, |entries| entries * 3);
    let mut pending_control: Option<(u16, Option<u8>)> = None;

    while pos < data.len() {
        match data[pos] {
            0x21 => {
                let label = byte_at(data, pos + 1)?;
                match label {
                    0xF9 => {
                        let packed = byte_at(data, pos + 3)?;
                        let delay = read_u16(data, pos + 4)?;
                        let transparent =
                            (packed & 0x01 != 0).then_some(byte_at(data, pos + 6)?);
                        pending_control = Some((delay, transparent));
                    }
                    0xFF => {
                        let id = data.get(pos + 3..pos + 14).unwrap_or(&[]);
                        if id == b"NETSCAPE2.0" {
                            info.loop_count = Some(read_u16(data, pos + 16)?);
                        }
                    }
                    _ => {}
                }
                pos = skip_sub_blocks(data, pos + 2)?.1;
            }
            0x2C => {
                let packed = byte_at(data, pos + 9)?;
                let local_table = if packed & 0x80 != 0 {
                    (1usize << ((packed & 0x07) + 1)) * 3
                } else {
                    0
                };
                let min_code_pos = pos + 10 + local_table;
                let (data_bytes, next) = skip_sub_blocks(data, min_code_pos + 1)?;
                let control = pending_control.take();

                info.frames.push(FrameInfo {
                    delay: control.map(|(delay, _)| delay),
                    transparent: control.and_then(|(_, transparent)| transparent),
                    left: read_u16(data, pos + 1)?,
                    top: read_u16(data, pos + 3)?,
                    width: read_u16(data, pos + 5)?,
                    height: read_u16(data, pos + 7)?,
                    min_code_size: byte_at(data, min_code_pos)?,
                    data_bytes,
                });
                pos = next;
            }
            0x3B => {
                info.trailer = true;
                break;
            }
            other => return Err(format!("Unknown block 0x{other:02X} at offset {pos}")),
        }
    }

    Ok(info)
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let info = parse_gif(&data)?;

    println!("GIF File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Version: {}", info.version);
    println!("  Screen: {}x{}", info.width, info.height);
    match info.global_table {
        Some(entries) => println!("  Global Color Table: {} entries", entries),
        None => println!("  Global Color Table: none"),
    }
    match info.loop_count {
        Some(0) => println!("  Looping: forever"),
        Some(n) => println!("  Looping: {} times", n),
        None => println!("  Looping: no"),
    }
    println!("  Frames: {}", info.frames.len());

    let total_delay: u32 = info
        .frames
        .iter()
        .filter_map(|frame| frame.delay)
        .map(u32::from)
        .sum();
    println!("  Duration: {:.2}s", total_delay as f64 / 100.0);

    if verbose {
        for (i, frame) in info.frames.iter().enumerate() {
            println!(
                "  #{:<4} {}x{} at ({}, {}), delay {}, transparent {}, LZW {} bits, {} bytes",
                i + 1,
                frame.width,
                frame.height,
                frame.left,
                frame.top,
                frame.delay.unwrap_or(0),
                frame
                    .transparent
                    .map_or_else(|| "-".to_string(), |t| t.to_string()),
                frame.min_code_size,
                frame.data_bytes
            );
        }
    }

    if info.trailer {
        println!("  Status: ✓ Complete GIF stream");
    } else {
        println!("  Status: ✗ Missing trailer");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bit_depth_for() {
        assert_eq!(bit_depth_for(1), 1);
        assert_eq!(bit_depth_for(2), 1);
        assert_eq!(bit_depth_for(3), 2);
        assert_eq!(bit_depth_for(256), 8);
    }

    #[test]
    fn test_encode_then_inspect() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let palette_path = dir.path().join("palette.rgb");
        let output_path = dir.path().join("out.gif");

        fs::write(&palette_path, [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255])?;
        let mut frames = Vec::new();
        for (i, pixels) in [[1u8, 2, 3, 1], [1, 2, 3, 2], [3, 3, 3, 3]].iter().enumerate() {
            let path = dir.path().join(format!("frame{i}.raw"));
            fs::write(&path, pixels)?;
            frames.push(path);
        }

        encode_file(
            &EncodeJob {
                output: &output_path,
                frames: &frames,
                width: 2,
                height: 2,
                palette: &palette_path,
                delay: 25,
                options: EncoderOptions::default(),
                rgba: false,
                force: false,
            },
            false,
            true,
        )?;

        let info = parse_gif(&fs::read(&output_path)?)?;
        assert_eq!(info.version, "89a");
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.global_table, Some(4));
        assert_eq!(info.loop_count, Some(0));
        assert_eq!(info.frames.len(), 3);
        assert!(info.trailer);
        for frame in &info.frames {
            assert_eq!(frame.delay, Some(25));
            assert_eq!(frame.transparent, Some(0));
            assert_eq!(frame.min_code_size, 2);
        }

        Ok(())
    }

    #[test]
    fn test_refuses_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let output_path = dir.path().join("exists.gif");
        fs::write(&output_path, b"x")?;

        let result = encode_file(
            &EncodeJob {
                output: &output_path,
                frames: &[],
                width: 1,
                height: 1,
                palette: &output_path,
                delay: 0,
                options: EncoderOptions::default(),
                rgba: false,
                force: false,
            },
            false,
            true,
        );
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_gif(b"PNG").is_err());
        assert!(parse_gif(b"GIF89a\x01\x00\x01\x00\x00\x00\x00\x99").is_err());
    }
}
