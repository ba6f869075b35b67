use crate::manifest;
use anyhow::{anyhow, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgb, RgbImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Sizes drawn when none are given on the command line, in drawing order.
pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

pub const DEFAULT_BACKGROUND: &str = "#007acc";
pub const DEFAULT_TOP_TAB: &str = "#ffffff";
pub const DEFAULT_BOTTOM_TAB: &str = "#cccccc";

/// Largest edge length accepted for a single icon.
pub const MAX_ICON_SIZE: u32 = 4096;

/// Vertical gap in pixels between the two tabs.
const TAB_GAP: i64 = 5;

#[derive(Debug)]
pub struct Options {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub background: String,
    pub top_color: String,
    pub bottom_color: String,
    pub manifest: bool,
    pub verbose: bool,
}

/// Fill colors for the canvas and the two tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb<u8>,
    pub top_tab: Rgb<u8>,
    pub bottom_tab: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgb([0x00, 0x7a, 0xcc]),
            top_tab: Rgb([0xff, 0xff, 0xff]),
            bottom_tab: Rgb([0xcc, 0xcc, 0xcc]),
        }
    }
}

impl Palette {
    /// Parse the three CSS color strings into a palette
    pub fn parse(background: &str, top_tab: &str, bottom_tab: &str) -> Result<Self> {
        Ok(Palette {
            background: parse_color(background, "--background")?,
            top_tab: parse_color(top_tab, "--top-color")?,
            bottom_tab: parse_color(bottom_tab, "--bottom-color")?,
        })
    }
}

fn parse_color(value: &str, flag: &str) -> Result<Rgb<u8>> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow!("Invalid color for {flag}: {value:?}"))?;

    // Alpha is dropped, the canvas has no alpha channel
    Ok(Rgb([
        to_channel(color.red),
        to_channel(color.green),
        to_channel(color.blue),
    ]))
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Axis-aligned rectangle; both corners belong to the filled area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect {
    /// Intersect with a `width` x `height` canvas.
    ///
    /// Returns `None` when the rectangle is inverted or lies entirely off
    /// the canvas, so callers simply skip it.
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        if self.right < self.left || self.bottom < self.top {
            return None;
        }

        let clipped = Rect {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.min(i64::from(width) - 1),
            bottom: self.bottom.min(i64::from(height) - 1),
        };

        if clipped.left > clipped.right || clipped.top > clipped.bottom {
            None
        } else {
            Some(clipped)
        }
    }
}

/// Where the two tabs land on a canvas of a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabLayout {
    pub margin: i64,
    pub tab_height: i64,
    pub top_tab: Rect,
    pub bottom_tab: Rect,
}

impl TabLayout {
    pub fn for_size(size: u32) -> Self {
        let size_px = i64::from(size);
        let margin = size_px / 8;
        let tab_height = size_px / 3;

        let top_tab = Rect {
            left: margin,
            top: margin,
            right: size_px - margin,
            bottom: margin + tab_height,
        };

        let bottom_tab = Rect {
            left: margin,
            top: margin + tab_height + TAB_GAP,
            right: size_px - margin,
            bottom: margin + tab_height * 2 + TAB_GAP,
        };

        TabLayout {
            margin,
            tab_height,
            top_tab,
            bottom_tab,
        }
    }
}

/// Fill `rect` with `color`, silently dropping whatever falls off the canvas
pub fn fill_rect(canvas: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    let Some(area) = rect.clip(canvas.width(), canvas.height()) else {
        return;
    };

    for y in area.top..=area.bottom {
        for x in area.left..=area.right {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw one icon: background first, then the upper and lower tab.
pub fn render_icon(size: u32, palette: &Palette) -> RgbImage {
    let layout = TabLayout::for_size(size);
    let mut canvas = RgbImage::from_pixel(size, size, palette.background);

    fill_rect(&mut canvas, layout.top_tab, palette.top_tab);
    fill_rect(&mut canvas, layout.bottom_tab, palette.bottom_tab);

    canvas
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

// Encode as 8-bit RGB PNG; fixed settings keep the output byte-stable
pub fn write_png<W: Write>(image: &RgbImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
    Ok(())
}

/// Render the icon for `size` and write it to `out_dir/icon{size}.png`
pub fn save_icon(out_dir: &Path, size: u32, palette: &Palette) -> Result<PathBuf> {
    let path = out_dir.join(icon_file_name(size));
    let image = render_icon(size, palette);

    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(&image, &mut out_file)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    out_file
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    Ok(path)
}

fn validate_sizes(sizes: &[u32]) -> Result<()> {
    if sizes.is_empty() {
        anyhow::bail!("At least one icon size is required");
    }

    for &size in sizes {
        if size == 0 || size > MAX_ICON_SIZE {
            anyhow::bail!("Icon size must be between 1 and {MAX_ICON_SIZE}, got {size}");
        }
    }

    Ok(())
}

pub fn generate_icons(options: Options) -> Result<()> {
    // Reject bad input before anything touches the disk
    validate_sizes(&options.sizes)?;
    let palette = Palette::parse(
        &options.background,
        &options.top_color,
        &options.bottom_color,
    )?;

    create_dir_all(&options.output).with_context(|| {
        format!(
            "Can't create output directory {}",
            options.output.display()
        )
    })?;

    for &size in &options.sizes {
        save_icon(&options.output, size, &palette)?;
        if options.verbose {
            let layout = TabLayout::for_size(size);
            println!(
                "  ✓ Generated {} (margin {}px, tab height {}px)",
                icon_file_name(size),
                layout.margin,
                layout.tab_height
            );
        }
    }

    if options.manifest {
        manifest::write_manifest(&options.output, &options.sizes)?;
        if options.verbose {
            println!("  ✓ Generated {}", manifest::MANIFEST_FILE_NAME);
        }
    }

    println!("Icons created successfully!");
    Ok(())
}
