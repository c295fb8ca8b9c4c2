//! ZSPR CLI Utility
//!
//! A command-line tool for previewing and inspecting ZSPR sprite files.
//!
//! # Features
//!
//! - **gallery**: Render previews of every `.zspr` file in a directory and write an `index.html`
//! - **preview**: Render the facing-down preview of one sprite variant to PNG
//! - **tiles**: Export the full tile sheet of a sprite to PNG
//! - **info**: Display information about a ZSPR file
//!
//! # Usage
//!
//! ```bash
//! # Build a gallery of all sprites in a directory
//! cargo run --example zspr_utils -- gallery sprites/ -o site/
//!
//! # Render one variant
//! cargo run --example zspr_utils -- preview link.zspr -v bunny
//!
//! # Export the tile sheet with the red mail palette
//! cargo run --example zspr_utils -- tiles link.zspr -p 2
//!
//! # Show header fields as JSON
//! cargo run --example zspr_utils -- info link.zspr --json
//! ```

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbImage;
use log::{error, info, warn};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zspr_rs::prelude::*;

/// Largest accepted `--scale`
const MAX_SCALE: i64 = 64;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Gallery(args) => run_gallery(args),
		Command::Preview(args) => run_preview(args),
		Command::Tiles(args) => run_tiles(args),
		Command::Info(args) => run_info(args),
	}
}

#[derive(Parser)]
#[command(name = "zspr_utils")]
#[command(author = "zspr-rs project")]
#[command(version)]
#[command(about = "Export previews of sprites from ZSPR files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Render previews for every .zspr file in a directory and write index.html
	Gallery(GalleryArgs),
	/// Render the preview of a single sprite variant
	Preview(PreviewArgs),
	/// Export the full tile sheet of a sprite
	Tiles(TilesArgs),
	/// Show information about a ZSPR file
	Info(InfoArgs),
}

#[derive(Args)]
struct GalleryArgs {
	/// Directory containing .zspr files
	#[arg(value_name = "ZSPRS_PATH")]
	input: PathBuf,

	/// Output directory for index.html and images/
	#[arg(short, long, value_name = "OUTPUT_DIR", env = "ZSPR_OUTPUT", default_value = ".")]
	output: PathBuf,

	/// Integer upscale factor for the 16x24 previews
	#[arg(
		short,
		long,
		value_name = "FACTOR",
		env = "ZSPR_SCALE",
		default_value_t = 4,
		value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE)
	)]
	scale: u32,

	/// Abort on the first file that fails to parse or render
	#[arg(long, default_value_t = false)]
	fail_fast: bool,
}

#[derive(Args)]
struct PreviewArgs {
	/// Input ZSPR file path
	#[arg(value_name = "INPUT_ZSPR")]
	input: PathBuf,

	/// Variant to render: green, blue, red or bunny
	#[arg(short, long, value_name = "VARIANT", default_value = "green mail")]
	variant: String,

	/// Output PNG path (optional, defaults to `<stem> - <variant>.png`)
	#[arg(short, long, value_name = "OUTPUT_PNG")]
	output: Option<PathBuf>,

	/// Integer upscale factor
	#[arg(
		short,
		long,
		value_name = "FACTOR",
		env = "ZSPR_SCALE",
		default_value_t = 4,
		value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE)
	)]
	scale: u32,
}

#[derive(Args)]
struct TilesArgs {
	/// Input ZSPR file path
	#[arg(value_name = "INPUT_ZSPR")]
	input: PathBuf,

	/// Palette index (0 = green mail, 1 = blue mail, 2 = red mail, 3 = bunny)
	#[arg(short, long, value_name = "PALETTE", default_value_t = 0)]
	palette: usize,

	/// Output PNG path (optional, defaults to `tiles - <name> - <variant>.png`)
	#[arg(short, long, value_name = "OUTPUT_PNG")]
	output: Option<PathBuf>,

	/// Integer upscale factor
	#[arg(
		short,
		long,
		value_name = "FACTOR",
		env = "ZSPR_SCALE",
		default_value_t = 4,
		value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE)
	)]
	scale: u32,
}

#[derive(Args)]
struct InfoArgs {
	/// Input ZSPR file path
	#[arg(value_name = "INPUT_ZSPR")]
	input: PathBuf,

	/// Print machine readable JSON instead of text
	#[arg(long, default_value_t = false)]
	json: bool,
}

/// JSON shape of the `info` command
#[derive(Serialize)]
struct InfoReport<'a> {
	path: String,
	sprite_name: &'a str,
	author_name: &'a str,
	author_name_short: &'a str,
	header: &'a ZsprHeader,
	reserved_hex: String,
	tile_count: usize,
	glove_colors: &'a [ZsprColor; 2],
}

fn load(path: &Path) -> Result<ZsprFile> {
	ZsprFile::open(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn save_png(canvas: &PixelCanvas, scale: u32, path: &Path) -> Result<()> {
	let scaled = canvas
		.scale_nearest(scale)
		.with_context(|| format!("Scale factor {scale} is too large"))?;
	let image = RgbImage::from_raw(scaled.width(), scaled.height(), scaled.to_rgb_bytes())
		.context("Canvas size does not match its pixel buffer")?;
	image.save(path).with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

fn file_stem(path: &Path) -> String {
	path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Replaces path separators so a sprite name can be used as a file name.
fn sanitize_file_name(name: &str) -> String {
	name.replace(['/', '\\'], "_")
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

fn collect_zspr_files(root: &Path) -> Vec<PathBuf> {
	let mut files = Vec::new();

	for entry in WalkDir::new(root).max_depth(1).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!("{}", err);
				continue;
			}
		};

		let is_zspr = entry.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zspr"));
		if entry.file_type().is_file() && is_zspr {
			files.push(entry.into_path());
		}
	}

	files.sort();
	files
}

/// Renders every variant of one sprite and returns its HTML fragment.
fn render_gallery_entry(path: &Path, output: &Path, scale: u32) -> Result<String> {
	let zspr = load(path)?;
	let stem = file_stem(path);
	info!("{}", path.file_name().unwrap_or_default().to_string_lossy());

	let mut html = String::new();
	writeln!(html, "<span class=spriteBox>")?;
	write!(
		html,
		"<div>{}<br>by {}</div>",
		escape_html(zspr.sprite_name()),
		escape_html(zspr.author_name())
	)?;

	for variant in PreviewVariant::ALL {
		let image_path = format!("images/{stem} - {variant}.png");
		let canvas = zspr
			.render_preview(variant)
			.with_context(|| format!("Failed to render {variant} preview of {}", path.display()))?;
		save_png(&canvas, scale, &output.join(&image_path))?;
		info!("  {}", image_path);

		writeln!(html, "<img src=\"{}\"></img>", escape_html(&image_path))?;
	}

	writeln!(html, "</span>")?;
	Ok(html)
}

fn run_gallery(args: GalleryArgs) -> Result<()> {
	if !args.input.is_dir() {
		bail!("{} is not a directory", args.input.display());
	}

	let images_dir = args.output.join("images");
	fs::create_dir_all(&images_dir)
		.with_context(|| format!("Failed to create {}", images_dir.display()))?;

	let files = collect_zspr_files(&args.input);
	if files.is_empty() {
		warn!("No .zspr files found under {}", args.input.display());
	}

	let mut html = String::new();
	html.push_str("<html>\n<head>\n<link rel=stylesheet href=index.css>\n</head>\n<body>\n");

	let mut failures = 0usize;
	for path in &files {
		match render_gallery_entry(path, &args.output, args.scale) {
			Ok(fragment) => html.push_str(&fragment),
			Err(err) if args.fail_fast => return Err(err),
			Err(err) => {
				error!("{:#}", err);
				failures += 1;
			}
		}
	}

	html.push_str("</body>\n</html>\n");

	let index_path = args.output.join("index.html");
	fs::write(&index_path, html)
		.with_context(|| format!("Failed to write {}", index_path.display()))?;
	info!(
		"Wrote {} ({} sprites, {} failed)",
		index_path.display(),
		files.len() - failures,
		failures
	);

	if failures > 0 {
		bail!("{} of {} files could not be rendered", failures, files.len());
	}
	Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
	let Some(variant) = PreviewVariant::from_name(&args.variant) else {
		bail!("Unknown variant '{}' (expected green, blue, red or bunny)", args.variant);
	};

	let zspr = load(&args.input)?;
	let canvas = zspr.render_preview(variant)?;
	let output = args
		.output
		.unwrap_or_else(|| PathBuf::from(format!("{} - {}.png", file_stem(&args.input), variant)));

	save_png(&canvas, args.scale, &output)?;
	info!("✓ {} ({}) -> {}", zspr, variant, output.display());
	Ok(())
}

fn run_tiles(args: TilesArgs) -> Result<()> {
	let zspr = load(&args.input)?;
	let canvas = zspr.render_tile_sheet(args.palette)?;
	let variant = PreviewVariant::ALL[args.palette];
	let output = args.output.unwrap_or_else(|| {
		let name = sanitize_file_name(zspr.sprite_name());
		PathBuf::from(format!("tiles - {name} - {variant}.png"))
	});

	save_png(&canvas, args.scale, &output)?;
	info!("✓ {} tiles ({}) -> {}", zspr.tiles().len(), variant, output.display());
	Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
	let zspr = load(&args.input)?;
	let header = zspr.header();

	if args.json {
		let report = InfoReport {
			path: args.input.display().to_string(),
			sprite_name: zspr.sprite_name(),
			author_name: zspr.author_name(),
			author_name_short: zspr.author_name_short(),
			header,
			reserved_hex: hex::encode(header.reserved()),
			tile_count: zspr.tiles().len(),
			glove_colors: zspr.glove_colors(),
		};
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("File: {}", args.input.display());
	println!("  Sprite name:       {}", zspr.sprite_name());
	println!("  Author:            {}", zspr.author_name());
	println!("  Author (short):    {}", zspr.author_name_short());
	println!("  Version:           {}", header.version());
	println!("  Checksum:          0x{:08X}", header.checksum());
	println!("  Sprite type:       {}", header.sprite_type());
	println!("  Reserved:          {}", hex::encode(header.reserved()));
	println!(
		"  Tile block:        0x{:X} ({} bytes, {} tiles)",
		header.tile_offset(),
		header.tile_length(),
		zspr.tiles().len()
	);
	println!(
		"  Palette block:     0x{:X} ({} bytes)",
		header.palette_offset(),
		header.palette_length()
	);
	for (variant, palette) in PreviewVariant::ALL.iter().zip(zspr.palettes()) {
		let colors: Vec<String> =
			palette.colors().map(|c| format!("{:02X}{:02X}{:02X}", c.r, c.g, c.b)).collect();
		println!("  {:<18} {}", format!("{variant}:"), colors.join(" "));
	}
	let [left, right] = zspr.glove_colors();
	println!("  Glove colors:      {} {}", left, right);

	Ok(())
}
