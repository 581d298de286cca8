use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fontbake::{
    cp_range::{self, CpRange},
    export::{self, ExportOptions, ImageSizeMode},
    geometry::{Edge, Point},
    image_writer,
    registry::Registry,
    renderer::{self, Hinting},
    unicode::REPLACEMENT_CHARACTER,
    writer, BakingOptions, Font, KerningSource,
};

/// Bakes a TrueType or OpenType font into bitmap atlas pages and a font
/// description file
#[derive(Debug, Clone, Parser)]
#[command(version)]
struct Args {
    /// Font file to bake
    #[arg(required_unless_present = "list")]
    font_path: Option<PathBuf>,

    /// Comma-separated code points and inclusive ranges, e.g. "32-126,U+401"
    #[arg(long, default_value = "33-126")]
    code_points: String,

    /// Font resolution; together with --font-size gives the pixel size
    #[arg(long, default_value_t = 72)]
    font_dpi: i32,

    /// Font size in points
    #[arg(long, default_value_t = 16)]
    font_size: i32,

    /// Index of the font in a collection
    #[arg(long, default_value_t = 0)]
    font_index: i32,

    /// Font renderer; see --list
    #[arg(long, default_value = "swash")]
    font_renderer: String,

    /// Hinting mode: "normal" or "light"
    #[arg(long, default_value_t)]
    hinting: Hinting,

    /// Source of kerning pairs: "none", "kern", "gpos" or "both" (kern only
    /// if GPOS has no pairs)
    #[arg(long, default_value_t)]
    kerning: KerningSource,

    /// Glyph padding drawn as part of the glyph, as TOP[:BOTTOM:LEFT:RIGHT]
    #[arg(long, default_value = "0", value_parser = parse_edge)]
    glyph_padding_inner: Edge,

    /// Glyph padding drawn outside the glyph, as TOP[:BOTTOM:LEFT:RIGHT]
    #[arg(long, default_value = "0", value_parser = parse_edge)]
    glyph_padding_outer: Edge,

    /// Spacing between glyph images, as X[:Y]
    #[arg(long, default_value = "1", value_parser = parse_point)]
    glyph_spacing: Point,

    /// Image padding, as TOP[:BOTTOM:LEFT:RIGHT]
    #[arg(long, default_value = "1", value_parser = parse_edge)]
    image_padding: Edge,

    /// Width and height limit of page images
    #[arg(long, default_value_t = 1024)]
    image_max_size: i32,

    /// Fail if the font needs more page images than this
    #[arg(long, default_value_t = 30)]
    image_max_count: usize,

    /// "min", "minPot" (power of two) or "max"
    #[arg(long, default_value_t)]
    image_size_mode: ImageSizeMode,

    /// Font description format; see --list
    #[arg(long, default_value = "json")]
    font_export_format: String,

    /// Name of the font description file and prefix of image names.
    /// Defaults to the font file name without extension.
    #[arg(long)]
    font_export_name: Option<String>,

    /// Page image format; see --list
    #[arg(long, default_value = "png")]
    image_format: String,

    /// Directory to save files to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print available font renderers, font writers and image writers
    #[arg(long)]
    list: bool,

    /// Log progress; RUST_LOG overrides this
    #[arg(short, long)]
    verbose: bool,
}

/// Parses `N` colon separated integers, or a single integer used for all of
/// them
fn parse_int_array<const N: usize>(s: &str) -> Result<[i32; N], String> {
    let values = s
        .split(':')
        .map(|v| v.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid number in \"{}\": {}", s, err))?;

    if let [value] = values[..] {
        return Ok([value; N]);
    }

    values
        .try_into()
        .map_err(|_| format!("expected 1 or {} numbers separated by ':'", N))
}

fn parse_edge(s: &str) -> Result<Edge, String> {
    let [top, bottom, left, right] = parse_int_array::<4>(s)?;

    Ok(Edge::new(top, bottom, left, right))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let [x, y] = parse_int_array::<2>(s)?;

    Ok(Point::new(x, y))
}

fn pt_to_px(pt: i32, dpi: i32) -> anyhow::Result<i32> {
    pt.checked_mul(dpi)
        .and_then(|n| n.checked_add(36))
        .map(|n| n / 72)
        .with_context(|| format!("Font size {} pt at {} dpi is too large", pt, dpi))
}

fn cp_ranges(code_points: &str) -> anyhow::Result<Vec<CpRange>> {
    let mut ranges = cp_range::parse(code_points).context("Invalid code points")?;

    // The missing glyph, space and the replacement character are always
    // baked
    for cp in [0, u32::from(' '), REPLACEMENT_CHARACTER] {
        ranges.push(CpRange::single(cp));
    }

    cp_range::compress(&mut ranges);

    Ok(ranges)
}

fn print_registry<T>(registry: &Registry<T>) {
    println!("{}s:", registry.kind());

    let width = registry.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in registry.iter() {
        println!("  {:width$}  {}", entry.name, entry.description);
    }
}

fn list() {
    print_registry(&renderer::registry());
    println!();
    print_registry(&writer::registry());
    println!();
    print_registry(&image_writer::registry());
}

fn bake(args: &Args, font_path: PathBuf) -> anyhow::Result<()> {
    let cp_ranges = cp_ranges(&args.code_points)?;

    let baking_options = BakingOptions {
        font_path,
        font_renderer: args.font_renderer.clone(),
        font_index: args.font_index,
        font_px_size: pt_to_px(args.font_size, args.font_dpi)?,
        hinting: args.hinting,
        image_max_size: args.image_max_size,
        image_padding: args.image_padding,
        glyph_padding_inner: args.glyph_padding_inner,
        glyph_padding_outer: args.glyph_padding_outer,
        glyph_spacing: args.glyph_spacing,
        kerning_source: args.kerning,
    };

    let export_options = ExportOptions {
        export_name: args
            .font_export_name
            .clone()
            .unwrap_or_else(|| export::export_name_from_path(&baking_options.font_path)),
        image_max_count: args.image_max_count,
        image_size_mode: args.image_size_mode,
        out_dir: args.out_dir.clone(),
    };
    export_options.validate()?;

    // Writers are looked up before baking so a typo fails fast
    let font_writers = writer::registry();
    let font_writer = font_writers.get(&args.font_export_format)?;
    let image_writers = image_writer::registry();
    let image_writer = image_writers.get(&args.image_format)?;

    let mut font = Font::new(baking_options, &cp_ranges)?;

    export::export(
        &mut font,
        &export_options,
        (&args.font_export_format, &**font_writer),
        (&args.image_format, &**image_writer),
    )?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.list {
        list();
        return Ok(());
    }

    let font_path = args
        .font_path
        .clone()
        .context("No font path given")?;

    bake(&args, font_path.clone())
        .with_context(|| format!("Can't bake {}", font_path.display()))
}
