use clap::{Arg, Command};
use colored::*;
use palette_gradient::color::{BRIGHTNESS_RANGE, CONTRAST_RANGE, HUE_SHIFT_RANGE, SATURATION_RANGE};
use palette_gradient::{
    is_image_file, load_image, save_png, AdjustmentParameters, PaletteReport, BLOCK_WIDTH,
};
use palette_gradient::gradient::{render_palette, sample_palette};
use std::error::Error;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Instant;

fn parse_value(matches: &clap::ArgMatches, name: &str) -> Result<f64, Box<dyn Error>> {
    let raw = matches
        .get_one::<String>(name)
        .ok_or_else(|| format!("Missing value for {}", name))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid {} value '{}': {}", name, raw, e).into())
}

fn validate_value(value: f64, name: &str, range: RangeInclusive<f64>) -> Result<(), Box<dyn Error>> {
    if !range.contains(&value) {
        return Err(format!(
            "{} value ({}) is outside valid range [{}, {}]",
            name.red(),
            value,
            range.start(),
            range.end()
        )
        .into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let matches = Command::new("palette-gradient")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a palette gradient strip from an image")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Source image")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Destination PNG for the rendered gradient")
                .required(true),
        )
        .arg(
            Arg::new("hue")
                .long("hue")
                .value_name("DEGREES")
                .help("Hue shift in degrees (-60 to +60)")
                .allow_negative_numbers(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("saturation")
                .short('s')
                .long("saturation")
                .value_name("FACTOR")
                .help("Saturation multiplier (0.0 to 2.0)")
                .default_value("1.0"),
        )
        .arg(
            Arg::new("brightness")
                .short('b')
                .long("brightness")
                .value_name("FACTOR")
                .help("Brightness multiplier (0.0 to 2.0)")
                .default_value("1.0"),
        )
        .arg(
            Arg::new("contrast")
                .short('c')
                .long("contrast")
                .value_name("FACTOR")
                .help("Contrast multiplier around mid value (0.0 to 2.0)")
                .default_value("1.0"),
        )
        .arg(
            Arg::new("palette")
                .short('p')
                .long("palette")
                .value_name("FILE")
                .help("Also write the sampled base/target colors as JSON"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("NUM")
                .help("Number of threads to use for sampling (default: auto-detect)")
                .default_value("0"),
        )
        .get_matches();

    let input = Path::new(
        matches
            .get_one::<String>("input")
            .ok_or("Missing input path")?,
    );
    let output = Path::new(
        matches
            .get_one::<String>("output")
            .ok_or("Missing output path")?,
    );
    let palette = matches.get_one::<String>("palette").map(Path::new);
    let threads = matches
        .get_one::<String>("threads")
        .ok_or("Missing threads value")?
        .parse::<usize>()
        .map_err(|_| "Invalid threads value")?;

    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    let params = AdjustmentParameters {
        hue_shift_degrees: parse_value(&matches, "hue")?,
        saturation_factor: parse_value(&matches, "saturation")?,
        brightness_factor: parse_value(&matches, "brightness")?,
        contrast_factor: parse_value(&matches, "contrast")?,
    };

    validate_value(params.hue_shift_degrees, "Hue shift", HUE_SHIFT_RANGE)?;
    validate_value(params.saturation_factor, "Saturation", SATURATION_RANGE)?;
    validate_value(params.brightness_factor, "Brightness", BRIGHTNESS_RANGE)?;
    validate_value(params.contrast_factor, "Contrast", CONTRAST_RANGE)?;

    if !is_image_file(input) {
        log::warn!(
            "{} does not have a recognized image extension, trying to decode anyway",
            input.display()
        );
    }

    println!("{}", "Rendering palette gradient with settings:".bold().cyan());
    println!("  {}: {}°", "Hue shift".green(), params.hue_shift_degrees);
    println!("  {}: {}x", "Saturation".green(), params.saturation_factor);
    println!("  {}: {}x", "Brightness".green(), params.brightness_factor);
    println!("  {}: {}x", "Contrast".green(), params.contrast_factor);
    if threads > 0 {
        println!("  {}: {} (manual)", "Threads".green(), threads);
    } else {
        println!("  {}: auto-detect ({} available)", "Threads".green(), rayon::current_num_threads());
    }

    let start_time = Instant::now();

    let source = load_image(input)?;
    if source.width() == 0 || source.height() == 0 {
        return Err(format!("{}: {} is empty", "Nothing to render".red(), input.display()).into());
    }
    let blocks = sample_palette(&source, &params);
    let rendered = render_palette(&blocks, source.height());

    let dropped = source.width() % BLOCK_WIDTH;
    println!(
        "{} {} blocks from {}x{} source",
        "Sampled".bold().blue(),
        blocks.len(),
        source.width(),
        source.height()
    );
    if dropped > 0 {
        println!(
            "{}: {} rightmost columns do not fill a block and were skipped",
            "Note".yellow(),
            dropped
        );
    }

    save_png(&rendered, output)?;
    println!(
        "{}: {} ({}x{})",
        "Gradient saved".bold().green(),
        output.display(),
        rendered.width(),
        rendered.height()
    );

    if let Some(palette_path) = palette {
        let report = PaletteReport::from_palette(&source, &params, blocks);
        fs::write(palette_path, serde_json::to_string_pretty(&report)?)?;
        println!("{}: {}", "Palette written".green(), palette_path.display());
    }

    println!("{}: {:.2?}", "Processing time".blue(), start_time.elapsed());
    Ok(())
}
