use anyhow::{bail, Context, Result};
use docscan::config::DocscanConfig;
use docscan::detector::analyze_image;
use docscan::pipeline::{background, crop, enhance};

fn main() -> Result<()> {
    docscan::init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: docscan-cli <command> [args]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  score <image> [--json]      Run the document scorer on an image file");
        eprintln!("  process <image> <output>    Crop, clean, and enhance a captured photo");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "score" => cmd_score(&args),
        "process" => cmd_process(&args),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

fn cmd_score(args: &[String]) -> Result<()> {
    if args.len() < 3 {
        bail!("Usage: docscan-cli score <image> [--json]");
    }
    let path = &args[2];

    let image = image::open(path)
        .with_context(|| format!("Failed to open image {}", path))?
        .to_rgba8();

    let result = analyze_image(&image);

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("detected:   {}", result.is_detected);
        println!("confidence: {:.2}", result.confidence);
        if let Some(bounds) = result.bounds {
            println!(
                "bounds:     ({}, {})-({}, {})",
                bounds.left, bounds.top, bounds.right, bounds.bottom
            );
        }
        if let Some(message) = result.error_message {
            println!("note:       {}", message);
        }
    }
    Ok(())
}

fn cmd_process(args: &[String]) -> Result<()> {
    if args.len() < 4 {
        bail!("Usage: docscan-cli process <image> <output>");
    }
    let input = &args[2];
    let output = &args[3];

    let image = image::open(input)
        .with_context(|| format!("Failed to open image {}", input))?
        .to_rgba8();

    let config = DocscanConfig::load_or_default();
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Same stage order as pipeline::process_document, with the config's
    // tunables applied
    let bounds = crop::locate_crop_area(image.width(), image.height());
    let cropped = crop::crop_document(&image, bounds);
    let cleared = background::remove_background_with(
        &cropped,
        config.processing.background_tolerance,
        config.processing.edge_sample_stride,
    );
    let processed = enhance::enhance_with(
        &cleared,
        config.processing.saturation,
        config.processing.contrast_scale,
    );

    processed
        .save(output)
        .with_context(|| format!("Failed to save processed image to {}", output))?;

    println!(
        "Processed {} ({}x{}) -> {} ({}x{})",
        input,
        image.width(),
        image.height(),
        output,
        processed.width(),
        processed.height()
    );
    Ok(())
}
