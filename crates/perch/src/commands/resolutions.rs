use clap::Args;

use perch_core::config;
use perch_core::geometry::Resolutions;

/// Arguments for the `resolutions` subcommand.
#[derive(Args)]
pub struct ResolutionsArgs {
    /// Aspect ratio as W:H (defaults to the configured one)
    #[arg(long, value_parser = parse_aspect)]
    aspect: Option<(u32, u32)>,
    /// Widest size to list (defaults to the configured one)
    #[arg(long)]
    max_width: Option<u32>,
}

pub fn execute(args: &ResolutionsArgs) {
    let overlay = config::load().overlay;
    let (aspect_w, aspect_h) = args
        .aspect
        .unwrap_or((overlay.aspect_width, overlay.aspect_height));
    let max_width = args.max_width.unwrap_or(overlay.max_width);

    let resolutions = match Resolutions::new(aspect_w, aspect_h, max_width) {
        Ok(resolutions) => resolutions,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for res in resolutions.as_slice() {
        println!("{}x{}", res.width, res.height);
    }
    println!("\n{} resolutions for {aspect_w}:{aspect_h}", resolutions.len());
}

/// Parses `W:H` (also accepts `WxH`).
fn parse_aspect(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(':')
        .or_else(|| s.split_once('x'))
        .ok_or_else(|| format!("expected W:H, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err("aspect ratio parts must be non-zero".into());
    }
    Ok((w, h))
}
