use canny_hough::config::load_config;
use canny_hough::image::draw::{draw_lines, gray_to_rgb};
use canny_hough::image::io::{
    load_grayscale_image, save_edge_map, save_grayscale_u8, save_rgb_image, write_json_file,
};
use canny_hough::pipeline::LineDetector;
use image::Rgb;
use std::env;
use std::path::Path;

const LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let detector = LineDetector::new(config.detector_params()).map_err(|e| e.to_string())?;
    let report = detector
        .process(gray.as_view())
        .map_err(|e| e.to_string())?;

    if let Some(path) = &config.output.gradient_image {
        let peak = report.magnitude.max_value().max(f32::EPSILON);
        save_grayscale_u8(&report.magnitude.to_u8_scaled(true, 255.0 / peak), path)?;
        println!("Saved gradient magnitude to {}", path.display());
    }
    if let Some(path) = &config.output.edges_image {
        save_edge_map(&report.edges, path)?;
        println!("Saved edge map to {}", path.display());
    }
    if let Some(path) = &config.output.accumulator_image {
        save_grayscale_u8(&report.accumulator.to_gray_image(), path)?;
        println!("Saved accumulator to {}", path.display());
    }
    if let Some(path) = &config.output.overlay_image {
        let mut overlay = gray_to_rgb(&gray);
        draw_lines(&mut overlay, &report.lines, LINE_COLOR);
        save_rgb_image(&overlay, path)?;
        println!("Saved overlay to {}", path.display());
    }

    write_json_file(&config.output.result_json, &report)?;
    println!(
        "Detected {} lines from {} edge pixels in {:.3} ms; summary at {}",
        report.lines.len(),
        report.canny.edge_pixels,
        report.timings.total_ms,
        config.output.result_json.display()
    );
    for line in &report.lines {
        println!("  {line}");
    }

    Ok(())
}

fn usage() -> String {
    "Usage: hough_lines <config.json>".to_string()
}
