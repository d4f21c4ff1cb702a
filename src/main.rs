use std::error::Error;
use std::path::PathBuf;

use log::info;
use rhand::im::RGBIm;
use rhand::{Geometry, HandConfig, HandPipeline, parse_config_json};
use serde::Serialize;

const USAGE: &str = "usage: rhand <segmented.png> <overlay_out.png> [config.json]";

#[derive(Serialize)]
struct RegionSummary {
    area: f64,
    points: usize,
    hull: usize,
    defects: Vec<DefectSummary>,
}

#[derive(Serialize)]
struct DefectSummary {
    start: [i32; 2],
    far: [i32; 2],
    end: [i32; 2],
    depth: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let in_path = args.next().map(PathBuf::from);
    let out_path = args.next().map(PathBuf::from);
    let (Some(in_path), Some(out_path)) = (in_path, out_path) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let config = match args.next() {
        Some(cfg_path) => parse_config_json(&std::fs::read_to_string(cfg_path)?)?,
        None => HandConfig::default(),
    };
    info!("config: {}", serde_json::to_string(&config)?);

    let frame = RGBIm::load_png(&in_path)?;
    let pipeline = HandPipeline::from_config(config);
    let regions = pipeline.process(&frame)?;

    let overlay = pipeline.render(&frame, &regions)?;
    overlay.save_png(&out_path)?;
    info!("wrote {}", out_path.display());

    let mut summary = Vec::with_capacity(regions.len());
    for region in &regions {
        let mut defects = Vec::with_capacity(region.defects.len());
        for d in &region.defects {
            let (start, far, end) = region.defect_points(d)?;
            defects.push(DefectSummary {
                start: [start.x, start.y],
                far: [far.x, far.y],
                end: [end.x, end.y],
                depth: d.depth(),
            });
        }
        summary.push(RegionSummary {
            area: pipeline.geometry().contour_area(&region.contour),
            points: region.contour.len(),
            hull: region.hull.len(),
            defects,
        });
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
