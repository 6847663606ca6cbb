//! Indoor map command line.
//!
//! ```text
//! indoor_map new <file> [floor-name]   write an empty one-floor document
//! indoor_map info <file>               print a per-floor summary
//! ```

use std::path::Path;
use std::process::ExitCode;

use indoor_editor::{EditorError, EditorPreferences, MapDocument};

fn usage() -> ExitCode {
    eprintln!("{} {}", indoor_editor::NAME, indoor_editor::VERSION);
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  indoor_map new <file> [floor-name]");
    eprintln!("  indoor_map info <file>");
    ExitCode::from(2)
}

fn create(path: &Path, floor_name: Option<&str>) -> Result<(), EditorError> {
    let mut preferences = EditorPreferences::load_or_default();
    if let Some(name) = floor_name {
        preferences.default_floor_name = name.to_string();
    }
    let mut document = MapDocument::new(preferences);
    document.save(path)?;
    println!("Created {}", path.display());
    Ok(())
}

fn info(path: &Path) -> Result<(), EditorError> {
    let mut document = MapDocument::new(EditorPreferences::load_or_default());
    document.open(path)?;

    let building = document.building();
    println!("{}", path.display());
    println!("  floors: {}", building.floor_count());
    for (index, floor) in building.floors().iter().enumerate() {
        println!(
            "  [{}] {:<20} nodes: {:>4}  walls: {:>4}  zones: {:>4}  points of interest: {:>4}",
            index,
            floor.name(),
            floor.nodes().len(),
            floor.walls().len(),
            floor.zones().len(),
            floor.points_of_interest().len(),
        );
    }
    println!("  zone connections: {}", building.zone_connections().len());
    Ok(())
}

/// Failure line naming the file the user asked for
fn failure_message(path: &Path, error: &EditorError) -> String {
    format!("error: {}: {}", path.display(), error)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, result) = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["new", file] => (Path::new(*file), create(Path::new(file), None)),
        ["new", file, floor_name] => (Path::new(*file), create(Path::new(file), Some(*floor_name))),
        ["info", file] => (Path::new(*file), info(Path::new(file))),
        _ => return usage(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(path, &e));
            ExitCode::FAILURE
        }
    }
}
