use std::env;
use std::fs;
use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;
use xmaslights::Settings;

const USAGE: &str = "Usage: xmaslights [--config <settings.yaml>] [--brightness <0-255>] [--fps <rate>] \
<coords.csv> <intro.mid> <song.mid> [output.csv]";

fn init_logging() {
    // Logs go to stderr so CSV written to stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn flag_value<'a>(iter: &mut std::slice::Iter<'a, String>) -> &'a str {
    iter.next().map(String::as_str).unwrap_or_else(|| fail(USAGE))
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<&str> = None;
    let mut brightness: Option<&str> = None;
    let mut frame_rate: Option<&str> = None;
    let mut positional: Vec<&String> = Vec::new();

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(flag_value(&mut iter));
            }
            "--brightness" => {
                brightness = Some(flag_value(&mut iter));
            }
            "--fps" => {
                frame_rate = Some(flag_value(&mut iter));
            }
            "-h" | "--help" => {
                eprintln!("{}", USAGE);
                return;
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() < 3 || positional.len() > 4 {
        fail(USAGE);
    }
    let (coords_path, intro_path, song_path) = (positional[0], positional[1], positional[2]);
    let output_path = positional.get(3);

    // Settings: file first, then command-line overrides
    let settings = match config_path {
        Some(path) => Settings::load(Path::new(path))
            .unwrap_or_else(|e| fail(&format!("Error loading settings: {}", e))),
        None => Settings::default(),
    };
    let settings = settings
        .with_overrides(brightness, frame_rate)
        .unwrap_or_else(|e| fail(&format!("Invalid settings: {}", e)));

    // Read input files
    let coords = fs::read_to_string(coords_path).unwrap_or_else(|e| {
        fail(&format!("Error reading file '{}': {}", coords_path, e))
    });
    let intro = fs::read(intro_path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", intro_path, e)));
    let song = fs::read(song_path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{}': {}", song_path, e)));

    let csv = match xmaslights::render_csv(&coords, &intro, &song, &settings) {
        Ok(csv) => csv,
        Err(e) => fail(&format!("Animation error: {}", e)),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &csv) {
                fail(&format!("Error writing to '{}': {}", path, e));
            }
            eprintln!("Wrote animation to {}", path);
        }
        None => {
            print!("{}", csv);
        }
    }
}
