//! Matrix Life CLI - Run an automaton from a JSON configuration.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::time::Instant;

use matrix_life::{
    compute::Simulation,
    display::{FrameSink, MatrixPanel, TerminalSink},
    schema::{PRESETS, RunConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [left_device] [right_device]", args[0]);
        eprintln!();
        eprintln!("Run a cellular automaton on the LED matrix panels.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json   Path to run configuration file");
        eprintln!("  left_device   Serial device of the left panel");
        eprintln!("  right_device  Serial device of the right panel");
        eprintln!();
        eprintln!("Without devices, frames are drawn in the terminal.");
        eprintln!("Example configuration is generated with --example flag.");
        eprintln!("Named patterns are listed with --presets flag.");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => {
            print_example_config();
            return;
        }
        "--presets" => {
            for preset in PRESETS {
                println!("{:<16} {}", preset.name, preset.description);
            }
            return;
        }
        _ => {}
    }

    let config = RunConfig::from_path(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let left = args.get(2).map(|p| open_device(p));
    let right = args.get(3).map(|p| open_device(p));

    let mut sink: Box<dyn FrameSink> = if left.is_some() || right.is_some() {
        Box::new(MatrixPanel::new(left, right))
    } else {
        Box::new(TerminalSink::new(io::stdout()).in_place())
    };

    let mut sim = Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // Ctrl-C stops the run at the next generation; the panels are still cleared.
    let cancel = sim.cancel_handle();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        eprintln!("Warning: Ctrl-C handler not installed: {}", e);
    }

    println!("Matrix Life");
    println!("===========");
    println!("Rule: {}", sim.rule().name());
    println!(
        "Board: {}x{}, up to {} generations",
        sim.board().height(),
        sim.board().width(),
        sim.config().generations
    );
    println!("Press Ctrl-C to stop.");
    println!();

    let start = Instant::now();
    let report = sim.run(sink.as_mut());
    let elapsed = start.elapsed();

    println!();
    println!("Outcome: {:?}", report.outcome);
    println!("Generations: {}", report.generations);
    println!("Population: {}", report.final_board.population());
    if report.failed_renders > 0 {
        println!("Failed renders: {}", report.failed_renders);
    }
    println!("Time: {:.2}s", elapsed.as_secs_f32());
}

fn open_device(path: &str) -> File {
    OpenOptions::new()
        .write(true)
        .open(Path::new(path))
        .unwrap_or_else(|e| {
            eprintln!("Error opening {}: {}", path, e);
            std::process::exit(1);
        })
}

fn print_example_config() {
    let config = RunConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("Example configuration (config.json):");
            println!("{}", json);
        }
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
