// Convert a waveform file into a WavePaint document
// Run with: cargo run --bin wavepaint-convert -- <input> <output.wp> [signal...]
//
// VCD signals named on the command line (full dotted names) are made
// visible; with no names, every library signal is.

use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use wavepaint::project::{FileFormat, open_path, save_path, with_wavepaint_extension};
use wavepaint::WaveDocument;

fn usage() -> ExitCode {
    eprintln!("usage: wavepaint-convert <input> <output.wp> [signal...]");
    ExitCode::from(2)
}

fn run(
    input: PathBuf,
    output: PathBuf,
    names: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = WaveDocument::new();
    let format = open_path(&mut doc, &input)?;
    info!("opened {} as {:?}", input.display(), format);

    if format == FileFormat::Vcd {
        let names = if names.is_empty() {
            doc.vcd_signal_list().iter().map(|s| s.name.clone()).collect()
        } else {
            names
        };
        for name in &names {
            if doc.add_signal_from_vcd(name).is_none() {
                warn!("signal {} not found in {}", name, input.display());
            }
        }
    } else if !names.is_empty() {
        warn!("signal names are only used with VCD input");
    }

    let output = with_wavepaint_extension(&output);
    save_path(&doc, &output)?;

    println!(
        "{} -> {} ({} signals, {} samples, {} markers)",
        input.display(),
        output.display(),
        doc.signal_list().len(),
        doc.sample_count(),
        doc.marker_list().len()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        return usage();
    };
    let names: Vec<String> = args.collect();

    match run(PathBuf::from(input), PathBuf::from(output), names) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
