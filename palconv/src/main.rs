//! palconv parses Game Boy palette specifications (the same forms a
//! graphics converter accepts for its color options) and prints the
//! palettes they describe. Optionally it writes them out as a raw CGB
//! palette dump.

use clap::Parser;
use clap_num::number_range;
use color_eyre::eyre::{eyre, Result};
use gbpal::prelude::*;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::process;
use strum::IntoEnumIterator;

/// palconv parses Game Boy palette specifications and prints the palettes
/// they describe.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(
        short = 'c',
        long,
        help = "Palette spec: inline (#rgb,#rrggbb;...), FORMAT:path, embedded or dmg=XX"
    )]
    colors: Option<String>,

    #[arg(
        short = 'B',
        long,
        help = "Background color: #rgb, #rrggbb or transparent"
    )]
    background: Option<String>,

    #[arg(
        short = 'n',
        long,
        default_value_t = 8, value_parser=palette_count,
        help = "Maximum number of palettes"
    )]
    max_palettes: u16,

    #[arg(
        short = 's',
        long,
        default_value_t = 4, value_parser=palette_size,
        help = "Number of colors in each palette"
    )]
    colors_per_palette: u8,

    #[arg(
        long,
        default_value_t = false,
        help = "Print the result as JSON instead of text"
    )]
    json: bool,

    #[arg(short = 'o', long, help = "Write the palettes as a GBC palette dump")]
    output: Option<String>,
}

fn palette_count(s: &str) -> std::result::Result<u16, String> {
    number_range(s, 1, 256)
}

fn palette_size(s: &str) -> std::result::Result<u8, String> {
    number_range(s, 1, 4)
}

#[derive(Serialize)]
struct Output<'a> {
    background: Option<Rgba>,
    palettes: Option<&'a PalSpec>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args: Args = Args::parse();

    let capacity = Capacity::new(args.max_palettes, args.colors_per_palette)?;

    let background = args
        .background
        .as_deref()
        .map(parse_background_pal_spec)
        .transpose()?;

    let palettes = match args.colors.as_deref() {
        None => None,
        Some(arg) => Some(parse(arg, capacity)?),
    };

    if let Some(output) = &args.output {
        let Some(PalSpec::Explicit(spec)) = &palettes else {
            return Err(eyre!(
                "--output needs palettes given inline or from a palette file"
            ));
        };
        write_gbc_dump(spec, BufWriter::new(File::create(output)?))?;
        info!("Wrote {} palettes to {output}", spec.len());
    }

    if args.json {
        let out = Output {
            background,
            palettes: palettes.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(bg) = background {
        println!("background: {bg}");
    }
    match &palettes {
        None => {}
        Some(PalSpec::Explicit(spec)) => print!("{spec}"),
        Some(PalSpec::Embedded) => println!("embedded"),
        Some(PalSpec::Dmg(m)) => {
            for shade in 0..4 {
                println!("shade {shade}: {}", m.dmg_value(shade));
            }
        }
    }
    Ok(())
}

// Failing to open a palette file ends the process outright. Everything
// else is returned as a normal error.
fn parse(arg: &str, capacity: Capacity) -> Result<PalSpec> {
    match parse_pal_spec(arg, capacity) {
        Ok(spec) => Ok(spec),
        Err(e) if e.is_fatal() => {
            eprintln!("FATAL: {e}");
            process::exit(1);
        }
        Err(Error::UnknownFormat(name)) => {
            let formats = Format::iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(eyre!(
                "Unknown external palette format \"{name}\" (supported: {formats})"
            ))
        }
        Err(e) => Err(e.into()),
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}
