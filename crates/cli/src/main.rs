#![deny(unsafe_code)]
//! CLI binary for the flow-title effect.
//!
//! Subcommands:
//! - `shell`: write the HTML page that hosts the title canvas
//! - `preview`: animate the field off-browser and write a PNG
//! - `inspect`: print the grid shape and value ranges for a surface size

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flow_title_core::shell::{bootstrap_script, render_document, title_markup};
use flow_title_core::{
    FlowConfig, FlowField, PageMetadata, Pointer, Rgba, SurfaceSize, Xorshift64,
};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flow-title", about = "Flow-field title effect CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the page shell with the title canvas and its bootstrap script.
    Shell {
        /// Output file path, or "-" for stdout.
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,

        /// Path of the wasm-bindgen JS module, relative to the page.
        #[arg(long, default_value = "./pkg/flow_title_wasm.js")]
        module: String,

        /// DOM id of the title canvas.
        #[arg(long, default_value = "title")]
        canvas_id: String,

        /// Browser theme color as #rrggbb or #rgb.
        #[arg(long, default_value = "#000000")]
        theme_color: String,
    },
    /// Animate the field against a fixed pointer and write a PNG preview.
    Preview {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 240)]
        height: u32,

        /// Number of animation frames to run before drawing.
        #[arg(short, long, default_value_t = 60)]
        frames: u64,

        /// PRNG seed for the per-line phases.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pointer position as "X,Y" in surface units.
        #[arg(long, default_value = "0,0")]
        pointer: String,

        /// Config overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
    /// Print grid shape and angle/length ranges for a surface size.
    Inspect {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 240)]
        height: u32,

        /// Config overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_config(params: &str) -> Result<FlowConfig, CliError> {
    let value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    Ok(FlowConfig::from_json_validated(&value)?)
}

fn parse_pointer(raw: &str) -> Result<Pointer, CliError> {
    let invalid = || CliError::Input(format!("invalid --pointer '{raw}': expected X,Y"));
    let (x, y) = raw.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(invalid());
    }
    Ok(Pointer::new(x, y))
}

fn page(module: &str, canvas_id: &str, theme_color: &str) -> Result<String, CliError> {
    let theme = Rgba::from_hex(theme_color)
        .map_err(|e| CliError::Input(format!("invalid --theme-color: {e}")))?;
    let meta = PageMetadata {
        theme_color: theme.to_hex(),
        ..PageMetadata::default()
    };
    let body = format!(
        "{}\n{}",
        title_markup(canvas_id),
        bootstrap_script(module, canvas_id)
    );
    Ok(render_document(&meta, &body))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Shell {
            output,
            module,
            canvas_id,
            theme_color,
        } => {
            let html = page(&module, &canvas_id, &theme_color)?;
            if output.as_os_str() == "-" {
                print!("{html}");
            } else {
                fs::write(&output, &html)?;
                if cli.json {
                    let info = serde_json::json!({
                        "output": output.display().to_string(),
                        "bytes": html.len(),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    eprintln!("wrote page shell -> {}", output.display());
                }
            }
        }
        Command::Preview {
            width,
            height,
            frames,
            seed,
            pointer,
            params,
            output,
        } => {
            let config = parse_config(&params)?;
            let pointer = parse_pointer(&pointer)?;
            let size = SurfaceSize::new(width, height);

            let surface =
                flow_title_preview::render_preview(&config, size, seed, pointer, frames)?;
            flow_title_preview::snapshot::write_png(&surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "pointer": [pointer.position.x, pointer.position.y],
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered preview ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Inspect {
            width,
            height,
            params,
        } => {
            let config = parse_config(&params)?;
            let mut rng = Xorshift64::new(1);
            let field = FlowField::build(SurfaceSize::new(width, height), &config, &mut rng)?;
            let stats = field.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("surface:  {}x{}", stats.width, stats.height);
                println!(
                    "grid:     {}x{} ({} lines, density {})",
                    stats.columns,
                    stats.rows,
                    stats.lines,
                    field.density()
                );
                println!(
                    "angle:    [{:.3}, {:.3}] rad",
                    stats.min_angle, stats.max_angle
                );
                println!(
                    "length:   [{:.3}, {:.3}]",
                    stats.min_length, stats.max_length
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
