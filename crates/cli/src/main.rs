#![deny(unsafe_code)]
//! CLI binary for the flowfield particle advection engine.
//!
//! Subcommands:
//! - `render`: advect particles for N frames headlessly, write a PNG of the trails
//! - `list`: print available fields and integration methods
//! - `config`: print the resolved config (or the parameter schema) as JSON

mod error;
mod script;
mod settings;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_advect::{FrameStats, Visualizer};
use flowfield_core::{FieldRegistry, FlowConfig, FlowError, IntegrationMethod, Rgba};
use flowfield_render::TrailCanvas;
use settings::Overrides;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Vector-field particle advection CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Config sources shared by `render` and `config`.
#[derive(clap::Args)]
struct ConfigArgs {
    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Config overrides as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Field index (see `list`).
    #[arg(short, long)]
    field: Option<usize>,

    /// Integration method (euler, rk2, rk4).
    #[arg(short, long)]
    method: Option<String>,

    /// PRNG seed for deterministic output.
    #[arg(long)]
    seed: Option<u64>,

    /// Base particle count at zoom 1.
    #[arg(short = 'n', long)]
    particles: Option<usize>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<FlowConfig, CliError> {
        let overrides = Overrides {
            field: self.field,
            method: self.method.clone(),
            seed: self.seed,
            particles: self.particles,
        };
        settings::resolve_config(self.config.as_deref(), &self.params, &overrides)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Advect particles for N frames and write a PNG of the trails.
    Render {
        #[command(flatten)]
        config: ConfigArgs,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: u32,

        /// Number of frames to simulate.
        #[arg(long, default_value_t = 600)]
        frames: usize,

        /// Simulated frames per second; each frame advances 1/fps seconds.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Background color as hex (e.g. "#000000").
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Scheduled commands as FRAME:COMMAND (e.g. "120:zoom-in", "300:field:6").
        #[arg(long = "at")]
        script: Vec<String>,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,
    },
    /// List available fields and integration methods.
    List,
    /// Print the resolved config as JSON.
    Config {
        #[command(flatten)]
        config: ConfigArgs,

        /// Print the parameter schema instead.
        #[arg(long)]
        schema: bool,
    },
}

/// A failed density resize leaves the zoom applied and the pool at its
/// previous size, so a scripted render carries on with `particles`.
fn keep_rendering(result: Result<(), FlowError>, particles: usize) -> Result<(), CliError> {
    match result {
        Err(e @ FlowError::AllocationFailed { .. }) => {
            log::warn!("continuing with {particles} particles: {e}");
            Ok(())
        }
        other => other.map_err(CliError::from),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let registry = FieldRegistry::builtin();
            let methods = IntegrationMethod::ALL.map(IntegrationMethod::name);
            if cli.json {
                let fields: Vec<_> = registry
                    .iter()
                    .map(|(index, name)| serde_json::json!({"index": index, "name": name}))
                    .collect();
                let info = serde_json::json!({
                    "fields": fields,
                    "methods": methods,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for (index, name) in registry.iter() {
                    println!("  {index}  {name}");
                }
                println!("Integration methods:");
                println!("  {}", methods.join(", "));
            }
        }
        Command::Config { config, schema } => {
            let out = if schema {
                FlowConfig::param_schema()
            } else {
                config.resolve()?.to_json()
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Render {
            config,
            width,
            height,
            frames,
            fps,
            background,
            script: entries,
            output,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(CliError::Input(format!("--fps must be positive, got {fps}")));
            }
            let config = config.resolve()?;
            let background = Rgba::from_hex(&background)?;
            let script = script::parse_script(&entries)?;
            let dt = 1.0 / fps;

            let mut vis = Visualizer::new(config)?;
            let mut canvas = TrailCanvas::new(width, height, background)?;
            let mut totals = FrameStats::default();
            let mut pending = script.iter().peekable();

            for frame in 0..frames {
                while let Some(entry) = pending.next_if(|s| s.frame == frame) {
                    keep_rendering(vis.apply(entry.command), vis.particles().len())?;
                }
                let stats = vis.frame(dt);
                totals.advanced += stats.advanced;
                totals.out_of_view += stats.out_of_view;
                totals.expired += stats.expired;
                totals.forced += stats.forced;
                let clear = vis.take_clear_request();
                canvas.present(vis.particles(), &vis.camera().view_bounds(), clear);
            }
            let skipped = pending.count();
            if skipped > 0 {
                log::warn!("{skipped} scheduled command(s) fall after the last frame");
            }

            flowfield_render::snapshot::write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "session": vis.params(),
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "fps": fps,
                    "particle_steps": totals.advanced,
                    "respawned": {
                        "out_of_view": totals.out_of_view,
                        "expired": totals.expired,
                        "forced": totals.forced,
                    },
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({} particles, {frames} frames, {width}x{height}) -> {}",
                    vis.field_name(),
                    vis.particles().len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
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

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_advect::Command as SessionCommand;

    #[test]
    fn failed_resize_keeps_rendering() {
        let err = FlowError::AllocationFailed { requested: 20_000 };
        assert!(keep_rendering(Err(err), 5000).is_ok());
    }

    #[test]
    fn other_errors_still_stop_the_render() {
        let result = keep_rendering(Err(FlowError::InvalidDimensions), 5000);
        assert!(matches!(result, Err(CliError::Flow(FlowError::InvalidDimensions))));
        let result = keep_rendering(Err(FlowError::Io("disk".into())), 5000);
        assert_eq!(result.map_err(|e| e.exit_code()), Err(11));
    }

    #[test]
    fn scheduled_zoom_applies_through_keep_rendering() {
        let mut vis = Visualizer::new(FlowConfig {
            particle_count: 1000,
            ..FlowConfig::default()
        })
        .unwrap();
        let result = vis.apply(SessionCommand::ZoomOut);
        keep_rendering(result, vis.particles().len()).unwrap();
        assert!(vis.camera().zoom < 1.0);
    }
}
