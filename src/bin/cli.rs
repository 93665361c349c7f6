// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Frameworx CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use frameworx::cli::{Reporter, Runner};
use frameworx::geometry::deform::DEFAULT_SPLIT_RATIO;
use frameworx::{inspect_stl, shapes, CapMode, Frame, FrameworxConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frameworx")]
#[command(about = "Frameworx - procedural truss builder with binary STL output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./frameworx.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a wireframe cube
    Cube {
        /// Edge length
        #[arg(long, default_value = "10")]
        side: f64,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a row of cubes, optionally bent or twisted
    Truss {
        /// Cube edge length
        #[arg(long, default_value = "10")]
        side: f64,

        /// Number of cubes
        #[arg(long, default_value = "10")]
        cells: usize,

        /// Bend along the spine, in degrees
        #[arg(long)]
        bend: Option<f64>,

        /// Twist about the spine, in degrees
        #[arg(long)]
        twist: Option<f64>,

        /// Members whose length the deformation would change by more than a
        /// factor of 1/split-ratio are subdivided first
        #[arg(long, default_value_t = DEFAULT_SPLIT_RATIO)]
        split_ratio: f64,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a self-similar cubic truss
    Fractal {
        /// Cubes per level, e.g. 3,3
        #[arg(long, value_delimiter = ',', required = true)]
        levels: Vec<usize>,

        /// Length of the innermost stick
        #[arg(long, default_value = "4")]
        stick_length: f64,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a chain of cubes or octahedra, each level built from the last
    Chain {
        /// Links per level, e.g. 4,4
        #[arg(long, value_delimiter = ',', required = true)]
        levels: Vec<usize>,

        /// Length of the innermost stick
        #[arg(long, default_value = "4")]
        stick_length: f64,

        /// Link octahedra instead of cubes
        #[arg(long)]
        octahedral: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Summarize a binary STL file
    Inspect {
        /// STL file
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Output STL file
    #[arg(short, long, default_value = "frameworx.stl")]
    output: PathBuf,

    /// Tube radius for a member of thickness 1
    #[arg(long)]
    radius: Option<f64>,

    /// Facets around each tube
    #[arg(long)]
    resolution: Option<u32>,

    /// End finish: auto, all, none, ball or flat
    #[arg(long)]
    caps: Option<CapMode>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Skip the repair passes
    #[arg(long)]
    no_repair: bool,

    /// Bridge loose ends during repair
    #[arg(long)]
    fill_gaps: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "frameworx=debug" } else { "frameworx=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = FrameworxConfig::from_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => FrameworxConfig::load()?,
    };

    match cli.command {
        Commands::Cube { side, render } => render_command(shapes::cube(side), render, config),
        Commands::Truss {
            side,
            cells,
            bend,
            twist,
            split_ratio,
            render,
        } => {
            let mut frame = shapes::cubic_truss(side, cells);
            if let Some(degrees) = bend {
                frame = frame.bend(degrees, split_ratio);
            }
            if let Some(degrees) = twist {
                frame = frame.twist(degrees, split_ratio);
            }
            render_command(frame, render, config)
        }
        Commands::Fractal {
            levels,
            stick_length,
            render,
        } => render_command(
            shapes::cubic_fractal_truss(&levels, stick_length),
            render,
            config,
        ),
        Commands::Chain {
            levels,
            stick_length,
            octahedral,
            render,
        } => {
            let frame = if octahedral {
                shapes::octahedral_fractal_chain(&levels, stick_length)
            } else {
                shapes::cubic_fractal_chain(&levels, stick_length)
            };
            render_command(frame, render, config)
        }
        Commands::Inspect { file, json } => {
            let summary = inspect_stl(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                Reporter::report_inspect(&file.display().to_string(), &summary);
            }
            Ok(())
        }
    }
}

fn render_command(mut frame: Frame, args: RenderArgs, mut config: FrameworxConfig) -> Result<()> {
    if let Some(radius) = args.radius {
        config.render.radius = radius;
    }
    if let Some(resolution) = args.resolution {
        config.render.resolution = resolution;
    }
    if args.caps.is_some() {
        config.render.caps = args.caps;
    }
    if args.fill_gaps {
        config.repair.fill_gaps = true;
    }

    let mut runner = Runner::new(config);
    if args.no_repair {
        runner = runner.without_repair();
    }

    if !args.json {
        Reporter::progress(&format!("Rendering {} members", frame.member_count()));
    }

    let report = runner.run(&mut frame, &args.output)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        Reporter::report_run(&args.output.display().to_string(), &report);
    }
    Ok(())
}
