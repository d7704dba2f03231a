use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use forcelayout::config::LayoutConfig;
use forcelayout::graph::Graph;
use forcelayout::io::FormatRegistry;
use forcelayout::layout::{Integrator, RunSummary, Scheduler};
use forcelayout::prompt::{PromptError, Prompter};
use forcelayout::render::TracingRenderer;

/// Force-directed layout for graphs described as edge lists.
#[derive(Parser)]
#[command(name = "forcelayout")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out one graph file and write the result
    Run {
        /// Input graph description (.txt edge list or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the final layout (.svg or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format, overriding the output file extension
        #[arg(short, long)]
        format: Option<String>,

        #[command(flatten)]
        tuning: Tuning,
    },
    /// Prompt for graph files and durations on the console
    Interactive {
        /// Write each finished layout here (.svg or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: Tuning,
    },
}

/// Simulation parameters shared by every subcommand
#[derive(Args, Debug, Default)]
struct Tuning {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wall-clock budget in seconds
    #[arg(short, long, allow_negative_numbers = true)]
    duration: Option<f64>,

    /// Stop after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Repulsion strength
    #[arg(long)]
    k_repel: Option<f64>,

    /// Attraction strength
    #[arg(long)]
    k_attract: Option<f64>,
}

impl Tuning {
    /// Load the config file (if any) and apply command-line overrides
    fn resolve(&self) -> anyhow::Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::from_yaml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LayoutConfig::default(),
        };

        if let Some(duration) = self.duration {
            config.run.duration_seconds = duration;
        }
        if let Some(max_steps) = self.max_steps {
            config.run.max_steps = Some(max_steps);
        }
        if let Some(k_repel) = self.k_repel {
            config.forces.k_repel = k_repel;
        }
        if let Some(k_attract) = self.k_attract {
            config.forces.k_attract = k_attract;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "forcelayout=info",
        1 => "forcelayout=debug",
        _ => "forcelayout=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn simulate(graph: &mut Graph, config: &LayoutConfig) -> RunSummary {
    let mut scheduler = Scheduler::with_system_clock(Integrator::new(config.forces), config.run);
    let summary = scheduler.run(graph, &mut TracingRenderer::default());
    info!(
        steps = summary.steps,
        elapsed = summary.elapsed_seconds,
        degenerate_steps = summary.degenerate_steps,
        diverged = summary.diverged,
        "layout finished"
    );
    summary
}

fn write_layout(
    registry: &FormatRegistry,
    graph: &Graph,
    output: &Path,
    format: Option<&str>,
) -> anyhow::Result<()> {
    let writer = match format {
        Some(format) => registry
            .writer_for_format(format)
            .ok_or_else(|| anyhow::anyhow!("unsupported output format: {format}"))?,
        None => registry.writer_for_path(output)?,
    };
    writer
        .write(graph, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

fn summary_line(graph: &Graph, summary: &RunSummary) -> String {
    format!(
        "Laid out {} nodes, {} edges in {} steps",
        graph.node_count(),
        graph.edge_count(),
        summary.steps
    )
}

fn run(
    input: &Path,
    output: Option<&Path>,
    format: Option<&str>,
    tuning: &Tuning,
) -> anyhow::Result<()> {
    let config = tuning.resolve()?;
    let registry = FormatRegistry::with_defaults();

    let mut graph = registry
        .read(input)
        .with_context(|| format!("failed to read graph {}", input.display()))?;
    let summary = simulate(&mut graph, &config);

    if let Some(output) = output {
        write_layout(&registry, &graph, output, format)?;
    }

    println!("{}", summary_line(&graph, &summary));
    Ok(())
}

fn interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    output: Option<&Path>,
    tuning: &Tuning,
) -> anyhow::Result<()> {
    let config = tuning.resolve()?;
    let registry = FormatRegistry::with_defaults();

    match interactive_session(prompter, &registry, &config, output) {
        Ok(()) | Err(PromptError::InputExhausted) => {}
        Err(e) => return Err(e.into()),
    }
    prompter.say("Goodbye.")?;
    Ok(())
}

/// Prompt, lay out, and repeat until the user declines or input runs out
fn interactive_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    registry: &FormatRegistry,
    config: &LayoutConfig,
    output: Option<&Path>,
) -> Result<(), PromptError> {
    loop {
        prompter.welcome()?;
        let (path, mut graph) = prompter.prompt_for_graph(registry)?;

        let mut run_config = *config;
        run_config.run.duration_seconds = prompter.prompt_duration()?;
        let summary = simulate(&mut graph, &run_config);
        prompter.say(&summary_line(&graph, &summary))?;

        if let Some(output) = output {
            match write_layout(registry, &graph, output, None) {
                Ok(()) => prompter.say(&format!(
                    "Wrote layout of {} to {}",
                    path.display(),
                    output.display()
                ))?,
                Err(e) => prompter.say(&format!("Could not write layout: {e:#}"))?,
            }
        }

        if !prompter.prompt_yes_no("Lay out another file? (y/n) ")? {
            return Ok(());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            output,
            format,
            tuning,
        } => {
            run(&input, output.as_deref(), format.as_deref(), &tuning)?;
        }
        Commands::Interactive { output, tuning } => {
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
            interactive(&mut prompter, output.as_deref(), &tuning)?;
        }
    }

    Ok(())
}
