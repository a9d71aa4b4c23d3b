//! Command-line interface for addo.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::{OutputFormat, ResolvedSettings, Settings};
use crate::error::Result;
use crate::parser::DestinationParser;
use crate::render::{create_renderer, file_stem};
use crate::taxonomy::Taxonomies;

/// Addo - Render destination pages from destinations and taxonomy XML.
#[derive(Parser)]
#[command(name = "addo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one output file per destination.
    Render {
        /// YAML settings file; command-line options override its values
        config: Option<PathBuf>,

        /// File containing the destinations XML
        #[arg(short, long)]
        destinations: Option<PathBuf>,

        /// File containing the taxonomy XML
        #[arg(short, long)]
        taxonomy: Option<PathBuf>,

        /// Directory to write rendered files into (must exist)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page template replacing the built-in HTML page
        #[arg(short = 'r', long)]
        template: Option<PathBuf>,

        /// Output format (default: html)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Log debug output
        #[arg(long)]
        debug: bool,
    },
}

impl Cli {
    /// Whether debug logging was requested.
    #[must_use]
    pub fn debug(&self) -> bool {
        match &self.command {
            Commands::Render { debug, .. } => *debug,
        }
    }
}

/// Run the CLI.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            config,
            destinations,
            taxonomy,
            output,
            template,
            format,
            debug: _,
        } => {
            let from_args = Settings {
                destinations,
                taxonomy,
                output,
                template,
                format,
            };
            let settings = resolve_settings(config.as_deref(), from_args)?;
            let rendered = render_command(&settings)?;

            println!();
            println!(
                "{} {} files to {}",
                style("Rendered").green().bold(),
                rendered,
                settings.output.display()
            );
            Ok(())
        }
    }
}

/// Layer command-line settings over the settings file, if any, and validate.
pub fn resolve_settings(config: Option<&Path>, from_args: Settings) -> Result<ResolvedSettings> {
    let base = match config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    base.merge(from_args).validate()
}

/// Render every destination and return the number of files written.
pub fn render_command(settings: &ResolvedSettings) -> Result<usize> {
    let source = fs::read_to_string(&settings.destinations)?;
    let taxonomies = match &settings.taxonomy {
        Some(path) => Taxonomies::parse(&fs::read_to_string(path)?)?,
        None => Taxonomies::new(),
    };
    let renderer = create_renderer(settings.format, settings.template.as_deref())?;

    println!(
        "{} {} into {}",
        style("Rendering").bold(),
        style(settings.destinations.display()).cyan(),
        style(settings.output.display()).green()
    );

    let parser = DestinationParser::with_taxonomies(&source, taxonomies)?;

    let pb = ProgressBar::new(parser.destination_count() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut names = OutputNames::default();
    let mut rendered = 0;
    for destination in parser.destinations() {
        pb.set_message(destination.name().to_string());

        let stem = names.claim(file_stem(destination.name()));
        info!(destination = destination.name(), file = %stem, "rendering");

        let path = settings
            .output
            .join(format!("{stem}.{}", renderer.extension()));
        let result = renderer
            .render(&destination)
            .and_then(|page| fs::write(&path, page).map_err(Into::into));
        if let Err(e) = result {
            pb.finish_and_clear();
            return Err(e);
        }

        rendered += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(rendered)
}

/// Hands out distinct output file stems.
///
/// The first destination with a stem keeps it; later ones get `_1`, `_2`, ...
/// appended, skipping any stem already handed out.
#[derive(Debug, Default)]
struct OutputNames {
    repeats: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl OutputNames {
    fn claim(&mut self, stem: String) -> String {
        let count = self.repeats.entry(stem.clone()).or_insert(0);
        let mut candidate = stem.clone();
        while self.taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{stem}_{count}");
        }
        if candidate != stem {
            warn!(stem = %stem, file = %candidate, "duplicate destination key, renaming output");
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
