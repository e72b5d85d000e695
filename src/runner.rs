// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    time::Duration,
};

use log::{info, warn};

use clap::Parser;

use ratatui::style::Color;

use crate::config::{find_config, ProteinScapeConfig};
use crate::errors::ProteinScapeError;
use crate::output::{write_json, OutputDir};
use crate::pipeline::{run_batch, run_single, BatchEvent, RenderedStructure};
use crate::predict::{EsmFoldClient, DEFAULT_TIMEOUT_SECS, ESMFOLD_URL};
use crate::render::barchart::{chart_svg, print_chart, SKY_BLUE};
use crate::render::RenderStyle;
use crate::seq::fasta::{parse_fasta, read_fasta, read_fasta_file};
use crate::seq::file::SeqFile;
use crate::session::Session;

pub const DEFAULT_SEQUENCE: &str = "MKTAYIAKQRQISFVKSHFSRQDILDLWQYFSYGRAL";

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// Protein sequence (single prediction)
    sequence: Option<String>,

    /// FastA file with several sequences ("-" reads standard input)
    #[arg(short, long = "fasta", conflicts_with = "sequence")]
    fasta: Option<String>,

    /// Several sequences as FastA text (ignored if --fasta is given)
    #[arg(long = "fasta-text", conflicts_with = "sequence")]
    fasta_text: Option<String>,

    /// Use the built-in example sequence
    #[arg(long, conflicts_with_all = ["sequence", "fasta", "fasta_text"])]
    example: bool,

    /// Visualization style
    #[arg(short, long, value_enum)]
    style: Option<RenderStyle>,

    /// Output directory for structure files and viewer pages [default: .]
    #[arg(short, long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Prediction endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout [s]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Do not print the amino acid distribution
    #[arg(long = "no-chart")]
    no_chart: bool,

    /// Write a JSON summary of the batch to this file
    #[arg(long)]
    summary: Option<PathBuf>,
}

// Everything the run needs, once the command line and the config file have been merged.
struct Settings {
    style: RenderStyle,
    out_dir: PathBuf,
    endpoint: String,
    timeout: Duration,
    bar_color: Color,
    show_chart: bool,
}

impl Settings {
    fn merge(cli: &Cli, config: ProteinScapeConfig) -> Self {
        let bar_color = config.bar_color().unwrap_or(SKY_BLUE);
        Settings {
            style: cli.style.or(config.style).unwrap_or_default(),
            out_dir: cli
                .out_dir
                .clone()
                .or(config.out_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            endpoint: cli
                .endpoint
                .clone()
                .or(config.endpoint)
                .unwrap_or_else(|| String::from(ESMFOLD_URL)),
            timeout: Duration::from_secs(
                cli.timeout
                    .or(config.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            bar_color,
            show_chart: !cli.no_chart,
        }
    }
}

fn load_config() -> ProteinScapeConfig {
    let Some(path) = find_config() else {
        return ProteinScapeConfig::default();
    };
    match ProteinScapeConfig::from_file(&path) {
        Ok(config) => {
            info!("using config {}", path.display());
            config
        }
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            eprintln!("Warning: ignoring {} ({})", path.display(), e);
            ProteinScapeConfig::default()
        }
    }
}

fn read_batch(cli: &Cli) -> Result<Option<SeqFile>, ProteinScapeError> {
    if let Some(fname) = &cli.fasta {
        let records = if fname == "-" {
            read_fasta(stdin().lock())?
        } else {
            read_fasta_file(fname)?
        };
        return Ok(Some(records));
    }
    Ok(cli.fasta_text.as_deref().map(parse_fasta))
}

fn save(
    out: &OutputDir,
    rendered: &RenderedStructure,
    settings: &Settings,
) -> Result<(), ProteinScapeError> {
    let svg = chart_svg(&rendered.composition, settings.bar_color);
    let html = rendered.viewer.to_html(&rendered.title(), Some(&svg))?;
    let pdb = out.write_structure(rendered.position, &rendered.structure)?;
    let page = out.write_viewer(rendered.position, &html)?;
    println!("Structure: {}", pdb.display());
    println!("Viewer:    {}", page.display());
    Ok(())
}

fn show(rendered: &RenderedStructure, settings: &Settings) -> Result<(), ProteinScapeError> {
    println!("### {}", rendered.title());
    if let Some(header) = &rendered.header {
        println!(">{}", header);
    }
    println!(
        "{} residues, {} atoms, style: {}",
        rendered.sequence.chars().count(),
        rendered.structure.atom_count(),
        rendered.viewer.style()
    );
    if settings.show_chart {
        print_chart(&rendered.composition, settings.bar_color)?;
    }
    Ok(())
}

fn single(
    session: &mut Session<EsmFoldClient>,
    sequence: &str,
    settings: &Settings,
) -> Result<(), ProteinScapeError> {
    println!("Predicting structure, please wait...");
    let rendered = run_single(session, sequence, settings.style)?;
    let out = OutputDir::create(&settings.out_dir)?;
    show(&rendered, settings)?;
    save(&out, &rendered, settings)
}

fn batch(
    session: &mut Session<EsmFoldClient>,
    records: &SeqFile,
    settings: &Settings,
    summary_path: Option<&PathBuf>,
) -> Result<(), ProteinScapeError> {
    if records.is_empty() {
        return Err(ProteinScapeError::EmptyInput);
    }
    let out = OutputDir::create(&settings.out_dir)?;
    println!("Processing {} sequence(s)...", records.len());

    let summary = run_batch(session, records, settings.style, None, |event| {
        match event {
            BatchEvent::Skipped { position, reason } => {
                eprintln!(
                    "Warning: sequence {} will be skipped: {}",
                    position + 1,
                    reason
                );
            }
            BatchEvent::Failed { position, error } => {
                eprintln!("Warning: sequence {} failed: {}", position + 1, error);
            }
            BatchEvent::Rendered(rendered) => {
                show(rendered, settings)?;
                save(&out, rendered, settings)?;
            }
            BatchEvent::Progress { done, total } => {
                eprintln!("[{}/{}]", done, total);
            }
        }
        Ok(())
    });

    if summary.succeeded > 0 {
        println!(
            "Summary: Successfully processed {} out of {} sequences.",
            summary.succeeded, summary.total
        );
    } else {
        println!("Summary: no sequence could be processed.");
    }
    if let Some(path) = summary_path {
        write_json(&summary, path)?;
        info!("wrote summary to {}", path.display());
    }
    stdout().flush()?;
    Ok(())
}

pub fn run() -> Result<(), ProteinScapeError> {
    env_logger::init();
    info!("Starting log");

    let cli = Cli::parse();
    let settings = Settings::merge(&cli, load_config());

    let client = EsmFoldClient::new(&settings.endpoint, settings.timeout)?;
    info!("endpoint: {}", client.endpoint());
    let mut session = Session::new(client);

    if let Some(records) = read_batch(&cli)? {
        return batch(&mut session, &records, &settings, cli.summary.as_ref());
    }

    let sequence = if cli.example {
        String::from(DEFAULT_SEQUENCE)
    } else {
        cli.sequence.clone().unwrap_or_default()
    };
    single(&mut session, &sequence, &settings)
}
