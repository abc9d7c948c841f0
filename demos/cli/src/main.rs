use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use lifecycle_chart::drupal_chart;
use lifecycle_core::{ChartConfig, DATE_FORMAT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "lifecycle-cli",
    about = "Génère le graphique du cycle de vie des versions de Drupal core."
)]
struct Args {
    /// Fichier SVG de sortie.
    #[arg(short, long, default_value = "drupal_versions_lifecycle.svg")]
    output: PathBuf,

    /// Date de référence au format jj/mm/aaaa (par défaut : aujourd'hui).
    #[arg(long)]
    today: Option<String>,

    /// Ouvre le fichier généré dans la visionneuse du système.
    #[arg(long)]
    open: bool,

    /// Journalisation détaillée.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let today = match &args.today {
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .with_context(|| format!("Date de référence invalide : {value}"))?,
        None => Local::now().date_naive(),
    };

    let model = drupal_chart(today, &ChartConfig::default())?;
    lifecycle_svg::write_svg(&model, &args.output)
        .with_context(|| format!("Impossible d'écrire {:?}", args.output))?;

    println!(
        "Fichier exporté : {}\nVersions tracées : {}\nDate de référence : {}",
        args.output.display(),
        model.rows.len(),
        today.format(DATE_FORMAT)
    );

    if args.open {
        open_file(&args.output)?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Ouvre `path` avec la visionneuse par défaut de la plateforme.
fn open_file(path: &Path) -> anyhow::Result<()> {
    let status = if cfg!(target_os = "macos") {
        Command::new("open").arg(path).status()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).status()
    } else {
        Command::new("xdg-open").arg(path).status()
    }
    .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    anyhow::ensure!(status.success(), "La visionneuse a retourné {status}");
    Ok(())
}
