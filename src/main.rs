//! Command-line front end for editing and applying translations.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use pb_translator::apply::ApplyReport;
use pb_translator::config::ConfigManager;
use pb_translator::view::TableView;
use pb_translator::{
    Error,
    FileTranslator,
    Result,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pb-translator")]
#[command(version)]
#[command(about = "Translation overlay for Pathbuilder datasets")]
struct Cli {
    /// Workspace holding `.pb-translator.json`
    #[arg(short = 'C', long, global = true, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the translation of a cell text
    Get {
        table: String,
        original: String,

        /// Language code (default: the active language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Store a translation; an empty or unchanged text removes it
    Set {
        table: String,
        original: String,
        translated: String,

        /// Language code (default: the active language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Show the active language, or switch to another and re-apply
    Lang {
        #[arg(value_name = "CODE")]
        code: Option<String>,
    },

    /// List the visible tables of a dataset
    Tables {
        #[arg(value_name = "DATASET")]
        dataset: String,
    },

    /// Print a table; translatable columns are marked with `*`
    Show {
        #[arg(value_name = "DATASET")]
        dataset: String,
        #[arg(value_name = "TABLE")]
        table: String,

        /// Column to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Replace a language's translations with a bundle file
    Import {
        #[arg(value_name = "LANG")]
        lang: String,

        /// Bundle file (default: `<bundlesDir>/<LANG>.json`)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Patch the host datasets with the active language
    Apply,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigManager::new();
    config.load_settings(Some(cli.workspace))?;
    let mut translator = FileTranslator::from_config(&config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Get { table, original, lang } => {
            let lang = lang.unwrap_or_else(|| translator.current_language());
            match translator.translation(&lang, &table, &original) {
                Some(translated) => writeln!(out, "{translated}")?,
                None => tracing::info!(lang = %lang, "No translation stored"),
            }
        }
        Commands::Set { table, original, translated, lang } => {
            let lang = lang.unwrap_or_else(|| translator.current_language());
            translator.set_translation(&lang, &table, &original, &translated)?;
        }
        Commands::Lang { code: None } => {
            let current = translator.current_language();
            for lang in translator.settings().selectable_languages() {
                let marker = if lang == current { "*" } else { " " };
                writeln!(out, "{marker} {lang}")?;
            }
        }
        Commands::Lang { code: Some(code) } => {
            let report = translator.switch_language(&code).await?;
            writeln!(out, "{code}: {}", summary(&report))?;
        }
        Commands::Tables { dataset } => {
            for table in translator.tables(&dataset).await? {
                writeln!(out, "{table}")?;
            }
        }
        Commands::Show { dataset, table, sort, desc } => {
            let mut view = translator.view(&dataset, &table).await?;
            if let Some(column) = sort {
                let index = view
                    .column_index(&column)
                    .ok_or_else(|| Error::UnknownColumn { table: table.clone(), column })?;
                view.sort_by(index);
                if desc {
                    view.sort_by(index);
                }
            }
            let translations = translator
                .store()
                .language_map(&translator.current_language())
                .remove(&table)
                .unwrap_or_default();
            print_view(&mut out, &view, |original| translations.get(original).cloned())?;
        }
        Commands::Import { lang, file } => {
            let kept = translator.import_bundle(&lang, file.as_deref()).await?;
            writeln!(out, "{lang}: {kept} translations imported")?;
        }
        Commands::Apply => {
            let report = translator.apply().await?;
            writeln!(out, "{}", summary(&report))?;
        }
    }

    Ok(())
}

/// One-line outcome of an apply pass.
fn summary(report: &ApplyReport) -> String {
    format!(
        "{} patched, {} unchanged, {} skipped",
        report.patched.len(),
        report.unchanged.len(),
        report.skipped.len()
    )
}

/// Tab-separated grid; translated cells of editable columns show `original => translated`.
fn print_view(
    out: &mut impl Write,
    view: &TableView,
    translate: impl Fn(&str) -> Option<String>,
) -> std::io::Result<()> {
    let header: Vec<String> = view
        .header()
        .iter()
        .enumerate()
        .map(|(index, name)| if view.is_editable(index) { format!("*{name}") } else { name.clone() })
        .collect();
    writeln!(out, "{}", header.join("\t"))?;

    for row in view.rows() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| match view.is_editable(index).then(|| translate(cell)).flatten() {
                Some(translated) => format!("{cell} => {translated}"),
                None => cell.clone(),
            })
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }

    Ok(())
}
