use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use url::Url;

use fillersync::{
    DEFAULT_FILLER_FIELD, ErrorKind, FillerOrigin, FillerSource, MediaServer, NoopReporter,
    ProgressEvent, ProgressReporter, ReqwestClient, SharedProgressReporter, SyncConfig,
    sync_collections,
};

// Emoji with fallback for terminals without Unicode support
static TV: Emoji<'_, '_> = Emoji("📺 ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static LIST: Emoji<'_, '_> = Emoji("📋 ", "[i] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "[+] ");
static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "[-] ");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[?] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");

/// Group a series' episodes into canon and filler collections on Emby
#[derive(Parser, Debug)]
#[command(name = "fillersync")]
#[command(about = "Create canon, filler and all-episode collections for an anime series on Emby")]
#[command(version)]
#[command(group(
    ArgGroup::new("filler_source")
        .required(true)
        .args(["filler_url", "filler_episodes"])
))]
struct Args {
    /// Media server base URL, e.g. http://localhost:8096
    #[arg(long, env = "EMBY_SERVER_URL")]
    server_url: Url,

    /// Media server API key
    #[arg(long, env = "EMBY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Media server identifier of the series
    #[arg(long, env = "PARENT_ID")]
    series_id: String,

    /// Series name used as prefix for the collection names
    #[arg(long, env = "SERIES_NAME")]
    series_name: String,

    /// URL of a JSON document listing the filler episodes
    #[arg(long, env = "FILLER_LIST_URL")]
    filler_url: Option<Url>,

    /// JSON field of the filler document holding the episode numbers
    #[arg(long, env = "FILLER_FIELD", default_value = DEFAULT_FILLER_FIELD)]
    filler_field: String,

    /// Comma separated absolute filler episode numbers, instead of a URL
    #[arg(long, env = "FILLER_EPISODE_NUMBERS", value_delimiter = ',')]
    filler_episodes: Vec<u32>,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Exit with a non-zero status when the sync fails
    #[arg(long)]
    strict: bool,
}

impl Args {
    /// The filler source configured on the command line or environment
    fn filler_source(&self) -> Option<FillerSource> {
        if !self.filler_episodes.is_empty() {
            return Some(FillerSource::Precomputed(self.filler_episodes.clone()));
        }

        self.filler_url.clone().map(|url| FillerSource::Remote {
            url,
            field: self.filler_field.clone(),
        })
    }
}

/// Progress reporter printing through an indicatif spinner
struct ConsoleReporter {
    spinner: ProgressBar,
}

impl ConsoleReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingFillerList { url } => {
                self.spinner
                    .set_message(format!("{SEARCH}Fetching filler list: {}", url.cyan()));
            }

            ProgressEvent::FillerListLoaded {
                origin,
                filler_count,
            } => {
                let origin = match origin {
                    FillerOrigin::Remote { url } => url,
                    FillerOrigin::Precomputed => "configuration".to_string(),
                };
                self.spinner.println(format!(
                    "{LIST}{} filler episodes from {}",
                    filler_count.to_string().yellow(),
                    origin.dimmed()
                ));
            }

            ProgressEvent::FetchingInventory { series_id } => {
                self.spinner.set_message(format!(
                    "{SEARCH}Fetching episodes of series {}",
                    series_id.cyan()
                ));
            }

            ProgressEvent::EpisodeUnmatched { item_id, source } => {
                let headline = match item_id {
                    Some(item_id) => format!("No absolute number for item {item_id}:"),
                    None => "Episode without an identifier:".to_string(),
                };
                self.spinner.println(format!(
                    "  {WARN}{} {}",
                    headline.yellow(),
                    source.unwrap_or_default().dimmed()
                ));
            }

            ProgressEvent::DuplicateAbsoluteNumber {
                absolute_number,
                replaced_id,
                item_id,
            } => {
                self.spinner.println(format!(
                    "  {WARN}{}",
                    format!(
                        "Episode {absolute_number} listed twice, using item {item_id} instead of {replaced_id}"
                    )
                    .yellow()
                ));
            }

            ProgressEvent::InventoryLoaded {
                total_items,
                matched_episodes,
            } => {
                self.spinner.println(format!(
                    "{LIST}{} of {} items matched to absolute episode numbers",
                    matched_episodes.to_string().green(),
                    total_items.to_string().cyan()
                ));
            }

            ProgressEvent::InventoryEmpty { series_id } => {
                self.spinner.println(format!(
                    "{WARN}{}",
                    format!("No episodes with absolute numbers found for series {series_id}, nothing to do")
                        .yellow()
                ));
            }

            ProgressEvent::BucketsReady {
                canon_count,
                filler_count,
                all_count,
            } => {
                self.spinner.println(format!(
                    "{LIST}{} canon • {} filler • {} total",
                    canon_count.to_string().green(),
                    filler_count.to_string().yellow(),
                    all_count.to_string().cyan()
                ));
            }

            ProgressEvent::CreatingCollection { name, item_count } => {
                self.spinner.set_message(format!(
                    "{FOLDER}Creating {} with {} items",
                    name.bold(),
                    item_count.to_string().cyan()
                ));
            }

            ProgressEvent::CollectionSkipped { name } => {
                self.spinner
                    .println(format!("{SKIP}{} {}", name.bold(), "(empty, skipped)".dimmed()));
            }

            ProgressEvent::CollectionCreated {
                name,
                collection_id,
            } => {
                let id = collection_id
                    .map(|id| format!("(id {id})"))
                    .unwrap_or_default();
                self.spinner
                    .println(format!("{FOLDER}{} {}", name.bold().green(), id.dimmed()));
            }

            ProgressEvent::SyncCompleted {
                created_count,
                skipped_count,
            } => {
                self.finish();
                println!(
                    "\n{PARTY}{} {} created, {} skipped",
                    "Sync complete:".bold().green(),
                    created_count.to_string().green().bold(),
                    skipped_count.to_string().yellow()
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filler = args
        .filler_source()
        .context("Either --filler-url or --filler-episodes is required")?;

    let config = SyncConfig {
        server: MediaServer::new(args.server_url.clone(), args.api_key.clone()),
        series_id: args.series_id.clone(),
        series_name: args.series_name.clone(),
        filler,
    };

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            TV,
            "fillersync".bold().magenta(),
            format!("- {}", config.series_name).dimmed()
        );
    }

    let console = (!args.quiet).then(|| Arc::new(ConsoleReporter::new()));
    let reporter: SharedProgressReporter = match &console {
        Some(console) => console.clone() as SharedProgressReporter,
        None => NoopReporter::shared(),
    };

    let client = ReqwestClient::new();
    let result = sync_collections(&client, &config, reporter).await;

    if let Some(console) = &console {
        console.finish();
    }

    if let Err(e) = result {
        let headline = match e.kind() {
            ErrorKind::Network => "Error fetching data or connecting to the media server",
            ErrorKind::Unexpected => "An unexpected error occurred",
        };
        let error = anyhow::Error::new(e).context(headline);

        eprintln!("\n{FAILURE}{}", format!("{error:#}").red());

        if args.strict {
            std::process::exit(1);
        }
    }

    Ok(())
}
