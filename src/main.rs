use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use placement_board::aggregate::{collect_placements, search, SearchQuery};
use placement_board::config::{self, Settings, DEFAULT_REFRESH_SECS};
use placement_board::counter::{current_visits, visit_label, FileCounterStore};
use placement_board::display::text;
use placement_board::display::{
    export_placements_to_csv, AnnouncementsView, CompanyTarget, CompanyView, Layout, PlacementsView,
    ScheduleView, SearchView,
};
use placement_board::loader::{load_company, load_dashboard, load_day_schedule, log_unavailable};
use placement_board::model::{Day, DayFilter, DaySchedule};
use placement_board::{open_source, web, DataSource};

#[derive(Parser)]
#[command(
    name = "placement-board",
    about = "Live placement drive dashboard: schedules, shortlists, placements",
    version
)]
struct Cli {
    /// Directory or base URL holding the data/ tree (env: PLACEMENT_DATA).
    #[arg(long, global = true)]
    data: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP.
    Web {
        /// Listen port (env: PORT).
        #[arg(long)]
        port: Option<u16>,

        /// Visit counter file (env: PLACEMENT_COUNTER_FILE).
        #[arg(long)]
        counter_file: Option<PathBuf>,

        /// Seconds between snapshot refreshes.
        #[arg(long, default_value_t = DEFAULT_REFRESH_SECS)]
        refresh_secs: u64,
    },

    /// Print announcements and latest updates.
    Dashboard,

    /// Print one day's schedule.
    Schedule {
        day: Day,

        /// Viewport width to lay out for; cards below 768.
        #[arg(long)]
        width: Option<u32>,
    },

    /// Print the shortlists of one company.
    Company {
        day: Day,
        sheet: String,

        /// Section key (registered, round1, round2, round3, selected).
        #[arg(long)]
        section: Option<String>,
    },

    /// Print placements, optionally for one day.
    Placements {
        /// Day number or "all".
        #[arg(long, default_value = "all")]
        day: DayFilter,

        /// Also write every placement to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Find a roll number in one day's shortlists and in all placements.
    Search {
        roll: String,

        #[arg(long)]
        day: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data = config::resolve_data(cli.data.as_deref());
    let source = open_source(&data).with_context(|| format!("cannot open data source {}", data))?;

    match cli.command {
        Commands::Web {
            port,
            counter_file,
            refresh_secs,
        } => {
            if refresh_secs == 0 {
                bail!("--refresh-secs must be at least 1");
            }
            let settings = Settings {
                data,
                port: config::resolve_port(port)?,
                counter_file: config::resolve_counter_file(counter_file),
                refresh: Duration::from_secs(refresh_secs),
                ..Settings::default()
            };
            let counter = Arc::new(FileCounterStore::new(&settings.counter_file));
            web::start_server(settings, source, counter).await?;
        }
        Commands::Dashboard => print_dashboard(source.as_ref()).await?,
        Commands::Schedule { day, width } => print_schedule(source.as_ref(), day, width).await?,
        Commands::Company { day, sheet, section } => {
            print_company(source.as_ref(), day, sheet, section.as_deref()).await?
        }
        Commands::Placements { day, csv } => {
            let all = collect_placements(source.as_ref()).await;
            if let Some(path) = csv {
                export_placements_to_csv(&all, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("wrote {} placements to {}", all.len(), path.display());
            }
            text::write_placements(&mut io::stdout().lock(), &PlacementsView::build(&all, day))?;
        }
        Commands::Search { roll, day } => {
            let view = match SearchQuery::parse(&roll, Some(&day)) {
                Ok(query) => match search(source.as_ref(), &query).await {
                    Ok(result) => SearchView::build(&result),
                    Err(e) => {
                        tracing::warn!("search for {:?} failed: {}", query.roll_no, e);
                        SearchView::error(e.user_message())
                    }
                },
                Err(e) => SearchView::error(e.user_message()),
            };
            text::write_search(&mut io::stdout().lock(), &view)?;
        }
    }

    Ok(())
}

async fn print_dashboard(source: &dyn DataSource) -> anyhow::Result<()> {
    let snapshot = match load_dashboard(source).await {
        Ok(s) => Some(s),
        Err(e) => {
            log_unavailable(&e);
            None
        }
    };
    // the CLI only reads the counter; visits are counted by the web home page
    let counter = FileCounterStore::new(config::resolve_counter_file(None));
    let visits = visit_label(current_visits(&counter).await);

    let mut out = io::stdout().lock();
    text::write_announcements(&mut out, &AnnouncementsView::build(snapshot.as_ref()), &visits)?;
    out.flush()?;
    Ok(())
}

async fn print_schedule(source: &dyn DataSource, day: Day, width: Option<u32>) -> anyhow::Result<()> {
    let schedule = match load_day_schedule(source, day).await {
        Ok(s) => s,
        Err(e) if e.is_not_yet_available() => {
            log_unavailable(&e);
            DaySchedule::default()
        }
        Err(e) => bail!("Error loading schedule: {}", e),
    };
    let view = ScheduleView::build(day, &schedule, Layout::for_width(width));
    text::write_schedule(&mut io::stdout().lock(), &view)?;
    Ok(())
}

async fn print_company(
    source: &dyn DataSource,
    day: Day,
    sheet: String,
    section: Option<&str>,
) -> anyhow::Result<()> {
    let detail = load_company(source, day, &sheet)
        .await
        .context("Error loading company details")?;

    // the display name lives in the day schedule; fall back to the sheet
    let company_name = match load_day_schedule(source, day).await {
        Ok(s) => s
            .schedule
            .into_iter()
            .find(|e| e.sheet_name == sheet)
            .map(|e| e.company_name),
        Err(e) => {
            log_unavailable(&e);
            None
        }
    }
    .unwrap_or_else(|| sheet.clone());

    let target = CompanyTarget {
        day,
        sheet_name: sheet,
        company_name,
    };
    text::write_company(&mut io::stdout().lock(), &CompanyView::build(target, &detail.sections, section))?;
    Ok(())
}
