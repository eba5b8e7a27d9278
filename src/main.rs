use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskmaster::db::Database;
use taskmaster::models::{TaskPriority, TaskStatus};
use taskmaster::query::{SortKey, TaskQuery};
use taskmaster::{api, ui};

#[derive(Parser)]
#[command(name = "tsk")]
#[command(about = "Personal task tracking with filtered views and statistics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TaskMaster server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
    /// List tasks in the terminal
    List {
        /// Keep only tasks with this status (todo, in-progress, done)
        #[arg(long)]
        status: Option<String>,
        /// Keep only tasks with this priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// Sort key: date, priority, or status
        #[arg(long)]
        sort: Option<String>,
        /// Free-text search over title, description, and tags
        #[arg(long)]
        search: Option<String>,
    },
    /// Show aggregate task statistics
    Stats,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "taskmaster=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        Some(Commands::List {
            status,
            priority,
            sort,
            search,
        }) => {
            let status = status
                .as_deref()
                .map(|s| {
                    TaskStatus::from_str(s).ok_or_else(|| anyhow::anyhow!("Unknown status: {s}"))
                })
                .transpose()?;
            let priority = priority
                .as_deref()
                .map(|p| {
                    TaskPriority::from_str(p)
                        .ok_or_else(|| anyhow::anyhow!("Unknown priority: {p}"))
                })
                .transpose()?;

            let db = Database::open_default()?;
            db.migrate()?;

            let query = TaskQuery {
                status,
                priority,
                term: search,
                sort: SortKey::parse(sort.as_deref()),
            };
            let tasks = db.list_tasks(&query)?;
            ui::print_task_list(&tasks, Utc::now());
        }
        Some(Commands::Stats) => {
            let db = Database::open_default()?;
            db.migrate()?;

            let stats = db.task_stats(Utc::now())?;
            ui::print_stats(&stats);
        }
        None => serve(3001).await?,
    }

    Ok(())
}

async fn serve(port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting TaskMaster server on port {}", port);

    let db = Database::open_default()?;
    db.migrate()?;

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("TaskMaster server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
