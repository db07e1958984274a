mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use todo_core::config::CoreConfig;
use todo_core::constants::DEFAULT_API_BASE;
use todo_core::runtime::CoreRuntime;
use todo_core::tracing_setup;
use todo_core::DashboardSession;

use crate::runtime::run_app;
use ui::App;

#[derive(Parser, Debug)]
#[command(name = "todo-dashboard")]
#[command(about = "Paginated todo dashboard with local, session-only edits", long_about = None)]
struct Args {
    /// Base URL of the todo API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Seconds a loaded page is served from cache before revalidating
    #[arg(long, default_value_t = 30)]
    stale_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Write debug logs to this file (also read from TODO_DASH_LOG_FILE)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match &args.log_file {
        Some(path) => tracing_setup::init_tracing_to(path)?,
        None => {
            tracing_setup::init_tracing()?;
        }
    }

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let config = CoreConfig::new(args.api_base)
        .with_stale_after(Duration::from_secs(args.stale_secs))
        .with_request_timeout(Duration::from_secs(args.timeout_secs));
    tracing::info!(api_base = %config.api_base, "starting todo dashboard");

    let mut core_runtime = CoreRuntime::new(config.clone())?;
    let data_rx = core_runtime
        .take_data_rx()
        .ok_or_else(|| anyhow::anyhow!("Core runtime already has active data receiver"))?;

    let mut app = App::new(DashboardSession::new(&config));
    app.set_core_handle(core_runtime.handle(), data_rx);

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app).await;

    core_runtime.shutdown();
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}
