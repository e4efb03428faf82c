use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use proctop::app::App;
use proctop::config::{self, Config, load_config, load_config_from_path};
use proctop::event::{Event, EventHandler, TICK_RATE};
use proctop::system::collector::Collector;
use proctop::{logging, ui};

#[derive(Parser)]
#[command(
    name = "proctop",
    about = "Terminal resource monitor ranking processes by CPU usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Take a single snapshot, print it as JSON and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Write logs to this file (filter with PROCTOP_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write logs as JSON lines instead of plain text.
    #[arg(long, default_value_t = false, requires = "log_file")]
    json_log: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path, cli.json_log)?;
    }
    let config = load_config_for_cli(&cli);
    tracing::info!(
        max_processes = config.general.max_processes,
        proc_root = %config.paths.proc_root.display(),
        "starting"
    );

    if cli.once {
        return print_snapshot(&config);
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;
    ratatui::restore();
    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(TICK_RATE);

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = app.map_key(key);
                app.dispatch(action);
                true
            }
            Event::Key(_) => false,
            Event::Tick => {
                app.refresh_data();
                true
            }
            Event::Resize => true,
        };
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    tracing::info!("exiting");
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}

fn print_snapshot(config: &Config) -> Result<()> {
    let mut collector = Collector::with_paths(config.paths.source_paths())
        .with_top_n(config.general.max_processes);
    let snapshot = collector.refresh();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
