use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use phosphor::core::config;

#[derive(Parser)]
#[command(name = "phosphor", about = "Retro terminal content console")]
struct Args {
    /// URL of the menu-tree resource (overrides config and environment)
    #[arg(short, long)]
    data_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to phosphor.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("phosphor.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.data_url.as_deref());
    log::info!("Phosphor starting up, data url: {}", resolved.data_url);

    phosphor::tui::run(resolved).await
}
