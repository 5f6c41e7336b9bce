use std::process::ExitCode;

use tpl_stats::config::{Config, load_dotenv};
use tpl_stats::logging::init_logger;
use tpl_stats::pipeline;
use tpl_stats::source::HttpSource;

fn main() -> ExitCode {
    load_dotenv();
    init_logger();
    let config = Config::from_env();
    log::info!("pulling league data from {}", config.server_url);

    let source = HttpSource::from_config(&config);
    match pipeline::run(&config, &source) {
        Ok(report) => {
            println!("Stats summary complete");
            println!("Events: {}", report.events);
            println!("Player rows: {}", report.rows);
            if let Some(games) = report.games {
                println!("Games: {games}");
            }
            for path in &report.written {
                println!("Wrote {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
