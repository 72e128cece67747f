//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use log::LevelFilter;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(err) = smartrural_cli::run() {
        eprintln!("smartrural: {err}");
        std::process::exit(1);
    }
}
