mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> miette::Result<()> {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    init_logging(cli.verbose);
    tracing::debug!("parsed arguments: {:?}", cli);

    let list = cli.list;
    let options = cli.into_options();
    if list {
        commands::list::run(options)
    } else {
        commands::generate::run(options)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
