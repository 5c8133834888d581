use clap::Parser;

/// testflows: chat with a webhook-driven flow from the terminal.
#[derive(Parser, Debug)]
#[command(name = "testflows", version, about)]
pub struct Args {
    /// Webhook URL. Skips the configuration prompt.
    #[arg(short = 'w', long)]
    pub webhook: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter override (e.g. `testflows=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
