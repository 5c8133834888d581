mod cli;
mod indicator;
mod input;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use testflows_client::{Chat, ChatSettings, HttpTransport};
use testflows_common::TestflowsError;
use testflows_config::TestflowsConfig;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use indicator::Indicator;
use input::{Command, InputBuffer};

const TITLE: &str = "Test Flows";

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Config first so its log level can seed the filter
    let config_path = args.config.as_ref().map(PathBuf::from);
    let loaded = testflows_config::load_config(config_path.as_deref());

    let log_directive = args.log_level.clone().unwrap_or_else(|| {
        let level = loaded
            .as_ref()
            .map(|c| c.logging.level)
            .unwrap_or_default();
        format!("testflows={}", level.as_directive())
    });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "testflows=info".parse().expect("static directive")),
            ),
        )
        .init();

    tracing::info!("testflows v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        TestflowsConfig::default()
    });

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

async fn run(args: cli::Args, config: TestflowsConfig) -> testflows_common::Result<()> {
    let transport = HttpTransport::from_config(&config.webhook)
        .map_err(|e| TestflowsError::Other(e.to_string()))?;
    let mut chat = Chat::new(Arc::new(transport), ChatSettings::from(&config));
    let _probe = chat.spawn_probe_reactor();
    let indicator = Indicator::spawn(chat.events(), chat.waiting_flag());

    let initial = args.webhook.unwrap_or_else(|| config.webhook.url.clone());
    if chat.configure(&initial) {
        print_empty_state(&chat, &config);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = InputBuffer::default();

    loop {
        if !chat.session().is_configured() {
            println!("{TITLE}\nConfigura el webhook para comenzar");
            let Some(url) = prompt(&mut lines, "URL del Webhook: ").await? else {
                break;
            };
            if chat.configure(&url) {
                print_empty_state(&chat, &config);
            }
            continue;
        }

        let marker = if buffer.is_continuing() { ". " } else { "> " };
        let Some(line) = prompt(&mut lines, marker).await? else {
            break;
        };
        let Some(text) = buffer.push(&line) else {
            continue;
        };

        match Command::parse(text) {
            Command::Quit => break,
            Command::Help => println!("{}", input::HELP),
            Command::Unknown(word) => println!("Unknown command {word}\n{}", input::HELP),
            Command::Reset => {
                chat.reset();
                print_empty_state(&chat, &config);
            }
            Command::Reconfigure => chat.reconfigure(),
            Command::History => {
                for entry in chat.conversation().entries() {
                    println!("{}\n", render::render_entry(entry));
                }
            }
            Command::Send(text) => {
                chat.set_input(text);
                if !chat.can_send() {
                    continue;
                }
                let sent = chat.submit().await;
                indicator.clear();
                if let Err(e) = sent {
                    tracing::warn!("Message not sent: {e}");
                    continue;
                }
                if let Some(reply) = chat.conversation().last() {
                    println!("{}\n", render::render_entry(reply));
                }
            }
        }
    }

    Ok(())
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    marker: &str,
) -> Result<Option<String>, TestflowsError> {
    print!("{marker}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

fn print_empty_state(chat: &Chat, config: &TestflowsConfig) {
    println!(
        "\n{TITLE}  [{}]\n{}\n",
        chat.session().endpoint(),
        render::empty_state(
            &config.messages.empty_prompt,
            chat.session().session_id().as_str()
        )
    );
}
