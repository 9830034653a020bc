#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;
use std::process;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendStatus;
use crate::domain::services::ConnectivityMonitor;
use crate::infrastructure::backends::BackendManager;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Send your message
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U / Page Up - Page up
- CTRL+D / Page Down - Page down
- CTRL+G - Toggle grouping messages by date
- F1 - Show or hide information about the agent
- CTRL+C - Exit Pugo.

TRANSACTIONS:
When the agent replies with a transaction preview, your next message decides what happens to it. Type CONFIRM to send the transaction, or anything else to cancel it.

- CTRL+Y - Confirm the pending transaction
- CTRL+N - Cancel the pending transaction
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn ping() -> Result<()> {
    let backend = BackendManager::get()?;
    let status =
        ConnectivityMonitor::probe(&backend, Config::duration(ConfigKey::PingTimeout)?).await;

    if status != BackendStatus::Online {
        println!("{}", Paint::red(status.label()));
        process::exit(1);
    }

    println!("{}", Paint::green(status.label()));
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Pugo")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Pugo with environment variable RUST_LOG=pugo")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_millis(key: ConfigKey, env: &'static str, help: &str) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env)
        .num_args(1)
        .help(format!("{help} [default: {}]", Config::default(key)))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") || line.starts_with("TRANSACTIONS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("pugo")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start a new chat session."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(Command::new("ping").about("Checks once whether the backend is reachable. Exits with 1 when it is offline."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PUGO_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::BackendURL.to_string())
                .short('b')
                .long(ConfigKey::BackendURL.to_string())
                .env("PUGO_BACKEND_URL")
                .num_args(1)
                .help(format!("Base URL of the agent backend serving api/routes/chat/. [default: {}]", Config::default(ConfigKey::BackendURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AgentName.to_string())
                .long(ConfigKey::AgentName.to_string())
                .env("PUGO_AGENT_NAME")
                .num_args(1)
                .help(format!("Name displayed on the agent's chat bubbles and in the header. [default: {}]", Config::default(ConfigKey::AgentName)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("PUGO_USERNAME")
                .num_args(1)
                .help("Your user name displayed in all chat bubbles. Defaults to $USER.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GroupByDate.to_string())
                .short('g')
                .long(ConfigKey::GroupByDate.to_string())
                .env("PUGO_GROUP_BY_DATE")
                .num_args(1)
                .help(format!("Groups messages under date separators. [default: {}]", Config::default(ConfigKey::GroupByDate)))
                .value_parser(PossibleValuesParser::new(["true", "false"]))
                .global(true),
        )
        .arg(arg_millis(
            ConfigKey::PingInterval,
            "PUGO_PING_INTERVAL",
            "Time in milliseconds between backend health probes.",
        ))
        .arg(arg_millis(
            ConfigKey::PingTimeout,
            "PUGO_PING_TIMEOUT",
            "Time in milliseconds before a backend health probe times out.",
        ))
        .arg(arg_millis(
            ConfigKey::ReplyDelay,
            "PUGO_REPLY_DELAY",
            "Time in milliseconds to pace the conversation after a reply arrives.",
        ))
        .arg(arg_millis(
            ConfigKey::SentDelay,
            "PUGO_SENT_DELAY",
            "Time in milliseconds before a submitted message is shown as sent.",
        ));
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", Config::log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("ping", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            ping().await?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
