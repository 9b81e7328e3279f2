mod config;

use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use cmdtree::{Argument, Command, Dispatcher, ValueMap};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::load()?;
    tracing::debug!(?config, "host configuration loaded");

    let root = command_tree(&program_name());
    let args: Vec<String> = std::env::args().skip(1).collect();

    let code = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { Dispatcher::new(config.exit_codes).dispatch(&root, &args).await });

    std::process::exit(code);
}

fn command_tree(name: &str) -> Rc<Command> {
    let sum = Command::leaf(
        "sum",
        "Sums two numbers",
        vec![
            Argument::new("addend1", "First addend"),
            Argument::new("addend2", "Second addend"),
        ],
        Vec::new(),
        |command, _options, arguments| {
            let Some(addend1) = operand(command, arguments, "addend1", "First addend") else {
                return 1;
            };
            let Some(addend2) = operand(command, arguments, "addend2", "Second addend") else {
                return 1;
            };
            println!("{}", addend1 + addend2);
            0
        },
    );

    let mul = Command::leaf(
        "mul",
        "Multiplies two numbers",
        vec![
            Argument::new("factor1", "First factor"),
            Argument::new("factor2", "Second factor"),
        ],
        Vec::new(),
        |command, _options, arguments| {
            let Some(factor1) = operand(command, arguments, "factor1", "First factor") else {
                return 1;
            };
            let Some(factor2) = operand(command, arguments, "factor2", "Second factor") else {
                return 1;
            };
            println!("{}", factor1 * factor2);
            0
        },
    );

    Command::group(name, "Does calculations", vec![sum, mul])
}

fn operand(command: &Command, arguments: &ValueMap, name: &str, label: &str) -> Option<i64> {
    match arguments.get(name).and_then(|raw| raw.parse().ok()) {
        Some(value) => Some(value),
        None => {
            command.print_error_and_help(&format!("{label} must be a number."));
            None
        }
    }
}

/// Base name of the invoking executable, used as the root command's name.
fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "calc".to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
