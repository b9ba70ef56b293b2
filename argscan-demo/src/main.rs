mod config;
mod error;

use std::{io, process};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, USAGE};

const WIDTH: usize = 80;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = std::env::args_os()
        .skip(1)
        .enumerate()
        .map(|(index, arg)| {
            arg.into_string()
                .map_err(|arg| anyhow::anyhow!("{arg:?} is not valid UTF-8"))
                .with_context(|| format!("failed to read argument {index}"))
        })
        .collect::<anyhow::Result<Vec<String>>>()?;

    let config = match Config::from_args(args.iter().map(String::as_str)) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}\n");
            USAGE
                .write(io::stderr().lock(), WIDTH)
                .context("failed to print usage")?;
            process::exit(2);
        }
    };

    info!(?config, "parsed arguments");

    if config.help {
        USAGE
            .write(io::stdout().lock(), WIDTH)
            .context("failed to print usage")?;
        return Ok(());
    }

    println!("{}", config.plan());
    Ok(())
}
