//! Forwards everything after the tool name to `$LAUNCH_PREFIX<tool>`.
//!
//! ```text
//! LAUNCH_PREFIX=arm-none-eabi- cargo run --example passthrough -- gcc -O2 main.c
//! ```

use rhai_launcher::{CommandBuilder, Config, LaunchError};
use std::process::exit;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = try_main() {
        log::error!("{}", e);
        exit(1);
    }
}

fn try_main() -> Result<(), LaunchError> {
    let tool = std::env::args().nth(1).ok_or(LaunchError::MissingCommand)?;
    let prefix = std::env::var("LAUNCH_PREFIX").unwrap_or_default();

    let mut cmd = CommandBuilder::new(prefix, Config::from_env()).inherit(1);
    cmd.look_path(&tool)?;
    log::info!("{cmd}");
    cmd.execute()
}
