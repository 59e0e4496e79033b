/*
 *  main.rs
 *
 *  BrauLCD - brew day on 20x4 glass
 *  (c) 2021-26 BrauLCD contributors
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use env_logger::Env;
use log::info;

use tokio::signal::unix::{SignalKind, signal};

use braulcd::config;
use braulcd::runloop::DisplayLoop;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for SIGINT, SIGTERM, or SIGHUP. Once a signal is
/// caught, it logs the event and returns, allowing for graceful shutdown.
async fn signal_handler() -> Result<(), std::io::Error> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => info!("Received SIGINT, shutting down"),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
        _ = sighup.recv() => info!("Received SIGHUP, shutting down"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load()?;

    env_logger::Builder::from_env(
        Env::default().default_filter_or(cfg.log_level.as_deref().unwrap_or("info")),
    )
    .format_timestamp_secs()
    .init();

    info!("{} - brew day on 20x4 glass", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let display_loop = DisplayLoop::start(&cfg).await;

    tokio::select! {
        result = signal_handler() => {
            if let Err(e) = result {
                return Err(Box::new(e) as Box<dyn std::error::Error>);
            }
        }
        _ = display_loop.run() => {
            // The display loop never returns on its own.
        }
    }

    info!("Main application exiting");
    Ok(())
}
