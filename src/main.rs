// src/main.rs

use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

use phasesieve::config::scan_config::ScanConfig;
use phasesieve::scanner::report::{scan_directory, write_report};
use phasesieve::search::cancellation::CancelToken;

fn main() {
    let cfg = match ScanConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize the logger
    let env = Env::default().filter_or("PHASESIEVE_LOG_LEVEL", cfg.log_level.clone());
    env_logger::Builder::from_env(env).init();

    let dir = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => {
            eprintln!("usage: phasesieve <directory-of-pem-certificates>");
            std::process::exit(2);
        }
    };

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        error!("could not install Ctrl-C handler: {}", e);
    }

    match scan_directory(&dir, &cfg, &cancel) {
        Ok(report) => {
            match write_report(&dir, &cfg, &report) {
                Ok(path) => info!(
                    "scan complete: {} certificates scanned, {} files skipped, {} weak; report at {}",
                    report.scanned,
                    report.skipped,
                    report.weak.len(),
                    path.display()
                ),
                Err(e) => {
                    error!("could not write report: {}", e);
                    std::process::exit(1);
                }
            }
            if report.cancelled {
                info!("scan was interrupted before completion");
            }
        }
        Err(e) => {
            error!("scan failed: {}", e);
            std::process::exit(1);
        }
    }
}
