// src/scanner/report.rs

use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::scan_config::ScanConfig;
use crate::error::SearchError;
use crate::factor::factor_pair::FactorPair;
use crate::scanner::cert::read_rsa_modulus;
use crate::search::cancellation::CancelToken;
use crate::search::controller::{crack_parallel, CrackOutcome};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// One cracked modulus: the file it came from and its factor pair.
#[derive(Debug, Clone)]
pub struct WeakModulus {
    pub file: String,
    pub factors: FactorPair,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub weak: Vec<WeakModulus>,
    pub scanned: usize,
    pub skipped: usize,
    pub cancelled: bool,
}

/// Walks one directory (non-recursive, matching the original tool), runs the
/// phase search against every RSA certificate found, and collects cracked
/// moduli. Files that are not RSA PEM certificates are skipped with their
/// specific reason logged; moduli the search cannot accept (too small,
/// prime) are skipped with a warning. Entropy and pool failures abort the
/// scan.
pub fn scan_directory(
    dir: &Path,
    cfg: &ScanConfig,
    cancel: &CancelToken,
) -> Result<ScanReport, ScanError> {
    let params = cfg.search_params();
    let mut report = ScanReport::default();

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    for path in entries {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let modulus = match read_rsa_modulus(&path) {
            Ok(n) => n,
            Err(e) => {
                debug!("skipping {}: {}", name, e);
                report.skipped += 1;
                continue;
            }
        };
        report.scanned += 1;
        info!("scanning {} ({} bit modulus)", name, modulus.bits());

        match crack_parallel(&modulus, &params, cfg.threads, cancel) {
            Ok(CrackOutcome::Found(factors)) => {
                warn!("weak modulus in {}: {}", name, factors);
                report.weak.push(WeakModulus { file: name, factors });
            }
            Ok(CrackOutcome::Exhausted { attempts }) => {
                debug!("{}: no factor within {} attempts", name, attempts);
            }
            Ok(CrackOutcome::Cancelled { .. }) => {
                report.cancelled = true;
                break;
            }
            Err(
                e @ (SearchError::ModulusOutOfRange(_)
                | SearchError::ModulusTooSmall(_)
                | SearchError::ModulusPrime),
            ) => {
                warn!("skipping {}: {}", name, e);
                report.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(report)
}

/// Writes the report file (one line per cracked modulus) into the scanned
/// directory and returns its path. An empty file means a clean scan.
pub fn write_report(dir: &Path, cfg: &ScanConfig, report: &ScanReport) -> Result<PathBuf, ScanError> {
    let path = dir.join(&cfg.report_file);
    let mut out = std::fs::File::create(&path)?;
    for weak in &report.weak {
        writeln!(out, "{}: {}", weak.file, weak.factors)?;
    }
    Ok(path)
}
