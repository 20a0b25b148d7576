//! # Validate Subcommand
//!
//! Decodes each input as a `<Transition>` fragment and runs the explicit
//! validation pass on it. Prints one `OK`/`FAIL` line per input and a
//! summary.
//!
//! Exit codes: 0 when every input passed, 1 when any failed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use lifecycle_core::{Transition, TransitionError};

use crate::config::CliConfig;
use crate::input::read_fragment;

/// Arguments for the `lifecycle validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files containing a `<Transition>` element (`-` for stdin).
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Why a single input did not pass.
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    /// The input could not be read.
    #[error("{0:#}")]
    Input(anyhow::Error),
    /// The fragment did not decode.
    #[error("decode failed: {0}")]
    Decode(TransitionError),
    /// The fragment decoded but is not a valid rule.
    #[error("validation failed: {0}")]
    Invalid(TransitionError),
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let total = args.paths.len();
    let mut passed = 0usize;

    for path in &args.paths {
        match check_path(path, config) {
            Ok(rule) => {
                passed += 1;
                tracing::debug!(path = %path.display(), storage_class = rule.storage_class(), "valid");
                println!("OK: {}", path.display());
            }
            Err(failure) => {
                tracing::info!(path = %path.display(), error = %failure, "rejected");
                println!("FAIL: {} — {}", path.display(), failure);
            }
        }
    }

    println!("Transitions: {passed}/{total} passed");
    Ok(if passed == total { 0 } else { 1 })
}

/// Read, decode and validate one input.
pub fn check_path(path: &Path, config: &CliConfig) -> Result<Transition, CheckFailure> {
    let fragment = read_fragment(path, config.max_input_bytes).map_err(CheckFailure::Input)?;
    check_fragment(&fragment)
}

/// Decode and validate one fragment.
pub fn check_fragment(fragment: &str) -> Result<Transition, CheckFailure> {
    let rule = Transition::from_xml(fragment).map_err(CheckFailure::Decode)?;
    rule.validate().map_err(CheckFailure::Invalid)?;
    Ok(rule)
}
