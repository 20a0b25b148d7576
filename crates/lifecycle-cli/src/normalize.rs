//! # Normalize Subcommand
//!
//! Decodes a `<Transition>` fragment and prints its canonical form: compact
//! XML with absent fields dropped and dates in `Z` form, or the JSON view.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lifecycle_core::Transition;

use crate::config::{CliConfig, OutputFormat};
use crate::input::read_fragment;

/// Arguments for the `lifecycle normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// File containing a `<Transition>` element (`-` for stdin).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output encoding. Defaults to the configured format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the rule even if it fails validation.
    #[arg(long)]
    pub skip_validation: bool,
}

/// Execute the normalize subcommand.
///
/// Returns 1 without printing when the rule fails validation.
pub fn run_normalize(args: &NormalizeArgs, config: &CliConfig) -> Result<u8> {
    let fragment = read_fragment(&args.path, config.max_input_bytes)?;
    let rule = Transition::from_xml(&fragment)
        .with_context(|| format!("failed to decode {}", args.path.display()))?;

    if !args.skip_validation {
        if let Err(e) = rule.validate() {
            println!("FAIL: {} — {}", args.path.display(), e);
            return Ok(1);
        }
    }

    let format = args.format.unwrap_or(config.output_format);
    println!("{}", render(&rule, format)?);
    Ok(0)
}

/// Render a decoded rule in the requested format.
pub fn render(rule: &Transition, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Xml => Ok(rule.encode()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(rule).context("failed to serialize rule as JSON")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(xml: &str) -> Transition {
        Transition::from_xml(xml).unwrap()
    }

    #[test]
    fn render_xml_is_canonical() {
        let r = rule(
            "<Transition>\n  <StorageClass>GLACIER</StorageClass>\n  <Date>2024-01-01T00:00:00+00:00</Date>\n</Transition>",
        );
        assert_eq!(
            render(&r, OutputFormat::Xml).unwrap(),
            "<Transition><Date>2024-01-01T00:00:00Z</Date><StorageClass>GLACIER</StorageClass></Transition>"
        );
    }

    #[test]
    fn render_json() {
        let r = rule("<Transition><Days>7</Days><StorageClass>GLACIER</StorageClass></Transition>");
        let value: serde_json::Value =
            serde_json::from_str(&render(&r, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"Days": 7, "StorageClass": "GLACIER"}));
    }

    #[test]
    fn invalid_rule_returns_failure_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.xml");
        std::fs::write(&path, "<Transition><Days>7</Days></Transition>").unwrap();
        let args = NormalizeArgs {
            path,
            format: None,
            skip_validation: false,
        };
        assert_eq!(run_normalize(&args, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn skip_validation_prints_anyway() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.xml");
        std::fs::write(&path, "<Transition><Days>7</Days></Transition>").unwrap();
        let args = NormalizeArgs {
            path,
            format: Some(OutputFormat::Json),
            skip_validation: true,
        };
        assert_eq!(run_normalize(&args, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn decode_error_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.xml");
        std::fs::write(&path, "<Transition><Days>-3</Days></Transition>").unwrap();
        let args = NormalizeArgs {
            path,
            format: None,
            skip_validation: false,
        };
        let err = run_normalize(&args, &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Days must be 0 or greater"));
    }
}
