//! # lifecycle-cli — Transition Rule Command-Line Interface
//!
//! Provides the `lifecycle` binary for checking and canonicalizing
//! `<Transition>` fragments outside a running service.
//!
//! ## Subcommands
//!
//! - `lifecycle validate` — decode and validate one or more fragments.
//! - `lifecycle normalize` — print the canonical XML or JSON form.
//!
//! ```bash
//! lifecycle validate rules/archive.xml rules/expire.xml
//! lifecycle normalize rules/archive.xml --format json
//! cat rule.xml | lifecycle -v validate -
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; codec logic stays in `lifecycle-core`.
//! - Handlers return an exit code; `Err` means an operational failure.

pub mod config;
pub mod input;
pub mod normalize;
pub mod validate;
