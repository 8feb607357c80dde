//! `ackack` — generate Settings.bundle acknowledgements from the license files
//! of checked-out dependencies.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Resolve the input and output folders, auto-detecting missing ones
//!    ([`locator`]).
//! 4. Create `Licenses/` or purge stale detail documents from it ([`cleanup`]).
//! 5. Scan for license files ([`scanner`]) and write one normalized detail
//!    document per match ([`license`], [`bundle`]).
//! 6. Write `Acknowledgements.plist` listing every detail document ([`app`]).
//! 7. Exit `0`, `2` for usage and folder errors, `1` for anything else.

pub mod app;
pub mod bundle;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod license;
pub mod locator;
pub mod models;
pub mod plist;
pub mod report;
pub mod scanner;
