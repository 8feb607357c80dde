use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "ackack",
    about = "Ack Ack - Acknowledgements Plist Generator",
    long_about = "Generate Settings.bundle acknowledgements from the license files of your dependencies.\n\n\
        If you run without any options, it will try to find the Checkouts and Settings bundle folder for you. \
        This usually works fine if run from the project root or from a Scripts subfolder.",
    version,
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to the Checkouts folder (e.g. Carthage/Checkouts)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path to the Settings bundle (e.g. MyProject/Settings.bundle)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Maximum folder depth to look for licenses [default: 1]
    #[arg(short = 'd', long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Do not remove existing license plists
    #[arg(short, long)]
    pub no_clean: bool,

    /// Config file [default: ./.ackack/config.toml, fallback ~/.config/ackack/config.toml]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not generate any output unless there are errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}
