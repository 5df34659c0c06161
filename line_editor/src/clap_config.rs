// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_PROMPT, EditorConfig, TracingConfig};
use clap::{Args, Parser};
use tracing_core::LevelFilter;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Parser)]
#[command(bin_name = "line_editor")]
#[command(about = "Edit one line at a time and send each committed line to a peer")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[arg(
        long,
        short = 'a',
        default_value = DEFAULT_ADDR,
        help = "Address of the peer that receives committed lines, as host:port"
    )]
    pub addr: String,

    #[arg(long, short = 'p', default_value = DEFAULT_PROMPT, help = "Prompt shown before the input")]
    pub prompt: String,

    #[arg(
        long,
        value_name = "COUNT",
        help = "Keep at most this many history entries; unbounded when omitted or 0"
    )]
    pub history_max: Option<usize>,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file for debugging"
    )]
    pub enable_logging: bool,

    #[arg(
        global = true,
        long,
        value_name = "PATH",
        help = "Log file to use with --enable-logging"
    )]
    pub log_file: Option<String>,
}

impl CLIArg {
    #[must_use]
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig::default()
            .with_prompt(self.prompt.clone())
            .with_history_max(self.history_max)
    }

    /// `None` unless logging was asked for. The terminal is in raw mode, so logs only
    /// ever go to a file.
    #[must_use]
    pub fn tracing_config(&self) -> Option<TracingConfig> {
        self.global_options.enable_logging.then(|| {
            TracingConfig::new_file(self.global_options.log_file.clone(), LevelFilter::DEBUG)
        })
    }
}
