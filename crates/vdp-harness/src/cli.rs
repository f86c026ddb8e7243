/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Command-line interface for the harness binary.

use clap::{Parser, ValueEnum};
use vdp_client::Transport;
use vdp_utils::Settings;

/// Runs the pipeline backend conformance checks over one transport.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file layered over the built-in defaults
    #[arg(long, env = "VDP_CONFIG")]
    pub config: Option<String>,

    /// Overrides `log.level`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Overrides `log.format` (text or json)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Transport the checks are driven over
    #[arg(value_enum)]
    pub transport: TransportArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportArg {
    Rest,
    Grpc,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Rest => Transport::Rest,
            TransportArg::Grpc => Transport::Grpc,
        }
    }
}

impl Cli {
    /// Applies the logging flags on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(level) = &self.log_level {
            settings.log.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            settings.log.format = format.clone();
        }
    }
}

/// Parses command-line arguments into the Cli structure.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// This test:
    /// 1. Parses a bare transport argument
    /// 2. Verifies no overrides are set and the transport maps to gRPC
    #[test]
    fn test_parse_transport_only() {
        let cli = Cli::try_parse_from(["vdp-harness", "grpc"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert_eq!(Transport::from(cli.transport), Transport::Grpc);
    }

    /// This test:
    /// 1. Parses every flag
    /// 2. Applies the logging overrides to default settings
    #[test]
    fn test_overrides_apply_to_settings() {
        let cli = Cli::try_parse_from([
            "vdp-harness",
            "--config",
            "run.toml",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "rest",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("run.toml"));

        let mut settings = Settings::new(None).unwrap();
        cli.apply(&mut settings);
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.log.format, "json");
        assert_eq!(Transport::from(cli.transport), Transport::Rest);
    }

    /// This test:
    /// 1. Rejects an unknown transport
    #[test]
    fn test_unknown_transport_is_rejected() {
        assert!(Cli::try_parse_from(["vdp-harness", "soap"]).is_err());
    }
}
