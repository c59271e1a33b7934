//! CLI definitions for pagesnap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagesnap CLI.
#[derive(Parser)]
#[command(name = "pagesnap")]
#[command(about = "Capture a rendered page as a per-device design document")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ./pagesnap.toml when present)
    #[arg(short, long, global = true, env = "PAGESNAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a URL under each device profile
    Render {
        /// Page to capture
        url: String,

        /// Device profile name; repeat for several (default: all)
        #[arg(short, long = "device")]
        devices: Vec<String>,

        /// Directory to write one JSON document per device (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Re-aggregate the colour and font palette of a saved document
    Meta {
        /// Design document or element map in JSON
        file: PathBuf,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration
    Config {
        /// Validate instead of printing
        #[arg(long)]
        check: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "pagesnap",
            "render",
            "https://example.com",
            "--device",
            "Chrome",
            "-d",
            "iPad Pro",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                url,
                devices,
                out,
                pretty,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(devices, ["Chrome", "iPad Pro"]);
                assert!(out.is_none());
                assert!(pretty);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from(["pagesnap", "config", "--check", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Config { check: true }));
    }

    #[test]
    fn test_parse_meta() {
        let cli = Cli::try_parse_from(["pagesnap", "meta", "doc.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Meta { ref file, pretty: false } if file == &PathBuf::from("doc.json")
        ));
    }

    #[test]
    fn test_render_requires_url() {
        assert!(Cli::try_parse_from(["pagesnap", "render"]).is_err());
    }
}
