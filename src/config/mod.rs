pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::TomlConfig;
    use crate::utils::error::Result;
    use clap::Parser;
    use std::path::Path;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "wedding-rsvp")]
    #[command(about = "Wedding RSVP endpoint backed by a CSV workbook")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long, default_value = "rsvp.toml")]
        pub config: String,

        /// Directory holding the Guests and Responses sheets
        #[arg(long)]
        pub data_dir: Option<String>,

        #[arg(long)]
        pub host: Option<String>,

        #[arg(short, long)]
        pub port: Option<u16>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Loads the TOML file (defaults when it does not exist) and applies
        /// command-line overrides on top.
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = if Path::new(&self.config).exists() {
                TomlConfig::from_file(&self.config)?
            } else {
                TomlConfig::default()
            };

            if let Some(data_dir) = &self.data_dir {
                config.storage.data_dir = data_dir.clone();
            }
            if let Some(host) = &self.host {
                config.server.host = host.clone();
            }
            if let Some(port) = self.port {
                config.server.port = port;
            }
            if self.verbose {
                config.logging.level = "debug".to_string();
            }

            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_overrides_apply_on_defaults() {
            let cli = CliConfig::parse_from([
                "wedding-rsvp",
                "--config",
                "/nonexistent/rsvp.toml",
                "--data-dir",
                "/srv/data",
                "--port",
                "9100",
                "--verbose",
            ]);
            let config = cli.resolve().unwrap();
            assert_eq!(config.storage.data_dir, "/srv/data");
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.logging.level, "debug");
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
