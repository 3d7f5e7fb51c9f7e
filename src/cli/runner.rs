//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::http::HttpPageFetcher;
use crate::pagination::PageAggregator;
use crate::types::{JsonValue, PageSize};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                identifier,
                base_url,
                page_size,
                format,
            } => {
                let config =
                    apply_overrides(self.load_config()?, base_url.as_deref(), *page_size)?;
                self.fetch(identifier, &config, *format).await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<Config> {
        match &self.cli.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }

    async fn fetch(&self, identifier: &str, config: &Config, format: OutputFormat) -> Result<()> {
        let fetcher = HttpPageFetcher::from_config(config)?;
        let aggregator = PageAggregator::new(fetcher).with_page_size(config.page_size);

        let start = Instant::now();
        let items = aggregator.fetch_all(identifier).await?;
        info!(
            "Fetched {} items for '{}' in {:?}",
            items.len(),
            identifier,
            start.elapsed()
        );

        let output = render_items(&items, format)?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;
        println!("{}", serde_yaml::to_string(&config)?.trim_end());
        Ok(())
    }
}

/// Apply command-line overrides on top of file configuration
fn apply_overrides(
    mut config: Config,
    base_url: Option<&str>,
    page_size: Option<u32>,
) -> Result<Config> {
    if let Some(url) = base_url {
        config.base_url = Some(url.to_string());
    }
    if let Some(size) = page_size {
        config.page_size = PageSize::new(size)?;
    }
    Ok(config)
}

/// Render fetched items in the requested format
pub fn render_items(items: &[JsonValue], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let lines = items
                .iter()
                .map(serde_json::to_string)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        OutputFormat::Pretty => Ok(serde_json::to_string_pretty(items)?),
    }
}
