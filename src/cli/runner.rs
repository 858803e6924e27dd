//! Command dispatch

use super::commands::{Cli, Commands};
use super::server;
use crate::catalog::{CatalogClient, DEFAULT_SEARCH_LIMIT};
use crate::config::AppConfig;
use crate::error::Result;

/// Executes the parsed CLI command
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for a parsed command line
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        let config = match &self.cli.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        match &self.cli.command {
            Commands::Serve { port } => {
                config.validate_for_serve()?;
                let port = port.unwrap_or(config.server.port);
                server::serve(config, port).await
            }

            Commands::Check => {
                let catalog = CatalogClient::new(config.catalog_config());
                match catalog.check().await {
                    Ok(()) => {
                        println!("Catalog reachable: {}", config.catalog.base_url);
                        Ok(())
                    }
                    Err(e) => {
                        eprintln!("Catalog check failed: {e}");
                        Err(e)
                    }
                }
            }

            Commands::Search { query, limit } => {
                let catalog = CatalogClient::new(config.catalog_config());
                let page = catalog
                    .search(query, limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
                    .await?;
                println!("{}", serde_json::to_string_pretty(&page)?);
                Ok(())
            }

            Commands::Show { slug } => {
                let catalog = CatalogClient::new(config.catalog_config());
                let book = catalog.book_detail(slug).await?;
                println!("{}", serde_json::to_string_pretty(&book)?);
                Ok(())
            }
        }
    }
}
