mod client;
mod config;
mod demo;
mod finder;
mod image_check;
mod model;
mod normalizer;
mod query;
mod utils;

use client::{SearchProvider, SerpApiClient};
use config::{AppConfig, SearchConfig, load_config};
use finder::PartsFinder;
use model::{ConfigError, SearchError, SearchRequest};
use std::sync::Arc;
use tracing::{error, info, warn};

use futures::future::join_all;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {panic_info:?}");
    }));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {e}");
            return;
        }
    };

    // Either the live client comes up, or we run in demo mode when the
    // config allows it. No half-configured client ever reaches a search.
    let provider: Option<Box<dyn SearchProvider>> = match SerpApiClient::new(&config) {
        Ok(client) => Some(Box::new(client)),
        Err(ConfigError::MissingApiKey) if config.demo_fallback => {
            warn!("No API key configured, running in demo mode");
            None
        }
        Err(e) => {
            error!("Client setup error: {e}");
            return;
        }
    };

    info!("Searches to run: {}", config.searches.len());

    match provider {
        Some(provider) => {
            let finder = Arc::new(PartsFinder::new(provider, config.max_results));
            let tasks: Vec<_> = config
                .searches
                .iter()
                .map(|search_cfg| run_search(search_cfg, finder.clone(), config.clone()))
                .collect();
            join_all(tasks).await;
        }
        None => {
            for search_cfg in &config.searches {
                run_demo_search(search_cfg);
            }
        }
    }
}

/// Runs one configured search end to end and logs the outcome.
async fn run_search(search_cfg: &SearchConfig, finder: Arc<PartsFinder>, config: Arc<AppConfig>) {
    let request = SearchRequest {
        free_text: search_cfg.query.clone(),
        vehicle: Some(search_cfg.vehicle.clone()),
        has_image: load_usable_image(search_cfg.image_path.as_deref()),
    };

    match finder.search(&request).await {
        Ok(products) => {
            for product in &products {
                info!(
                    "[{}] {} - {} ({}) {}",
                    product.part_category,
                    product.title,
                    product.price_display,
                    product.source,
                    product.link
                );
            }
            info!("{} product(s) found", products.len());
        }
        Err(SearchError::Upstream(e)) if config.demo_fallback => {
            warn!("Upstream failed ({e}), falling back to demo results");
            run_demo_search(search_cfg);
        }
        Err(e) => {
            warn!("Search failed: {e}");
        }
    }
}

/// Reads and validates a configured part image. An unreadable or
/// undecodable image is ignored rather than failing the whole search.
fn load_usable_image(path: Option<&str>) -> bool {
    let Some(path) = path else {
        return false;
    };
    match std::fs::read(path) {
        Ok(bytes) if image_check::validate_image(&bytes) => true,
        Ok(_) => {
            warn!("Image {path} is not decodable, ignoring it");
            false
        }
        Err(e) => {
            warn!("Failed to read image {path}: {e}");
            false
        }
    }
}

fn run_demo_search(search_cfg: &SearchConfig) {
    let Some(built) =
        query::build_search_query(search_cfg.query.as_deref(), Some(&search_cfg.vehicle))
    else {
        warn!("Search skipped: provide a search term or vehicle info");
        return;
    };

    for product in demo::demo_results(&built) {
        info!(
            "[demo] [{}] {} - {} ({}) {}",
            product.part_category,
            product.title,
            product.price_display,
            product.source,
            product.link
        );
    }
}
