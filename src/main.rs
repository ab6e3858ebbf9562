use anyhow::{Context, Result};
use plot_scout::config::Config;
use plot_scout::{
    FilterCriteria, ListingController, ListingStore, MemoryStore, PostgrestStore, UiEvent, ViewMode,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🗺️  Plot Scout - land plot search");
    info!("==================================");

    let config = Config::from_env()?;

    let mut filters = None;
    let mut view_mode = ViewMode::Grid;
    for arg in std::env::args().skip(1) {
        if arg == "--map" {
            view_mode = ViewMode::Map;
        } else {
            let parsed: FilterCriteria =
                serde_json::from_str(&arg).context("Filters must be a JSON object like the filter panel sends")?;
            filters = Some(parsed);
        }
    }

    let store: Arc<dyn ListingStore> = match &config.store {
        Some(store_config) => {
            info!("Using listing store at {}", store_config.url);
            Arc::new(PostgrestStore::new(store_config)?)
        }
        None => {
            warn!("PLOT_STORE_URL not set, searching the demo plots");
            Arc::new(MemoryStore::with_demo_plots())
        }
    };

    let controller = Arc::new(ListingController::new(store));

    // Same sequence the page goes through: mount, then the panel's filters
    if let Err(e) = controller.mount().await {
        error!("Initial plot load failed: {}", e);
    }

    let (events, rx) = mpsc::channel(16);
    let event_loop = tokio::spawn(controller.clone().run(rx));
    if let Some(filters) = filters {
        events.send(UiEvent::FiltersChanged(filters)).await?;
    }
    events.send(UiEvent::ViewModeChanged(view_mode)).await?;
    drop(events);
    event_loop.await?;

    let state = controller.snapshot();
    info!("\n✅ Found {} available plots\n", state.listings.len());

    for (i, listing) in state.listings.iter().enumerate() {
        match state.view_mode {
            ViewMode::Grid => {
                println!("{}. {} ({})", i + 1, listing.title, listing.price);
                println!("   {} m², {}", listing.area, listing.usage_type);
                let location = listing.location_label();
                if !location.is_empty() {
                    println!("   Location: {}", location);
                }
                println!("   Listed: {}", listing.created_at.format("%Y-%m-%d"));
                println!("   ID: {}", listing.id);
                println!();
            }
            ViewMode::Map => match listing.coordinates() {
                Some((lat, lon)) => println!("📍 {:.4}, {:.4}  {}", lat, lon, listing.title),
                None => println!("   (no coordinates)  {}", listing.title),
            },
        }
    }

    // Save the result set
    let json = serde_json::to_string_pretty(&state.listings)?;
    tokio::fs::write(&config.export_path, json)
        .await
        .with_context(|| format!("Failed to write {}", config.export_path.display()))?;
    info!("💾 Saved plots to {}", config.export_path.display());

    Ok(())
}
