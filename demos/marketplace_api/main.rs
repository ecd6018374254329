//! Construction Marketplace API Example
//!
//! Serves the four marketplace listings from a deterministic seeded dataset,
//! plus a one-shot job posting endpoint driven by the posting wizard.
//!
//! ```text
//! cargo run --example marketplace_api [board.yaml]
//! ```
//!
//! `BOARD_ADDR` overrides the listen address, `RUST_LOG` the log filter.

use anyhow::Result;
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use buildboard::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct WizardState {
    jobs: Arc<InMemoryDataService<Job>>,
    config: WizardConfig,
}

/// Run a complete draft through every wizard step and publish it
async fn post_job(
    State(state): State<WizardState>,
    Json(draft): Json<JobDraft>,
) -> BoardResult<(StatusCode, Json<Job>)> {
    let mut wizard = JobPostWizard::with_draft(state.config.clone(), draft);
    wizard.next()?;
    wizard.next()?;
    let job = wizard.publish(state.jobs.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BoardConfig::from_yaml_file(&path)?,
        None => BoardConfig::default_config(),
    };
    let addr = std::env::var("BOARD_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let data = SeedData::generate(&config.seed);
    tracing::info!(
        jobs = data.jobs.len(),
        users = data.users.len(),
        businesses = data.businesses.len(),
        professionals = data.professionals.len(),
        "seeded marketplace"
    );

    let bus = EventBus::new(1024);
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = events.recv().await {
            tracing::info!(
                kind = envelope.event.event_kind(),
                entity_type = envelope.event.entity_type(),
                action = envelope.event.action(),
                "board event"
            );
        }
    });

    let jobs = Arc::new(InMemoryDataService::with_records(data.jobs).with_event_bus(bus.clone()));
    let wizard_routes = Router::new()
        .route("/jobs/wizard", post(post_job))
        .with_state(WizardState {
            jobs: jobs.clone(),
            config: config.wizard.clone(),
        });

    println!("\n🌐 Server running on http://{}", addr);
    println!("\n  🔷 Listing routes (jobs, users, businesses, professionals):");
    println!("    GET    /{{plural}}?q=&filter=&sort=&page=&limit=  - Search, filter, sort, paginate");
    println!("    POST   /{{plural}}                               - Insert a record");
    println!("    GET    /{{plural}}/{{id}}                          - Get a record");
    println!("    PATCH  /{{plural}}/{{id}}                          - Merge-patch a record");
    println!("    POST   /{{plural}}/bulk                          - Bulk action over ids");
    println!("\n  📝 POST   /jobs/wizard                           - Validate and publish a job draft");
    println!("\n  💡 Example:");
    println!("    curl 'http://{}/jobs?filter={{\"status\":\"open\",\"remote\":true}}&sort=salary_max:desc'", addr);

    ServerBuilder::new()
        .with_config(config)
        .with_shared_event_bus(bus.clone())
        .with_permissive_cors()
        .register_arc::<Job>(jobs)?
        .register::<User>(InMemoryDataService::with_records(data.users).with_event_bus(bus.clone()))?
        .register::<Business>(InMemoryDataService::with_records(data.businesses).with_event_bus(bus.clone()))?
        .register::<Professional>(InMemoryDataService::with_records(data.professionals).with_event_bus(bus))?
        .with_custom_routes(wizard_routes)
        .serve(&addr)
        .await
}
