use anyhow::Context;
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use trip_planner::{
    models::{ExperiencePreferences, TripPreferences},
    services::{provider_from_config, SearchOutcome},
    Config, TripPlanner,
};

/// Trip document read from stdin
#[derive(Debug, Deserialize)]
struct PlanRequest {
    #[serde(flatten)]
    preferences: TripPreferences,
    #[serde(default)]
    experience: ExperiencePreferences,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read trip preferences from stdin")?;
    let request: PlanRequest =
        serde_json::from_str(&input).context("Failed to parse trip preferences")?;

    let provider = provider_from_config(&config)?;
    let planner = TripPlanner::new(provider);

    planner.submit(request.preferences).await?;

    let hotels = match planner.search_hotels().await? {
        SearchOutcome::Applied(hotels) => hotels,
        SearchOutcome::Superseded => anyhow::bail!("Hotel search was superseded"),
    };
    let best = hotels
        .iter()
        .max_by(|a, b| a.rating.total_cmp(&b.rating))
        .context("No hotels found for this trip")?;
    planner.select_hotel(&best.id).await?;

    if planner
        .search_recommendations(request.experience)
        .await?
        .is_superseded()
    {
        anyhow::bail!("Recommendation search was superseded");
    }

    let itinerary = planner.save_trip(&[], &[]).await?;
    println!("{}", itinerary);

    Ok(())
}
