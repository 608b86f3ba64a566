//! Command-line driver for the earthquake filtering pipeline

use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seismic_core::{AppState, LatLng, Layer};
use seismic_data::{
    CsvSource, EarthquakeSource, EvaluationConfig, FilterCache, GeoJsonSource, VolcanoSelector,
    VolcanoSource,
};

/// Filter an earthquake catalog by magnitude, time and cross-section
#[derive(Parser, Debug)]
#[command(name = "quakefilter", version)]
struct Args {
    /// Earthquake catalog (.geojson/.json or .csv)
    catalog: PathBuf,

    /// Volcano list (JSON array)
    #[arg(long)]
    volcanoes: Option<PathBuf>,

    /// Evaluation config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exclusive lower magnitude bound
    #[arg(long)]
    min_mag: Option<f64>,

    /// Exclusive upper magnitude bound
    #[arg(long)]
    max_mag: Option<f64>,

    /// Exclusive lower time bound, epoch milliseconds
    #[arg(long, allow_hyphen_values = true)]
    min_time: Option<f64>,

    /// Exclusive upper time bound, epoch milliseconds
    #[arg(long, allow_hyphen_values = true)]
    max_time: Option<f64>,

    /// First cross-section point as LAT,LNG
    #[arg(long, value_parser = parse_latlng, allow_hyphen_values = true)]
    from: Option<LatLng>,

    /// Second cross-section point as LAT,LNG
    #[arg(long, value_parser = parse_latlng, allow_hyphen_values = true)]
    to: Option<LatLng>,

    /// Switch the earthquake layer off
    #[arg(long)]
    hide_earthquakes: bool,

    /// Print every visible earthquake
    #[arg(long)]
    list: bool,
}

fn parse_latlng(value: &str) -> Result<LatLng, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{}'", value))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("bad latitude '{}': {}", lat, e))?;
    let lng = lng.trim().parse::<f64>().map_err(|e| format!("bad longitude '{}': {}", lng, e))?;
    Ok(LatLng::new(lat, lng))
}

fn open_catalog(path: &Path) -> Box<dyn EarthquakeSource> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvSource::new(path.to_path_buf()))
    } else {
        Box::new(GeoJsonSource::new(path.to_path_buf()))
    }
}

/// Apply the command-line filters on top of the loaded state, one transition per option
fn apply_args(mut state: AppState, args: &Args) -> AppState {
    if let Some(value) = args.min_mag {
        state = state.set_min_magnitude(value);
    }
    if let Some(value) = args.max_mag {
        state = state.set_max_magnitude(value);
    }
    if let Some(value) = args.min_time {
        state = state.set_min_time(value);
    }
    if let Some(value) = args.max_time {
        state = state.set_max_time(value);
    }
    if let Some(point) = args.from {
        state = state.set_cross_section_point(0, point);
    }
    if let Some(point) = args.to {
        state = state.set_cross_section_point(1, point);
    }
    if args.from.is_some() || args.to.is_some() {
        state = state.set_cross_section_enabled(true);
    }
    if args.hide_earthquakes {
        state = state.set_layer(Layer::Earthquakes, false);
    }
    state
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.from.is_some() != args.to.is_some() {
        bail!("--from and --to must be given together");
    }

    let config = match &args.config {
        Some(path) => EvaluationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EvaluationConfig::default(),
    };
    info!("Evaluation config: {:?}", config);

    let source = open_catalog(&args.catalog);
    let earthquakes = source
        .load()
        .with_context(|| format!("Failed to load catalog {}", source.source_name()))?;

    let mut state = AppState::new().receive_earthquakes(earthquakes);
    if let Some(path) = &args.volcanoes {
        let volcanoes = VolcanoSource::new(path.clone())
            .load()
            .with_context(|| format!("Failed to load volcanoes {}", path.display()))?;
        state = state
            .receive_volcanoes(volcanoes)
            .set_layer(Layer::Volcanoes, true);
    }
    let state = apply_args(state, &args);

    let mut cache = FilterCache::with_config(config);
    let filtered = cache.get_state(&state);

    // A second read of an unchanged state must not recompute
    let again = cache.get_state(&state);
    debug_assert!(Arc::ptr_eq(&filtered, &again));

    let volcanoes = VolcanoSelector::new().get_state(&state);

    println!("earthquakes: {} loaded, {} visible", state.earthquakes.len(), filtered.visible_count());
    println!("volcanoes:   {} visible", volcanoes.len());
    if args.list {
        for eq in filtered.visible() {
            println!(
                "{:>6.2}  {:>9.4} {:>10.4}  {}",
                eq.magnitude,
                eq.latitude,
                eq.longitude,
                eq.place.as_deref().unwrap_or("-")
            );
        }
    }
    info!("Cache stats: {:?}", cache.stats());

    Ok(())
}
