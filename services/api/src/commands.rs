use crate::infra::build_registry;
use clap::Args;
use freight_desk::brokerage::calls::{
    CallClassifier, CallDetails, MetricsSnapshot, MetricsSource, StaticMetricsSource,
};
use freight_desk::brokerage::carriers::CarrierVerifier;
use freight_desk::brokerage::loads::{Load, LoadCatalog, LoadSearch};
use freight_desk::config::AppConfig;
use freight_desk::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DatasetArgs {
    /// Load dataset (.json or .csv). Defaults to LOADS_PATH.
    #[arg(long)]
    pub(crate) loads: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Origin substring (case-insensitive)
    #[arg(long)]
    pub(crate) origin: Option<String>,
    /// Destination substring (case-insensitive)
    #[arg(long)]
    pub(crate) destination: Option<String>,
    /// Equipment type, e.g. "Dry Van"
    #[arg(long)]
    pub(crate) equipment_type: Option<String>,
    /// Minimum loadboard rate (inclusive)
    #[arg(long)]
    pub(crate) min_rate: Option<f64>,
    /// Maximum loadboard rate (inclusive)
    #[arg(long)]
    pub(crate) max_rate: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct VerifyArgs {
    /// Motor-carrier (MC) docket number
    pub(crate) mc_number: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ClassifyArgs {
    /// Call transcript text
    #[arg(long)]
    pub(crate) transcript: Option<String>,
    /// Agreed price, if the call closed
    #[arg(long)]
    pub(crate) final_price: Option<f64>,
    /// Number of negotiation rounds
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) negotiation_rounds: Option<i64>,
}

fn open_catalog(args: DatasetArgs) -> Result<(LoadCatalog, PathBuf), AppError> {
    let path = match args.loads {
        Some(path) => path,
        None => AppConfig::load()?.dataset.loads_path,
    };
    let catalog = LoadCatalog::from_path(&path)?;
    Ok((catalog, path))
}

pub(crate) fn run_list_loads(args: DatasetArgs) -> Result<(), AppError> {
    let (catalog, path) = open_catalog(args)?;

    println!("Loads from {}", path.display());
    render_loads(catalog.get_all().iter());
    println!("\n{} loads", catalog.len());
    Ok(())
}

pub(crate) fn run_search_loads(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        dataset,
        origin,
        destination,
        equipment_type,
        min_rate,
        max_rate,
    } = args;

    let (catalog, path) = open_catalog(dataset)?;
    let criteria = LoadSearch {
        origin,
        destination,
        equipment_type,
        min_rate,
        max_rate,
    };

    let results = catalog.search(&criteria);
    println!("Search over {} ({} loads)", path.display(), catalog.len());
    if results.loads.is_empty() {
        println!("No loads match");
        return Ok(());
    }
    render_loads(results.loads.iter().copied());
    println!("\n{} matches", results.count);
    Ok(())
}

pub(crate) async fn run_verify_carrier(args: VerifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let verifier = CarrierVerifier::new(build_registry(&config.registry)?);

    let result = verifier.verify(Some(args.mc_number.as_str())).await?;
    println!("MC {} via {} registry", result.mc_number, verifier.registry_name());
    if result.is_valid {
        println!(
            "- {:?}: {} ({})",
            result.status,
            result.carrier_name.as_deref().unwrap_or("unnamed carrier"),
            result.authority_type.as_deref().unwrap_or("authority unknown")
        );
    } else {
        println!("- {:?}: no operating authority on record", result.status);
    }
    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let call = CallDetails {
        call_transcript: args.transcript,
        final_price: args.final_price,
        negotiation_rounds: args.negotiation_rounds,
    };

    let classification = CallClassifier::default().classify(&call);
    println!(
        "Outcome {:?} | sentiment {:?} | confidence {:.2}",
        classification.outcome, classification.sentiment, classification.confidence
    );
    let extracted = &classification.extracted_data;
    if let Some(price) = extracted.final_price {
        println!("- Final price: ${price:.2}");
    }
    if let Some(rounds) = extracted.negotiation_rounds {
        println!("- Negotiation rounds: {rounds}");
    }
    println!("- Call duration: {}s", extracted.call_duration);
    println!("- Key topics: {}", extracted.key_topics.join(", "));
    Ok(())
}

pub(crate) fn run_call_metrics() -> Result<(), AppError> {
    render_metrics(&StaticMetricsSource.snapshot());
    Ok(())
}

fn render_loads<'a>(loads: impl Iterator<Item = &'a Load>) {
    for load in loads {
        println!("- {}", load_line(load));
    }
}

fn load_line(load: &Load) -> String {
    format!(
        "{} | {} -> {} | {} | ${:.2}",
        load.load_id, load.origin, load.destination, load.equipment_type, load.loadboard_rate
    )
}

fn render_metrics(snapshot: &MetricsSnapshot) {
    println!("Call metrics");
    println!(
        "- {} calls | {} successful | {} failed | {:.1}% success rate",
        snapshot.total_calls, snapshot.successful_calls, snapshot.failed_calls, snapshot.success_rate
    );
    println!(
        "- {:.1} avg negotiation rounds | {}s avg call duration",
        snapshot.average_negotiation_rounds, snapshot.average_call_duration
    );

    let sentiment = &snapshot.sentiment_distribution;
    println!(
        "Sentiment: {} positive / {} neutral / {} negative",
        sentiment.positive, sentiment.neutral, sentiment.negative
    );

    let outcomes = &snapshot.outcome_distribution;
    println!(
        "Outcomes: {} success / {} negotiation failed / {} no interest",
        outcomes.success, outcomes.negotiation_failed, outcomes.no_interest
    );

    println!("Top equipment types");
    for entry in &snapshot.top_equipment_types {
        println!("  - {}: {}", entry.equipment_type, entry.count);
    }
}
