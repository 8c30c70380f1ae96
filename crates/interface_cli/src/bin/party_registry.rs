//! Party Registry - command-line binary
//!
//! # Usage
//!
//! ```bash
//! # List parties (seeding the sample records on first run)
//! party-registry list
//!
//! # Register a party
//! echo '{"nome": "Ana Lima", "tipo": "PF", "documento": "52998224725",
//!        "email": "ana@email.com", "telefone": "(11) 91234-5678",
//!        "endereco": "Rua Augusta, 500 - São Paulo/SP"}' | party-registry add
//! ```
//!
//! # Environment Variables
//!
//! * `REGISTRY_STORAGE_DIR` - Directory holding the storage slot (default: ./data)
//! * `REGISTRY_STORAGE_KEY` - Slot name (default: partes_interessadas)
//! * `REGISTRY_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `REGISTRY_LOG_JSON` - Emit JSON log lines (default: false)
//! * `REGISTRY_SEED_ON_START` - Seed sample parties into an empty registry (default: true)
//! * `RUST_LOG` - Overrides the log filter entirely

use std::io::Read;

use anyhow::Context;
use domain_party::PartyRegistry;
use interface_cli::{execute, Command, RegistryConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = RegistryConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level, config.log_json);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let store = config.file_store().context("Unusable storage location")?;
    tracing::debug!(
        storage_dir = %store.dir().display(),
        storage_key = %config.storage_key,
        ?command,
        "Opening party registry"
    );

    let mut registry = PartyRegistry::open(store, config.storage_key.clone());
    if config.seed_on_start {
        registry.seed_if_empty();
    }

    let mut input = String::new();
    if command.reads_input() {
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read JSON from stdin")?;
    }

    let output = execute(&command, &mut registry, &input)?;
    println!("{output}");
    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr so stdout stays parseable.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Emit JSON lines instead of human-readable text
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        }))
        .init();
}
