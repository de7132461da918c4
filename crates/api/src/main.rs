use std::sync::Arc;

use api::{build_router, AppState};
use config::{AppConfig, DocSchemas, LoggingConfig, PromptTemplate};
use inference::{DeepSeekProvider, ProviderConfig};

#[tokio::main]
async fn main() {
    // Load configuration first to get logging settings
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Application cannot start without a valid configuration. Exiting.");
        std::process::exit(1);
    });

    init_tracing(&config.logging);

    let template = PromptTemplate::load(&config.resources.system_prompt_path).unwrap_or_else(|e| {
        tracing::error!(
            path = %config.resources.system_prompt_path,
            error = %e,
            "Failed to load system prompt template"
        );
        std::process::exit(1);
    });

    let schemas = DocSchemas::load(&config.resources.doc_schemas_path).unwrap_or_else(|e| {
        tracing::error!(
            path = %config.resources.doc_schemas_path,
            error = %e,
            "Failed to load document schemas"
        );
        std::process::exit(1);
    });
    tracing::info!(doc_types = schemas.doc_types.len(), "Loaded document schemas");

    let provider = DeepSeekProvider::new(ProviderConfig {
        base_url: config.upstream.base_url.clone(),
        api_key: config.upstream.api_key.clone(),
    });

    let state = AppState {
        provider: Arc::new(provider),
        template: Arc::new(template),
        schemas: Arc::new(schemas),
        model: config.upstream.model.clone(),
        temperature: config.upstream.temperature,
    };

    let app = build_router(state);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(address = %bind_address, error = %e, "Failed to bind listener");
            std::process::exit(1);
        });

    tracing::info!(address = %bind_address, "Server started successfully");
    tracing::info!(model = %config.upstream.model, "Upstream model configured");
    tracing::info!("API Endpoints:");
    tracing::info!("  - POST /api/generate-stream (Streaming generation, NDJSON)");
    tracing::info!("  - POST /api/generate (Buffered generation)");
    tracing::info!("  - POST /api/export-docx (Word export)");
    tracing::info!("  - GET /api/doc-schemas (Document type schemas)");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}

fn init_tracing(logging_config: &LoggingConfig) {
    // Build the filter string from the logging configuration
    let mut filter = logging_config.level.clone();

    for (module, level) in &logging_config.modules {
        filter.push_str(&format!(",{}={}", module, level));
    }

    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
