use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use subx_api::{ApiSettings, RestApi};
use subx_similarity::EngineConfig;
use subx_storage::ResourceManager;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Ingredient substitution recommendation server
#[derive(Parser, Debug)]
#[command(name = "subx")]
#[command(about = "Ingredient substitution recommendation server", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, env = "SUBX_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, env = "SUBX_HTTP_PORT", default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, env = "SUBX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Allowed CORS origin, repeatable; any origin when omitted
    #[arg(long = "allowed-origin", env = "SUBX_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Skip reading and writing the compiled resource bundle
    #[arg(long)]
    no_bundle: bool,

    /// Maximum results for single-target requests
    #[arg(long, default_value_t = 20)]
    single_top_n: usize,

    /// Maximum combinations for multi-target requests
    #[arg(long, default_value_t = 10)]
    multi_top_n: usize,

    /// Per-target shortlist size for multi-target requests
    #[arg(long, default_value_t = 5)]
    shortlist_k: usize,

    /// Maximum targets in one multi-target request
    #[arg(long, default_value_t = 6)]
    max_targets: usize,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            single_top_n: self.single_top_n,
            multi_top_n: self.multi_top_n,
            shortlist_k: self.shortlist_k,
            max_targets: self.max_targets,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG narrows further when set
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let engine = args.engine_config();
    engine.validate()?;

    info!("Starting subx v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let manager = Arc::new(ResourceManager::new(&args.data_dir).bundle_cache(!args.no_bundle));
    manager.load_in_background()?;
    info!("Resource loading started");

    let settings = ApiSettings {
        port: args.http_port,
        allowed_origins: args.allowed_origins.clone(),
        engine,
    };

    let manager_http = manager.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(manager_http, settings).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("subx started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
