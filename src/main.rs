use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use closet::api;
use closet::models::AppConfig;
use closet::server;
use closet::services::{PaletteOverrides, PaletteService};

#[derive(Parser)]
#[command(name = "closet")]
#[command(about = "Closet - wardrobe swatch palettes and tag suggestions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Extract the swatch palette of an image file
    Palette {
        /// Image file (PNG, JPEG, WebP or GIF)
        file: PathBuf,

        /// Maximum number of swatches
        #[arg(long)]
        max_colors: Option<usize>,

        /// Sampling stride (1 = every pixel)
        #[arg(long)]
        quality: Option<u32>,

        /// Candidate colors requested from the quantizer
        #[arg(long)]
        palette_size: Option<usize>,

        /// Print JSON instead of one color per line
        #[arg(long)]
        json: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Closet API",
        description = "Wardrobe swatch palettes and tag suggestions",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_palette, api::handle_auto_tag),
    components(schemas(
        api::PaletteResponse,
        api::AutoTagRequest,
        api::AutoTagResponse,
    )),
    tags(
        (name = "Palette", description = "Swatch palette extraction"),
        (name = "Tagging", description = "Language-model tag suggestions")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Palette {
            file,
            max_colors,
            quality,
            palette_size,
            json,
        }) => run_palette_command(
            &file,
            PaletteOverrides {
                max_colors,
                quality,
                palette_size,
            },
            json,
        ),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Print the palette of a local image (no server needed)
fn run_palette_command(
    file: &Path,
    overrides: PaletteOverrides,
    json: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "closet=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::from_env();
    let service =
        PaletteService::new(config.palette_options()).with_max_pixels(config.upload.max_pixels);

    let bytes = std::fs::read(file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", file.display()))?;
    let palette = service.extract(&bytes, &service.options(overrides));

    if json {
        println!("{}", serde_json::json!({ "palette": palette }));
    } else if palette.is_empty() {
        eprintln!("No swatches found in {}", file.display());
    } else {
        for color in &palette {
            println!("{color}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let api_key_set = std::env::var("OPENAI_API_KEY")
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    println!("Closet v{VERSION}");
    println!("Wardrobe swatch palettes and tag suggestions\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR      = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE    = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  OPENAI_API_KEY = {}",
        if api_key_set { "(set)" } else { "(not set, auto-tag disabled)" }
    );

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  closet serve            Start the HTTP server");
    println!("  closet palette <FILE>   Print the swatch palette of an image");
    println!("\nRun 'closet --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "closet=debug,swatch_palette=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Closet server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
