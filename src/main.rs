use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_reports::{api::create_router, ApplicationBuilder, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting shift reports service");

    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    let listen_addr = config.listen_addr.clone();

    let state = ApplicationBuilder::new(config)
        .with_database()
        .await?
        .with_infrastructure()?
        .build()?;

    let app = create_router(state);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` selects levels (default `info`); `LOG_FORMAT=json` switches to
/// JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
