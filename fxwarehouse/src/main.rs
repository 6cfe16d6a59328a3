use fxw_axum::start_server;
use fxw_sqlite::Db;
use fxwarehouse::{AppConfig, Cli, Commands, app::WarehouseApp, import};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Every crate in the workspace reports through `tracing`; RUST_LOG picks
    // what reaches stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = WarehouseApp { db };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => start_server(server, app).await?,
        Commands::Import(args) => import(&app, &args).await?,
    }

    Ok(())
}
