use tracing_subscriber::EnvFilter;

mod config;
mod game;
mod ui;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rs_chess=info,engine=info".into()),
        )
        .init();

    let config = config::AppConfig::from_env();
    tracing::info!("rs-chess v{} depth {} human {:?}", env!("CARGO_PKG_VERSION"), config.depth, config.human);
    ui::ui(&config)
}
