use mock_backend::config::AppConfig;
use mock_backend::{build_store, render_snapshot};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Info by default; RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    eprintln!("Mock backend: sample data seeder");

    // Load configuration
    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: workspaces={}/{} seed={}",
        config.seed.primary_workspace_id,
        config.seed.isolation_workspace_id,
        config.seed.enabled
    );

    let store = build_store(&config)?;
    let rendered = render_snapshot(&store, config.output.pretty)?;

    match &config.output.path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            log::info!("Sample data written to {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
