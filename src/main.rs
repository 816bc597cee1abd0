use fitclub::auth::SessionSigner;
use fitclub::config::seeding::DatabaseSeeder;
use fitclub::config::{run_migrations, AppConfig, DatabaseConfig};
use fitclub::web::routes::create_routes;
use fitclub::web::AppState;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;
    info!("database ready");

    if app_config.seed_demo_data {
        DatabaseSeeder::new(db.clone()).seed_all().await?;
    }

    let state = AppState {
        db,
        sessions: SessionSigner::new(&app_config.session_secret),
    };
    let app = create_routes(state);

    let listener = TcpListener::bind(app_config.server_address()).await?;
    info!("Fitness club server listening on http://{}", app_config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
