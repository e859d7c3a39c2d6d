use std::env;

use todo_web::api::{AppState, Templates, create_router};
use todo_web::application::TaskService;
use todo_web::infrastructure::{AppConfig, StoreFactory};
use todo_web::server::{Server, ServerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("todo-web - Starting Server");

    let config = load_config();

    let store = StoreFactory::new(config.clone())
        .create()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create task store: {}", e))?;
    let templates =
        Templates::new().map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?;

    let state = AppState::new(TaskService::new(store), templates);

    let router = create_router(state, &config.static_dir);

    let server = Server::new(ServerConfig::from(&config));
    server.run(router).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_web=debug,tower_http=debug,info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }
}

fn load_config() -> AppConfig {
    AppConfig::from_env().unwrap_or_else(|error| {
        tracing::warn!(error = %error, "Invalid configuration, using defaults");
        AppConfig::default()
    })
}
