use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let store_id = std::env::var("MOCK_STORE_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or(1);
    let secret_key = std::env::var("MOCK_SECRET_KEY").unwrap_or_else(|_| "secret".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, store_id, "mock iGlobal API listening");
    mock_server::run(listener, store_id, &secret_key).await
}
