use anyhow::Context;

use prepaid_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prepaid_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let addr = config.bind_addr();

    let app = prepaid_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
