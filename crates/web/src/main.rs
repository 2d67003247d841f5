use anyhow::Context;

use netgn_web::config::ConsoleConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    netgn_observability::init();

    let config = ConsoleConfig::from_env()?;
    let bind_addr = config.bind_addr;

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!(
        graphql = %config.graphql_url,
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, netgn_web::app::build_app(config)).await?;
    Ok(())
}
