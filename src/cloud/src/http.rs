use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::post;
use axum::Router;
use common::config::Config;
use tracing::info;

use crate::bigquery;
use crate::error::Result;
use crate::run_jobs;

async fn load(Extension(cfg): Extension<Arc<Config>>) -> Result<String> {
    bigquery::load_tables(&cfg).await?;
    Ok("All tables loaded.".to_string())
}

async fn trigger(Extension(cfg): Extension<Arc<Config>>) -> Result<String> {
    let job_name = run_jobs::trigger_job(&cfg.jobs).await?;
    Ok(format!("Job {job_name} triggered successfully."))
}

pub fn attach_routes(router: Router, cfg: Arc<Config>) -> Router {
    router
        .route("/load", post(load))
        .route("/trigger", post(trigger))
        .layer(Extension(cfg))
}

pub async fn serve(cfg: Config) -> Result<()> {
    let host = cfg.server.host;
    let router = attach_routes(Router::new(), Arc::new(cfg));

    let listener = tokio::net::TcpListener::bind(host).await?;
    info!("listening on http://{host}");

    Ok(axum::serve(listener, router.into_make_service()).await?)
}
