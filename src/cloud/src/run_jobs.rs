use common::config::Jobs;
use reqwest::Client;
use reqwest::StatusCode;
use tracing::info;

use crate::error::CloudError;
use crate::error::Result;
use crate::token;

fn job_run_url(region: &str, project: &str, job_name: &str) -> String {
    format!(
        "https://{region}-run.googleapis.com/apis/run.googleapis.com/v1/namespaces/{project}/jobs/{job_name}:run"
    )
}

/// Starts the named Cloud Run job. Returns the job name once the control
/// plane has accepted the run request.
pub async fn trigger_job(cfg: &Jobs) -> Result<String> {
    let project = cfg
        .project_id
        .clone()
        .ok_or_else(|| CloudError::BadRequest("jobs.project_id is not set".to_string()))?;
    let job_name = cfg
        .job_name
        .clone()
        .ok_or_else(|| CloudError::BadRequest("jobs.job_name is not set".to_string()))?;
    let region = cfg
        .region
        .clone()
        .ok_or_else(|| CloudError::BadRequest("jobs.region is not set".to_string()))?;

    let client = Client::new();
    let token = token::fetch_access_token(&client).await?;

    let resp = client
        .post(job_run_url(&region, &project, &job_name))
        .bearer_auth(token.access_token)
        .send()
        .await?;
    if resp.status() != StatusCode::OK {
        return Err(CloudError::Upstream {
            status: resp.status().as_u16(),
            body: resp.text().await?,
        });
    }

    info!("job {job_name} triggered successfully");

    Ok(job_name)
}
