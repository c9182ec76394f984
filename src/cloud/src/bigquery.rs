use std::time::Duration;

use common::config::Config;
use common::types::WAREHOUSE_TABLES;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::error::CloudError;
use crate::error::Result;
use crate::token;

const BIGQUERY_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableReference {
    project_id: String,
    dataset_id: String,
    table_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct JobConfigurationLoad {
    source_uris: Vec<String>,
    destination_table: TableReference,
    source_format: String,
    skip_leading_rows: u32,
    autodetect: bool,
    write_disposition: String,
}

#[derive(Debug, Clone, Serialize)]
struct JobConfiguration {
    load: JobConfigurationLoad,
}

#[derive(Debug, Clone, Serialize)]
struct JobRequest {
    configuration: JobConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Job {
    job_reference: JobReference,
    status: JobStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReference {
    job_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobStatus {
    state: String,
    error_result: Option<ErrorProto>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorProto {
    message: String,
}

fn load_job_request(project: &str, dataset: &str, uri: String, table: &str) -> JobRequest {
    JobRequest {
        configuration: JobConfiguration {
            load: JobConfigurationLoad {
                source_uris: vec![uri],
                destination_table: TableReference {
                    project_id: project.to_string(),
                    dataset_id: dataset.to_string(),
                    table_id: table.to_string(),
                },
                source_format: "CSV".to_string(),
                skip_leading_rows: 1,
                autodetect: true,
                write_disposition: "WRITE_TRUNCATE".to_string(),
            },
        },
    }
}

/// Loads every uploaded CSV into its warehouse table, one job at a time.
/// Each table is truncated and its schema re-detected from the file.
pub async fn load_tables(cfg: &Config) -> Result<()> {
    let project = cfg
        .warehouse
        .project_id
        .clone()
        .ok_or_else(|| CloudError::BadRequest("warehouse.project_id is not set".to_string()))?;
    let dataset = cfg
        .warehouse
        .dataset
        .clone()
        .ok_or_else(|| CloudError::BadRequest("warehouse.dataset is not set".to_string()))?;
    let bucket = cfg
        .export
        .bucket
        .clone()
        .ok_or_else(|| CloudError::BadRequest("export.bucket is not set".to_string()))?;
    let prefix = &cfg.export.gcs_prefix;

    let client = Client::new();
    let token = token::fetch_access_token(&client).await?;

    for (file, table) in WAREHOUSE_TABLES {
        let uri = format!("gs://{bucket}/{prefix}{file}");
        let req = load_job_request(&project, &dataset, uri, table);
        let job = submit_load_job(&client, &token.access_token, &project, &req).await?;
        wait_for_job(&client, &token.access_token, &project, job, file, table).await?;
        info!("loaded {} into {}.{}.{}", file, project, dataset, table);
    }

    Ok(())
}

async fn submit_load_job(
    client: &Client,
    token: &str,
    project: &str,
    req: &JobRequest,
) -> Result<Job> {
    let url = format!("{BIGQUERY_URL}/projects/{project}/jobs");
    let resp = client.post(url).bearer_auth(token).json(req).send().await?;
    if !resp.status().is_success() {
        return Err(CloudError::Upstream {
            status: resp.status().as_u16(),
            body: resp.text().await?,
        });
    }

    Ok(resp.json::<Job>().await?)
}

async fn wait_for_job(
    client: &Client,
    token: &str,
    project: &str,
    job: Job,
    file: &str,
    table: &str,
) -> Result<()> {
    let url = format!("{BIGQUERY_URL}/projects/{project}/jobs/{}", job.job_reference.job_id);

    let mut status = job.status;
    while status.state != "DONE" {
        debug!("load job {} is {}", job.job_reference.job_id, status.state);
        tokio::time::sleep(POLL_INTERVAL).await;

        let resp = client.get(&url).bearer_auth(token).send().await?;
        if !resp.status().is_success() {
            return Err(CloudError::Upstream {
                status: resp.status().as_u16(),
                body: resp.text().await?,
            });
        }
        status = resp.json::<Job>().await?.status;
    }

    if let Some(err) = status.error_result {
        return Err(CloudError::LoadJob {
            file: file.to_string(),
            table: table.to_string(),
            message: err.message,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_load_job_request_shape() {
        let req = load_job_request(
            "proj",
            "coffee_shop",
            "gs://bucket/csv_sources/Customers.csv".to_string(),
            "customers",
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "configuration": {
                    "load": {
                        "sourceUris": ["gs://bucket/csv_sources/Customers.csv"],
                        "destinationTable": {
                            "projectId": "proj",
                            "datasetId": "coffee_shop",
                            "tableId": "customers"
                        },
                        "sourceFormat": "CSV",
                        "skipLeadingRows": 1,
                        "autodetect": true,
                        "writeDisposition": "WRITE_TRUNCATE"
                    }
                }
            })
        );
    }

    #[test]
    fn test_job_status_parses_error_result() {
        let job: Job = serde_json::from_value(json!({
            "jobReference": {"projectId": "proj", "jobId": "job_1"},
            "status": {
                "state": "DONE",
                "errorResult": {"reason": "invalid", "message": "schema mismatch"}
            }
        }))
        .unwrap();
        assert_eq!(job.job_reference.job_id, "job_1");
        assert_eq!(job.status.state, "DONE");
        assert_eq!(job.status.error_result.unwrap().message, "schema mismatch");
    }

    #[tokio::test]
    async fn test_load_requires_warehouse_config() {
        let cfg = Config::default();
        let res = load_tables(&cfg).await;
        assert!(matches!(res, Err(CloudError::BadRequest(_))));
    }
}
