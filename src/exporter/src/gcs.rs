use std::path::Path;
use std::path::PathBuf;

use common::config::Export;
use object_store::gcp::GoogleCloudStorage;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::ObjectStore;
use tracing::info;

use crate::error::ExporterError;
use crate::error::Result;

/// Uploads CSV files into a GCS bucket under the configured prefix.
pub struct Uploader {
    store: GoogleCloudStorage,
    bucket: String,
    prefix: String,
}

impl Uploader {
    pub fn try_new(cfg: &Export) -> Result<Self> {
        let bucket = cfg
            .bucket
            .clone()
            .ok_or_else(|| ExporterError::BadRequest("export.bucket is not set".to_string()))?;

        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(&bucket);
        if let Some(key) = &cfg.service_account_key {
            builder = builder.with_service_account_path(key.to_string_lossy());
        }

        Ok(Self {
            store: builder.build()?,
            bucket,
            prefix: cfg.gcs_prefix.clone(),
        })
    }

    pub async fn upload_files(&self, files: &[PathBuf]) -> Result<()> {
        for file in files {
            self.upload_file(file).await?;
        }
        Ok(())
    }

    /// Uploads every `*.csv` in `dir`, in name order.
    pub async fn upload_dir(&self, dir: &Path) -> Result<()> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "csv") {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(ExporterError::BadRequest(format!(
                "no csv files found in {}",
                dir.display()
            )));
        }

        self.upload_files(&files).await
    }

    async fn upload_file(&self, file: &Path) -> Result<()> {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ExporterError::BadRequest(format!("invalid file name: {file:?}")))?;

        let contents = tokio::fs::read(file).await?;
        let location = object_path(&self.prefix, name);
        self.store.put(&location, contents.into()).await?;

        info!("uploaded {} to gs://{}/{}", name, self.bucket, location);

        Ok(())
    }
}

fn object_path(prefix: &str, name: &str) -> object_store::path::Path {
    object_store::path::Path::from(format!("{prefix}{name}"))
}
