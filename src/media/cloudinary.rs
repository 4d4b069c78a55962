use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::Duration;

use super::MediaUploader;
use crate::error::{AppError, Result};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Signed uploads against the Cloudinary upload API.
#[derive(Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(
        cloud_name: &str,
        api_key: String,
        api_secret: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            upload_url: format!("{API_BASE}/{cloud_name}/image/upload"),
            api_key,
            api_secret,
        })
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload_image(&self, data: &str) -> Result<String> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(&[("timestamp", timestamp.as_str())], &self.api_secret);

        let response = self
            .client
            .post(&self.upload_url)
            .form(&[
                ("file", data),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "no error detail".to_string());
            return Err(AppError::Upload(format!("{status}: {reason}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("unreadable upload response: {e}")))?;

        tracing::debug!(url = %uploaded.secure_url, "image uploaded");
        Ok(uploaded.secure_url)
    }
}

/// Cloudinary request signature: SHA-1 over the `key=value` pairs sorted by key
/// and joined with `&`, followed by the API secret.
fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
