use std::time::Duration;

use anyhow::Context as _;

use crate::brand::model::Brand;
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::sku::model::Sku;

/// Payload the primary rasterization service accepts: the layout key plus
/// fully materialized brand and SKU snapshots.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest<'a> {
    pub layout_key: &'a str,
    pub brand: &'a Brand,
    pub sku: &'a Sku,
}

/// The stateless image-synthesis service behind the primary path. One
/// synchronous call per request with an explicit timeout; any transport
/// error, non-2xx status, or empty payload is a primary-path failure.
pub trait RenderService: Send {
    fn render(&self, request: &ServiceRequest<'_>, timeout: Duration) -> AdmatResult<Vec<u8>>;
}

pub struct HttpRenderService {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpRenderService {
    pub fn new(endpoint: impl Into<String>) -> AdmatResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("build render service client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl RenderService for HttpRenderService {
    fn render(&self, request: &ServiceRequest<'_>, timeout: Duration) -> AdmatResult<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(request)
            .send()
            .map_err(|e| AdmatError::backend(format!("render service request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(AdmatError::backend(format!(
                "render service returned {status}: {}",
                message.trim()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| AdmatError::backend(format!("read render service body: {e}")))?;
        if bytes.is_empty() {
            return Err(AdmatError::backend("render service returned an empty payload"));
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/service.rs"]
mod tests;
