use std::sync::Mutex;

use crate::foundation::error::{AdmatError, AdmatResult};

/// Per-brand credentials for the external asset library (DAM).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamCredentials {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    /// The only thing the core ever consumes: a resolved URL.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPage {
    pub assets: Vec<AssetRecord>,
    pub total: u64,
    pub page: u32,
}

#[derive(Clone, Debug)]
pub struct AssetUpload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Opaque asset-listing/upload collaborator. Failures surface as
/// `ExternalService` errors with the upstream status and message; the core
/// never retries automatically.
pub trait AssetLibrary: Send {
    fn list(&self, creds: &DamCredentials, query: &AssetQuery) -> AdmatResult<AssetPage>;
    fn upload(&self, creds: &DamCredentials, upload: AssetUpload) -> AdmatResult<AssetRecord>;
}

/// In-memory asset library used by tests and offline workflows.
#[derive(Default)]
pub struct InMemoryAssetLibrary {
    records: Mutex<Vec<AssetRecord>>,
}

impl InMemoryAssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, records: Vec<AssetRecord>) {
        self.records
            .lock()
            .expect("asset library lock poisoned")
            .extend(records);
    }
}

impl AssetLibrary for InMemoryAssetLibrary {
    fn list(&self, _creds: &DamCredentials, query: &AssetQuery) -> AdmatResult<AssetPage> {
        let records = self
            .records
            .lock()
            .map_err(|_| AdmatError::external("dam", None, "asset library lock poisoned"))?;
        let filtered: Vec<AssetRecord> = records
            .iter()
            .filter(|r| match &query.search {
                Some(term) => r.name.to_lowercase().contains(&term.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        let per_page = query.per_page.max(1) as usize;
        let start = (query.page as usize) * per_page;
        let page_items = filtered
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();
        Ok(AssetPage {
            total: filtered.len() as u64,
            assets: page_items,
            page: query.page,
        })
    }

    fn upload(&self, _creds: &DamCredentials, upload: AssetUpload) -> AdmatResult<AssetRecord> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AdmatError::external("dam", None, "asset library lock poisoned"))?;
        let record = AssetRecord {
            id: format!("asset-{}", records.len() + 1),
            name: upload.name,
            url: format!("memory://assets/{}", records.len() + 1),
            content_type: Some(upload.content_type),
        };
        records.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
