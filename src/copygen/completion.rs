use std::collections::BTreeMap;

use crate::brand::model::Brand;
use crate::foundation::error::AdmatResult;
use crate::layout::catalog::{CopyField, LayoutTemplate};
use crate::sku::model::Sku;

/// Structured prompt for the opaque text-completion collaborator: brand
/// voice, product info, and the target layout's field schema. The service
/// must answer with a single JSON object whose keys match the requested
/// field names exactly.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPrompt {
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_knowledge: Option<String>,
    pub fields: Vec<CopyField>,
}

pub fn prompt_for(brand: &Brand, sku: &Sku, template: &LayoutTemplate) -> CopyPrompt {
    CopyPrompt {
        product_name: sku.name.clone(),
        brand_voice: brand.voice.clone(),
        brand_knowledge: brand.knowledge.clone(),
        fields: template.copy_schema.clone(),
    }
}

/// Opaque copy-generation collaborator. Failures surface as
/// `ExternalService` errors; the core never retries automatically.
pub trait CopyCompletion: Send {
    fn complete(&self, prompt: &CopyPrompt) -> AdmatResult<serde_json::Value>;
}

/// Validate a completion response against the layout's copy-field schema and
/// conform it into a copy map.
///
/// Every schema field must come back as a non-blank string; anything
/// missing, blank, or of the wrong type is replaced with the layout's
/// baked-in fallback for that field (the schema placeholder as terminal
/// default) rather than failing the render. Keys outside the schema are
/// dropped.
pub fn conform_copy(
    template: &LayoutTemplate,
    response: &serde_json::Value,
) -> BTreeMap<String, String> {
    let mut copy = BTreeMap::new();
    for field in &template.copy_schema {
        let answered = response
            .get(&field.key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty());
        let value = match answered {
            Some(text) => text.to_string(),
            None => {
                tracing::debug!(
                    field = field.key,
                    "completion response missing field, using layout fallback"
                );
                template
                    .spec
                    .copy_fallback(&field.key)
                    .unwrap_or(&field.placeholder)
                    .to_string()
            }
        };
        copy.insert(field.key.clone(), value);
    }
    copy
}

#[cfg(test)]
#[path = "../../tests/unit/copygen/completion.rs"]
mod tests;
