use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::brand::model::Brand;
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::layout::catalog::{Catalog, LayoutTemplate};
use crate::resolve::position::MasterOverrides;
use crate::sku::model::Sku;

/// Persistence collaborator for brand records, keyed by integer id.
pub trait BrandStore {
    fn get_brand(&self, id: u64) -> Option<Brand>;
    fn list_brands(&self) -> Vec<Brand>;
    fn create_brand(&mut self, brand: Brand) -> u64;
    fn update_brand(&mut self, brand: Brand) -> AdmatResult<()>;
    fn delete_brand(&mut self, id: u64) -> AdmatResult<()>;
}

/// Persistence collaborator for SKU records, keyed by integer id.
pub trait SkuStore {
    fn get_sku(&self, id: u64) -> Option<Sku>;
    fn list_skus(&self, brand_id: u64) -> Vec<Sku>;
    fn create_sku(&mut self, sku: Sku) -> u64;
    fn update_sku(&mut self, sku: Sku) -> AdmatResult<()>;
    fn delete_sku(&mut self, id: u64) -> AdmatResult<()>;
}

/// Persistence collaborator for the layout template catalog, keyed by the
/// immutable string key.
pub trait TemplateStore {
    fn get_template(&self, key: &str) -> Option<LayoutTemplate>;
    fn list_templates(&self) -> Vec<LayoutTemplate>;
    fn create_template(&mut self, template: LayoutTemplate) -> AdmatResult<()>;
    fn update_template(&mut self, template: LayoutTemplate) -> AdmatResult<()>;
    fn delete_template(&mut self, key: &str) -> AdmatResult<()>;
    /// Disabling hides a layout from selection UIs; instance data stays
    /// resolvable.
    fn toggle_template(&mut self, key: &str) -> AdmatResult<bool>;
    fn duplicate_template(&mut self, key: &str, new_key: &str) -> AdmatResult<LayoutTemplate>;
}

/// Full persisted state, stored as one JSON document.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub brands: BTreeMap<u64, Brand>,
    pub skus: BTreeMap<u64, Sku>,
    pub templates: Vec<LayoutTemplate>,
    pub master_overrides: MasterOverrides,
}

/// In-memory object store implementing every persistence trait, with JSON
/// snapshot save/load for CLI workflows and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Snapshot,
    next_brand_id: u64,
    next_sku_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the built-in layout catalog.
    pub fn with_builtin_catalog() -> Self {
        Self {
            state: Snapshot {
                templates: Catalog::builtin().templates,
                ..Snapshot::default()
            },
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            templates: self.state.templates.clone(),
        }
    }

    pub fn master_overrides(&self) -> &MasterOverrides {
        &self.state.master_overrides
    }

    pub fn master_overrides_mut(&mut self) -> &mut MasterOverrides {
        &mut self.state.master_overrides
    }

    pub fn save_json(&self, path: &Path) -> AdmatResult<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create snapshot '{}'", path.display()))?;
        serde_json::to_writer_pretty(file, &self.state)
            .map_err(|e| AdmatError::serde(format!("write snapshot: {e}")))
    }

    pub fn load_json(path: &Path) -> AdmatResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open snapshot '{}'", path.display()))?;
        let state: Snapshot = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| AdmatError::serde(format!("parse snapshot: {e}")))?;
        let next_brand_id = state.brands.keys().max().map_or(1, |id| id + 1);
        let next_sku_id = state.skus.keys().max().map_or(1, |id| id + 1);
        Ok(Self {
            state,
            next_brand_id,
            next_sku_id,
        })
    }
}

impl BrandStore for MemoryStore {
    fn get_brand(&self, id: u64) -> Option<Brand> {
        self.state.brands.get(&id).cloned()
    }

    fn list_brands(&self) -> Vec<Brand> {
        self.state.brands.values().cloned().collect()
    }

    fn create_brand(&mut self, mut brand: Brand) -> u64 {
        self.next_brand_id = self.next_brand_id.max(1);
        let id = self.next_brand_id;
        self.next_brand_id += 1;
        brand.id = id;
        self.state.brands.insert(id, brand);
        id
    }

    fn update_brand(&mut self, brand: Brand) -> AdmatResult<()> {
        match self.state.brands.get_mut(&brand.id) {
            Some(slot) => {
                *slot = brand;
                Ok(())
            }
            None => Err(AdmatError::validation(format!(
                "brand {} does not exist",
                brand.id
            ))),
        }
    }

    fn delete_brand(&mut self, id: u64) -> AdmatResult<()> {
        self.state
            .brands
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AdmatError::validation(format!("brand {id} does not exist")))
    }
}

impl SkuStore for MemoryStore {
    fn get_sku(&self, id: u64) -> Option<Sku> {
        self.state.skus.get(&id).cloned()
    }

    fn list_skus(&self, brand_id: u64) -> Vec<Sku> {
        self.state
            .skus
            .values()
            .filter(|s| s.brand_id == brand_id)
            .cloned()
            .collect()
    }

    fn create_sku(&mut self, mut sku: Sku) -> u64 {
        self.next_sku_id = self.next_sku_id.max(1);
        let id = self.next_sku_id;
        self.next_sku_id += 1;
        sku.id = id;
        self.state.skus.insert(id, sku);
        id
    }

    fn update_sku(&mut self, sku: Sku) -> AdmatResult<()> {
        match self.state.skus.get_mut(&sku.id) {
            Some(slot) => {
                *slot = sku;
                Ok(())
            }
            None => Err(AdmatError::validation(format!(
                "sku {} does not exist",
                sku.id
            ))),
        }
    }

    fn delete_sku(&mut self, id: u64) -> AdmatResult<()> {
        self.state
            .skus
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AdmatError::validation(format!("sku {id} does not exist")))
    }
}

impl TemplateStore for MemoryStore {
    fn get_template(&self, key: &str) -> Option<LayoutTemplate> {
        self.state.templates.iter().find(|t| t.key == key).cloned()
    }

    fn list_templates(&self) -> Vec<LayoutTemplate> {
        self.state.templates.clone()
    }

    fn create_template(&mut self, template: LayoutTemplate) -> AdmatResult<()> {
        if self.state.templates.iter().any(|t| t.key == template.key) {
            return Err(AdmatError::validation(format!(
                "template key '{}' already exists",
                template.key
            )));
        }
        template.spec.validate()?;
        self.state.templates.push(template);
        Ok(())
    }

    fn update_template(&mut self, template: LayoutTemplate) -> AdmatResult<()> {
        template.spec.validate()?;
        match self
            .state
            .templates
            .iter_mut()
            .find(|t| t.key == template.key)
        {
            Some(slot) => {
                *slot = template;
                Ok(())
            }
            None => Err(AdmatError::validation(format!(
                "template '{}' does not exist",
                template.key
            ))),
        }
    }

    fn delete_template(&mut self, key: &str) -> AdmatResult<()> {
        let before = self.state.templates.len();
        self.state.templates.retain(|t| t.key != key);
        if self.state.templates.len() == before {
            return Err(AdmatError::validation(format!(
                "template '{key}' does not exist"
            )));
        }
        Ok(())
    }

    fn toggle_template(&mut self, key: &str) -> AdmatResult<bool> {
        match self.state.templates.iter_mut().find(|t| t.key == key) {
            Some(template) => {
                template.enabled = !template.enabled;
                Ok(template.enabled)
            }
            None => Err(AdmatError::validation(format!(
                "template '{key}' does not exist"
            ))),
        }
    }

    fn duplicate_template(&mut self, key: &str, new_key: &str) -> AdmatResult<LayoutTemplate> {
        let source = self
            .get_template(key)
            .ok_or_else(|| AdmatError::validation(format!("template '{key}' does not exist")))?;
        if self.state.templates.iter().any(|t| t.key == new_key) {
            return Err(AdmatError::validation(format!(
                "template key '{new_key}' already exists"
            )));
        }
        let mut copy = source;
        copy.key = new_key.to_string();
        copy.name = format!("{} (copy)", copy.name);
        self.state.templates.push(copy.clone());
        Ok(copy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/memory.rs"]
mod tests;
