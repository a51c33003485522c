//! Card configuration file.
//!
//! A card is described in JSON so the host can drive any record shape
//! without recompiling:
//!
//! ```json
//! {
//!   "title": "Pod issues",
//!   "search_fields": ["name", "metadata.namespace"],
//!   "cluster_field": "cluster",
//!   "status_field": "status",
//!   "sort_fields": [
//!     { "name": "restarts", "label": "Restarts", "kind": "number" },
//!     { "name": "name", "kind": "text" }
//!   ],
//!   "default_sort": "restarts",
//!   "default_direction": "desc",
//!   "page_size": 5,
//!   "storage_key": "pod-issues"
//! }
//! ```

use anyhow::{Context, Result, bail};
use card_pipeline::{
    CardDataConfig, Field, FilterConfig, PageSize, SortConfig, SortDirection, compare_number, compare_text,
};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    #[default]
    Text,
    Number,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SortFieldConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: SortKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardConfigFile {
    pub title: String,
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub cluster_field: Option<String>,
    #[serde(default)]
    pub status_field: Option<String>,
    #[serde(default)]
    pub sort_fields: Vec<SortFieldConfig>,
    /// Defaults to the first sort field
    #[serde(default)]
    pub default_sort: Option<String>,
    #[serde(default)]
    pub default_direction: SortDirection,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub storage_key: Option<String>,
}

impl CardConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read card config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid card config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("Failed to parse card config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(default_sort) = &self.default_sort {
            if !self.sort_fields.iter().any(|f| &f.name == default_sort) {
                bail!("default_sort '{}' is not one of the sort_fields", default_sort);
            }
        }
        Ok(())
    }

    /// Id used for the collapse registry and persisted state.
    pub fn card_id(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(&self.title)
    }

    pub fn default_sort(&self) -> &str {
        self.default_sort
            .as_deref()
            .or_else(|| self.sort_fields.first().map(|f| f.name.as_str()))
            .unwrap_or_default()
    }

    /// Fields worth showing per row: search fields, cluster, status, then sort fields.
    pub fn display_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        let candidates = self
            .search_fields
            .iter()
            .map(String::as_str)
            .chain(self.cluster_field.as_deref())
            .chain(self.status_field.as_deref())
            .chain(self.sort_fields.iter().map(|f| f.name.as_str()));
        for field in candidates {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    pub fn to_card_config(&self) -> CardDataConfig<Value> {
        let mut filter = FilterConfig::new();
        for name in &self.search_fields {
            filter = filter.search_field(Field::key(name.as_str()));
        }
        if let Some(cluster) = &self.cluster_field {
            filter = filter.cluster_field(Field::key(cluster.as_str()));
        }
        if let Some(status) = &self.status_field {
            filter = filter.status_field(Field::key(status.as_str()));
        }
        if let Some(key) = &self.storage_key {
            filter = filter.storage_key(key.as_str());
        }

        let mut sort = SortConfig::new(self.default_sort(), self.default_direction);
        for field in &self.sort_fields {
            let label = field.label.clone().unwrap_or_else(|| field.name.clone());
            let accessor = Field::key(field.name.as_str());
            sort = match field.kind {
                SortKind::Text => sort.field(field.name.as_str(), label, compare_text(accessor)),
                SortKind::Number => sort.field(field.name.as_str(), label, compare_number(accessor)),
            };
        }

        CardDataConfig::new(filter, sort).page_size(self.page_size)
    }
}
