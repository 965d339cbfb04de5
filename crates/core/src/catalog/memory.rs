use crate::catalog::{PartCatalog, PartQuery};
use crate::domain::part::{Category, Part, PartId};
use anyhow::Context;
use std::cmp::Ordering;
use std::path::Path;

/// Catalog held entirely in memory, loaded from a JSON array of parts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    parts: Vec<Part>,
}

impl InMemoryCatalog {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let parts = serde_json::from_str::<Vec<Part>>(text)
            .context("catalog is not a valid JSON array of parts")?;
        Ok(Self::new(parts))
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to load catalog {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn run(&self, category: Category, query: &PartQuery) -> Vec<Part> {
        let mut matched: Vec<&Part> = self
            .parts
            .iter()
            .filter(|p| p.category() == category && query.matches(p))
            .collect();

        // Stable: equal keys keep catalog order.
        matched.sort_by(|a, b| {
            let ka = query.order.sort_key(a);
            let kb = query.order.sort_key(b);
            let ord = ka.partial_cmp(&kb).unwrap_or(Ordering::Equal);
            if query.descending {
                ord.reverse()
            } else {
                ord
            }
        });

        matched.into_iter().take(query.limit).cloned().collect()
    }
}

#[async_trait::async_trait]
impl PartCatalog for InMemoryCatalog {
    async fn query_parts(
        &self,
        category: Category,
        query: &PartQuery,
    ) -> anyhow::Result<Vec<Part>> {
        Ok(self.run(category, query))
    }

    async fn get_part(&self, category: Category, id: PartId) -> anyhow::Result<Option<Part>> {
        Ok(self
            .parts
            .iter()
            .find(|p| p.id == id && p.category() == category)
            .cloned())
    }
}
