use crate::catalog::{PartCatalog, PartQuery};
use crate::domain::part::{Category, Part, PartId};
use anyhow::Context;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Read-through cache scoped to a single recommendation request.
///
/// Every part the request sees is interned by (category, id), so a part loaded once is the same
/// `Arc` everywhere in the request and a later lookup of that id never hits the catalog again.
/// Create one per request and drop it with the request.
pub struct PartCache<'a, C: ?Sized> {
    catalog: &'a C,
    parts: Mutex<HashMap<(Category, PartId), Arc<Part>>>,
}

impl<'a, C: PartCatalog + ?Sized> PartCache<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            parts: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `query` against the catalog and interns the results.
    pub async fn query(
        &self,
        category: Category,
        query: &PartQuery,
    ) -> anyhow::Result<Vec<Arc<Part>>> {
        let parts = self
            .catalog
            .query_parts(category, query)
            .await
            .with_context(|| format!("catalog query for {category} failed"))?;

        tracing::debug!(%category, results = parts.len(), "catalog query");
        Ok(parts.into_iter().map(|p| self.intern(p)).collect())
    }

    /// Returns the cached part, fetching it from the catalog on a miss.
    pub async fn get(&self, category: Category, id: PartId) -> anyhow::Result<Option<Arc<Part>>> {
        if let Some(hit) = self.lookup(category, id) {
            return Ok(Some(hit));
        }

        let fetched = self
            .catalog
            .get_part(category, id)
            .await
            .with_context(|| format!("catalog lookup for {category} #{id} failed"))?;
        Ok(fetched.map(|p| self.intern(p)))
    }

    /// Seeds the cache with an already-resolved part.
    pub fn insert(&self, part: Arc<Part>) -> Arc<Part> {
        let mut map = self.parts.lock().unwrap_or_else(|e| e.into_inner());
        map.entry((part.category(), part.id)).or_insert(part).clone()
    }

    pub fn len(&self) -> usize {
        self.parts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, category: Category, id: PartId) -> Option<Arc<Part>> {
        self.parts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(category, id))
            .cloned()
    }

    fn intern(&self, part: Part) -> Arc<Part> {
        let mut map = self.parts.lock().unwrap_or_else(|e| e.into_inner());
        map.entry((part.category(), part.id))
            .or_insert_with(|| Arc::new(part))
            .clone()
    }
}
