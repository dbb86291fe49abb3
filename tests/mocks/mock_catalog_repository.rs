use async_trait::async_trait;
use catalog_suggest::error::{CatalogError, CatalogResult};
use catalog_suggest::repositories::CatalogRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock catalog repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockCatalogRepository {
    names: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<CatalogError>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    pages: Arc<Mutex<Vec<(usize, usize)>>>,
}

#[allow(dead_code)]
impl MockCatalogRepository {
    pub fn new() -> Self {
        Self {
            names: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            pages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_names(names: &[&str]) -> Self {
        let repo = Self::new();
        repo.set_names(names);
        repo
    }

    pub fn set_names(&self, names: &[&str]) {
        let mut stored = self.names.lock().unwrap();
        *stored = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn add_name(&self, name: &str) {
        self.names.lock().unwrap().push(name.to_string());
    }

    /// Make every following call fail with `error` until cleared.
    pub fn fail_with(&self, error: CatalogError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// `(limit, offset)` of every page requested so far.
    pub fn requested_pages(&self) -> Vec<(usize, usize)> {
        self.pages.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn list_names(&self, limit: usize, offset: usize) -> CatalogResult<Vec<String>> {
        self.track_call("list_names");
        self.pages.lock().unwrap().push((limit, offset));

        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        let names = self.names.lock().unwrap();
        Ok(names.iter().skip(offset).take(limit).cloned().collect())
    }
}
