use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use super::{has_all_tags, matches_search, paginate, ListResult, Page};
use crate::errors::RepoError;
use crate::models::{Module, ModuleCategory, NewModule, UserRole};
use crate::store::JsonStore;

#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    pub category: Option<ModuleCategory>,
    pub enabled: Option<bool>,
    pub visibility: Option<UserRole>,
    pub search: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSort {
    /// Most recently updated first.
    #[default]
    Recent,
    /// Highest usage count first.
    Popular,
    /// Highest rating first.
    Rating,
}

pub struct ModuleRepository {
    store: Arc<JsonStore>,
}

impl ModuleRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        filter: &ModuleFilter,
        sort: ModuleSort,
        page: Page,
    ) -> Result<ListResult<Module>, RepoError> {
        let modules = self.store.load_modules().await?;
        let mut filtered: Vec<Module> = modules
            .into_iter()
            .filter(|m| Self::matches(m, filter))
            .collect();

        match sort {
            ModuleSort::Popular => filtered.sort_by(|a, b| b.usage_count.cmp(&a.usage_count)),
            ModuleSort::Rating => filtered.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
            }),
            ModuleSort::Recent => filtered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }

        Ok(paginate(filtered, page))
    }

    fn matches(module: &Module, filter: &ModuleFilter) -> bool {
        if let Some(category) = filter.category {
            if module.category != category {
                return false;
            }
        }
        if let Some(enabled) = filter.enabled {
            if module.enabled != enabled {
                return false;
            }
        }
        if let Some(role) = filter.visibility {
            if !module.visibility.contains(&role) {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            if !matches_search(search, &[&module.name, &module.description], &module.tags) {
                return false;
            }
        }
        if !filter.tags.is_empty() && !has_all_tags(&filter.tags, &module.tags) {
            return false;
        }
        true
    }

    pub async fn find_by_module_id(&self, module_id: &str) -> Result<Option<Module>, RepoError> {
        let modules = self.store.load_modules().await?;
        Ok(modules.into_iter().find(|m| m.module_id == module_id))
    }

    pub async fn create(&self, input: NewModule) -> Result<Module, RepoError> {
        self.store
            .update_modules(move |modules| {
                if modules.iter().any(|m| m.module_id == input.module_id) {
                    return Err(RepoError::Duplicate {
                        entity: "module",
                        id: input.module_id.clone(),
                    });
                }
                let module = Module::new(input);
                modules.push(module.clone());
                Ok(module)
            })
            .await?
    }

    /// Replace mutable fields of an existing module and bump `updated_at`.
    pub async fn update(&self, module_id: &str, input: NewModule) -> Result<Module, RepoError> {
        let module_id = module_id.to_string();
        self.store
            .update_modules(move |modules| {
                let Some(existing) = modules.iter_mut().find(|m| m.module_id == module_id) else {
                    return Err(RepoError::NotFound {
                        entity: "module",
                        id: module_id.clone(),
                    });
                };
                let mut updated = Module::new(input);
                updated.id = existing.id.clone();
                updated.module_id = existing.module_id.clone();
                updated.created_at = existing.created_at;
                updated.updated_at = Utc::now();
                *existing = updated.clone();
                Ok(updated)
            })
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostTier;

    fn repo() -> (tempfile::TempDir, ModuleRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = ModuleRepository::new(Arc::new(JsonStore::new(dir.path())));
        (dir, repo)
    }

    fn new_module(module_id: &str, category: ModuleCategory) -> NewModule {
        NewModule {
            module_id: module_id.into(),
            name: format!("{module_id} name"),
            version: "1.0.0".into(),
            description: format!("{module_id} description"),
            category,
            enabled: true,
            tags: vec!["tag-a".into()],
            capabilities: vec![],
            parameters: vec![],
            models: vec![],
            visibility: vec![UserRole::Admin, UserRole::Editor, UserRole::User],
            provider: "Test Studio".into(),
            cost_tier: CostTier::Standard,
            rating: 4.0,
            usage_count: 10,
        }
    }

    #[tokio::test]
    async fn filters_by_category_and_search() {
        let (_dir, repo) = repo();
        repo.create(new_module("colorize", ModuleCategory::Creative)).await.unwrap();
        repo.create(new_module("cleanup", ModuleCategory::Repair)).await.unwrap();

        let filter = ModuleFilter {
            category: Some(ModuleCategory::Repair),
            ..Default::default()
        };
        let result = repo.list(&filter, ModuleSort::Recent, Page::default()).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].module_id, "cleanup");

        let filter = ModuleFilter {
            search: Some("COLORIZE".into()),
            ..Default::default()
        };
        let result = repo.list(&filter, ModuleSort::Recent, Page::default()).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].module_id, "colorize");
    }

    #[tokio::test]
    async fn popular_sort_orders_by_usage() {
        let (_dir, repo) = repo();
        let mut hot = new_module("hot", ModuleCategory::Style);
        hot.usage_count = 500;
        let mut cold = new_module("cold", ModuleCategory::Style);
        cold.usage_count = 5;
        repo.create(cold).await.unwrap();
        repo.create(hot).await.unwrap();

        let result = repo
            .list(&ModuleFilter::default(), ModuleSort::Popular, Page::default())
            .await
            .unwrap();
        assert_eq!(result.items[0].module_id, "hot");
    }

    #[tokio::test]
    async fn duplicate_module_id_is_rejected() {
        let (_dir, repo) = repo();
        repo.create(new_module("one", ModuleCategory::Repair)).await.unwrap();
        let err = repo.create(new_module("one", ModuleCategory::Repair)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate { entity: "module", .. }));
    }

    #[tokio::test]
    async fn update_preserves_identity_and_created_at() {
        let (_dir, repo) = repo();
        let created = repo.create(new_module("evolving", ModuleCategory::Repair)).await.unwrap();

        let mut changes = new_module("evolving", ModuleCategory::Repair);
        changes.description = "better description".into();
        let updated = repo.update("evolving", changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.description, "better description");
        assert!(updated.updated_at >= created.updated_at);
    }
}
