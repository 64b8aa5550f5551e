use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use super::{has_all_tags, matches_search, paginate, ListResult, Page};
use crate::errors::RepoError;
use crate::models::{NewPrompt, Prompt, PromptVisibility, UserRole};
use crate::store::JsonStore;

#[derive(Debug, Clone, Default)]
pub struct PromptFilter {
    pub category: Option<String>,
    pub visibility: Option<PromptVisibility>,
    pub access_level: Option<UserRole>,
    pub search: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSort {
    /// Most recently updated first.
    #[default]
    Recent,
    /// Highest usage count first.
    Popular,
    /// Highest success rate first.
    Success,
}

pub struct PromptRepository {
    store: Arc<JsonStore>,
}

impl PromptRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        filter: &PromptFilter,
        sort: PromptSort,
        page: Page,
    ) -> Result<ListResult<Prompt>, RepoError> {
        let prompts = self.store.load_prompts().await?;
        let mut filtered: Vec<Prompt> = prompts
            .into_iter()
            .filter(|p| Self::matches(p, filter))
            .collect();

        match sort {
            PromptSort::Popular => filtered.sort_by(|a, b| b.usage_count.cmp(&a.usage_count)),
            PromptSort::Success => filtered.sort_by(|a, b| {
                b.success_rate
                    .partial_cmp(&a.success_rate)
                    .unwrap_or(Ordering::Equal)
            }),
            PromptSort::Recent => filtered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }

        Ok(paginate(filtered, page))
    }

    fn matches(prompt: &Prompt, filter: &PromptFilter) -> bool {
        if let Some(category) = &filter.category {
            if &prompt.category != category {
                return false;
            }
        }
        if let Some(visibility) = filter.visibility {
            if prompt.visibility != visibility {
                return false;
            }
        }
        if let Some(role) = filter.access_level {
            if !prompt.access_level.contains(&role) {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            if !matches_search(search, &[&prompt.name, &prompt.content], &prompt.tags) {
                return false;
            }
        }
        if !filter.tags.is_empty() && !has_all_tags(&filter.tags, &prompt.tags) {
            return false;
        }
        true
    }

    pub async fn find_by_prompt_id(&self, prompt_id: &str) -> Result<Option<Prompt>, RepoError> {
        let prompts = self.store.load_prompts().await?;
        Ok(prompts.into_iter().find(|p| p.prompt_id == prompt_id))
    }

    pub async fn create(&self, input: NewPrompt) -> Result<Prompt, RepoError> {
        self.store
            .update_prompts(move |prompts| {
                if prompts.iter().any(|p| p.prompt_id == input.prompt_id) {
                    return Err(RepoError::Duplicate {
                        entity: "prompt",
                        id: input.prompt_id.clone(),
                    });
                }
                let prompt = Prompt::new(input);
                prompts.push(prompt.clone());
                Ok(prompt)
            })
            .await?
    }

    /// Record one use of a prompt and fold the outcome into its running
    /// success rate:
    ///
    /// ```text
    /// rate' = (rate * n + outcome) / (n + 1),  outcome in {0, 1}
    /// ```
    ///
    /// rounded to two decimals. Unknown ids are a silent no-op.
    pub async fn update_usage(&self, prompt_id: &str, success: bool) -> Result<(), RepoError> {
        let prompt_id = prompt_id.to_string();
        self.store
            .update_prompts(move |prompts| {
                let Some(prompt) = prompts.iter_mut().find(|p| p.prompt_id == prompt_id) else {
                    return;
                };
                let n = prompt.usage_count as f64;
                let hit = if success { 1.0 } else { 0.0 };
                let rate = (prompt.success_rate * n + hit) / (n + 1.0);
                prompt.usage_count += 1;
                prompt.success_rate = (rate * 100.0).round() / 100.0;
                prompt.updated_at = Utc::now();
            })
            .await?;
        Ok(())
    }
}
