use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, NewCategory};
use crate::features::categories::repositories::{
    CategoryFilter, CategoryOrder, CategoryQuery, CategoryRepository,
};

/// Vec-backed store used by the service and HTTP tests
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    rows: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(filter: &CategoryFilter, category: &Category) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Active => category.is_active,
            CategoryFilter::NameContains(term) => category
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.name == name).cloned())
    }

    async fn find(&self, query: &CategoryQuery) -> Result<Vec<Category>> {
        let rows = self.rows.read().await;

        // Newest insert first so equal timestamps still sort newest-first
        let mut selected: Vec<Category> = rows
            .iter()
            .rev()
            .filter(|c| Self::matches(&query.filter, c))
            .cloned()
            .collect();

        match query.order {
            CategoryOrder::CreatedAtDesc => {
                selected.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
            CategoryOrder::NameAsc => selected.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        Ok(match query.window {
            Some(window) => selected
                .into_iter()
                .skip(window.skip.max(0) as usize)
                .take(window.take.max(0) as usize)
                .collect(),
            None => selected,
        })
    }

    async fn count(&self, filter: &CategoryFilter) -> Result<i64> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|c| Self::matches(filter, c)).count() as i64)
    }

    async fn insert(&self, category: NewCategory) -> Result<Category> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|c| c.name == category.name) {
            return Err(AppError::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let created = Category {
            id: Uuid::new_v4(),
            name: category.name,
            description: category.description,
            is_active: category.is_active,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(AppError::Conflict(
                "Category with this name already exists".to_string(),
            ));
        }

        let row = rows
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        row.name = category.name.clone();
        row.description = category.description.clone();
        row.is_active = category.is_active;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}
