use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::models::{Category, NewCategory};
use crate::shared::pagination::PaginationQuery;

/// Which categories a query selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Active,
    /// Case-insensitive substring match on the name
    NameContains(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrder {
    CreatedAtDesc,
    NameAsc,
}

/// Rows to skip and take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub take: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    pub filter: CategoryFilter,
    pub order: CategoryOrder,
    pub window: Option<PageWindow>,
}

impl CategoryQuery {
    pub fn new(filter: CategoryFilter, order: CategoryOrder) -> Self {
        Self {
            filter,
            order,
            window: None,
        }
    }

    pub fn paginate(mut self, params: &PaginationQuery) -> Self {
        self.window = Some(PageWindow {
            skip: params.skip(),
            take: params.limit(),
        });
        self
    }
}

/// Persistence gateway for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn find(&self, query: &CategoryQuery) -> Result<Vec<Category>>;

    async fn count(&self, filter: &CategoryFilter) -> Result<i64>;

    async fn insert(&self, category: NewCategory) -> Result<Category>;

    /// Persist every mutable field of an existing category and bump `updated_at`
    async fn save(&self, category: &Category) -> Result<Category>;

    /// Hard delete; returns false when nothing matched
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
