use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::repositories::{
    CategoryFilter, CategoryOrder, CategoryQuery, CategoryRepository,
};
use crate::shared::pagination::{calculate_pagination, PaginationInfo, PaginationQuery};
use crate::shared::types::ApiResponse;

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Category with ID '{}' not found", id))
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("Category with name '{}' already exists", name))
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Create a category; names must be unique
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<ApiResponse<CategoryResponseDto>> {
        if self.repository.find_by_name(&dto.name).await?.is_some() {
            return Err(name_taken(&dto.name));
        }

        let category = self.repository.insert(dto.into()).await?;
        tracing::info!(category_id = %category.id, "Category created");

        Ok(ApiResponse::created(
            category.into(),
            "Category created successfully",
        ))
    }

    /// All categories, newest first
    pub async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponseDto>>> {
        let categories = self
            .list(CategoryQuery::new(CategoryFilter::All, CategoryOrder::CreatedAtDesc))
            .await?;
        let message = format!("Found {} categories", categories.len());

        Ok(ApiResponse::success(categories, Some(message), None))
    }

    pub async fn find_all_paginated(
        &self,
        params: &PaginationQuery,
    ) -> Result<ApiResponse<Vec<CategoryResponseDto>>> {
        let (categories, pagination) = self
            .page(
                CategoryQuery::new(CategoryFilter::All, CategoryOrder::CreatedAtDesc),
                params,
            )
            .await?;
        let message = format!(
            "Found {} categories (page {} of {})",
            categories.len(),
            pagination.page,
            pagination.total_pages
        );

        Ok(ApiResponse::paginated(categories, pagination, Some(message)))
    }

    /// Active categories ordered by name
    pub async fn find_active(&self) -> Result<ApiResponse<Vec<CategoryResponseDto>>> {
        let categories = self
            .list(CategoryQuery::new(CategoryFilter::Active, CategoryOrder::NameAsc))
            .await?;
        let message = format!("Found {} active categories", categories.len());

        Ok(ApiResponse::success(categories, Some(message), None))
    }

    pub async fn find_active_paginated(
        &self,
        params: &PaginationQuery,
    ) -> Result<ApiResponse<Vec<CategoryResponseDto>>> {
        let (categories, pagination) = self
            .page(
                CategoryQuery::new(CategoryFilter::Active, CategoryOrder::NameAsc),
                params,
            )
            .await?;
        let message = format!(
            "Found {} active categories (page {} of {})",
            categories.len(),
            pagination.page,
            pagination.total_pages
        );

        Ok(ApiResponse::paginated(categories, pagination, Some(message)))
    }

    /// Case-insensitive substring search on the name, ordered by name
    pub async fn search_by_name(
        &self,
        name: &str,
        params: &PaginationQuery,
    ) -> Result<ApiResponse<Vec<CategoryResponseDto>>> {
        let (categories, pagination) = self
            .page(
                CategoryQuery::new(
                    CategoryFilter::NameContains(name.to_string()),
                    CategoryOrder::NameAsc,
                ),
                params,
            )
            .await?;
        let message = format!(
            "Found {} categories matching \"{}\"",
            categories.len(),
            name
        );

        Ok(ApiResponse::paginated(categories, pagination, Some(message)))
    }

    pub async fn find_one(&self, id: Uuid) -> Result<ApiResponse<CategoryResponseDto>> {
        let category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(ApiResponse::success(
            category.into(),
            Some("Category found successfully".to_string()),
            None,
        ))
    }

    /// Apply a partial update. The name check only runs when the name actually changes.
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<ApiResponse<CategoryResponseDto>> {
        let mut category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = dto.name.as_deref() {
            if name != category.name && self.repository.find_by_name(name).await?.is_some() {
                return Err(name_taken(name));
            }
        }

        let category = if dto.is_empty() {
            category
        } else {
            dto.apply_to(&mut category);
            self.repository.save(&category).await?
        };
        tracing::info!(category_id = %category.id, "Category updated");

        Ok(ApiResponse::updated(
            category.into(),
            "Category updated successfully",
        ))
    }

    /// Hard delete
    pub async fn remove(&self, id: Uuid) -> Result<ApiResponse<()>> {
        let category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !self.repository.delete(category.id).await? {
            // Removed by a concurrent request between the lookup and the delete
            return Err(not_found(id));
        }
        tracing::info!(category_id = %id, "Category deleted");

        Ok(ApiResponse::deleted("Category deleted successfully"))
    }

    async fn list(&self, query: CategoryQuery) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.repository.find(&query).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    async fn page(
        &self,
        query: CategoryQuery,
        params: &PaginationQuery,
    ) -> Result<(Vec<CategoryResponseDto>, PaginationInfo)> {
        let total = self.repository.count(&query.filter).await?;
        let categories = self.list(query.paginate(params)).await?;
        let pagination = calculate_pagination(total, params.page(), params.limit());

        Ok((categories, pagination))
    }
}
