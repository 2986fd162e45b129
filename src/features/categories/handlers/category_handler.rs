use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, ValidatedJson, ValidatedQuery};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, SearchCategoriesQuery, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::pagination::PaginationQuery;
use crate::shared::types::{ApiErrorResponse, ApiResponse};

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error", body = ApiErrorResponse),
        (status = 409, description = "Category name already exists", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let response = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List categories, newest first
///
/// Returns the paginated envelope when `page` or `limit` is given, the full list otherwise.
#[utoipa::path(
    get,
    path = "/categories",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Invalid pagination parameters", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    ValidatedQuery(params): ValidatedQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let response = if params.is_requested() {
        service.find_all_paginated(&params).await?
    } else {
        service.find_all().await?
    };
    Ok(Json(response))
}

/// Search categories by name (case-insensitive substring)
#[utoipa::path(
    get,
    path = "/categories/search",
    params(SearchCategoriesQuery),
    responses(
        (status = 200, description = "Matching categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Invalid query parameters", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn search_categories(
    State(service): State<Arc<CategoryService>>,
    ValidatedQuery(query): ValidatedQuery<SearchCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let response = service
        .search_by_name(&query.name, &query.pagination())
        .await?;
    Ok(Json(response))
}

/// List active categories ordered by name
#[utoipa::path(
    get,
    path = "/categories/active",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Active categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Invalid pagination parameters", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_active_categories(
    State(service): State<Arc<CategoryService>>,
    ValidatedQuery(params): ValidatedQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let response = if params.is_requested() {
        service.find_active_paginated(&params).await?
    } else {
        service.find_active().await?
    };
    Ok(Json(response))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Invalid ID", body = ApiErrorResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    Ok(Json(service.find_one(id).await?))
}

/// Update a category
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error", body = ApiErrorResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse),
        (status = 409, description = "Category name already exists", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    Ok(Json(service.update(id, dto).await?))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted; `data` is null"),
        (status = 404, description = "Category not found", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    Ok(Json(service.remove(id).await?))
}
