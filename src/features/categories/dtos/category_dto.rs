use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, NewCategory};
use crate::shared::pagination::PaginationQuery;

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    /// Unique category name
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[schema(example = "Electronics", max_length = 100)]
    pub name: String,

    #[validate(length(max = 500, message = "description must not exceed 500 characters"))]
    #[schema(example = "Electronic devices and components", max_length = 500)]
    pub description: Option<String>,

    /// Defaults to true
    pub is_active: Option<bool>,
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            is_active: dto.is_active.unwrap_or(true),
        }
    }
}

/// Request DTO for a partial update. Absent fields are left untouched;
/// `description: null` clears the description.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_present")]
    #[validate(length(max = 500, message = "description must not exceed 500 characters"))]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    pub is_active: Option<bool>,
}

/// Distinguishes an explicit `null` from a missing field
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateCategoryDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_active.is_none()
    }

    /// Shallow overwrite of the present fields
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(description) = self.description {
            category.description = description;
        }
        if let Some(is_active) = self.is_active {
            category.is_active = is_active;
        }
    }
}

/// Query params for searching categories by name
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchCategoriesQuery {
    /// Case-insensitive substring of the category name
    pub name: String,

    /// Page number (1-indexed, default: 1)
    #[validate(range(min = 1, message = "page must not be less than 1"))]
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Number of items per page (default: 10, max: 100)
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

impl SearchCategoriesQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_category() -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: "Tools".to_string(),
            description: Some("Warehouse tools".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_dto_defaults_to_active() {
        let dto: CreateCategoryDto = serde_json::from_value(json!({ "name": "Tools" })).unwrap();
        let new_category = NewCategory::from(dto);
        assert!(new_category.is_active);
        assert_eq!(new_category.description, None);
    }

    #[test]
    fn test_create_dto_validation() {
        let valid: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "Tools", "isActive": false })).unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(valid.is_active, Some(false));

        let empty_name: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(empty_name.validate().is_err());

        let long_name: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "x".repeat(101) })).unwrap();
        assert!(long_name.validate().is_err());

        let long_description: CreateCategoryDto = serde_json::from_value(
            json!({ "name": "Tools", "description": "d".repeat(501) }),
        )
        .unwrap();
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_create_dto_requires_name() {
        let result = serde_json::from_value::<CreateCategoryDto>(json!({ "description": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_dto_distinguishes_null_from_missing() {
        let missing: UpdateCategoryDto = serde_json::from_value(json!({})).unwrap();
        assert!(missing.is_empty());
        assert_eq!(missing.description, None);

        let cleared: UpdateCategoryDto =
            serde_json::from_value(json!({ "description": null })).unwrap();
        assert!(!cleared.is_empty());
        assert_eq!(cleared.description, Some(None));
    }

    #[test]
    fn test_update_dto_apply_overwrites_present_fields_only() {
        let mut category = sample_category();
        let dto: UpdateCategoryDto =
            serde_json::from_value(json!({ "isActive": false })).unwrap();
        dto.apply_to(&mut category);

        assert!(!category.is_active);
        assert_eq!(category.name, "Tools");
        assert_eq!(category.description.as_deref(), Some("Warehouse tools"));

        let dto: UpdateCategoryDto =
            serde_json::from_value(json!({ "name": "Hand Tools", "description": null })).unwrap();
        dto.apply_to(&mut category);
        assert_eq!(category.name, "Hand Tools");
        assert_eq!(category.description, None);
    }

    #[test]
    fn test_update_dto_validation() {
        let dto: UpdateCategoryDto = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateCategoryDto =
            serde_json::from_value(json!({ "description": "d".repeat(501) })).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_response_dto_is_camel_case() {
        let value = serde_json::to_value(CategoryResponseDto::from(sample_category())).unwrap();
        assert_eq!(value["isActive"], true);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("is_active").is_none());
    }
}
