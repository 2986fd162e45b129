use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, NewCategory};
use crate::features::categories::repositories::{
    CategoryFilter, CategoryOrder, CategoryQuery, CategoryRepository,
};

const COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(operation: &str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code().as_deref() == Some("23505") {
            return AppError::Conflict("Category with this name already exists".to_string());
        }
    }

    if matches!(e, sqlx::Error::RowNotFound) {
        return AppError::NotFound("Category not found".to_string());
    }

    tracing::error!("Failed to {}: {:?}", operation, e);
    AppError::Database(e)
}

/// Escape LIKE wildcards so the term matches literally
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn where_clause(filter: &CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "",
        CategoryFilter::Active => "WHERE is_active = TRUE",
        CategoryFilter::NameContains(_) => "WHERE name ILIKE $1 ESCAPE '\\'",
    }
}

fn order_clause(order: CategoryOrder) -> &'static str {
    match order {
        CategoryOrder::CreatedAtDesc => "ORDER BY created_at DESC, id",
        CategoryOrder::NameAsc => "ORDER BY name ASC, id",
    }
}

/// Postgres-backed category store
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE id = $1", COLUMNS);
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error("get category by id", e))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE name = $1", COLUMNS);
        sqlx::query_as::<_, Category>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error("get category by name", e))
    }

    async fn find(&self, query: &CategoryQuery) -> Result<Vec<Category>> {
        let mut sql = format!(
            "SELECT {} FROM categories {} {}",
            COLUMNS,
            where_clause(&query.filter),
            order_clause(query.order)
        );

        // Placeholder numbering continues after the filter's own parameter
        let first_param = match query.filter {
            CategoryFilter::NameContains(_) => 2,
            _ => 1,
        };
        if query.window.is_some() {
            sql.push_str(&format!(
                " LIMIT ${} OFFSET ${}",
                first_param,
                first_param + 1
            ));
        }

        let mut q = sqlx::query_as::<_, Category>(&sql);
        if let CategoryFilter::NameContains(term) = &query.filter {
            q = q.bind(like_pattern(term));
        }
        if let Some(window) = query.window {
            q = q.bind(window.take).bind(window.skip);
        }

        q.fetch_all(&self.pool)
            .await
            .map_err(|e| handle_db_error("list categories", e))
    }

    async fn count(&self, filter: &CategoryFilter) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM categories {}", where_clause(filter));

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let CategoryFilter::NameContains(term) = filter {
            q = q.bind(like_pattern(term));
        }

        q.fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error("count categories", e))
    }

    async fn insert(&self, category: NewCategory) -> Result<Category> {
        let sql = format!(
            r#"
            INSERT INTO categories (name, description, is_active)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(category.name)
            .bind(category.description)
            .bind(category.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error("create category", e))
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let sql = format!(
            r#"
            UPDATE categories
            SET name = $1,
                description = $2,
                is_active = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(&category.name)
            .bind(&category.description)
            .bind(category.is_active)
            .bind(category.id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error("update category", e))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_db_error("delete category", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct FakeDbError {
        code: &'static str,
        message: &'static str,
    }

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.code == "23505" {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    fn db_error(code: &'static str, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { code, message }))
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err = handle_db_error(
            "create category",
            db_error(
                "23505",
                "duplicate key value violates unique constraint \"categories_name_unique\"",
            ),
        );
        match err {
            AppError::Conflict(message) => {
                assert_eq!(message, "Category with this name already exists")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_database_errors_stay_internal() {
        assert!(matches!(
            handle_db_error("create category", db_error("23502", "null value in column")),
            AppError::Database(_)
        ));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("elect"), "%elect%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_where_clause_per_filter() {
        assert_eq!(where_clause(&CategoryFilter::All), "");
        assert!(where_clause(&CategoryFilter::Active).contains("is_active = TRUE"));
        assert!(where_clause(&CategoryFilter::NameContains("x".into())).contains("ILIKE $1"));
    }

    #[test]
    fn test_order_clause() {
        assert!(order_clause(CategoryOrder::CreatedAtDesc).starts_with("ORDER BY created_at DESC"));
        assert!(order_clause(CategoryOrder::NameAsc).starts_with("ORDER BY name ASC"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            handle_db_error("update category", sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            handle_db_error("list categories", sqlx::Error::PoolTimedOut),
            AppError::Database(_)
        ));
    }
}
