pub mod category_repository;
#[cfg(test)]
pub mod in_memory_category_repository;
pub mod pg_category_repository;

pub use category_repository::{
    CategoryFilter, CategoryOrder, CategoryQuery, CategoryRepository,
};
#[cfg(test)]
pub use in_memory_category_repository::InMemoryCategoryRepository;
pub use pg_category_repository::PgCategoryRepository;
