use std::sync::Arc;

use axum_test::TestServer;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::router::create_router;
use crate::features::categories::repositories::InMemoryCategoryRepository;
use crate::features::categories::CategoryService;

pub fn create_category_service() -> Arc<CategoryService> {
    Arc::new(CategoryService::new(Arc::new(
        InMemoryCategoryRepository::new(),
    )))
}

/// Full application router over an in-memory store
pub fn create_test_server() -> TestServer {
    create_test_server_with_config(&AppConfig::default())
}

pub fn create_test_server_with_config(app_config: &AppConfig) -> TestServer {
    let swagger = SwaggerConfig {
        title: "Warehouse API".to_string(),
        version: "test".to_string(),
        description: "test".to_string(),
    };
    let app = create_router(create_category_service(), app_config, &swagger);
    TestServer::new(app).expect("Failed to create test server")
}
