use crate::core::error::Result;
use crate::features::categories::models::NewCategory;
use crate::features::categories::repositories::CategoryRepository;

/// Default warehouse categories as (name, description)
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    (
        "Beverages",
        "Drinks and liquids including sodas, juices, and water",
    ),
    ("Food", "Perishable and non-perishable food items"),
    ("Tools", "Warehouse and utility tools for operations"),
    ("Electronics", "Electronic devices and components"),
    ("Cleaning Supplies", "Cleaning and maintenance products"),
    ("Furniture", "Home and office furniture items"),
    ("Toys", "Childrens toys and games"),
    ("Books", "Various genres of books and literature"),
    ("Clothing", "Apparel and accessories for all ages"),
    ("Sports Equipment", "Gear and equipment for various sports"),
    (
        "Gardening",
        "Tools and supplies for gardening and landscaping",
    ),
    ("Health & Beauty", "Personal care products and cosmetics"),
    ("Automotive", "Car parts and accessories"),
    ("Stationery", "Office supplies and stationery items"),
    (
        "Pet Supplies",
        "Products for pets including food and accessories",
    ),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub existing: usize,
}

impl SeedSummary {
    pub fn processed(&self) -> usize {
        self.created + self.existing
    }
}

/// Insert every default category whose name is not taken yet
pub async fn seed_default_categories(repository: &dyn CategoryRepository) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for (name, description) in DEFAULT_CATEGORIES {
        if repository.find_by_name(name).await?.is_some() {
            tracing::info!("Category already exists: {}", name);
            summary.existing += 1;
            continue;
        }

        repository
            .insert(NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
                is_active: true,
            })
            .await?;
        tracing::info!("Seeded category: {}", name);
        summary.created += 1;
    }

    tracing::info!(
        "Seeding summary: created={}, already_existed={}, processed={}",
        summary.created,
        summary.existing,
        summary.processed()
    );

    Ok(summary)
}
