//! Mock catalog implementation for testing.
//!
//! Provides [`MockCatalog`] for unit testing without a catalog export.

use crate::catalog::{CatalogError, CatalogReader, Category, Product};

/// In-memory catalog for testing.
///
/// Items are returned exactly as added, in insertion order, with no
/// active/enabled filtering.
///
/// # Example
///
/// ```ignore
/// use storemap_catalog::{CatalogReader, Category, MockCatalog, Product};
///
/// let catalog = MockCatalog::new()
///     .with_category(Category::new(7, "shoes", "men/shoes"))
///     .with_product(Product::new(1, "ABC", "shoe"));
///
/// assert_eq!(catalog.active_products().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    failure: Option<String>,
}

impl MockCatalog {
    /// Create an empty mock catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Add a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Make every read fail with [`CatalogError::Unavailable`].
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check_failure(&self) -> Result<(), CatalogError> {
        match &self.failure {
            Some(message) => Err(CatalogError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl CatalogReader for MockCatalog {
    fn active_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.check_failure()?;
        Ok(self.products.clone())
    }

    fn active_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.check_failure()?;
        Ok(self.categories.clone())
    }
}
