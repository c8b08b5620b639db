//! List Categories Use Case

use crate::domain::entities::Category;
use crate::domain::repository::CategoryRepository;
use crate::error::CatalogResult;
use std::sync::Arc;

/// List Categories Use Case
pub struct ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Category>> {
        self.repo.list_categories().await
    }
}
