//! Product endpoints used by the home screen.

use async_trait::async_trait;
use tracing::debug;
use verdant_types::{Product, ProductCollections, SustainableProductEntry};

use crate::{NetworkError, VerdantClient};

pub const MOST_POPULAR_PATH: &str = "/products/most-popular";
pub const MOST_SUSTAINABLE_PATH: &str = "/products/most-sustainable";

/// Source of the two home-screen product lists.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Products ranked by popularity, in backend order.
    async fn most_popular(&self) -> Result<Vec<Product>, NetworkError>;

    /// Score-wrapped products ranked by sustainability, in backend order.
    async fn most_sustainable(&self) -> Result<Vec<SustainableProductEntry>, NetworkError>;
}

#[async_trait]
impl ProductCatalog for VerdantClient {
    async fn most_popular(&self) -> Result<Vec<Product>, NetworkError> {
        Ok(self.get(MOST_POPULAR_PATH).await?.data)
    }

    async fn most_sustainable(&self) -> Result<Vec<SustainableProductEntry>, NetworkError> {
        Ok(self.get(MOST_SUSTAINABLE_PATH).await?.data)
    }
}

/// Fetch both lists concurrently and join them.
///
/// Succeeds only when both requests succeed; the first failure is returned
/// and neither list is kept. Sustainable entries are flattened into
/// [`Product`] values before returning.
pub async fn fetch_home_collections<C>(catalog: &C) -> Result<ProductCollections, NetworkError>
where
    C: ProductCatalog + ?Sized,
{
    let (popular, sustainable) = tokio::try_join!(catalog.most_popular(), catalog.most_sustainable())?;
    debug!(popular = popular.len(), sustainable = sustainable.len(), "home collections fetched");

    Ok(ProductCollections {
        popular,
        sustainable: sustainable.into_iter().map(Product::from).collect(),
    })
}
