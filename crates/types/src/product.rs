//! Catalog entities returned by the backend.
//!
//! The two home-screen endpoints disagree on shape: `most-popular` returns
//! plain [`Product`] values while `most-sustainable` wraps each product with
//! its scores. [`SustainableProductEntry::into_product`] folds the wrapper
//! back into a [`Product`] so both lists render through the same item view.

use serde::{Deserialize, Serialize};

/// Aggregated review scores attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAggregate {
    pub sustainability_score: f64,
    pub quality_score: f64,
}

/// A catalog item. `barcode` is the primary key and must be unique within a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub barcode: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_aggregate: Option<ReviewAggregate>,
}

impl Product {
    /// Sustainability score preferring the review aggregate over the flat field.
    pub fn effective_sustainability_score(&self) -> Option<f64> {
        self.review_aggregate
            .map(|aggregate| aggregate.sustainability_score)
            .or(self.sustainability_score)
    }

    /// Quality score preferring the review aggregate over the flat field.
    pub fn effective_quality_score(&self) -> Option<f64> {
        self.review_aggregate.map(|aggregate| aggregate.quality_score).or(self.quality_score)
    }
}

/// Wire shape of a `most-sustainable` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainableProductEntry {
    pub product: Product,
    pub sustainability_score: f64,
    pub quality_score: f64,
}

impl SustainableProductEntry {
    /// Flatten the wrapper into a product whose `review_aggregate` carries the scores.
    ///
    /// Any aggregate already present on the nested product is replaced.
    pub fn into_product(self) -> Product {
        Product {
            review_aggregate: Some(ReviewAggregate {
                sustainability_score: self.sustainability_score,
                quality_score: self.quality_score,
            }),
            ..self.product
        }
    }
}

impl From<SustainableProductEntry> for Product {
    fn from(entry: SustainableProductEntry) -> Self {
        entry.into_product()
    }
}

/// Both home-screen lists, produced only when both requests succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCollections {
    pub popular: Vec<Product>,
    pub sustainable: Vec<Product>,
}

impl ProductCollections {
    pub fn is_empty(&self) -> bool {
        self.popular.is_empty() && self.sustainable.is_empty()
    }

    /// Look up a product by barcode in either list, popular first.
    pub fn find(&self, barcode: &str) -> Option<&Product> {
        self.popular
            .iter()
            .chain(self.sustainable.iter())
            .find(|product| product.barcode == barcode)
    }
}
