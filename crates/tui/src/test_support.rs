//! Fixtures shared by the unit tests in this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ratatui::buffer::Buffer;
use tokio::sync::oneshot;
use verdant_api::{NetworkError, ProductCatalog};
use verdant_types::{Product, ProductCollections, ReviewAggregate, SustainableProductEntry};

use crate::app::{App, SharedCtx};
use crate::ui::theme::NordTheme;

pub fn product(barcode: &str, name: &str) -> Product {
    Product {
        barcode: barcode.to_string(),
        name: name.to_string(),
        sustainability_score: None,
        quality_score: None,
        review_aggregate: None,
    }
}

pub fn popular(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            review_aggregate: Some(ReviewAggregate {
                sustainability_score: 5.0,
                quality_score: 6.0,
            }),
            ..product(&format!("pop-{i}"), &format!("Popular {i}"))
        })
        .collect()
}

pub fn sustainable_entries(count: usize) -> Vec<SustainableProductEntry> {
    (0..count)
        .map(|i| SustainableProductEntry {
            product: product(&format!("sus-{i}"), &format!("Sustainable {i}")),
            sustainability_score: 8.0,
            quality_score: 7.0,
        })
        .collect()
}

pub fn collections(popular_count: usize, sustainable_count: usize) -> ProductCollections {
    ProductCollections {
        popular: popular(popular_count),
        sustainable: sustainable_entries(sustainable_count).into_iter().map(Product::from).collect(),
    }
}

/// Catalog answering immediately with fixed lists, or a status error.
pub struct StaticCatalog {
    popular: usize,
    sustainable: usize,
    fail_with: Option<u16>,
}

impl StaticCatalog {
    pub fn new(popular: usize, sustainable: usize) -> Self {
        Self {
            popular,
            sustainable,
            fail_with: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            popular: 0,
            sustainable: 0,
            fail_with: Some(status),
        }
    }

    fn check(&self) -> Result<(), NetworkError> {
        match self.fail_with {
            Some(status) => Err(NetworkError::Status {
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductCatalog for StaticCatalog {
    async fn most_popular(&self) -> Result<Vec<Product>, NetworkError> {
        self.check()?;
        Ok(popular(self.popular))
    }

    async fn most_sustainable(&self) -> Result<Vec<SustainableProductEntry>, NetworkError> {
        self.check()?;
        Ok(sustainable_entries(self.sustainable))
    }
}

type Gate<T> = Mutex<Option<oneshot::Receiver<Result<T, NetworkError>>>>;

/// Catalog whose responses are released by the test through oneshot senders.
pub struct GatedCatalog {
    popular: Gate<Vec<Product>>,
    sustainable: Gate<Vec<SustainableProductEntry>>,
}

pub struct CatalogGates {
    pub popular: oneshot::Sender<Result<Vec<Product>, NetworkError>>,
    pub sustainable: oneshot::Sender<Result<Vec<SustainableProductEntry>, NetworkError>>,
}

impl GatedCatalog {
    pub fn new() -> (Self, CatalogGates) {
        let (popular_tx, popular_rx) = oneshot::channel();
        let (sustainable_tx, sustainable_rx) = oneshot::channel();
        let catalog = Self {
            popular: Mutex::new(Some(popular_rx)),
            sustainable: Mutex::new(Some(sustainable_rx)),
        };
        let gates = CatalogGates {
            popular: popular_tx,
            sustainable: sustainable_tx,
        };
        (catalog, gates)
    }
}

async fn wait_gate<T>(gate: &Gate<T>) -> Result<T, NetworkError> {
    let receiver = gate.lock().unwrap().take().expect("gate used once");
    receiver.await.expect("gate sender kept alive")
}

#[async_trait]
impl ProductCatalog for GatedCatalog {
    async fn most_popular(&self) -> Result<Vec<Product>, NetworkError> {
        wait_gate(&self.popular).await
    }

    async fn most_sustainable(&self) -> Result<Vec<SustainableProductEntry>, NetworkError> {
        wait_gate(&self.sustainable).await
    }
}

pub fn test_app_with(catalog: Arc<dyn ProductCatalog>) -> App {
    App::new(SharedCtx {
        theme: Box::new(NordTheme::new()),
        catalog,
    })
}

pub fn test_app() -> App {
    test_app_with(Arc::new(StaticCatalog::new(5, 3)))
}

/// Buffer contents as newline-separated rows.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
