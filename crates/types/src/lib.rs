//! Shared types for the Verdant workspace.
//!
//! Holds the catalog model consumed by the API client and the message/effect
//! vocabulary the TUI components use to talk to the runtime.

mod product;

pub use product::{Product, ProductCollections, ReviewAggregate, SustainableProductEntry};

/// Messages delivered to components by the runtime.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Terminal was resized
    Resize(u16, u16),
    /// A home-screen fetch finished. `result` carries a display-ready error
    /// message on failure.
    ProductsFetched {
        generation: u64,
        result: Result<ProductCollections, String>,
    },
    /// A home-screen fetch was cancelled before completing
    ProductsFetchCancelled { generation: u64 },
}

/// Side effects requested by components and executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch both home-screen product lists
    FetchProducts,
    // Change the main view
    SwitchTo(Route),
    // Display a modal view
    ShowModal(Modal),
    // Hide any open modals
    CloseModal,
    /// Leave the application
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Scan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Product detail overlay keyed by barcode
    Product(String),
}

/// Result of a spawned command.
#[derive(Debug, Clone)]
pub enum ExecOutcome {
    Products {
        generation: u64,
        result: Result<ProductCollections, String>,
    },
    Cancelled {
        generation: u64,
    },
    Log(String),
}

impl ExecOutcome {
    /// Convert a finished command into the message components consume.
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            ExecOutcome::Products { generation, result } => Some(Msg::ProductsFetched { generation, result }),
            ExecOutcome::Cancelled { generation } => Some(Msg::ProductsFetchCancelled { generation }),
            ExecOutcome::Log(_) => None,
        }
    }
}
