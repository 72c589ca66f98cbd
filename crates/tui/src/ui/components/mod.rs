//! UI components: home screen, product overlay, scan view and the shared
//! text primitive.

pub mod component;
pub mod home;
pub mod product_item;
pub mod product_modal;
pub mod scan;
pub mod typography;

pub use component::*;
pub use home::HomeComponent;
pub use product_item::ProductItem;
pub use product_modal::ProductModalComponent;
pub use scan::ScanComponent;
pub use typography::{TextVariant, ThemedText, resolve_text_color};
