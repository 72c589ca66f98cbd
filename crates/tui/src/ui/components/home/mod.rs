mod home_component;
pub mod state;

pub use home_component::{HomeComponent, POPULAR_ACCENT};
pub use state::{FetchTicket, HomeSection, HomeState, LoadPhase};
