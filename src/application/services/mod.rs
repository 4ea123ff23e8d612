//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, BadgeNotifier)
//! but are themselves concrete structs, not traits.

mod explorer;
mod taxonomy;

pub use explorer::{CareerExplorer, ClickOutcome, DetailView, EXPLORER_BADGE};
pub use taxonomy::{TaxonomyFormat, TaxonomyService};
