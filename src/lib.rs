//! advocacy-cms: public site and content dashboard for an inclusive-advocacy
//! organisation.
//!
//! Page content (hero banner, stat cards, impact metrics, focus areas,
//! testimonials) lives in a content store. The public site reads all five
//! collections concurrently and renders them; the dashboard edits the same
//! records and writes them back one row at a time.
//!
//! - [`store`]: content store seam plus in-memory and PostgREST backends
//! - [`aggregate`]: concurrent load with per-section degradation
//! - [`render`]: projection into page view models and HTML
//! - [`editor`]: pure field edits and batch saves with aggregated outcome
//! - [`dashboard`]: overview, campaign, community and analytics pages
//! - [`server`]: axum router

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod logging;
pub mod model;
pub mod render;
pub mod server;
pub mod store;

pub use aggregate::{load_content, AggregatedContent, LoadError};
pub use config::Config;
pub use editor::{ContentDraft, Notification, SaveReport, SaveStatus};
pub use store::{ContentStore, MemoryStore, RestStore};
