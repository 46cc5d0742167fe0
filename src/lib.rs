pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod models;
pub mod render;
pub mod router;
pub mod session;
pub mod views;

pub use api::{ApiClient, ApiError, RealtyApi};
pub use app::App;
pub use catalog::{filter, Catalog, FilterCriteria};
pub use config::AppConfig;
pub use models::{BlogCategory, BlogPost, Property, PropertyStatus, PropertyType};
pub use router::{Router, View};
pub use session::Session;
