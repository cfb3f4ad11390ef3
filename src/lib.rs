// ============================================================================
// VAPE LIFE STOREFRONT - CLIENTE HEADLESS (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - ViewModels: Estado + lógica de presentación (catálogo, admin)
// - Services: SOLO comunicación API (api_client, auth_service)
// - Stores: Persistencia clave-valor de la sesión (inyectable)
// - State: Estados renderizables (loading / error / success)
// - Models: Estructuras compartidas con el backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

pub use config::{AppConfig, CONFIG};
pub use models::{Category, EntityType, ImageMetadata, Product, User};
pub use services::api_client::{ApiClient, ApiError};
pub use services::auth_service::{AuthService, AuthStatus};
pub use state::view_state::ViewState;
pub use stores::session_store::{FileStore, MemoryStore, SessionStore};
pub use viewmodels::admin::AdminViewModel;
pub use viewmodels::catalog::{CatalogViewModel, FilterState, SortKey};
