// ============================================================================
// ADMIN VIEWMODEL - Dashboard y tabla de productos del backoffice
// ============================================================================
// Estadísticas derivadas del catálogo cargado más el filtro de la tabla
// (búsqueda + una sola categoría). El borrado elimina el producto de la
// lista local tras confirmar el backend.
// ============================================================================

use std::collections::HashSet;

use crate::models::Product;
use crate::services::api_client::{ApiClient, ApiError};
use crate::state::view_state::ViewState;
use crate::utils::constants::RECENT_PRODUCT_DAYS;

/// Estadísticas del dashboard, derivadas del catálogo en memoria
#[derive(Clone, PartialEq, Debug)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_categories: usize,
    pub recent_products: usize,
    pub average_price: f64,
}

/// ViewModel del backoffice - tabla de productos + stats
pub struct AdminViewModel {
    state: ViewState<Vec<Product>>,
    search: String,
    // None = "todas las categorías"
    selected_category: Option<String>,
}

impl AdminViewModel {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            search: String::new(),
            selected_category: None,
        }
    }

    /// Cargar el listado completo de productos
    pub async fn load(&mut self, api: &ApiClient) {
        self.state = ViewState::Loading;
        match api.list_products().await {
            Ok(products) => {
                self.state = ViewState::Ready(products);
            }
            Err(e) => {
                log::error!("❌ Error cargando productos del admin: {}", e);
                self.state = ViewState::Failed(e.to_string());
            }
        }
    }

    /// Inyectar productos directamente (tests y fixtures)
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.state = ViewState::Ready(products);
    }

    pub fn state(&self) -> &ViewState<Vec<Product>> {
        &self.state
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Filtro de categoría única de la tabla; `None` = todas
    pub fn set_category(&mut self, category: Option<&str>) {
        self.selected_category = category.map(|c| c.to_string());
    }

    /// Estadísticas del dashboard sobre el catálogo cargado
    pub fn stats(&self) -> DashboardStats {
        let products = self.state.value().map(Vec::as_slice).unwrap_or_default();

        let total_products = products.len();
        let total_categories = products
            .iter()
            .filter_map(|p| p.category.as_deref())
            .collect::<HashSet<_>>()
            .len();

        let week_ago_ms = chrono::Utc::now().timestamp_millis()
            - RECENT_PRODUCT_DAYS * 24 * 60 * 60 * 1000;
        let recent_products = products
            .iter()
            .filter(|p| p.created_at_ms() > week_ago_ms)
            .count();

        let average_price = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.price).sum::<f64>() / products.len() as f64
        };

        DashboardStats {
            total_products,
            total_categories,
            recent_products,
            average_price,
        }
    }

    /// Filas visibles de la tabla: búsqueda sobre nombre/descripción
    /// más filtro de categoría única
    pub fn filtered(&self) -> Vec<&Product> {
        let products = self.state.value().map(Vec::as_slice).unwrap_or_default();
        let term = self.search.to_lowercase();

        products
            .iter()
            .filter(|p| {
                let matches_search = term.is_empty()
                    || p.name.to_lowercase().contains(&term)
                    || p.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&term));
                let matches_category = match &self.selected_category {
                    Some(selected) => p.category.as_deref() == Some(selected.as_str()),
                    None => true,
                };
                matches_search && matches_category
            })
            .collect()
    }

    /// Categorías únicas para el selector del filtro
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .value()
            .map(|products| {
                products
                    .iter()
                    .filter_map(|p| p.category.clone())
                    .collect::<HashSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Borrar un producto: primero el backend, después la lista local
    pub async fn delete_product(&mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        api.delete_product(id).await?;

        if let ViewState::Ready(products) = &mut self.state {
            products.retain(|p| p.id != id);
        }
        Ok(())
    }
}

impl Default for AdminViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: f64, category: Option<&str>, created_at: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price,
            category: category.map(|c| c.to_string()),
            created_at: created_at.to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn stats_over_loaded_products() {
        let recent = chrono::Utc::now().to_rfc3339();
        let mut vm = AdminViewModel::new();
        vm.set_products(vec![
            product(1, "A", 10.0, Some("Pod"), "2020-01-01"),
            product(2, "B", 20.0, Some("Device"), &recent),
            product(3, "C", 30.0, Some("Pod"), "2020-06-01"),
        ]);

        let stats = vm.stats();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.recent_products, 1);
        assert!((stats.average_price - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_with_empty_catalog() {
        let mut vm = AdminViewModel::new();
        vm.set_products(vec![]);

        let stats = vm.stats();
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_price, 0.0);
    }

    #[test]
    fn table_filter_combines_search_and_single_category() {
        let mut vm = AdminViewModel::new();
        vm.set_products(vec![
            product(1, "Caliburn G2", 28.0, Some("Pod"), "2024-01-01"),
            product(2, "Caliburn A3", 22.0, Some("Pod"), "2024-01-02"),
            product(3, "Drag X", 45.0, Some("Device"), "2024-01-03"),
        ]);

        vm.set_search("caliburn");
        assert_eq!(vm.filtered().len(), 2);

        vm.set_category(Some("Pod"));
        assert_eq!(vm.filtered().len(), 2);

        vm.set_category(Some("Device"));
        assert!(vm.filtered().is_empty());

        vm.set_search("");
        assert_eq!(vm.filtered().len(), 1);

        // None = todas las categorías
        vm.set_category(None);
        assert_eq!(vm.filtered().len(), 3);
    }

    #[test]
    fn category_names_for_filter_selector() {
        let mut vm = AdminViewModel::new();
        vm.set_products(vec![
            product(1, "A", 1.0, Some("Pod"), "2024-01-01"),
            product(2, "B", 2.0, None, "2024-01-02"),
            product(3, "C", 3.0, Some("Device"), "2024-01-03"),
        ]);
        assert_eq!(vm.category_names(), vec!["Device", "Pod"]);
    }
}
