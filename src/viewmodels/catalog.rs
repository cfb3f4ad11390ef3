// ============================================================================
// CATALOG VIEWMODEL - LÓGICA DE CATÁLOGO
// ============================================================================
// Deriva la lista filtrada y ordenada a renderizar a partir del catálogo
// completo en memoria. Transformación pura re-ejecutada en cada cambio de
// filtro: segura de llamar en cada tecleo. El resultado se memoiza y solo
// se recalcula tras una mutación.
// ============================================================================

use std::collections::HashSet;

use crate::models::Product;
use crate::services::api_client::ApiClient;
use crate::state::view_state::ViewState;

/// Clave de ordenación del catálogo
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    #[default]
    Newest,
    Oldest,
}

/// Estado de filtrado: los tres predicados se combinan con AND,
/// las categorías seleccionadas entre sí con OR.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FilterState {
    pub search: String,
    pub categories: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl FilterState {
    fn matches(&self, product: &Product) -> bool {
        // Búsqueda: substring case-insensitive sobre nombre o descripción
        let term = self.search.to_lowercase();
        let matches_search = term.is_empty()
            || product.name.to_lowercase().contains(&term)
            || product
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&term));

        // Categoría: selección vacía = sin filtro; un producto sin
        // categoría nunca pasa un filtro de categorías activo
        let matches_category = self.categories.is_empty()
            || product
                .category
                .as_ref()
                .is_some_and(|c| self.categories.contains(c));

        // Precio: límites inclusivos, por defecto 0 / +infinito
        let min = self.price_min.unwrap_or(0.0);
        let max = self.price_max.unwrap_or(f64::INFINITY);
        let matches_price = product.price >= min && product.price <= max;

        matches_search && matches_category && matches_price
    }
}

/// ViewModel del catálogo - estado de carga + filtro/orden + derivados
pub struct CatalogViewModel {
    state: ViewState<Vec<Product>>,
    filter: FilterState,
    sort: SortKey,
    favorites: HashSet<i64>,
    visible_cache: Option<Vec<Product>>,
}

impl CatalogViewModel {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            filter: FilterState::default(),
            sort: SortKey::default(),
            favorites: HashSet::new(),
            visible_cache: None,
        }
    }

    /// Catálogo con una categoría preseleccionada (ruta /categories/{name})
    pub fn with_category(category: &str) -> Self {
        let mut vm = Self::new();
        vm.filter.categories.push(category.to_string());
        vm
    }

    /// Cargar el catálogo completo desde el API. Reintentar = volver a
    /// llamar; no hay retry automático.
    pub async fn load(&mut self, api: &ApiClient) {
        self.state = ViewState::Loading;
        self.invalidate();

        match api.list_products().await {
            Ok(products) => {
                self.state = ViewState::Ready(products);
            }
            Err(e) => {
                log::error!("❌ Error cargando catálogo: {}", e);
                self.state = ViewState::Failed(e.to_string());
            }
        }
    }

    /// Inyectar el catálogo directamente (tests y fixtures)
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.state = ViewState::Ready(products);
        self.invalidate();
    }

    pub fn state(&self) -> &ViewState<Vec<Product>> {
        &self.state
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    // ------------------------------------------------------------------
    // Mutadores de filtro
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, term: &str) {
        self.filter.search = term.to_string();
        self.invalidate();
    }

    /// Alta/baja simétrica de una categoría en la selección.
    /// No afecta a los demás campos del filtro.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.filter.categories.iter().position(|c| c == category) {
            self.filter.categories.remove(pos);
        } else {
            self.filter.categories.push(category.to_string());
        }
        self.invalidate();
    }

    /// Límite inferior de precio desde texto del usuario.
    /// Entrada no numérica o vacía = sin límite (nunca un error).
    pub fn set_price_min(&mut self, text: &str) {
        self.filter.price_min = text.trim().parse::<f64>().ok();
        self.invalidate();
    }

    /// Límite superior de precio desde texto del usuario
    pub fn set_price_max(&mut self, text: &str) {
        self.filter.price_max = text.trim().parse::<f64>().ok();
        self.invalidate();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.invalidate();
    }

    /// Reset a los valores por defecto fijos (no al estado anterior)
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.sort = SortKey::default();
        self.invalidate();
    }

    // ------------------------------------------------------------------
    // Favoritos
    // ------------------------------------------------------------------

    pub fn toggle_favorite(&mut self, product_id: i64) {
        if !self.favorites.insert(product_id) {
            self.favorites.remove(&product_id);
        }
    }

    pub fn is_favorite(&self, product_id: i64) -> bool {
        self.favorites.contains(&product_id)
    }

    // ------------------------------------------------------------------
    // Derivados
    // ------------------------------------------------------------------

    /// Lista filtrada y ordenada a renderizar. Memoizada: solo se
    /// recalcula después de una mutación.
    pub fn visible(&mut self) -> &[Product] {
        if self.visible_cache.is_none() {
            let products = self.state.value().cloned().unwrap_or_default();
            let mut filtered: Vec<Product> = products
                .into_iter()
                .filter(|p| self.filter.matches(p))
                .collect();
            // sort_by es estable: empates conservan el orden de entrada
            filtered.sort_by(|a, b| compare(a, b, self.sort));
            self.visible_cache = Some(filtered);
        }
        self.visible_cache.as_deref().unwrap_or_default()
    }

    /// Categorías únicas del catálogo cargado, ordenadas, sin `None`
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

    /// Rango de precios del catálogo cargado: (floor(min), ceil(max)),
    /// (0, 0) con catálogo vacío
    pub fn price_bounds(&self) -> (f64, f64) {
        let products = match self.state.value() {
            Some(products) if !products.is_empty() => products,
            _ => return (0.0, 0.0),
        };
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for product in products {
            min = min.min(product.price);
            max = max.max(product.price);
        }
        (min.floor(), max.ceil())
    }

    /// Contador "Showing X of Y products"
    pub fn shown_of_total(&mut self) -> (usize, usize) {
        let total = self.state.value().map(|p| p.len()).unwrap_or(0);
        (self.visible().len(), total)
    }

    fn invalidate(&mut self) {
        self.visible_cache = None;
    }
}

impl Default for CatalogViewModel {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Product, b: &Product, sort: SortKey) -> std::cmp::Ordering {
    match sort {
        SortKey::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        SortKey::PriceAsc => a.price.total_cmp(&b.price),
        SortKey::PriceDesc => b.price.total_cmp(&a.price),
        SortKey::Newest => b.created_at_ms().cmp(&a.created_at_ms()),
        SortKey::Oldest => a.created_at_ms().cmp(&b.created_at_ms()),
    }
}
