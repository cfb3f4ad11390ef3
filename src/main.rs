use vapelife_storefront::{
    AdminViewModel, ApiClient, AuthService, CatalogViewModel, FileStore, ViewState, CONFIG,
};

#[tokio::main]
async fn main() {
    if CONFIG.is_logging_enabled() {
        env_logger::init();
    }
    log::info!("🚀 VAPE LIFE storefront client");

    let api = ApiClient::new();

    // La cabecera del storefront solo lee la sesión; login/logout la escriben
    let auth = AuthService::new(FileStore::open(&CONFIG.session_store_path));
    if auth.is_authenticated() {
        println!("Sesión de administrador activa\n");
    }

    let mut catalog = CatalogViewModel::new();
    catalog.load(&api).await;

    if let ViewState::Failed(message) = catalog.state() {
        // Contrato error + reintento manual, renderizado para terminal
        eprintln!("Error cargando el catálogo: {}", message);
        eprintln!("Reintenta ejecutando de nuevo el comando.");
        std::process::exit(1);
    }

    // Término de búsqueda opcional desde argv
    if let Some(term) = std::env::args().nth(1) {
        catalog.set_search(&term);
    }

    let (shown, total) = catalog.shown_of_total();
    println!("Mostrando {} de {} productos (más recientes primero)\n", shown, total);
    for product in catalog.visible() {
        let category = product.category.as_deref().unwrap_or("-");
        println!("  #{:<5} {:<40} {:>8.2}  [{}]", product.id, product.name, product.price, category);
    }

    let mut admin = AdminViewModel::new();
    admin.load(&api).await;
    if admin.state().value().is_some() {
        let stats = admin.stats();
        println!(
            "\nDashboard: {} productos, {} categorías, {} recientes, precio medio {:.2}",
            stats.total_products,
            stats.total_categories,
            stats.recent_products,
            stats.average_price,
        );
    }
}
