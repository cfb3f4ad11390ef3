// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::CONFIG;
use crate::models::{
    Category, CategoryUpdate, EntityType, ImageMetadata, NewCategory, NewProduct, Product,
    ProductUpdate,
};
use crate::utils::constants::{ACCEPTED_IMAGE_TYPES, MAX_UPLOAD_SIZE_BYTES};

/// Error del cliente API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parse error: {0}")]
    Decode(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_base_url())
    }

    /// Construye el cliente contra una URL base explícita (tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convierte una respuesta no exitosa en ApiError::Status,
    /// rescatando el cuerpo como texto de error
    async fn error_for_status(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ApiError::Status { status, body }
    }

    // ------------------------------------------------------------------
    // Productos
    // ------------------------------------------------------------------

    /// Listar productos del catálogo
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = format!("{}/api/products", self.base_url);

        log::info!("📦 Obteniendo productos del catálogo...");

        let response = self.http.get(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let products = response.json::<Vec<Product>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        log::info!("✅ {} productos obtenidos", products.len());
        Ok(products)
    }

    /// Obtener un producto por id. Un 404 no es un error: es el único
    /// lookup donde "no encontrado" se distingue del resto de fallos.
    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, ApiError> {
        let url = format!("{}/api/products/{}", self.base_url, id);

        let response = self.http.get(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if response.status() == StatusCode::NOT_FOUND {
            log::info!("⚠️ Producto {} no encontrado", id);
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let product = response.json::<Product>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(Some(product))
    }

    /// Crear producto
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let url = format!("{}/api/products", self.base_url);

        log::info!("📦 Creando producto: {}", product.name);

        let response = self.http.post(&url)
            .json(product)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response.json::<Product>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Actualizar producto (campos parciales)
    pub async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        let url = format!("{}/api/products/{}", self.base_url, id);

        log::info!("📝 Actualizando producto: {}", id);

        let response = self.http.put(&url)
            .json(update)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response.json::<Product>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Eliminar producto
    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/products/{}", self.base_url, id);

        log::info!("🗑️ Eliminando producto: {}", id);

        let response = self.http.delete(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Categorías
    // ------------------------------------------------------------------

    /// Listar categorías
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = format!("{}/api/categories", self.base_url);

        log::info!("📋 Obteniendo categorías...");

        let response = self.http.get(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response.json::<Vec<Category>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Obtener una categoría por id
    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, ApiError> {
        let url = format!("{}/api/categories/{}", self.base_url, id);

        let response = self.http.get(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let category = response.json::<Category>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(Some(category))
    }

    /// Crear categoría
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let url = format!("{}/api/categories", self.base_url);

        log::info!("📋 Creando categoría: {}", category.name);

        let response = self.http.post(&url)
            .json(category)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response.json::<Category>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Actualizar categoría (campos parciales)
    pub async fn update_category(
        &self,
        id: i64,
        update: &CategoryUpdate,
    ) -> Result<Category, ApiError> {
        let url = format!("{}/api/categories/{}", self.base_url, id);

        log::info!("📝 Actualizando categoría: {}", id);

        let response = self.http.put(&url)
            .json(update)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response.json::<Category>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Eliminar categoría
    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/categories/{}", self.base_url, id);

        log::info!("🗑️ Eliminando categoría: {}", id);

        let response = self.http.delete(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Imágenes
    // ------------------------------------------------------------------

    /// Subir una imagen asociada a un tipo de entidad. Valida tipo y
    /// tamaño del lado cliente antes de tocar la red.
    pub async fn upload_image(
        &self,
        entity_type: EntityType,
        entity_id: Option<i64>,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        token: &str,
    ) -> Result<ImageMetadata, ApiError> {
        if !ACCEPTED_IMAGE_TYPES.contains(&mime_type) {
            return Err(ApiError::Validation(format!(
                "Invalid file type. Accepted: {}",
                ACCEPTED_IMAGE_TYPES.join(", ")
            )));
        }
        if bytes.len() as u64 > MAX_UPLOAD_SIZE_BYTES {
            return Err(ApiError::Validation(format!(
                "File too large. Maximum size: {}MB",
                MAX_UPLOAD_SIZE_BYTES / (1024 * 1024)
            )));
        }

        let mut url = format!(
            "{}/api/images/upload/{}",
            self.base_url,
            entity_type.as_path_segment()
        );
        if let Some(id) = entity_id {
            url = format!("{}?entity_id={}", url, id);
        }

        log::info!("🖼️ Subiendo imagen: {} ({} bytes)", filename, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::Validation(format!("Invalid mime type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.http.post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let metadata = response.json::<ImageMetadata>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        log::info!("✅ Imagen subida: {}", metadata.url);
        Ok(metadata)
    }

    /// Asociar una imagen ya subida a una entidad concreta
    /// (flujo de alta de producto: primero upload, luego attach)
    pub async fn attach_image(
        &self,
        image_id: i64,
        entity_id: i64,
        token: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/images/{}?entity_id={}",
            self.base_url, image_id, entity_id
        );

        log::info!("🖼️ Asociando imagen {} a entidad {}", image_id, entity_id);

        let response = self.http.put(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
