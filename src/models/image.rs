use serde::{Deserialize, Serialize};

/// Metadata devuelta por POST /api/images/upload/{entityType}
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ImageMetadata {
    pub id: i64,
    pub filename: String,
    pub url: String,
    pub thumbnail_url: String,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Tipo de entidad al que se asocia una imagen subida
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityType {
    Products,
    Categories,
    Banners,
}

impl EntityType {
    /// Segmento de ruta en /api/images/upload/{entityType}
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            EntityType::Products => "products",
            EntityType::Categories => "categories",
            EntityType::Banners => "banners",
        }
    }
}
