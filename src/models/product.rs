use serde::{Deserialize, Serialize};

/// Producto del catálogo, tal como lo envía el backend.
/// De solo lectura para esta capa: se confía en los datos una vez
/// cruzada la frontera de red, sin validación local.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    // `None` es un estado distinto de cadena vacía
    pub category: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// Parseo tolerante del timestamp que envía el backend: RFC 3339,
    /// datetime naive, o fecha sola. Lo imparseable ordena como epoch 0.
    pub fn created_at_ms(&self) -> i64 {
        let text = self.created_at.trim();

        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
            return dt.timestamp_millis();
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(text, fmt) {
                return dt.and_utc().timestamp_millis();
            }
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return dt.and_utc().timestamp_millis();
            }
        }
        0
    }
}

/// Payload de creación (POST /api/products)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
}

/// Payload de actualización parcial (PUT /api/products/{id}).
/// Los campos ausentes no se envían.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
