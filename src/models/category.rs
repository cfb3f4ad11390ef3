use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload de creación (POST /api/categories)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Payload de actualización parcial (PUT /api/categories/{id})
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
