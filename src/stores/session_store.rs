// ============================================================================
// SESSION STORE - Persistencia clave-valor de la sesión (inyectable)
// ============================================================================
// La superficie de localStorage que el backoffice web asumía como global,
// hecha explícita: el servicio de auth recibe el store como dependencia
// y los tests lo sustituyen por un MemoryStore.
// ============================================================================

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Superficie mínima de un almacén clave-valor de sesión
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Store en memoria - fake de tests y uso efímero
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.write()
            .map_err(|_| "Store bloqueado".to_string())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.write()
            .map_err(|_| "Store bloqueado".to_string())?;
        entries.remove(key);
        Ok(())
    }
}

/// Store durable en disco: un único objeto JSON, escrito en cada mutación.
/// Sobrevive reinicios igual que localStorage sobrevive recargas.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Abre (o crea) el store en `path`. Un archivo ilegible o corrupto
    /// se trata como vacío.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<HashMap<String, String>>(&json).ok())
            .unwrap_or_default();
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creando directorio de sesión: {}", e))?;
            }
        }
        let json = serde_json::to_string(entries)
            .map_err(|e| format!("Error serializando sesión: {}", e))?;
        fs::write(&self.path, json)
            .map_err(|e| format!("Error guardando sesión: {}", e))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.write()
            .map_err(|_| "Store bloqueado".to_string())?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.write()
            .map_err(|_| "Store bloqueado".to_string())?;
        entries.remove(key);
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k"), Some("v".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
        // remove de una clave ausente no falla
        store.remove("k").unwrap();
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path);
        store.set("access_token", "tok-123").unwrap();
        store.set("token_type", "bearer").unwrap();
        drop(store);

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("access_token"), Some("tok-123".to_string()));
        assert_eq!(reopened.get("token_type"), Some("bearer".to_string()));
    }

    #[test]
    fn file_store_treats_corrupt_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "no es json {{{").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("access_token"), None);

        // Y vuelve a ser escribible
        store.set("access_token", "tok").unwrap();
        assert_eq!(store.get("access_token"), Some("tok".to_string()));
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/session.json");

        let store = FileStore::open(&path);
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }
}
