// ============================================================================
// AUTH SERVICE - Guardia de sesión del backoffice
// ============================================================================
// Login / logout / expiración perezosa del token bearer. El token no lleva
// expiración embebida: la antigüedad se controla del lado cliente con el
// timestamp de login persistido. No hay timer en background — una sesión
// expirada solo se detecta en la siguiente llamada a is_authenticated().
// ============================================================================

use std::time::Duration;

use reqwest::StatusCode;

use crate::config::CONFIG;
use crate::models::{LoginRequest, LoginResponse, User};
use crate::stores::session_store::SessionStore;
use crate::utils::constants::{
    CURRENT_USER_TIMEOUT_SECS, KEY_ACCESS_TOKEN, KEY_LOGIN_TIME, KEY_TOKEN_TYPE,
    SESSION_EXPIRY_MINUTES,
};

/// Resultado de current_user(). Distingue "no logueado" de "servidor
/// inalcanzable" para que el caller pueda reintentar fallos transitorios
/// en vez de tratarlos como sesión cerrada.
#[derive(Clone, PartialEq, Debug)]
pub enum AuthStatus {
    Unauthenticated,
    TransientError(String),
    Authenticated(User),
}

/// Servicio de autenticación. El store de sesión es una dependencia
/// inyectada: los tests lo sustituyen por un MemoryStore.
pub struct AuthService<S: SessionStore> {
    store: S,
    base_url: String,
    http: reqwest::Client,
    user_timeout: Duration,
}

impl<S: SessionStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self::with_base_url(store, CONFIG.api_base_url())
    }

    /// Construye el servicio contra una URL base explícita (tests)
    pub fn with_base_url(store: S, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            user_timeout: Duration::from_secs(CURRENT_USER_TIMEOUT_SECS),
        }
    }

    /// Acorta el timeout de current_user(). Solo para tests: producción
    /// siempre usa el límite fijo de 10 segundos.
    pub fn with_user_timeout(mut self, timeout: Duration) -> Self {
        self.user_timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Login contra el endpoint externo. Devuelve true solo si la
    /// respuesta fue exitosa Y la sesión quedó persistida; cualquier otro
    /// camino deja el store intacto. Sin reintentos. Un 401 aquí es solo
    /// "credenciales incorrectas" — no fuerza logout ni bloquea la cuenta.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let url = format!("{}/api/auth/login", self.base_url);
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 Iniciando sesión para usuario: {}", username);

        let response = match self.http.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ Error de red en login: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            log::warn!("⚠️ Login rechazado: HTTP {}", response.status());
            return false;
        }

        let data = match response.json::<LoginResponse>().await {
            Ok(data) => data,
            Err(e) => {
                log::error!("❌ Respuesta de login inválida: {}", e);
                return false;
            }
        };

        let now_ms = chrono::Utc::now().timestamp_millis();
        let persisted = self.store.set(KEY_ACCESS_TOKEN, &data.access_token)
            .and_then(|_| self.store.set(KEY_TOKEN_TYPE, &data.token_type))
            .and_then(|_| self.store.set(KEY_LOGIN_TIME, &now_ms.to_string()));

        if let Err(e) = persisted {
            // Una escritura parcial no cuenta como sesión: rollback
            log::error!("❌ Error guardando sesión: {}", e);
            self.clear_session();
            return false;
        }

        log::info!("💾 Sesión persistida para: {}", username);
        true
    }

    /// Chequeo perezoso de sesión: lee token y timestamp del store y
    /// descarta la sesión si superó la ventana de expiración.
    pub fn is_authenticated(&self) -> bool {
        let token = self.store.get(KEY_ACCESS_TOKEN);
        let login_time = self.store.get(KEY_LOGIN_TIME);

        let (token, login_time) = match (token, login_time) {
            (Some(token), Some(login_time)) => (token, login_time),
            _ => return false,
        };

        if token.is_empty() {
            return false;
        }

        let login_ms: i64 = match login_time.parse() {
            Ok(ms) => ms,
            Err(_) => {
                // Timestamp corrupto: la sesión no es verificable
                self.clear_session();
                return false;
            }
        };

        // Comparación en milisegundos: la ventana expira al segundo,
        // no al minuto entero
        let now_ms = chrono::Utc::now().timestamp_millis();
        let elapsed_ms = now_ms - login_ms;

        if elapsed_ms > SESSION_EXPIRY_MINUTES * 60 * 1000 {
            log::info!(
                "⏰ Sesión expirada ({:.1} minutos), limpiando",
                elapsed_ms as f64 / (1000.0 * 60.0)
            );
            self.clear_session();
            return false;
        }

        true
    }

    /// Cierra la sesión incondicionalmente. Idempotente.
    pub fn logout(&self) {
        log::info!("👋 Logout - limpiando sesión");
        self.clear_session();
    }

    fn clear_session(&self) {
        let _ = self.store.remove(KEY_ACCESS_TOKEN);
        let _ = self.store.remove(KEY_TOKEN_TYPE);
        let _ = self.store.remove(KEY_LOGIN_TIME);
    }

    /// Token bearer actual, si hay sesión (alimenta la subida de imágenes)
    pub fn access_token(&self) -> Option<String> {
        self.store.get(KEY_ACCESS_TOKEN)
    }

    /// Perfil del usuario actual vía /api/auth/me, acotado por timeout.
    /// Un 401 fuerza logout; un fallo de red o timeout deja la sesión
    /// intacta y se reporta como transitorio.
    pub async fn current_user(&self) -> AuthStatus {
        let token = match self.access_token() {
            Some(token) if !token.is_empty() => token,
            _ => return AuthStatus::Unauthenticated,
        };

        let url = format!("{}/api/auth/me", self.base_url);

        let response = match self.http.get(&url)
            .bearer_auth(&token)
            .timeout(self.user_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                log::warn!("⏰ Timeout consultando usuario actual");
                return AuthStatus::TransientError("Request timed out".to_string());
            }
            Err(e) => {
                log::warn!("⚠️ Error de red consultando usuario actual: {}", e);
                return AuthStatus::TransientError(format!("Network error: {}", e));
            }
        };

        if response.status() == StatusCode::UNAUTHORIZED {
            log::info!("🚫 Token rechazado por el backend, forzando logout");
            self.logout();
            return AuthStatus::Unauthenticated;
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return AuthStatus::TransientError(format!("HTTP {}: {}", status, body));
        }

        match response.json::<User>().await {
            Ok(user) => {
                log::info!("✅ Usuario actual: {}", user.username);
                AuthStatus::Authenticated(user)
            }
            Err(e) => AuthStatus::TransientError(format!("Parse error: {}", e)),
        }
    }
}
