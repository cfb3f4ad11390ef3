// ============================================================================
// CONSTANTES - Claves de storage y umbrales fijos del protocolo
// ============================================================================

/// Claves de la sesión persistida (mismas claves que usa el backoffice web)
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_TOKEN_TYPE: &str = "token_type";
pub const KEY_LOGIN_TIME: &str = "login_time";

/// Expiración de sesión del lado cliente (el token no lleva expiración embebida)
pub const SESSION_EXPIRY_MINUTES: i64 = 30;

/// Timeout fijo de la llamada /api/auth/me
pub const CURRENT_USER_TIMEOUT_SECS: u64 = 10;

/// Límites de subida de imágenes
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Ventana de "producto reciente" para las estadísticas del dashboard
pub const RECENT_PRODUCT_DAYS: i64 = 7;
