// ============================================================================
// VIEW STATE - Los tres estados renderizables de toda vista con datos
// ============================================================================

/// Estado de una vista que carga datos: spinner, mensaje de error con
/// reintento manual, o contenido. Sin reintento automático.
#[derive(Clone, PartialEq, Debug)]
pub enum ViewState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}
