//! Top-level fault barrier for the presentation shell.
//!
//! Render paths return `Result<_, RenderFault>`; the boundary also contains panics raised while
//! rendering. Either way the caller receives a [`FaultNotice`] offering the destructive reset.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::error;

use super::messages::Locale;
use super::service::IntakeError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("render failed: {message}")]
pub struct RenderFault {
    message: String,
}

impl RenderFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "panic while rendering".to_string()
        };
        Self::new(message)
    }
}

impl From<IntakeError> for RenderFault {
    fn from(value: IntakeError) -> Self {
        Self::new(value.to_string())
    }
}

/// Full-page notice shown in place of a view that failed to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultNotice {
    pub title: &'static str,
    pub hint: &'static str,
    pub action: &'static str,
}

impl FaultNotice {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                title: "Something went wrong!",
                hint: "Reload the page or clear the saved data.",
                action: "Clear data and reload",
            },
            Locale::PtBr => Self {
                title: "Algo deu errado!",
                hint: "Por favor, recarregue a página ou limpe os dados salvos.",
                action: "Limpar Dados e Recarregar",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<T> {
    View(T),
    Fallback(FaultNotice),
}

impl<T> Rendered<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }

    pub fn view(self) -> Option<T> {
        match self {
            Rendered::View(view) => Some(view),
            Rendered::Fallback(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorBoundary {
    locale: Locale,
}

impl ErrorBoundary {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn render<T, F>(&self, render: F) -> Rendered<T>
    where
        F: FnOnce() -> Result<T, RenderFault>,
    {
        let fault = match panic::catch_unwind(AssertUnwindSafe(render)) {
            Ok(Ok(view)) => return Rendered::View(view),
            Ok(Err(fault)) => fault,
            Err(payload) => RenderFault::from_panic(payload),
        };

        error!(fault = %fault, "view failed to render; offering reset");
        Rendered::Fallback(FaultNotice::for_locale(self.locale))
    }
}
