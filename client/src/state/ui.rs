//! Dashboard UI chrome: the toast line and dialog visibility.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Transient UI state for the dashboard shell: toast line and dialogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub toast: Option<Toast>,
    pub create_dialog_open: bool,
}

/// A one-line notification shown above the dashboard content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// BEM modifier class for the toast element.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "toast toast--info",
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

impl UiState {
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast { kind, message: message.into() });
    }

    pub fn dismiss(&mut self) {
        self.toast = None;
    }
}
