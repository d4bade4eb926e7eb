use crate::render::DetailsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Alert,
    Details,
}

/// Where a click inside an open dialog's overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

/// Two independent overlays. Either may be open regardless of the other.
#[derive(Debug, Clone, Default)]
pub struct ModalPresenter {
    alert: Option<String>,
    details: Option<DetailsView>,
}

impl ModalPresenter {
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn show_details(&mut self, details: DetailsView) {
        self.details = Some(details);
    }

    pub fn close(&mut self, kind: ModalKind) {
        match kind {
            ModalKind::Alert => self.alert = None,
            ModalKind::Details => self.details = None,
        }
    }

    pub fn click(&mut self, kind: ModalKind, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close(kind);
        }
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::Alert => self.alert.is_some(),
            ModalKind::Details => self.details.is_some(),
        }
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn details(&self) -> Option<&DetailsView> {
        self.details.as_ref()
    }
}
