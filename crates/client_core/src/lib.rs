//! Controller core for the company information desk: the backend gateway,
//! a pure view/state controller, and the renderers hosts bind to.

pub mod api;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod format;
pub mod render;
pub mod session;

pub use api::{CompanyApi, HttpCompanyApi};
pub use config::{load_settings, ClientSettings};
pub use controller::{
    form::FormMode,
    modal::{ClickTarget, ModalKind},
    router::View,
    Action, Controller, ViewModel,
};
pub use effects::{perform, ApiCall, Completion, Effect};
pub use error::{GatewayError, SettingsError};
pub use format::DateStyle;
pub use render::{CardAction, CompanyCard, CompareView, DetailsView, ListView};
pub use session::Session;
