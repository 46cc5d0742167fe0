//! Page controllers: the state each page holds and the remote calls that
//! populate it. Rendering lives in [`crate::render`].

pub mod admin;
pub mod blog;
pub mod login;
pub mod properties;
pub mod sequence;

#[cfg(test)]
pub(crate) mod fake;

pub use admin::{AdminPanel, AdminTab};
pub use blog::BlogPage;
pub use login::LoginPage;
pub use properties::PropertiesPage;
pub use sequence::{RequestSequence, Ticket};
