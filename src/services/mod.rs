pub mod application_service;
pub mod application_service_impl;
pub mod auth_service;
pub mod auth_service_impl;
pub mod ipo_service;
pub mod ipo_service_impl;

pub use application_service::{ApplicationError, ApplicationService};
pub use application_service_impl::StoreApplicationService;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::StoreAuthService;
pub use ipo_service::{IpoError, IpoService};
pub use ipo_service_impl::StoreIpoService;
