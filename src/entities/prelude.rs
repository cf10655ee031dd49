pub use super::ipo_applications::Entity as IpoApplications;
pub use super::ipos::Entity as Ipos;
pub use super::users::Entity as Users;
