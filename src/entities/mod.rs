pub mod prelude;

pub mod ipo_applications;
pub mod ipos;
pub mod users;
