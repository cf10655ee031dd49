pub mod application;
pub mod ipo;
pub mod user;
