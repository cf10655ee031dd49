pub mod application;
pub mod ipo;
pub mod user;

pub use application::{IpoApplication, NewApplication};
pub use ipo::{Ipo, IpoDraft, IpoPatch, IpoStatus, IssueType, ListFilter, StatusCounts};
pub use user::{NewUser, Role, User};
