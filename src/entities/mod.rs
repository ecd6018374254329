//! Record kinds of the construction marketplace

#[macro_use]
pub mod macros;

pub mod business;
pub mod job;
pub mod professional;
pub mod seed;
pub mod user;

pub use business::Business;
pub use job::{Job, JobBuilder};
pub use professional::Professional;
pub use seed::SeedData;
pub use user::User;
