//! Domain primitives, entities, ports, and the application service.
//!
//! Entities hold foreign identifiers for their references, never embedded
//! copies; resolution happens at read time through the ports.

pub mod customer;
pub mod error;
pub mod id;
pub mod ports;
pub mod project;
pub mod service;
pub mod user;

pub use self::customer::Customer;
pub use self::error::{DomainError, ErrorCode};
pub use self::id::{Id, IdParseError};
pub use self::project::Project;
pub use self::service::{AppService, NewCustomer, NewProject, NewUser};
pub use self::user::User;
