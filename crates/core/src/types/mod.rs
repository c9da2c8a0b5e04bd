//! Shared newtype wrappers and enums.
//!
//! Each wrapper validates at construction so the rest of the system can
//! assume well-formed values.

pub mod email;
pub mod id;
pub mod phone;
pub mod status;
pub mod username;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, SearchEntryId, SignId, UserId};
pub use phone::{Phone, PhoneError};
pub use status::{OrderStatus, ProductStatus};
pub use username::{Username, UsernameError};
