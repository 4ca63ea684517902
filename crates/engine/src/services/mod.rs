//! Entry and user services.
//!
//! Services own the business rules and delegate storage to a repository
//! handed to them at construction.

mod entries;
mod users;

pub use entries::EntryService;
pub use users::UserService;

pub(crate) const EMAIL_ALREADY_REGISTERED: &str = "email already registered";
pub(crate) const USER_NOT_FOUND_FOR_EMAIL: &str = "user not found for given email";
pub(crate) const INVALID_PASSWORD: &str = "invalid password";
