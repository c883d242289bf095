//! Account command handlers: the operations that change who is logged in.

mod delete_account;
mod login;
mod logout;
mod register;

pub use delete_account::DeleteAccountHandler;
pub use login::{LoginCommand, LoginHandler};
pub use logout::LogoutHandler;
pub use register::{RegisterCommand, RegisterHandler};
