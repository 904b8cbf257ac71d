// Service exports
pub mod chat;
pub mod mail;
pub mod search;
pub mod store;

pub use chat::{AlertKind, ChatError, ChatNotifier};
pub use mail::{MailError, Mailer};
pub use search::{SearchClient, SearchError};
pub use store::{ProfileStore, StoreError};
