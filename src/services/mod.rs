pub mod mock_api;
pub mod notifications;
pub mod request_store;
pub mod storage;

pub use mock_api::MockApi;
pub use notifications::{Notification, NotificationHub};
pub use request_store::RequestStore;
pub use storage::{MemoryStorage, StorageBackend, Store};
