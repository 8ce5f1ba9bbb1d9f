pub mod auth;
pub mod endpoint;
pub mod request;

pub use auth::{AuthSession, Credentials, User, UserType};
pub use endpoint::{ApiRequest, ApiResponse};
pub use request::{
    CleaningRequest, CleaningRequestPatch, NewCleaningRequest, RequestStatus, Statistics,
};
