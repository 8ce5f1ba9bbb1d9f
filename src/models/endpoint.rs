use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::auth::{AuthSession, Credentials};
use crate::models::request::{CleaningRequest, CleaningRequestPatch, NewCleaningRequest};

/// One request per logical endpoint the mock backend emulates. Typed variants
/// replace free-form (method, path, body) dispatch, so malformed calls are
/// rejected at the boundary instead of deep inside a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// GET /cleaning-requests[?ownerEmail=]
    ListRequests { owner_email: Option<String> },
    /// POST /cleaning-requests
    CreateRequest(NewCleaningRequest),
    /// GET /cleaning-requests/{id}
    GetRequest { id: String },
    /// PATCH /cleaning-requests/{id}
    UpdateRequest {
        id: String,
        patch: CleaningRequestPatch,
    },
    /// DELETE /cleaning-requests/{id}
    DeleteRequest { id: String },
    /// POST /auth/login
    Login(Credentials),
    /// POST /auth/logout
    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Requests(Vec<CleaningRequest>),
    Request(CleaningRequest),
    Deleted,
    Session(AuthSession),
    LoggedOut,
}

impl ApiRequest {
    /// Parse a raw (method, path, body) triple into a typed request.
    /// Mirrors the REST endpoint table the mock backend emulates.
    pub fn parse(method: &str, path: &str, body: Option<&str>) -> Result<Self, ApiError> {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        match path {
            "/cleaning-requests" => match method {
                "GET" => Ok(ApiRequest::ListRequests {
                    owner_email: query_param(query, "ownerEmail"),
                }),
                "POST" => Ok(ApiRequest::CreateRequest(decode_body(body)?)),
                _ => Err(method_not_supported(method, path)),
            },
            "/auth/login" => match method {
                "POST" => Ok(ApiRequest::Login(decode_body(body)?)),
                _ => Err(method_not_supported(method, path)),
            },
            "/auth/logout" => match method {
                "POST" => Ok(ApiRequest::Logout),
                _ => Err(method_not_supported(method, path)),
            },
            _ => {
                if let Some(id) = path.strip_prefix("/cleaning-requests/") {
                    if id.is_empty() || id.contains('/') {
                        return Err(ApiError::UnknownEndpoint(path.to_string()));
                    }
                    let id = id.to_string();
                    return match method {
                        "GET" => Ok(ApiRequest::GetRequest { id }),
                        "PATCH" => Ok(ApiRequest::UpdateRequest {
                            id,
                            patch: decode_body(body)?,
                        }),
                        "DELETE" => Ok(ApiRequest::DeleteRequest { id }),
                        _ => Err(method_not_supported(method, path)),
                    };
                }
                Err(ApiError::UnknownEndpoint(path.to_string()))
            }
        }
    }
}

fn method_not_supported(method: &str, endpoint: &str) -> ApiError {
    ApiError::MethodNotSupported {
        method: method.to_string(),
        endpoint: endpoint.to_string(),
    }
}

fn decode_body<T: DeserializeOwned>(body: Option<&str>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::InvalidBody("missing body".to_string()))?;
    serde_json::from_str(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
