use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    ApiRequest, ApiResponse, AuthSession, CleaningRequest, CleaningRequestPatch, Credentials,
    NewCleaningRequest, RequestStatus, Statistics, User, UserType,
};
use crate::services::notifications::{Notification, NotificationHub};
use crate::services::request_store::RequestStore;
use crate::services::storage::{Store, KEY_AUTH_DATA, KEY_CLEANER_AUTHENTICATED, KEY_OWNER_EMAIL};

const DEMO_CLEANER_ID: &str = "cleaner-1";
const DEMO_CLEANER_EMAIL: &str = "cleaner@lakeclean.com";
const DEMO_CLEANER_NAME: &str = "Professional Cleaner";
const DEMO_CLEANER_TOKEN: &str = "demo-cleaner-token";
const DEMO_OWNER_EMAIL: &str = "demo@email.com";

/// Mock backend: emulates the REST API purely against the key-value store.
/// Each instance owns its store and notification hub, so independent sessions
/// can coexist (and be tested) side by side.
#[derive(Clone)]
pub struct MockApi {
    requests: RequestStore,
    store: Store,
    hub: NotificationHub,
    demo_password: String,
    latency_min_ms: u32,
    latency_max_ms: u32,
}

impl MockApi {
    pub fn new(store: Store, hub: NotificationHub, config: &AppConfig) -> Self {
        Self {
            requests: RequestStore::new(store.clone()),
            store,
            hub,
            demo_password: config.demo_cleaner_password.clone(),
            latency_min_ms: config.latency_min_ms,
            latency_max_ms: config.latency_max_ms,
        }
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    /// Suspend for a random delay to simulate network latency. Compiles to a
    /// no-op off wasm so native tests stay deterministic.
    async fn simulate_latency(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let spread = self.latency_max_ms.saturating_sub(self.latency_min_ms);
            let ms = self.latency_min_ms + (js_sys::Math::random() * spread as f64) as u32;
            gloo_timers::future::TimeoutFuture::new(ms).await;
        }
    }

    // ------------------------------------------------------------------
    // Cleaning requests
    // ------------------------------------------------------------------

    /// GET /cleaning-requests[?ownerEmail=]
    pub async fn list_requests(
        &self,
        owner_email: Option<&str>,
    ) -> Result<Vec<CleaningRequest>, ApiError> {
        self.simulate_latency().await;

        let requests = self.requests.all();
        Ok(match owner_email {
            Some(email) => requests
                .into_iter()
                .filter(|r| r.owner_email == email)
                .collect(),
            None => requests,
        })
    }

    /// POST /cleaning-requests
    pub async fn create_request(
        &self,
        data: NewCleaningRequest,
    ) -> Result<CleaningRequest, ApiError> {
        self.simulate_latency().await;

        let request = CleaningRequest {
            id: Uuid::new_v4().to_string(),
            owner_email: data.owner_email,
            cabin_address: data.cabin_address,
            checkout_date: data.checkout_date,
            checkout_time: data.checkout_time,
            special_requests: data.special_requests,
            status: RequestStatus::Pending,
            submitted_at: Utc::now(),
            approved_at: None,
            completed_at: None,
        };
        self.requests.insert(request.clone());

        log::info!(
            "📧 New cleaning request {} for {}",
            request.id,
            request.cabin_address
        );
        self.hub.publish(&Notification::NewRequest(request.clone()));

        Ok(request)
    }

    /// GET /cleaning-requests/{id}
    pub async fn get_request(&self, id: &str) -> Result<CleaningRequest, ApiError> {
        self.simulate_latency().await;

        self.requests
            .find(id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// PATCH /cleaning-requests/{id}: merge `Some` fields over the record and
    /// stamp approvedAt/completedAt when the merged status lands there.
    pub async fn update_request(
        &self,
        id: &str,
        patch: CleaningRequestPatch,
    ) -> Result<CleaningRequest, ApiError> {
        self.simulate_latency().await;

        let updated = self
            .requests
            .update_with(id, |request| {
                if let Some(owner_email) = patch.owner_email {
                    request.owner_email = owner_email;
                }
                if let Some(cabin_address) = patch.cabin_address {
                    request.cabin_address = cabin_address;
                }
                if let Some(checkout_date) = patch.checkout_date {
                    request.checkout_date = checkout_date;
                }
                if let Some(checkout_time) = patch.checkout_time {
                    request.checkout_time = checkout_time;
                }
                if let Some(special_requests) = patch.special_requests {
                    request.special_requests = special_requests;
                }
                if let Some(status) = patch.status {
                    request.status = status;
                    match status {
                        RequestStatus::Approved => request.approved_at = Some(Utc::now()),
                        RequestStatus::Completed => request.completed_at = Some(Utc::now()),
                        RequestStatus::Pending => {}
                    }
                }
            })
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        log::info!("📧 Request {} is now {}", updated.id, updated.status.label());
        self.hub.publish(&Notification::StatusChange(updated.clone()));

        Ok(updated)
    }

    /// DELETE /cleaning-requests/{id}
    pub async fn delete_request(&self, id: &str) -> Result<(), ApiError> {
        self.simulate_latency().await;

        if self.requests.remove(id) {
            Ok(())
        } else {
            Err(ApiError::NotFound(id.to_string()))
        }
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// POST /auth/login. Cleaners must present the demo password; owners are
    /// accepted as-is and additionally get the owner-email marker persisted.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthSession, ApiError> {
        self.simulate_latency().await;

        let session = match credentials.user_type {
            UserType::Cleaner => {
                if credentials.password.as_deref() != Some(self.demo_password.as_str()) {
                    return Err(ApiError::InvalidCredentials);
                }

                let email = if credentials.email.is_empty() {
                    DEMO_CLEANER_EMAIL.to_string()
                } else {
                    credentials.email
                };

                self.store.set(KEY_CLEANER_AUTHENTICATED, &true);

                AuthSession {
                    user: User {
                        id: DEMO_CLEANER_ID.to_string(),
                        email,
                        user_type: UserType::Cleaner,
                        name: Some(DEMO_CLEANER_NAME.to_string()),
                    },
                    token: Some(DEMO_CLEANER_TOKEN.to_string()),
                    expires_at: Some(Utc::now() + Duration::hours(24)),
                }
            }
            UserType::Owner => {
                self.store.set(KEY_OWNER_EMAIL, &credentials.email);

                AuthSession {
                    user: User {
                        id: Uuid::new_v4().to_string(),
                        email: credentials.email,
                        user_type: UserType::Owner,
                        name: None,
                    },
                    token: None,
                    expires_at: None,
                }
            }
        };

        self.store.set(KEY_AUTH_DATA, &session);
        log::info!("✅ Logged in as {:?}", session.user.user_type);
        Ok(session)
    }

    /// POST /auth/logout. Always succeeds.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.simulate_latency().await;

        self.store.remove(KEY_AUTH_DATA);
        self.store.remove(KEY_CLEANER_AUTHENTICATED);
        log::info!("👋 Logged out");
        Ok(())
    }

    /// Synchronous read of the persisted session's user.
    pub fn current_user(&self) -> Option<User> {
        self.store
            .get::<AuthSession>(KEY_AUTH_DATA)
            .map(|session| session.user)
    }

    /// Synchronous session check used by route guards.
    pub fn is_authenticated(&self, expected: Option<UserType>) -> bool {
        match self.current_user() {
            None => false,
            Some(user) => expected.map_or(true, |t| user.user_type == t),
        }
    }

    /// The single-tenant owner marker, set at setup/login.
    pub fn owner_email(&self) -> Option<String> {
        self.store.get(KEY_OWNER_EMAIL)
    }

    // ------------------------------------------------------------------
    // Demo data & statistics
    // ------------------------------------------------------------------

    /// Seed the three demo records when the collection is empty, and backfill
    /// the default owner-email marker. Idempotent.
    pub async fn seed_demo_data(&self) -> Result<(), ApiError> {
        if self.requests.is_empty() {
            self.requests.replace_all(demo_requests());
            log::info!("🌱 Demo data initialized with 3 requests");
        }

        if self.owner_email().is_none() {
            self.store.set(KEY_OWNER_EMAIL, &DEMO_OWNER_EMAIL);
        }

        Ok(())
    }

    /// Pure aggregation over a full list fetch, recomputed on every call.
    pub async fn get_statistics(&self) -> Result<Statistics, ApiError> {
        let requests = self.list_requests(None).await?;
        let week_ago = Utc::now() - Duration::days(7);

        Ok(Statistics {
            total: requests.len(),
            pending: count_status(&requests, RequestStatus::Pending),
            approved: count_status(&requests, RequestStatus::Approved),
            completed: count_status(&requests, RequestStatus::Completed),
            this_week: requests.iter().filter(|r| r.submitted_at > week_ago).count(),
        })
    }

    // ------------------------------------------------------------------
    // Endpoint dispatch
    // ------------------------------------------------------------------

    /// Map a typed endpoint request onto the operation it names.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        match request {
            ApiRequest::ListRequests { owner_email } => self
                .list_requests(owner_email.as_deref())
                .await
                .map(ApiResponse::Requests),
            ApiRequest::CreateRequest(data) => {
                self.create_request(data).await.map(ApiResponse::Request)
            }
            ApiRequest::GetRequest { id } => {
                self.get_request(&id).await.map(ApiResponse::Request)
            }
            ApiRequest::UpdateRequest { id, patch } => {
                self.update_request(&id, patch).await.map(ApiResponse::Request)
            }
            ApiRequest::DeleteRequest { id } => {
                self.delete_request(&id).await.map(|_| ApiResponse::Deleted)
            }
            ApiRequest::Login(credentials) => {
                self.login(credentials).await.map(ApiResponse::Session)
            }
            ApiRequest::Logout => self.logout().await.map(|_| ApiResponse::LoggedOut),
        }
    }
}

fn count_status(requests: &[CleaningRequest], status: RequestStatus) -> usize {
    requests.iter().filter(|r| r.status == status).count()
}

fn fixture_time(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("valid fixture timestamp")
        .with_timezone(&Utc)
}

/// The three fixed demo records, one per status.
fn demo_requests() -> Vec<CleaningRequest> {
    vec![
        CleaningRequest {
            id: "demo-1001".to_string(),
            owner_email: DEMO_OWNER_EMAIL.to_string(),
            cabin_address: "123 Lakeshore Drive, Pine Lake Resort".to_string(),
            checkout_date: "2025-08-02".to_string(),
            checkout_time: "11:00".to_string(),
            special_requests: "Please pay extra attention to the dock area and kitchen. \
                               Guests left early due to weather."
                .to_string(),
            status: RequestStatus::Approved,
            submitted_at: fixture_time("2025-07-29T10:30:00Z"),
            approved_at: Some(fixture_time("2025-07-29T14:45:00Z")),
            completed_at: None,
        },
        CleaningRequest {
            id: "demo-1002".to_string(),
            owner_email: DEMO_OWNER_EMAIL.to_string(),
            cabin_address: "123 Lakeshore Drive, Pine Lake Resort".to_string(),
            checkout_date: "2025-08-05".to_string(),
            checkout_time: "10:30".to_string(),
            special_requests: String::new(),
            status: RequestStatus::Pending,
            submitted_at: fixture_time("2025-07-29T16:15:00Z"),
            approved_at: None,
            completed_at: None,
        },
        CleaningRequest {
            id: "demo-1003".to_string(),
            owner_email: "john.smith@email.com".to_string(),
            cabin_address: "456 Waterfront Way, Crystal Lake".to_string(),
            checkout_date: "2025-08-03".to_string(),
            checkout_time: "12:00".to_string(),
            special_requests: "Deep clean needed - large family gathering".to_string(),
            status: RequestStatus::Completed,
            submitted_at: fixture_time("2025-07-28T09:15:00Z"),
            approved_at: Some(fixture_time("2025-07-28T11:30:00Z")),
            completed_at: Some(fixture_time("2025-08-03T15:45:00Z")),
        },
    ]
}
