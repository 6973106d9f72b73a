// API layer - HTTP endpoints
pub mod agencies;
pub mod auth;
pub mod health;
pub mod helpers;
pub mod licenses;
pub mod news;
pub mod notifications;
pub mod vehicles;
pub mod violations;

use std::sync::Arc;
use std::time::Duration;

use poem::{Request, Route};
use poem_openapi::{OpenApiService, SecurityScheme, auth::Bearer};

pub use agencies::AgenciesApi;
pub use auth::AuthApi;
pub use health::HealthApi;
pub use licenses::LicensesApi;
pub use news::NewsApi;
pub use notifications::NotificationsApi;
pub use vehicles::VehiclesApi;
pub use violations::ViolationsApi;

use crate::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::internal::context::RequestContext;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Builds the per-request context every endpoint starts from
#[derive(Clone)]
pub struct ContextBuilder {
    auth_coordinator: Arc<AuthCoordinator>,
    request_timeout: Duration,
}

impl ContextBuilder {
    pub fn new(auth_coordinator: Arc<AuthCoordinator>, request_timeout: Duration) -> Self {
        Self {
            auth_coordinator,
            request_timeout,
        }
    }

    pub async fn anonymous(&self, req: &Request) -> Result<RequestContext, ApiError> {
        helpers::create_request_context(req, None, &self.auth_coordinator, self.request_timeout).await
    }

    pub async fn authenticated(
        &self,
        req: &Request,
        auth: &BearerAuth,
    ) -> Result<RequestContext, ApiError> {
        helpers::create_request_context(
            req,
            Some(&auth.0),
            &self.auth_coordinator,
            self.request_timeout,
        )
        .await
    }
}

type RegistryApis = (
    HealthApi,
    AuthApi,
    LicensesApi,
    VehiclesApi,
    ViolationsApi,
    AgenciesApi,
    NotificationsApi,
    NewsApi,
);

/// OpenAPI service with every endpoint, served under `/api`
pub fn build_api_service(app_data: Arc<AppData>) -> OpenApiService<RegistryApis, ()> {
    let auth_coordinator = Arc::new(AuthCoordinator::new(Arc::clone(&app_data)));
    let context = ContextBuilder::new(
        Arc::clone(&auth_coordinator),
        app_data.settings.request_timeout(),
    );
    let server_url = format!("http://localhost:{}/api", app_data.settings.server_port());

    let apis = (
        HealthApi,
        AuthApi::new(auth_coordinator, context.clone()),
        LicensesApi::new(Arc::clone(&app_data), context.clone()),
        VehiclesApi::new(Arc::clone(&app_data), context.clone()),
        ViolationsApi::new(Arc::clone(&app_data), context.clone()),
        AgenciesApi::new(Arc::clone(&app_data), context.clone()),
        NotificationsApi::new(Arc::clone(&app_data), context.clone()),
        NewsApi::new(app_data, context),
    );

    OpenApiService::new(apis, "Driving Registry API", env!("CARGO_PKG_VERSION")).server(server_url)
}

/// Compose routes: API under /api and Swagger UI under /swagger
pub fn build_routes(app_data: Arc<AppData>) -> Route {
    let api_service = build_api_service(app_data);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
