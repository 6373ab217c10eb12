use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub message: String, pub error: String, pub code: u16 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::admin::users::list,
        crate::admin::users::get,
        crate::admin::users::create,
        crate::admin::users::update,
        crate::admin::users::delete,
        crate::admin::users::activate,
        crate::admin::users::deactivate,
        crate::admin::games::list,
        crate::admin::games::get,
        crate::admin::games::create,
        crate::admin::games::update,
        crate::admin::games::delete,
        crate::admin::enterprises::get,
        crate::admin::enterprises::create,
        crate::admin::enterprises::update,
        crate::admin::statistics::total_users,
        crate::admin::statistics::total_games,
        crate::admin::statistics::total_enterprises,
        crate::admin::statistics::total_end_users,
        crate::admin::statistics::total_active_end_users,
        crate::admin::statistics::total_active_enterprises,
        crate::admin::statistics::new_enterprises,
        crate::admin::statistics::new_end_users,
        crate::admin::events::list,
        crate::admin::events::get,
        crate::admin::events::create,
        crate::admin::events::update,
        crate::admin::vouchers::list,
        crate::admin::vouchers::get,
        crate::admin::vouchers::create,
        crate::admin::vouchers::update,
        crate::admin::vouchers::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            crate::admin::requests::CreateUserRequest,
            crate::admin::requests::UpdateUserRequest,
            crate::admin::requests::CreateGameRequest,
            crate::admin::requests::UpdateGameRequest,
            crate::admin::requests::CreateEnterpriseRequest,
            crate::admin::requests::UpdateEnterpriseRequest,
            crate::admin::requests::CreateEventRequest,
            crate::admin::requests::UpdateEventRequest,
            crate::admin::requests::CreateVoucherRequest,
            crate::admin::requests::UpdateVoucherRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "user", description = "User administration"),
        (name = "game", description = "Game catalogue"),
        (name = "enterprise", description = "Enterprise records"),
        (name = "statistic", description = "Dashboard counters"),
        (name = "event", description = "Events of the calling enterprise"),
        (name = "voucher", description = "Vouchers of an event"),
    )
)]
pub struct AdminDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::mysafe::handlers::token,
        crate::mysafe::handlers::auth,
        crate::mysafe::handlers::devices,
        crate::mysafe::handlers::user,
        crate::mysafe::handlers::children,
        crate::mysafe::handlers::send_otp,
        crate::mysafe::handlers::feedback,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            crate::mysafe::requests::AuthRequest,
            crate::mysafe::requests::DeviceRequest,
            crate::mysafe::requests::UserRequest,
            crate::mysafe::requests::ChildrenRequest,
            crate::mysafe::requests::FeedbackRequest,
            crate::mysafe::requests::OtpBody,
        )
    ),
    tags((name = "health"), (name = "mysafe", description = "Parental-control gateway"))
)]
pub struct MysafeDoc;
