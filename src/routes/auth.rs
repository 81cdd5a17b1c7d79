use crate::{
    auth::{session_cookie, AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates the account and answers `201` with its public profile. No session
/// is started; the client logs in separately.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = auth.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".into(),
        user,
    }))
}

/// Login user
///
/// Checks the credentials and sets the `token` session cookie. The token is
/// not repeated in the body.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (user, issued) = auth.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&issued))
        .json(AuthResponse {
            message: "Login successful".into(),
            user,
        }))
}
