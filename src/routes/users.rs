use crate::{
    auth::{hash_password, verify_password, AuthConfig, LoginRequest, SignupRequest},
    error::AppError,
    models::{ApiResponse, SearchQuery, User},
    store::Store,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Registers a new user.
///
/// ## Responses:
/// - `201 Created`: `{ "data": User }`.
/// - `400 Bad Request`: missing fields, malformed JSON, or an email that is already registered.
/// - `422 Unprocessable Entity`: invalid email, empty password, or a bad name length.
#[post("/signup")]
pub async fn signup(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthConfig>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    signup_data.validate()?;
    let SignupRequest {
        email,
        password,
        name,
    } = signup_data.into_inner();

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&password, auth.bcrypt_cost)?;
    let user = store
        .insert_user(User::new(name, email, password_hash))
        .await?;

    log::info!("Registered user {}", user.id);
    Ok(HttpResponse::Created().json(ApiResponse::data(user)))
}

/// Authenticates a user by email and password.
///
/// ## Responses:
/// - `200 OK`: `{ "data": "<token>" }`.
/// - `401 Unauthorized`: unknown email or wrong password.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn Store>,
    auth: web::Data<AuthConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = match store.find_user_by_email(&login_data.email).await? {
        Some(user) => user,
        None => {
            log::warn!("Login attempt for unknown email");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    if !verify_password(&login_data.password, &user.password_hash)? {
        log::warn!("Wrong password for user {}", user.id);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = auth.tokens.generate_token(user.id)?;
    log::info!("User {} logged in", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::data(token)))
}

/// Looks up a user by exact name.
///
/// ## Responses:
/// - `200 OK`: `{ "data": User }`.
/// - `400 Bad Request`: `name` missing or blank.
/// - `404 Not Found`: `{ "message": "There is no user with name: <name>" }`.
#[get("/search")]
pub async fn search(
    store: web::Data<dyn Store>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, AppError> {
    let name = match query.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(AppError::BadRequest("must provide name to search".into())),
    };

    match store.find_user_by_name(name).await? {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::data(user))),
        None => Err(AppError::NotFound(format!(
            "There is no user with name: {}",
            name
        ))),
    }
}
