use validator::Validate;

use crate::auth::password::verify_against_dummy;
use crate::auth::{
    hash_password, verify_password, IssuedToken, LoginRequest, RegisterRequest, SessionTokens,
    MAX_PASSWORD_BYTES,
};
use crate::error::{AppError, INVALID_CREDENTIALS_MESSAGE};
use crate::models::{normalize_email, User, UserSummary};
use crate::services::run_blocking;
use crate::store::{Store, StoreError};

const EMAIL_TAKEN_MESSAGE: &str = "Email already exists";

/// Registration and login on top of the credential store.
#[derive(Clone)]
pub struct AuthService {
    store: Store,
    tokens: SessionTokens,
}

impl AuthService {
    pub fn new(store: Store, tokens: SessionTokens) -> Self {
        Self { store, tokens }
    }

    /// Creates an account. The email is stored normalized and must not be
    /// taken yet, including by a registration racing this one.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserSummary, AppError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let existing = self
            .store
            .bounded(self.store.users().find_user_by_email(&email))
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN_MESSAGE.into()));
        }

        let password = request.password;
        let password_hash = run_blocking(move || hash_password(&password)).await?;

        let user = User::new(email, password_hash, request.name.trim().to_string());
        match self
            .store
            .bounded(self.store.users().insert_user(&user))
            .await
        {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => {
                return Err(AppError::Conflict(EMAIL_TAKEN_MESSAGE.into()));
            }
            Err(e) => return Err(e.into()),
        }

        log::info!("Registered user {}", user.id);
        Ok(user.summary())
    }

    /// Checks the credentials and issues a session token.
    ///
    /// An unknown email, a wrong password and a password longer than bcrypt
    /// can tell apart all fail with the same error, and all run one bcrypt
    /// verification.
    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<(UserSummary, IssuedToken), AppError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let user = self
            .store
            .bounded(self.store.users().find_user_by_email(&email))
            .await?;

        // No stored password is longer than the limit, and bcrypt would only
        // compare the first MAX_PASSWORD_BYTES of this one.
        let password = request.password;
        let user = match user {
            Some(user) if password.len() <= MAX_PASSWORD_BYTES => user,
            _ => {
                run_blocking(move || Ok(verify_against_dummy(&password))).await?;
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.into()));
            }
        };

        let password_hash = user.password_hash.clone();
        let matches = run_blocking(move || verify_password(&password, &password_hash)).await?;
        if !matches {
            log::debug!("Rejected login for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.into()));
        }

        let issued = self.tokens.issue(user.id)?;
        Ok((user.summary(), issued))
    }
}
