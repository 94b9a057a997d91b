//! Identity and access for flatseller: account registration, password login
//! and bearer token verification.

use flatseller_config::AuthConfig;
use flatseller_database::{CreateUserRequest, DatabaseError, Role, User, UserRepository};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod password;
pub mod token;

pub use password::PasswordHasher;
pub use token::{Claims, TokenSigner};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid user_type")]
    InvalidRole,
    #[error("user with this email already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("token signing failed: {0}")]
    Token(String),
    #[error("store error: {0}")]
    Store(DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        if err.is_duplicate() {
            AuthError::UserExists
        } else {
            AuthError::Store(err)
        }
    }
}

/// Verified caller, decoded from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Persistence the authenticator needs.
pub trait UserStore {
    async fn create(&self, request: &CreateUserRequest) -> Result<String, DatabaseError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError>;
}

impl UserStore for UserRepository {
    async fn create(&self, request: &CreateUserRequest) -> Result<String, DatabaseError> {
        UserRepository::create(self, request).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        UserRepository::find_by_id(self, id).await
    }
}

#[derive(Clone)]
pub struct Authenticator<S = UserRepository> {
    store: S,
    hasher: PasswordHasher,
    signer: TokenSigner,
}

impl<S: UserStore> Authenticator<S> {
    pub fn new(store: S, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            store,
            hasher: PasswordHasher::new(&config.password_hashing)?,
            signer: TokenSigner::new(&config.token_secret, config.token_ttl()),
        })
    }

    /// Register an account and return its identifier.
    ///
    /// The role is checked before anything is hashed or written.
    pub async fn register_new_user(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<String, AuthError> {
        let role = role.parse::<Role>().map_err(|_| AuthError::InvalidRole)?;

        let password_hash = self.hasher.hash(password).await?;
        let id = self
            .store
            .create(&CreateUserRequest {
                email: email.to_owned(),
                role,
                password_hash,
            })
            .await?;

        info!(user_id = %id, %role, "registered user");
        Ok(id)
    }

    /// Exchange an identifier and password for a session token.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.store.find_by_id(user_id).await? else {
            debug!(user_id, "login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(&Identity {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })?;

        debug!(user_id, "issued session token");
        Ok(token)
    }

    pub fn authenticate_token(&self, token: &str) -> Result<Identity, AuthError> {
        self.signer.verify(token)
    }
}
