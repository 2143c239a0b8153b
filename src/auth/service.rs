// src/auth/service.rs
use crate::auth::events::{AuthEvent, AuthEvents};
use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use crate::auth::sessions;
use crate::db::connection::Database;
use crate::db::profiles::{self, Profile, ROLE_AGENT, ROLE_BUYER};
use crate::db::users;
use crate::errors::ServerError;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// The signed-in user for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    /// Missing when sign-up stopped between the account and the profile write.
    pub profile: Option<Profile>,
}

impl CurrentUser {
    pub fn is_agent(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::is_agent)
    }
}

/// Profile metadata collected on the sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// `agent` or `buyer`; anything else becomes `buyer`.
    pub role: String,
}

/// Result of a successful sign-in or sign-up.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user_id: i64,
    pub session_token: String,
    pub profile: Profile,
}

pub struct AuthService<'a> {
    db: &'a Database,
    events: &'a AuthEvents,
    session_ttl_secs: i64,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Database, events: &'a AuthEvents, session_ttl_secs: i64) -> Self {
        Self {
            db,
            events,
            session_ttl_secs,
        }
    }

    /// Trim + lowercase, minimal sanity check.
    pub fn normalize_email(email: &str) -> Result<String, ServerError> {
        let e = email.trim().to_lowercase();
        if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
            return Err(ServerError::BadRequest("invalid email".into()));
        }
        Ok(e)
    }

    pub fn current_user(&self, session_token: Option<&str>) -> Result<Option<CurrentUser>, ServerError> {
        let Some(token) = session_token else {
            return Ok(None);
        };

        self.db.with_conn(|conn| {
            let Some(user_id) = sessions::load_user_from_session(conn, token, now_unix())? else {
                return Ok(None);
            };
            let profile = profiles::get_profile(conn, user_id)?;
            Ok(Some(CurrentUser { user_id, profile }))
        })
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, ServerError> {
        let email = Self::normalize_email(email)?;
        let now = now_unix();

        let signed_in = self.db.with_conn(|conn| {
            let user = users::find_user_by_email(conn, &email)?
                .filter(|u| verify_password(password, &u.password_hash))
                .ok_or_else(|| ServerError::Unauthorized("Invalid login credentials".into()))?;

            let profile = profiles::get_profile(conn, user.id)?
                .ok_or_else(|| ServerError::Unauthorized("Profile not found".into()))?;

            users::touch_last_login(conn, user.id, now)?;
            let session_token =
                sessions::create_session(conn, user.id, now, self.session_ttl_secs)?;

            Ok(SignedIn {
                user_id: user.id,
                session_token,
                profile,
            })
        });

        match &signed_in {
            Ok(s) => {
                info!(user_id = s.user_id, "user signed in");
                self.events.emit(&AuthEvent::SignedIn { user_id: s.user_id });
            }
            Err(e) => warn!(%email, "sign-in failed: {e}"),
        }
        signed_in
    }

    /// Create the account and its profile, then open a session.
    pub fn sign_up(&self, form: &SignUpForm) -> Result<SignedIn, ServerError> {
        let email = Self::normalize_email(&form.email)?;
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServerError::BadRequest(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let role = match form.role.trim() {
            ROLE_AGENT => ROLE_AGENT,
            _ => ROLE_BUYER,
        };
        let password_hash = hash_password(&form.password)?;
        let now = now_unix();

        let signed_up = self.db.with_conn(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

            let user_id = users::create_user(&tx, &email, &password_hash, now)?;
            let profile = Profile {
                id: user_id,
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                email: email.clone(),
                role: role.to_string(),
            };
            profiles::upsert_profile(&tx, &profile)
                .map_err(|_| ServerError::DbError("Could not save profile information.".into()))?;
            let session_token = sessions::create_session(&tx, user_id, now, self.session_ttl_secs)?;

            tx.commit()
                .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

            Ok(SignedIn {
                user_id,
                session_token,
                profile,
            })
        })?;

        info!(user_id = signed_up.user_id, role, "user signed up");
        self.events.emit(&AuthEvent::SignedUp {
            user_id: signed_up.user_id,
            role: role.to_string(),
        });
        Ok(signed_up)
    }

    /// Revoke the session. Unknown or expired tokens are a no-op.
    pub fn sign_out(&self, session_token: &str) -> Result<(), ServerError> {
        let revoked = self
            .db
            .with_conn(|conn| sessions::revoke_session(conn, session_token, now_unix()))?;

        if let Some(user_id) = revoked {
            info!(user_id, "user signed out");
            self.events.emit(&AuthEvent::SignedOut { user_id });
        }
        Ok(())
    }
}
