use std::sync::Arc;

use psikotes_core::model::{Identity, MIN_PASSWORD_LEN, RegistrationDraft, Role, UserId};
use storage::repository::UserRepository;
use storage::session_store::{CURRENT_USER_KEY, SessionStore};
use storage::StorageError;

use crate::error::AuthError;

//
// ─── SESSION CONTEXT ───────────────────────────────────────────────────────────
//

/// The logged-in identity, handed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    identity: Identity,
}

impl SessionContext {
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.identity.role()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.identity.display_name()
    }
}

/// Raw login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

//
// ─── AUTH SERVICE ──────────────────────────────────────────────────────────────
//

/// Mock-grade authentication: accounts are looked up by email and any
/// password of sufficient length is accepted.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self { users, session }
    }

    /// Log in and remember the identity for this session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields`, `UserNotFound`, `InvalidPassword` or
    /// `RoleMismatch` for rejected input, and storage errors otherwise.
    pub async fn login(&self, form: LoginForm) -> Result<SessionContext, AuthError> {
        let email = form.email.trim();
        let Some(role) = form.role else {
            return Err(AuthError::MissingFields);
        };
        if email.is_empty() || form.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let identity = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidPassword);
        }
        if identity.role() != role {
            tracing::debug!(email, "login rejected: role mismatch");
            return Err(AuthError::RoleMismatch);
        }

        let payload = serde_json::to_string(&identity)?;
        self.session.set(CURRENT_USER_KEY, payload)?;
        tracing::info!(email, role = %identity.role(), "user logged in");
        Ok(SessionContext::new(identity))
    }

    /// Create a new account. The caller still has to log in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Registration` for invalid form input and
    /// `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(&self, draft: RegistrationDraft) -> Result<Identity, AuthError> {
        let validated = draft.validate()?;
        if self.users.find_by_email(&validated.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let identity = validated.into_identity(UserId::generate());
        match self.users.insert_user(&identity).await {
            Ok(()) => {}
            Err(StorageError::Conflict) => return Err(AuthError::EmailTaken),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(email = identity.email(), role = %identity.role(), "user registered");
        Ok(identity)
    }

    /// End the session. The context is consumed so it cannot be reused.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session store is unavailable.
    pub fn logout(&self, ctx: SessionContext) -> Result<(), AuthError> {
        self.session.remove(CURRENT_USER_KEY)?;
        tracing::info!(email = ctx.identity().email(), "user logged out");
        Ok(())
    }

    /// The identity remembered for this session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the stored payload cannot be decoded.
    pub fn current(&self) -> Result<Option<SessionContext>, AuthError> {
        let Some(raw) = self.session.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        let identity: Identity = serde_json::from_str(&raw)?;
        Ok(Some(SessionContext::new(identity)))
    }

    #[must_use]
    pub fn gate(&self) -> RoleGate {
        RoleGate::new(self.clone())
    }
}

//
// ─── ROLE GATE ─────────────────────────────────────────────────────────────────
//

/// Where a denied visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRedirect {
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Granted(SessionContext),
    Redirect(GateRedirect),
}

/// Decides whether the current session may see a page requiring `required`.
#[derive(Clone)]
pub struct RoleGate {
    auth: AuthService,
}

impl RoleGate {
    #[must_use]
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    /// Missing or unreadable sessions and wrong roles all redirect to login.
    #[must_use]
    pub fn check(&self, required: Option<Role>) -> GateDecision {
        let ctx = match self.auth.current() {
            Ok(Some(ctx)) => ctx,
            Ok(None) => return GateDecision::Redirect(GateRedirect::Login),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable session");
                return GateDecision::Redirect(GateRedirect::Login);
            }
        };

        match required {
            Some(role) if ctx.role() != role => GateDecision::Redirect(GateRedirect::Login),
            _ => GateDecision::Granted(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psikotes_core::model::RegistrationError;
    use storage::Storage;

    async fn service() -> AuthService {
        let storage = Storage::in_memory();
        let admin = Identity::new(UserId::generate(), "admin@demo.com", "Admin Demo", Role::Admin);
        storage.users.insert_user(&admin).await.unwrap();
        AuthService::new(storage.users, storage.session)
    }

    fn form(email: &str, password: &str, role: Option<Role>) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    #[tokio::test]
    async fn login_requires_every_field() {
        let auth = service().await;
        let err = auth.login(form("admin@demo.com", "", Some(Role::Admin))).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
        let err = auth.login(form("admin@demo.com", "password123", None)).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn login_checks_user_password_and_role() {
        let auth = service().await;
        assert!(matches!(
            auth.login(form("ghost@demo.com", "password123", Some(Role::Admin))).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            auth.login(form("admin@demo.com", "12345", Some(Role::Admin))).await,
            Err(AuthError::InvalidPassword)
        ));
        assert!(matches!(
            auth.login(form("admin@demo.com", "password123", Some(Role::User))).await,
            Err(AuthError::RoleMismatch)
        ));
        assert!(auth.current().unwrap().is_none());
    }

    #[tokio::test]
    async fn login_then_logout_round_trip() {
        let auth = service().await;
        let ctx = auth
            .login(form(" admin@demo.com ", "password123", Some(Role::Admin)))
            .await
            .unwrap();
        assert_eq!(ctx.display_name(), "Admin Demo");
        assert_eq!(auth.current().unwrap(), Some(ctx.clone()));

        auth.logout(ctx).unwrap();
        assert!(auth.current().unwrap().is_none());
    }

    #[tokio::test]
    async fn register_rejects_duplicates_and_bad_forms() {
        let auth = service().await;
        let draft = RegistrationDraft {
            full_name: "Budi".into(),
            email: "admin@demo.com".into(),
            password: "rahasia".into(),
            confirm_password: "rahasia".into(),
            role: Some(Role::User),
        };
        assert!(matches!(
            auth.register(draft.clone()).await,
            Err(AuthError::EmailTaken)
        ));

        let mut bad = draft.clone();
        bad.email = "budi".into();
        assert!(matches!(
            auth.register(bad).await,
            Err(AuthError::Registration(RegistrationError::InvalidEmail))
        ));

        let mut fresh = draft;
        fresh.email = "budi@example.com".into();
        let identity = auth.register(fresh).await.unwrap();
        assert_eq!(identity.role(), Role::User);
        assert!(auth.current().unwrap().is_none());
    }

    #[tokio::test]
    async fn gate_redirects_without_session_or_on_role_mismatch() {
        let auth = service().await;
        let gate = auth.gate();
        assert_eq!(
            gate.check(Some(Role::Admin)),
            GateDecision::Redirect(GateRedirect::Login)
        );

        auth.login(form("admin@demo.com", "password123", Some(Role::Admin)))
            .await
            .unwrap();
        assert!(matches!(gate.check(Some(Role::Admin)), GateDecision::Granted(_)));
        assert!(matches!(gate.check(None), GateDecision::Granted(_)));
        assert_eq!(
            gate.check(Some(Role::User)),
            GateDecision::Redirect(GateRedirect::Login)
        );
    }
}
