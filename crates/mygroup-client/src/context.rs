//! Client-side authentication state

use tracing::{info, warn};

use mygroup_shared::{AuthPayload, UserProfile};

use crate::api::{AuthApi, LoginParams, LoginRequest, LoginTarget, RegisterRequest};
use crate::error::ClientError;
use crate::session::{Session, SessionStore};

/// Where the caller should take the user next. The route is opaque to
/// the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation(pub String);

impl Navigation {
    pub fn home() -> Self {
        Navigation("/".to_string())
    }

    pub fn route(&self) -> &str {
        &self.0
    }
}

/// Current user, loading flag and last error, backed by a [`SessionStore`].
pub struct AuthContext<S: SessionStore> {
    api: AuthApi,
    store: S,
    user: Option<UserProfile>,
    roles: Vec<String>,
    is_loading: bool,
    error: Option<String>,
}

impl<S: SessionStore> AuthContext<S> {
    /// Restores any stored session. An unreadable store leaves the
    /// context signed out.
    pub fn new(api: AuthApi, store: S) -> Self {
        let mut context = Self {
            api,
            store,
            user: None,
            roles: Vec::new(),
            is_loading: true,
            error: None,
        };

        match context.store.load() {
            Ok(Some(session)) => {
                context.user = Some(session.user);
                context.roles = session.roles;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to restore session"),
        }
        context.is_loading = false;
        context
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Logs in through the endpoint named by `tag`.
    pub async fn login(
        &mut self,
        tag: &str,
        credentials: &LoginRequest,
        params: &LoginParams,
    ) -> Result<Navigation, ClientError> {
        self.is_loading = true;
        self.error = None;

        let result = match LoginTarget::from_tag(tag, params) {
            Ok(target) => self.api.login(&target, credentials).await,
            Err(e) => Err(e),
        };
        let result = match result {
            Ok(payload) => self.establish(payload),
            Err(e) => Err(e),
        };

        self.finish(result)
    }

    pub async fn register(&mut self, request: &RegisterRequest) -> Result<Navigation, ClientError> {
        self.is_loading = true;
        self.error = None;

        let result = match self.api.register(request).await {
            Ok(payload) => self.establish(payload),
            Err(e) => Err(e),
        };

        self.finish(result)
    }

    /// Signs out. Local state is cleared even when the server call fails.
    pub async fn logout(&mut self) -> Navigation {
        self.is_loading = true;

        match self.store.load() {
            Ok(Some(session)) => {
                if let Err(e) = self.api.logout(&session.access_token, &session.refresh_token).await {
                    warn!(error = %e, "Logout request failed");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read session during logout"),
        }

        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        self.user = None;
        self.roles.clear();
        self.is_loading = false;
        Navigation::home()
    }

    /// Exchanges the stored refresh token for a new access token and
    /// stores it.
    pub async fn refresh(&mut self) -> Result<String, ClientError> {
        let mut session = self.store.load()?.ok_or(ClientError::NotAuthenticated)?;
        let payload = self.api.refresh(&session.refresh_token).await?;
        session.access_token = payload.access_token;
        self.store.save(&session)?;
        Ok(session.access_token)
    }

    /// Access token of the stored session.
    pub fn access_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.load()?.map(|s| s.access_token))
    }

    fn establish(&mut self, payload: AuthPayload) -> Result<Navigation, ClientError> {
        let navigation = Navigation(payload.dashboard_route.clone());
        let session = Session::from(payload);
        self.store.save(&session)?;

        info!(user_id = session.user.id, route = %navigation.route(), "Signed in");
        self.user = Some(session.user);
        self.roles = session.roles;
        Ok(navigation)
    }

    fn finish(&mut self, result: Result<Navigation, ClientError>) -> Result<Navigation, ClientError> {
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        self.is_loading = false;
        result
    }
}
