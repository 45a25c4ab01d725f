use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::state::{AuthMode, ModalState};
use crate::stats;
use crate::storage::TokenStore;
use crate::ui::View;
use tracing::{debug, info, warn};

/// Owns the four pieces of client state that have to stay consistent: the
/// persisted token, the modal, the rendered task list, and the chart
/// summary. Every user action funnels through one of its methods; nothing
/// else touches the store or the view.
pub struct SessionViewController<V: View> {
    client: ApiClient,
    store: TokenStore,
    modal: ModalState,
    view: V,
}

impl<V: View> SessionViewController<V> {
    pub fn new(client: ApiClient, store: TokenStore, view: V) -> Self {
        Self {
            client,
            store,
            modal: ModalState::default(),
            view,
        }
    }

    /// One-time initialization: apply the auth UI from the persisted token,
    /// then do the initial refresh.
    pub async fn start(&mut self) {
        self.view.apply_auth_ui(self.store.token().is_some());
        self.refresh_tasks().await;
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.token().is_some()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn modal_mode(&self) -> AuthMode {
        self.modal.mode()
    }

    pub fn open_login(&mut self) {
        self.open_modal(AuthMode::Login);
    }

    pub fn open_register(&mut self) {
        self.open_modal(AuthMode::Register);
    }

    fn open_modal(&mut self, mode: AuthMode) {
        self.modal.open(mode);
        self.view.clear_auth_error();
        self.view.show_modal(mode);
    }

    pub fn cancel_auth(&mut self) {
        self.modal.close();
        self.view.hide_modal();
    }

    /// Submits the modal form. Empty email or password fails locally with a
    /// fixed message and no network call; a backend failure leaves the
    /// modal open with the error surfaced inline.
    pub async fn submit_auth(&mut self, email: &str, password: &str, name: &str) {
        if !self.modal.is_open() {
            return;
        }
        self.view.clear_auth_error();
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.view.show_auth_error("Enter email and password");
            return;
        }

        let result = match self.modal.mode() {
            AuthMode::Login => self.client.login(email, password).await,
            AuthMode::Register => self.client.register(email, password, name.trim()).await,
        };

        match result {
            Ok(token) => {
                info!("authenticated");
                if let Err(err) = self.store.set_token(Some(token)).await {
                    warn!("failed to persist session: {err}");
                }
                self.modal.close();
                self.view.hide_modal();
                self.view.apply_auth_ui(true);
                self.refresh_tasks().await;
            }
            Err(err) => self.view.show_auth_error(&err.inline_message()),
        }
    }

    pub async fn logout(&mut self) {
        info!("logged out");
        self.clear_session().await;
    }

    /// The forced logged-out transition, shared by explicit logout and any
    /// authenticated call that observes a 401.
    async fn clear_session(&mut self) {
        if let Err(err) = self.store.set_token(None).await {
            warn!("failed to clear session file: {err}");
        }
        self.view.apply_auth_ui(false);
        self.view.clear_tasks();
        self.view.render_summary(0, 0);
    }

    async fn force_logout(&mut self) {
        info!("session rejected by backend, logging out");
        self.clear_session().await;
    }

    /// Full re-sync of the task list and chart. Idempotent and safe to call
    /// repeatedly; the previous snapshot is always discarded first. Non-401
    /// failures are swallowed by policy (a later refresh recovers), logged
    /// at debug so the swallow stays visible.
    pub async fn refresh_tasks(&mut self) {
        self.view.clear_tasks();
        let Some(token) = self.store.token().map(str::to_owned) else {
            return;
        };

        match self.client.tasks(&token).await {
            Ok(tasks) => {
                let summary = stats::summarize(&tasks);
                self.view.render_tasks(&tasks);
                self.view.render_summary(summary.completed, summary.pending);
            }
            Err(ApiError::Unauthorized) => self.force_logout().await,
            Err(err) => debug!("task refresh failed, keeping view cleared: {err}"),
        }
    }

    pub async fn complete_task(&mut self, id: &str) {
        self.mutate_task(id, true).await;
    }

    pub async fn delete_task(&mut self, id: &str) {
        self.mutate_task(id, false).await;
    }

    /// One mutation request, response body ignored, then an unconditional
    /// full refresh. The refresh is the consistency mechanism; the mutation
    /// outcome only decides what gets logged.
    async fn mutate_task(&mut self, id: &str, complete: bool) {
        let Some(token) = self.store.token().map(str::to_owned) else {
            return;
        };

        let result = if complete {
            self.client.complete_task(&token, id).await
        } else {
            self.client.delete_task(&token, id).await
        };

        match result {
            Ok(()) => {}
            Err(ApiError::Unauthorized) => {
                self.force_logout().await;
                return;
            }
            Err(err) => warn!("task mutation for {id} failed, refreshing anyway: {err}"),
        }

        self.refresh_tasks().await;
    }

    /// Sends the transcript buffer to the backend. Unauthenticated use
    /// opens the login modal; an empty buffer is a no-op that never touches
    /// the busy state. The busy state is restored at a single point after
    /// the awaited call, whatever the outcome.
    pub async fn generate(&mut self) {
        let Some(token) = self.store.token().map(str::to_owned) else {
            self.open_login();
            return;
        };

        let transcript = self.view.transcript();
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }

        self.view.set_busy(true);
        let result = self.client.generate_tasks(&token, transcript).await;
        self.view.set_busy(false);

        match result {
            Ok(()) => {
                self.view.clear_transcript();
                self.refresh_tasks().await;
            }
            Err(ApiError::Unauthorized) => self.force_logout().await,
            Err(err @ ApiError::Network(_)) => {
                debug!("generate failed without a response: {err}");
                self.view.alert("Network error");
            }
            Err(ApiError::Server { body, .. }) => {
                self.view.alert(&format!("Server error: {body}"));
            }
        }
    }
}
