//! Onboarding flow orchestrator.
//!
//! This module coordinates the progression state machine and its side
//! effects. The machine itself stays pure; everything that touches a port
//! happens here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use mg_core::onboarding::{
    ProgressionAction, ProgressionEvent, ProgressionMachine, ProgressionState,
};
use mg_core::ports::{NavigatorPort, StatusClientPort, StatusError};
use mg_core::routing::Screen;
use mg_core::verification::VerificationOutcome;

use crate::event::{FlowEvent, Notifier};
use crate::usecases::session::SessionStore;

/// Orchestrator that drives onboarding progression state and side effects.
///
/// Dispatches are serialized, so two concurrent reconcile calls collapse
/// into two sequential cycles and the routed-screen memory in the machine
/// keeps the second one from re-issuing a navigation command.
pub struct OnboardingFlow {
    state: Mutex<ProgressionState>,
    dispatch_lock: Mutex<()>,
    closed: AtomicBool,

    session_store: Arc<SessionStore>,
    status_client: Arc<dyn StatusClientPort>,
    navigator: Arc<dyn NavigatorPort>,
    notifier: Notifier<FlowEvent>,
}

impl OnboardingFlow {
    pub fn new(
        session_store: Arc<SessionStore>,
        status_client: Arc<dyn StatusClientPort>,
        navigator: Arc<dyn NavigatorPort>,
        notifier: Notifier<FlowEvent>,
    ) -> Self {
        Self {
            state: Mutex::new(ProgressionState::Loading { routed: None }),
            dispatch_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
            session_store,
            status_client,
            navigator,
            notifier,
        }
    }

    /// Reconcile against the remote status: fetch it and navigate wherever
    /// it says. Called on mount and whenever the status may have changed.
    pub async fn reconcile(&self) -> ProgressionState {
        self.dispatch(ProgressionEvent::ReconcileRequested).await
    }

    /// The user finished the current onboarding screen; re-resolve.
    pub async fn step_completed(&self) -> ProgressionState {
        self.dispatch(ProgressionEvent::StepCompleted).await
    }

    /// Feed a navigation URL observed in the verification web view.
    ///
    /// A completed outcome counts as a finished step; every other outcome
    /// leaves the flow where it is.
    pub async fn verification_callback(&self, url: &str) -> Option<ProgressionState> {
        match VerificationOutcome::from_callback_url(url) {
            Some(VerificationOutcome::Completed) => Some(self.step_completed().await),
            Some(outcome) => {
                info!(?outcome, "verification ended without completion");
                None
            }
            None => None,
        }
    }

    pub async fn current_state(&self) -> ProgressionState {
        self.state.lock().await.clone()
    }

    /// Tear the flow down. In-flight port results are discarded at their
    /// next check and no navigation command fires afterwards.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        info!("onboarding flow shut down");
    }

    async fn dispatch(&self, event: ProgressionEvent) -> ProgressionState {
        // Serialize concurrent dispatch calls. This prevents race conditions
        // where two callers read the same state and execute duplicate
        // actions.
        let _dispatch_guard = self.dispatch_lock.lock().await;

        let span = info_span!("usecase.onboarding_flow.dispatch", event = ?event);
        async {
            let mut current = self.state.lock().await.clone();
            if self.closed.load(Ordering::SeqCst) {
                debug!("flow already shut down, ignoring event");
                return current;
            }

            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.clone();
                let event_name = format!("{:?}", event);
                let (next, actions) = ProgressionMachine::transition(current, event);
                info!(from = ?from, to = ?next, event = %event_name, "progression state transition");
                let follow_up_events = self.execute_actions(actions).await;
                self.set_state_and_emit(next.clone()).await;
                current = next;
                pending_events.extend(follow_up_events);
            }

            current
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<ProgressionAction>) -> Vec<ProgressionEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "progression executing action");
            match action {
                ProgressionAction::FetchStatus => {
                    if let Some(event) = self.fetch_status().await {
                        follow_up_events.push(event);
                    }
                }
                ProgressionAction::Navigate(screen) => {
                    if let Some(event) = self.issue_navigation(screen).await {
                        follow_up_events.push(event);
                    }
                }
                ProgressionAction::ClearSession => {
                    self.session_store.clear().await;
                    self.notifier.emit(FlowEvent::SessionCleared);
                    debug!("progression action ClearSession completed");
                }
            }
        }

        follow_up_events
    }

    async fn fetch_status(&self) -> Option<ProgressionEvent> {
        let token = match self.session_store.get().await {
            Some(token) => token,
            None => {
                // Token vanished mid-flow (forced logout elsewhere); the
                // backend would reject the call anyway.
                warn!("no stored token during reconcile, treating as rejected");
                return Some(ProgressionEvent::StatusRejected);
            }
        };

        let result = self.status_client.check_session(&token).await;
        if self.closed.load(Ordering::SeqCst) {
            debug!("flow shut down mid-fetch, discarding status result");
            return None;
        }

        match result {
            Ok(status) => Some(ProgressionEvent::StatusLoaded(status)),
            Err(StatusError::Auth(reason)) => {
                info!(%reason, "backend rejected the session during reconcile");
                Some(ProgressionEvent::StatusRejected)
            }
            Err(StatusError::Transport(reason)) => {
                warn!(%reason, "status fetch failed, keeping the current screen");
                Some(ProgressionEvent::StatusUnavailable)
            }
        }
    }

    async fn issue_navigation(&self, screen: Screen) -> Option<ProgressionEvent> {
        self.navigator.wait_ready().await;
        if self.closed.load(Ordering::SeqCst) {
            debug!(?screen, "flow shut down before navigation, dropping command");
            return None;
        }

        match self.navigator.navigate(screen).await {
            Ok(()) => {
                self.notifier.emit(FlowEvent::NavigationIssued(screen));
                Some(ProgressionEvent::NavigationDone)
            }
            Err(err) => {
                warn!(error = %err, ?screen, "navigation command failed");
                None
            }
        }
    }

    async fn set_state_and_emit(&self, state: ProgressionState) {
        *self.state.lock().await = state.clone();
        self.notifier.emit(FlowEvent::StateChanged(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use tokio::sync::watch;
    use tokio::time::sleep;

    use mg_core::ports::{NavigatorError, StorageError, TokenStorePort};
    use mg_core::session::{OnboardingStatus, SessionToken, StepValue};

    struct MemoryTokenStore {
        token: StdMutex<Option<String>>,
    }

    impl MemoryTokenStore {
        fn new(token: Option<&str>) -> Self {
            Self {
                token: StdMutex::new(token.map(str::to_string)),
            }
        }

        fn stored(&self) -> Option<String> {
            self.token.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl TokenStorePort for MemoryTokenStore {
        async fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
            *self.token.lock().unwrap() = Some(token.expose().to_string());
            Ok(())
        }

        async fn load(&self) -> Result<Option<SessionToken>, StorageError> {
            let raw = self.token.lock().unwrap().clone();
            Ok(raw.and_then(SessionToken::new))
        }

        async fn clear(&self) -> Result<(), StorageError> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }

    enum Scripted {
        Status(OnboardingStatus),
        AuthRejected,
        Unreachable,
    }

    struct ScriptedStatusClient {
        script: StdMutex<VecDeque<Scripted>>,
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl ScriptedStatusClient {
        fn new<I: IntoIterator<Item = Scripted>>(script: I) -> Self {
            Self {
                script: StdMutex::new(script.into_iter().collect()),
                calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl StatusClientPort for ScriptedStatusClient {
        async fn check_session(
            &self,
            _token: &SessionToken,
        ) -> Result<OnboardingStatus, StatusError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                sleep(delay).await;
            }
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Scripted::Status(status)) => Ok(status),
                Some(Scripted::AuthRejected) => Err(StatusError::Auth("401".into())),
                Some(Scripted::Unreachable) | None => {
                    Err(StatusError::Transport("connect refused".into()))
                }
            }
        }
    }

    struct RecordingNavigator {
        ready_rx: watch::Receiver<bool>,
        sent: StdMutex<Vec<Screen>>,
    }

    impl RecordingNavigator {
        fn ready() -> (Arc<Self>, watch::Sender<bool>) {
            Self::with_readiness(true)
        }

        fn gated() -> (Arc<Self>, watch::Sender<bool>) {
            Self::with_readiness(false)
        }

        fn with_readiness(ready: bool) -> (Arc<Self>, watch::Sender<bool>) {
            let (tx, rx) = watch::channel(ready);
            (
                Arc::new(Self {
                    ready_rx: rx,
                    sent: StdMutex::new(Vec::new()),
                }),
                tx,
            )
        }

        fn sent(&self) -> Vec<Screen> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl NavigatorPort for RecordingNavigator {
        async fn wait_ready(&self) {
            let mut rx = self.ready_rx.clone();
            let _ = rx.wait_for(|ready| *ready).await;
        }

        async fn navigate(&self, screen: Screen) -> Result<(), NavigatorError> {
            self.sent.lock().unwrap().push(screen);
            Ok(())
        }
    }

    fn status(completed: bool, step: f64) -> OnboardingStatus {
        OnboardingStatus {
            authenticated: true,
            onboarding_completed: completed,
            current_step: StepValue::new(step),
        }
    }

    fn flow(
        store: Arc<MemoryTokenStore>,
        client: Arc<ScriptedStatusClient>,
        navigator: Arc<RecordingNavigator>,
    ) -> (Arc<OnboardingFlow>, Notifier<FlowEvent>) {
        let notifier = Notifier::new();
        let flow = Arc::new(OnboardingFlow::new(
            Arc::new(SessionStore::new(store)),
            client,
            navigator,
            notifier.clone(),
        ));
        (flow, notifier)
    }

    #[tokio::test]
    async fn test_reconcile_navigates_to_resolved_screen() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Status(status(
            false, 4.2,
        ))]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client, navigator.clone());

        let state = flow.reconcile().await;

        assert_eq!(
            state,
            ProgressionState::Idle {
                routed: Some(Screen::WelcomeQuestionnaire)
            }
        );
        assert_eq!(navigator.sent(), vec![Screen::WelcomeQuestionnaire]);
    }

    #[tokio::test]
    async fn test_reconcile_twice_with_unchanged_status_navigates_once() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([
            Scripted::Status(status(false, 4.2)),
            Scripted::Status(status(false, 4.2)),
        ]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client.clone(), navigator.clone());

        flow.reconcile().await;
        flow.reconcile().await;

        assert_eq!(client.call_count(), 2);
        assert_eq!(navigator.sent(), vec![Screen::WelcomeQuestionnaire]);
    }

    #[tokio::test]
    async fn test_completed_status_goes_passive() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Status(status(
            true, 6.0,
        ))]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client, navigator.clone());

        let state = flow.reconcile().await;

        assert_eq!(state, ProgressionState::Idle { routed: None });
        assert!(navigator.sent().is_empty());
    }

    #[tokio::test]
    async fn test_step_zero_trusts_the_current_screen() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Status(status(
            false, 0.5,
        ))]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client, navigator.clone());

        let state = flow.reconcile().await;

        assert_eq!(state, ProgressionState::Idle { routed: None });
        assert!(navigator.sent().is_empty());
    }

    #[tokio::test]
    async fn test_auth_rejection_blocks_and_clears_token() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::AuthRejected]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, notifier) = flow(store.clone(), client, navigator.clone());
        let (_sub, mut rx) = notifier.subscribe();

        let state = flow.reconcile().await;

        assert_eq!(state, ProgressionState::Blocked);
        assert_eq!(store.stored(), None);
        assert!(navigator.sent().is_empty());

        let mut saw_session_cleared = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, FlowEvent::SessionCleared) {
                saw_session_cleared = true;
            }
        }
        assert!(saw_session_cleared);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_state_and_token() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Unreachable]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store.clone(), client, navigator.clone());

        let state = flow.reconcile().await;

        assert_eq!(state, ProgressionState::Loading { routed: None });
        assert_eq!(store.stored().as_deref(), Some("tok"));
        assert!(navigator.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_is_treated_as_rejected() {
        let store = Arc::new(MemoryTokenStore::new(None));
        let client = Arc::new(ScriptedStatusClient::new([]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client.clone(), navigator);

        let state = flow.reconcile().await;

        assert_eq!(state, ProgressionState::Blocked);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_step_completed_refetches_and_advances() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([
            Scripted::Status(status(false, 4.0)),
            Scripted::Status(status(false, 5.0)),
        ]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client, navigator.clone());

        flow.reconcile().await;
        let state = flow.step_completed().await;

        assert_eq!(
            state,
            ProgressionState::Idle {
                routed: Some(Screen::WelcomePsychological)
            }
        );
        assert_eq!(
            navigator.sent(),
            vec![Screen::WelcomeQuestionnaire, Screen::WelcomePsychological]
        );
    }

    #[tokio::test]
    async fn test_navigation_waits_for_readiness() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Status(status(
            false, 1.0,
        ))]));
        let (navigator, ready) = RecordingNavigator::gated();
        let (flow, _notifier) = flow(store, client, navigator.clone());

        let task = tokio::spawn({
            let flow = flow.clone();
            async move { flow.reconcile().await }
        });

        // The command must be held back, not dropped, until readiness.
        sleep(Duration::from_millis(30)).await;
        assert!(navigator.sent().is_empty());

        ready.send(true).unwrap();
        let state = task.await.unwrap();

        assert_eq!(
            state,
            ProgressionState::Idle {
                routed: Some(Screen::SignUp)
            }
        );
        assert_eq!(navigator.sent(), vec![Screen::SignUp]);
    }

    #[tokio::test]
    async fn test_shutdown_discards_in_flight_status() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(
            ScriptedStatusClient::new([Scripted::Status(status(false, 4.0))])
                .with_delay(Duration::from_millis(80)),
        );
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client, navigator.clone());

        let task = tokio::spawn({
            let flow = flow.clone();
            async move { flow.reconcile().await }
        });

        sleep(Duration::from_millis(20)).await;
        flow.shutdown();
        task.await.unwrap();

        // The fetch completed after teardown; its result must not navigate.
        assert!(navigator.sent().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_after_shutdown_is_ignored() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Status(status(
            false, 1.0,
        ))]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client.clone(), navigator.clone());

        flow.shutdown();
        let state = flow.reconcile().await;

        assert_eq!(state, ProgressionState::Loading { routed: None });
        assert_eq!(client.call_count(), 0);
        assert!(navigator.sent().is_empty());
    }

    #[tokio::test]
    async fn test_verification_completion_counts_as_step() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([
            Scripted::Status(status(false, 3.0)),
            Scripted::Status(status(false, 4.0)),
        ]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, _notifier) = flow(store, client.clone(), navigator.clone());

        flow.reconcile().await;
        assert_eq!(navigator.sent(), vec![Screen::VerifyIdentity]);

        // Mid-flow vendor navigation is ignored.
        assert!(flow
            .verification_callback("https://verify.vendor.example/step/1")
            .await
            .is_none());
        assert_eq!(client.call_count(), 1);

        let state = flow
            .verification_callback(
                "https://app.mingle.example/verification/callback?status=completed",
            )
            .await;

        assert_eq!(
            state,
            Some(ProgressionState::Idle {
                routed: Some(Screen::WelcomeQuestionnaire)
            })
        );
        assert_eq!(
            navigator.sent(),
            vec![Screen::VerifyIdentity, Screen::WelcomeQuestionnaire]
        );
    }

    #[tokio::test]
    async fn test_state_changes_are_emitted_in_order() {
        let store = Arc::new(MemoryTokenStore::new(Some("tok")));
        let client = Arc::new(ScriptedStatusClient::new([Scripted::Status(status(
            false, 2.0,
        ))]));
        let (navigator, _ready) = RecordingNavigator::ready();
        let (flow, notifier) = flow(store, client, navigator);
        let (_sub, mut rx) = notifier.subscribe();

        flow.reconcile().await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[0],
            FlowEvent::StateChanged(ProgressionState::Loading { routed: None })
        ));
        assert!(matches!(
            events[1],
            FlowEvent::NavigationIssued(Screen::ProfileSetup)
        ));
        assert!(matches!(
            events[2],
            FlowEvent::StateChanged(ProgressionState::Navigating {
                target: Screen::ProfileSetup
            })
        ));
        assert!(matches!(
            events[3],
            FlowEvent::StateChanged(ProgressionState::Idle {
                routed: Some(Screen::ProfileSetup)
            })
        ));
    }
}
