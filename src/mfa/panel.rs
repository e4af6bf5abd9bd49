//! Generic MFA settings panel.
//!
//! A panel loads in three dependent steps: list the applications, fetch the
//! detail of the first one, then derive whether the panel's authenticator is in
//! the login flow. Each `load` call is a numbered cycle and only the newest cycle
//! may write state, so a slow response from an older cycle never overwrites a
//! fresher one.
//!
//! Opening the confirmation is only possible once membership is known. Closing it
//! always runs a full new cycle.

use super::{
    errors::{PanelActionError, PanelError},
    form::{FormField, SettingsForm},
    mechanism::{MfaMechanism, PanelCapability},
};
use crate::api::Session;
use crate::features::applications::{
    controller::ApplicationController,
    sequence::{
        add_authenticator, check_authenticator_in_auth_sequence, remove_authenticator,
        LoginFlowState, LOCAL_IDP,
    },
    types::{Application, ApplicationList},
};
use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Idle,
    LoadingApplications,
    ApplicationsLoaded,
    LoadingDetail,
    DetailLoaded,
    MembershipComputed,
    Failed(PanelError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmIntent {
    Add,
    Remove,
}

impl ConfirmIntent {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add to the Login Flow",
            Self::Remove => "Remove from Login Flow",
        }
    }
}

/// Result of one load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoginFlowState),
    /// The listing was empty; detail and membership stay unset.
    NoApplications,
    /// A newer cycle started before this one finished; its results were dropped.
    Superseded,
    Failed(PanelError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAction {
    pub intent: ConfirmIntent,
    pub label: &'static str,
}

/// Snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub mechanism: MfaMechanism,
    pub title: &'static str,
    pub description: &'static str,
    pub phase: PanelPhase,
    pub login_flow: LoginFlowState,
    pub toggle: Option<ToggleAction>,
    pub confirm: Option<ConfirmIntent>,
    pub fields: Option<&'static [FormField]>,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Default)]
struct PanelState {
    phase: PanelPhase,
    applications: Option<ApplicationList>,
    detail: Option<Application>,
    login_flow: LoginFlowState,
    confirm: Option<ConfirmIntent>,
    form: Option<SettingsForm>,
    submitting: bool,
}

pub struct MfaPanel<C: ApplicationController + ?Sized> {
    mechanism: MfaMechanism,
    controller: Arc<C>,
    session: Session,
    cycle: AtomicU64,
    state: Mutex<PanelState>,
}

impl<C: ApplicationController + ?Sized> MfaPanel<C> {
    #[must_use]
    pub fn new(mechanism: MfaMechanism, controller: Arc<C>, session: Session) -> Self {
        let form = match mechanism.capability() {
            PanelCapability::HasForm(fields) => Some(SettingsForm::new(fields)),
            PanelCapability::ToggleOnly => None,
        };

        Self {
            mechanism,
            controller,
            session,
            cycle: AtomicU64::new(0),
            state: Mutex::new(PanelState {
                form,
                ..PanelState::default()
            }),
        }
    }

    #[must_use]
    pub fn mechanism(&self) -> MfaMechanism {
        self.mechanism
    }

    #[must_use]
    pub fn phase(&self) -> PanelPhase {
        self.lock().phase.clone()
    }

    #[must_use]
    pub fn login_flow(&self) -> LoginFlowState {
        self.lock().login_flow
    }

    #[must_use]
    pub fn applications(&self) -> Option<ApplicationList> {
        self.lock().applications.clone()
    }

    #[must_use]
    pub fn application(&self) -> Option<Application> {
        self.lock().detail.clone()
    }

    #[must_use]
    pub fn confirm_intent(&self) -> Option<ConfirmIntent> {
        self.lock().confirm
    }

    /// Run one list → detail → membership cycle.
    #[instrument(skip(self), fields(mechanism = %self.mechanism))]
    pub async fn load(&self) -> LoadOutcome {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.update(cycle, |state| state.phase = PanelPhase::LoadingApplications) {
            return LoadOutcome::Superseded;
        }

        let list = match self
            .controller
            .list_current_applications(&self.session)
            .await
        {
            Ok(list) => list,
            Err(err) => return self.fail(cycle, err.into()),
        };

        let first = list.first().map(|app| app.id.clone());

        let Some(application_id) = first else {
            let stored = self.update(cycle, |state| {
                state.applications = Some(list);
                state.detail = None;
                state.login_flow = LoginFlowState::Unknown;
                state.phase = PanelPhase::ApplicationsLoaded;
            });
            if !stored {
                return LoadOutcome::Superseded;
            }
            info!("no applications listed, skipping detail fetch");
            return LoadOutcome::NoApplications;
        };

        let stored = self.update(cycle, |state| {
            state.applications = Some(list);
            state.phase = PanelPhase::LoadingDetail;
        });
        if !stored {
            return LoadOutcome::Superseded;
        }

        let detail = match self
            .controller
            .get_application(&self.session, &application_id)
            .await
        {
            Ok(detail) => detail,
            Err(err) => return self.fail(cycle, err.into()),
        };

        let stored = self.update(cycle, |state| {
            state.detail = Some(detail.clone());
            state.phase = PanelPhase::DetailLoaded;
        });
        if !stored {
            return LoadOutcome::Superseded;
        }

        let membership =
            check_authenticator_in_auth_sequence(&detail, self.mechanism.authenticator_id());
        let login_flow = LoginFlowState::from(membership);

        let stored = self.update(cycle, |state| {
            state.login_flow = login_flow;
            state.phase = PanelPhase::MembershipComputed;
        });
        if !stored {
            return LoadOutcome::Superseded;
        }

        debug!("login flow state for {}: {:?}", application_id, login_flow);

        LoadOutcome::Loaded(login_flow)
    }

    /// Open the add/remove confirmation matching the current membership.
    ///
    /// # Errors
    /// Returns `PanelActionError::NotReady` unless membership has been computed.
    pub fn open_confirm(&self) -> Result<ConfirmIntent, PanelActionError> {
        let mut state = self.lock();
        if state.phase != PanelPhase::MembershipComputed {
            return Err(PanelActionError::NotReady);
        }

        let intent = match state.login_flow {
            LoginFlowState::Unknown => return Err(PanelActionError::NotReady),
            LoginFlowState::InFlow { .. } => ConfirmIntent::Remove,
            LoginFlowState::NotInFlow => ConfirmIntent::Add,
        };
        state.confirm = Some(intent);

        Ok(intent)
    }

    /// Apply the open confirmation's intent to the application's login flow.
    ///
    /// The confirmation stays open; call `close_confirm` to refresh.
    ///
    /// # Errors
    /// Returns a `PanelActionError` if no confirmation is open, the detail is
    /// missing, or the update call fails.
    #[instrument(skip(self), fields(mechanism = %self.mechanism))]
    pub async fn confirm(&self) -> Result<Application, PanelActionError> {
        let (intent, mut application) = {
            let state = self.lock();
            let intent = state.confirm.ok_or(PanelActionError::NoConfirmation)?;
            let application = state.detail.clone().ok_or(PanelActionError::NotReady)?;
            (intent, application)
        };

        let authenticator = self.mechanism.authenticator_id();
        let sequence = &mut application.authentication_sequence;
        let changed = match intent {
            ConfirmIntent::Add => add_authenticator(sequence, LOCAL_IDP, authenticator)?,
            ConfirmIntent::Remove => remove_authenticator(sequence, authenticator)?,
        };

        if !changed {
            warn!(
                "{} already matches the requested login flow, nothing to update",
                authenticator
            );
            return Ok(application);
        }

        let updated = self
            .controller
            .update_authentication_sequence(
                &self.session,
                &application.id,
                &application.authentication_sequence,
            )
            .await
            .map_err(PanelError::from)?;

        info!("{:?} {} on application {}", intent, authenticator, updated.id);

        Ok(updated)
    }

    /// Close the confirmation and reload everything from the application list.
    pub async fn close_confirm(&self) -> LoadOutcome {
        self.lock().confirm = None;
        self.load().await
    }

    /// Set a settings form value.
    ///
    /// # Errors
    /// Returns `PanelActionError::NoForm` for toggle-only mechanisms, or a form error
    /// for unknown fields.
    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), PanelActionError> {
        let mut state = self.lock();
        let form = state.form.as_mut().ok_or(PanelActionError::NoForm)?;
        form.set(name, value)?;
        Ok(())
    }

    #[must_use]
    pub fn can_submit_settings(&self) -> bool {
        self.lock().form.as_ref().is_some_and(SettingsForm::can_submit)
    }

    /// Accept the settings form.
    ///
    /// Marks the panel as submitting and restarts the form. No request is sent: the
    /// settings endpoint for each mechanism is not defined yet.
    ///
    /// # Errors
    /// Returns `PanelActionError::NoForm` for toggle-only mechanisms, or a form error
    /// when the form is pristine, invalid, or already submitting.
    pub fn submit_settings(&self) -> Result<BTreeMap<&'static str, String>, PanelActionError> {
        let mut state = self.lock();
        let form = state.form.as_mut().ok_or(PanelActionError::NoForm)?;
        let values = form.submit()?;
        state.submitting = true;

        warn!(
            "{} settings accepted locally; no settings endpoint is configured",
            self.mechanism
        );

        Ok(values)
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        let state = self.lock();

        // The toggle opens the confirmation, so it only shows when that can succeed.
        let ready = state.phase == PanelPhase::MembershipComputed;
        let toggle = match state.login_flow {
            _ if !ready => None,
            LoginFlowState::Unknown => None,
            LoginFlowState::InFlow { .. } => Some(ConfirmIntent::Remove),
            LoginFlowState::NotInFlow => Some(ConfirmIntent::Add),
        }
        .map(|intent| ToggleAction {
            intent,
            label: intent.label(),
        });

        let error = match &state.phase {
            PanelPhase::Failed(err) if err.is_user_visible() => Some(err.to_string()),
            _ => None,
        };

        PanelView {
            mechanism: self.mechanism,
            title: self.mechanism.title(),
            description: self.mechanism.description(),
            phase: state.phase.clone(),
            login_flow: state.login_flow,
            toggle,
            confirm: state.confirm,
            fields: state.form.as_ref().map(SettingsForm::fields),
            error,
            submitting: state.submitting,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` if `cycle` is still the newest; returns whether it was applied.
    fn update(&self, cycle: u64, change: impl FnOnce(&mut PanelState)) -> bool {
        let mut state = self.lock();
        if self.cycle.load(Ordering::SeqCst) != cycle {
            debug!("dropping results of superseded cycle {}", cycle);
            return false;
        }
        change(&mut state);
        true
    }

    fn fail(&self, cycle: u64, err: PanelError) -> LoadOutcome {
        if err.is_user_visible() {
            warn!("{} panel load failed: {}", self.mechanism, err);
        }
        let stored = self.update(cycle, |state| {
            state.login_flow = LoginFlowState::Unknown;
            state.phase = PanelPhase::Failed(err.clone());
        });
        if stored {
            LoadOutcome::Failed(err)
        } else {
            LoadOutcome::Superseded
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::AppError;
    use crate::features::applications::types::{
        ApplicationSummary, AuthenticationSequence, AuthenticationStep, AuthenticatorOption,
    };
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Notify;

    type Gate = Option<Arc<Notify>>;

    #[derive(Default)]
    struct FakeController {
        lists: Mutex<VecDeque<(Gate, Result<ApplicationList, AppError>)>>,
        details: Mutex<VecDeque<Result<Application, AppError>>>,
        updates: Mutex<Vec<(String, AuthenticationSequence)>>,
        update_error: Mutex<Option<AppError>>,
        list_calls: AtomicU64,
        detail_calls: AtomicU64,
    }

    impl FakeController {
        fn push_list(&self, list: Result<ApplicationList, AppError>) {
            self.lists.lock().unwrap().push_back((None, list));
        }

        fn push_gated_list(&self, gate: Arc<Notify>, list: Result<ApplicationList, AppError>) {
            self.lists.lock().unwrap().push_back((Some(gate), list));
        }

        fn push_detail(&self, detail: Result<Application, AppError>) {
            self.details.lock().unwrap().push_back(detail);
        }

        fn list_calls(&self) -> u64 {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn detail_calls(&self) -> u64 {
            self.detail_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ApplicationController for FakeController {
        async fn list_current_applications(
            &self,
            _session: &Session,
        ) -> Result<ApplicationList, AppError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let (gate, result) = self
                .lists
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected list call");
            if let Some(gate) = gate {
                gate.notified().await;
            }
            result
        }

        async fn get_application(
            &self,
            _session: &Session,
            application_id: &str,
        ) -> Result<Application, AppError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            let detail = self
                .details
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected detail call")?;
            assert_eq!(detail.id, application_id);
            Ok(detail)
        }

        async fn update_authentication_sequence(
            &self,
            _session: &Session,
            application_id: &str,
            sequence: &AuthenticationSequence,
        ) -> Result<Application, AppError> {
            if let Some(err) = self.update_error.lock().unwrap().take() {
                return Err(err);
            }
            self.updates
                .lock()
                .unwrap()
                .push((application_id.to_string(), sequence.clone()));
            Ok(Application {
                id: application_id.to_string(),
                name: String::new(),
                description: None,
                authentication_sequence: sequence.clone(),
            })
        }
    }

    fn session() -> Session {
        Session::new(SecretString::from("token".to_string()), "org1")
    }

    fn list_of(ids: &[&str]) -> ApplicationList {
        ApplicationList {
            total_results: ids.len() as u64,
            start_index: None,
            count: None,
            applications: ids
                .iter()
                .map(|id| ApplicationSummary {
                    id: (*id).to_string(),
                    name: (*id).to_string(),
                    description: None,
                    self_link: None,
                })
                .collect(),
        }
    }

    fn app_with_steps(id: &str, steps: &[&[&str]]) -> Application {
        Application {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            authentication_sequence: AuthenticationSequence {
                sequence_type: Some("USER_DEFINED".to_string()),
                steps: steps
                    .iter()
                    .enumerate()
                    .map(|(index, ids)| AuthenticationStep {
                        id: index as u32 + 1,
                        options: ids
                            .iter()
                            .map(|id| AuthenticatorOption {
                                idp: LOCAL_IDP.to_string(),
                                authenticator: (*id).to_string(),
                            })
                            .collect(),
                    })
                    .collect(),
                subject_step_id: Some(1),
                attribute_step_id: Some(1),
            },
        }
    }

    fn panel(mechanism: MfaMechanism, fake: &Arc<FakeController>) -> MfaPanel<FakeController> {
        MfaPanel::new(mechanism, Arc::clone(fake), session())
    }

    #[tokio::test]
    async fn empty_listing_skips_detail_and_shows_no_toggle() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(ApplicationList::default()));
        let panel = panel(MfaMechanism::Email, &fake);

        assert_eq!(panel.load().await, LoadOutcome::NoApplications);
        assert_eq!(fake.detail_calls(), 0);
        assert_eq!(panel.login_flow(), LoginFlowState::Unknown);
        assert!(panel.application().is_none());

        let view = panel.view();
        assert_eq!(view.phase, PanelPhase::ApplicationsLoaded);
        assert!(view.toggle.is_none());
        assert!(view.error.is_none());
    }

    #[tokio::test]
    async fn absent_authenticator_offers_add() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["sms-otp"]])));
        let panel = panel(MfaMechanism::Email, &fake);

        assert_eq!(
            panel.load().await,
            LoadOutcome::Loaded(LoginFlowState::NotInFlow)
        );
        let view = panel.view();
        assert_eq!(view.phase, PanelPhase::MembershipComputed);
        assert_eq!(
            view.toggle,
            Some(ToggleAction {
                intent: ConfirmIntent::Add,
                label: "Add to the Login Flow"
            })
        );
    }

    #[tokio::test]
    async fn present_authenticator_offers_remove() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["sms-otp"]])));
        let panel = panel(MfaMechanism::Sms, &fake);

        assert_eq!(
            panel.load().await,
            LoadOutcome::Loaded(LoginFlowState::InFlow { step_index: 0 })
        );
        assert_eq!(
            panel.view().toggle.map(|toggle| toggle.label),
            Some("Remove from Login Flow")
        );
    }

    #[tokio::test]
    async fn only_first_application_is_inspected() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1", "A2"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"], &["totp"]])));
        let panel = panel(MfaMechanism::Totp, &fake);

        assert_eq!(
            panel.load().await,
            LoadOutcome::Loaded(LoginFlowState::InFlow { step_index: 1 })
        );
        assert_eq!(fake.detail_calls(), 1);
    }

    #[tokio::test]
    async fn list_failure_lands_in_failed_phase() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Err(AppError::Network("refused".to_string())));
        let panel = panel(MfaMechanism::Email, &fake);

        let outcome = panel.load().await;
        assert!(matches!(
            outcome,
            LoadOutcome::Failed(PanelError::TransientFetch(_))
        ));
        let view = panel.view();
        assert!(matches!(view.phase, PanelPhase::Failed(_)));
        assert!(view.error.unwrap().contains("failed to load applications"));
        assert!(view.toggle.is_none());
        assert_eq!(fake.detail_calls(), 0);
    }

    #[tokio::test]
    async fn detail_not_found_is_silent() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Err(AppError::Http {
            status: 404,
            message: "missing".to_string(),
        }));
        let panel = panel(MfaMechanism::Email, &fake);

        assert_eq!(
            panel.load().await,
            LoadOutcome::Failed(PanelError::NotFound)
        );
        let view = panel.view();
        assert_eq!(view.phase, PanelPhase::Failed(PanelError::NotFound));
        assert!(view.error.is_none());
        assert!(view.toggle.is_none());
    }

    #[tokio::test]
    async fn stale_cycle_results_are_discarded() {
        let fake = Arc::new(FakeController::default());
        let gate = Arc::new(Notify::new());
        fake.push_gated_list(gate.clone(), Ok(list_of(&["OLD"])));
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"], &["email-otp"]])));

        let panel = Arc::new(panel(MfaMechanism::Email, &fake));
        let slow = {
            let panel = Arc::clone(&panel);
            tokio::spawn(async move { panel.load().await })
        };

        tokio::time::timeout(Duration::from_secs(5), async {
            while fake.list_calls() < 1 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        assert_eq!(
            panel.load().await,
            LoadOutcome::Loaded(LoginFlowState::InFlow { step_index: 1 })
        );

        gate.notify_one();
        assert_eq!(slow.await.unwrap(), LoadOutcome::Superseded);

        assert_eq!(fake.detail_calls(), 1);
        assert_eq!(panel.applications().unwrap().applications[0].id, "A1");
        assert_eq!(
            panel.login_flow(),
            LoginFlowState::InFlow { step_index: 1 }
        );
        assert_eq!(panel.phase(), PanelPhase::MembershipComputed);
    }

    #[tokio::test]
    async fn confirm_requires_computed_membership() {
        let fake = Arc::new(FakeController::default());
        let panel = panel(MfaMechanism::Totp, &fake);

        assert_eq!(panel.open_confirm(), Err(PanelActionError::NotReady));
        assert_eq!(
            panel.confirm().await.unwrap_err(),
            PanelActionError::NoConfirmation
        );
    }

    #[tokio::test]
    async fn failed_reload_hides_toggle() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"], &["sms-otp"]])));
        fake.push_list(Err(AppError::Network("refused".to_string())));
        let panel = panel(MfaMechanism::Sms, &fake);

        assert!(matches!(panel.load().await, LoadOutcome::Loaded(_)));
        assert!(panel.view().toggle.is_some());

        assert!(matches!(panel.load().await, LoadOutcome::Failed(_)));
        let view = panel.view();
        assert!(view.toggle.is_none());
        assert!(view.error.is_some());
        assert_eq!(view.login_flow, LoginFlowState::Unknown);
        assert_eq!(panel.open_confirm(), Err(PanelActionError::NotReady));
    }

    #[tokio::test]
    async fn reload_in_progress_hides_toggle() {
        let fake = Arc::new(FakeController::default());
        let gate = Arc::new(Notify::new());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"], &["totp"]])));
        fake.push_gated_list(gate.clone(), Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"], &["totp"]])));

        let panel = Arc::new(panel(MfaMechanism::Totp, &fake));
        panel.load().await;
        assert!(panel.view().toggle.is_some());

        let reload = {
            let panel = Arc::clone(&panel);
            tokio::spawn(async move { panel.load().await })
        };
        tokio::time::timeout(Duration::from_secs(5), async {
            while fake.list_calls() < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        assert_eq!(panel.phase(), PanelPhase::LoadingApplications);
        assert!(panel.view().toggle.is_none());
        assert_eq!(panel.open_confirm(), Err(PanelActionError::NotReady));

        gate.notify_one();
        assert_eq!(
            reload.await.unwrap(),
            LoadOutcome::Loaded(LoginFlowState::InFlow { step_index: 1 })
        );
        assert_eq!(
            panel.view().toggle.map(|toggle| toggle.intent),
            Some(ConfirmIntent::Remove)
        );
    }

    #[tokio::test]
    async fn add_flow_updates_sequence_and_refetches() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"]])));
        let panel = panel(MfaMechanism::Totp, &fake);

        panel.load().await;
        assert_eq!(panel.open_confirm(), Ok(ConfirmIntent::Add));
        assert_eq!(panel.view().confirm, Some(ConfirmIntent::Add));

        let updated = panel.confirm().await.unwrap();
        assert_eq!(updated.authentication_sequence.steps.len(), 2);
        {
            let updates = fake.updates.lock().unwrap();
            assert_eq!(updates.len(), 1);
            assert_eq!(updates[0].0, "A1");
        }

        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(updated));
        assert_eq!(
            panel.close_confirm().await,
            LoadOutcome::Loaded(LoginFlowState::InFlow { step_index: 1 })
        );
        assert_eq!(fake.list_calls(), 2);
        assert_eq!(fake.detail_calls(), 2);
        assert!(panel.confirm_intent().is_none());
        assert_eq!(
            panel.view().toggle.map(|toggle| toggle.intent),
            Some(ConfirmIntent::Remove)
        );
    }

    #[tokio::test]
    async fn remove_flow_sends_sequence_without_authenticator() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"], &["sms-otp"]])));
        let panel = panel(MfaMechanism::Sms, &fake);

        panel.load().await;
        assert_eq!(panel.open_confirm(), Ok(ConfirmIntent::Remove));
        panel.confirm().await.unwrap();

        let updates = fake.updates.lock().unwrap();
        let (_, sequence) = &updates[0];
        assert_eq!(sequence.steps.len(), 1);
        assert!(sequence.steps[0].authenticators().all(|id| id != "sms-otp"));
    }

    #[tokio::test]
    async fn failed_update_keeps_confirmation_open() {
        let fake = Arc::new(FakeController::default());
        fake.push_list(Ok(list_of(&["A1"])));
        fake.push_detail(Ok(app_with_steps("A1", &[&["basic"]])));
        *fake.update_error.lock().unwrap() = Some(AppError::Http {
            status: 400,
            message: "invalid sequence".to_string(),
        });
        let panel = panel(MfaMechanism::Email, &fake);

        panel.load().await;
        panel.open_confirm().unwrap();
        let err = panel.confirm().await.unwrap_err();
        assert!(matches!(
            err,
            PanelActionError::Panel(PanelError::FatalConfig(_))
        ));
        assert_eq!(panel.confirm_intent(), Some(ConfirmIntent::Add));
    }

    #[tokio::test]
    async fn settings_submit_is_local_only() {
        let fake = Arc::new(FakeController::default());
        let panel = panel(MfaMechanism::Email, &fake);

        assert!(!panel.can_submit_settings());
        for field in crate::mfa::form::EMAIL_FIELDS {
            panel.set_field(field.name, "value").unwrap();
        }
        assert!(panel.can_submit_settings());

        let values = panel.submit_settings().unwrap();
        assert_eq!(values.len(), 7);
        assert!(panel.view().submitting);
        assert!(!panel.can_submit_settings());
        assert_eq!(fake.list_calls(), 0);
        assert!(fake.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn totp_panel_has_no_form() {
        let fake = Arc::new(FakeController::default());
        let panel = panel(MfaMechanism::Totp, &fake);

        assert!(panel.view().fields.is_none());
        assert_eq!(
            panel.set_field("server_host", "smtp.petcare.dev"),
            Err(PanelActionError::NoForm)
        );
        assert_eq!(panel.submit_settings(), Err(PanelActionError::NoForm));
    }

    #[test]
    fn view_before_load_is_idle() {
        let fake = Arc::new(FakeController::default());
        let view = panel(MfaMechanism::Sms, &fake).view();
        assert_eq!(view.phase, PanelPhase::Idle);
        assert_eq!(view.title, "SMS OTP");
        assert_eq!(view.login_flow, LoginFlowState::Unknown);
        assert!(view.toggle.is_none());
        assert_eq!(view.fields.map(<[FormField]>::len), Some(9));
    }
}
