use crate::cli::globals::GlobalArgs;
use crate::features::applications::{ApplicationController, LoginFlowState};
use crate::mfa::{ConfirmIntent, LoadOutcome, MfaMechanism, MfaPanel, PanelCapability, PanelView};
use anyhow::{anyhow, bail, Result};
use std::fmt::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct StatusArgs {
    pub globals: GlobalArgs,
    pub mechanisms: Vec<MfaMechanism>,
}

#[derive(Debug)]
pub struct ToggleArgs {
    pub globals: GlobalArgs,
    pub mechanism: MfaMechanism,
    pub intent: ConfirmIntent,
}

#[derive(Debug)]
pub struct FieldsArgs {
    pub mechanism: MfaMechanism,
}

/// Load one panel per mechanism and print where each stands.
///
/// # Errors
/// Returns an error if the client cannot be built or a panel fails to load.
pub async fn status(args: StatusArgs) -> Result<()> {
    let controller = Arc::new(args.globals.controller()?);
    let mut failures = 0;

    for mechanism in args.mechanisms {
        let panel = MfaPanel::new(mechanism, Arc::clone(&controller), args.globals.session.clone());
        if let LoadOutcome::Failed(err) = panel.load().await {
            if err.is_user_visible() {
                failures += 1;
            }
        }
        print!("{}", render_view(&panel.view()));
    }

    if failures > 0 {
        bail!("{failures} panel(s) failed to load");
    }

    Ok(())
}

/// Add or remove a mechanism, going through the same confirm flow as the panel.
///
/// # Errors
/// Returns an error if loading, updating, or reloading fails.
pub async fn toggle(args: ToggleArgs) -> Result<()> {
    let controller = Arc::new(args.globals.controller()?);
    let panel = MfaPanel::new(args.mechanism, controller, args.globals.session.clone());

    apply_toggle(&panel, args.intent).await?;
    print!("{}", render_view(&panel.view()));

    Ok(())
}

/// Load, confirm the requested intent, then reload.
///
/// Returns `false` when the login flow already matched the request.
///
/// # Errors
/// Returns an error if there is no application, a load fails, or the update fails.
pub async fn apply_toggle<C: ApplicationController + ?Sized>(
    panel: &MfaPanel<C>,
    intent: ConfirmIntent,
) -> Result<bool> {
    let mechanism = panel.mechanism();

    match panel.load().await {
        LoadOutcome::Loaded(_) => {}
        LoadOutcome::NoApplications => bail!("no application found to configure"),
        LoadOutcome::Failed(err) => return Err(anyhow!(err)),
        LoadOutcome::Superseded => bail!("panel load was superseded"),
    }

    let offered = panel.open_confirm()?;
    if offered != intent {
        info!("{} already matches the requested login flow", mechanism);
        return Ok(false);
    }

    panel.confirm().await?;

    match panel.close_confirm().await {
        LoadOutcome::Loaded(_) => Ok(true),
        LoadOutcome::Failed(err) => Err(anyhow!(err).context("login flow updated but reload failed")),
        other => bail!("unexpected reload outcome: {other:?}"),
    }
}

pub fn fields(args: &FieldsArgs) {
    print!("{}", render_fields(args.mechanism));
}

#[must_use]
pub fn render_view(view: &PanelView) -> String {
    let mut out = String::new();

    let state = match view.login_flow {
        LoginFlowState::InFlow { step_index } => format!("in login flow (step {})", step_index + 1),
        LoginFlowState::NotInFlow => "not in login flow".to_string(),
        LoginFlowState::Unknown => "unknown".to_string(),
    };
    let _ = writeln!(out, "{} [{}]: {}", view.title, view.mechanism, state);
    let _ = writeln!(out, "  {}", view.description);

    if let Some(toggle) = view.toggle {
        let _ = writeln!(out, "  action: {}", toggle.label);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "  error: {error}");
    }

    out
}

#[must_use]
pub fn render_fields(mechanism: MfaMechanism) -> String {
    let mut out = String::new();

    let PanelCapability::HasForm(fields) = mechanism.capability() else {
        let _ = writeln!(out, "{} has no settings form", mechanism.title());
        return out;
    };

    let _ = writeln!(out, "{} settings:", mechanism.title());
    for field in fields {
        let secret = if field.secret { " (secret)" } else { "" };
        let _ = writeln!(out, "  {} - {}{}", field.name, field.label, secret);
        if let Some(helper) = field.helper_text {
            let _ = writeln!(out, "      {helper}");
        }
    }

    out
}
