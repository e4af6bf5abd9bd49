use crate::cli::{
    actions::{booking, idp, mfa, Action},
    commands::{self, api::Options},
    globals::GlobalArgs,
};
use crate::features::idp::PatchOperation;
use crate::mfa::{ConfirmIntent, MfaMechanism};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use serde_json::Value;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::booking::CMD_BOOKING, sub_m)) => booking_handler(sub_m),
        Some((commands::mfa::CMD_MFA, sub_m)) => mfa_handler(sub_m),
        Some((commands::idp::CMD_IDP, sub_m)) => idp_handler(sub_m),
        _ => bail!("missing subcommand, see --help"),
    }
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    Ok(GlobalArgs::new(Options::parse(matches)?))
}

fn booking_handler(matches: &ArgMatches) -> Result<Action> {
    let Some((commands::booking::CMD_UPDATE, sub_m)) = matches.subcommand() else {
        bail!("missing booking subcommand, see --help");
    };

    let booking_id = sub_m
        .get_one::<String>(commands::booking::ARG_BOOKING_ID)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .context("missing required argument: --booking-id")?;

    let payload = sub_m
        .get_one::<String>(commands::booking::ARG_PAYLOAD)
        .map(|raw| parse_payload(raw))
        .transpose()?;

    Ok(Action::BookingUpdate(booking::Args {
        globals: globals(sub_m)?,
        booking_id,
        payload,
    }))
}

/// Inline JSON, or `@path` to read the JSON from a file.
fn parse_payload(raw: &str) -> Result<Value> {
    let json = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload file {path}"))?,
        None => raw.to_string(),
    };

    serde_json::from_str(&json).context("payload is not valid JSON")
}

fn mfa_handler(matches: &ArgMatches) -> Result<Action> {
    let mechanism = |sub_m: &ArgMatches| {
        sub_m
            .get_one::<MfaMechanism>(commands::mfa::ARG_MECHANISM)
            .copied()
    };

    match matches.subcommand() {
        Some((commands::mfa::CMD_STATUS, sub_m)) => Ok(Action::MfaStatus(mfa::StatusArgs {
            globals: globals(sub_m)?,
            mechanisms: mechanism(sub_m).map_or_else(|| MfaMechanism::ALL.to_vec(), |m| vec![m]),
        })),
        Some((name @ (commands::mfa::CMD_ADD | commands::mfa::CMD_REMOVE), sub_m)) => {
            let intent = if name == commands::mfa::CMD_ADD {
                ConfirmIntent::Add
            } else {
                ConfirmIntent::Remove
            };
            Ok(Action::MfaToggle(mfa::ToggleArgs {
                globals: globals(sub_m)?,
                mechanism: mechanism(sub_m).context("missing required argument: --mechanism")?,
                intent,
            }))
        }
        Some((commands::mfa::CMD_FIELDS, sub_m)) => Ok(Action::MfaFields(mfa::FieldsArgs {
            mechanism: mechanism(sub_m).context("missing required argument: --mechanism")?,
        })),
        _ => bail!("missing mfa subcommand, see --help"),
    }
}

fn idp_handler(matches: &ArgMatches) -> Result<Action> {
    let Some((commands::idp::CMD_PATCH, sub_m)) = matches.subcommand() else {
        bail!("missing idp subcommand, see --help");
    };

    let idp_id = sub_m
        .get_one::<String>(commands::idp::ARG_IDP_ID)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .context("missing required argument: --idp-id")?;

    let operations: Vec<PatchOperation> = sub_m
        .get_many::<PatchOperation>(commands::idp::ARG_OPERATION)
        .map(|ops| ops.cloned().collect())
        .unwrap_or_default();
    if operations.is_empty() {
        bail!("missing required argument: --op");
    }

    Ok(Action::IdpPatch(idp::Args {
        globals: globals(sub_m)?,
        idp_id,
        operations,
    }))
}
