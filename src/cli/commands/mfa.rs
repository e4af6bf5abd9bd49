use crate::mfa::MfaMechanism;
use clap::{builder::ValueParser, Arg, Command};

pub const CMD_MFA: &str = "mfa";
pub const CMD_STATUS: &str = "status";
pub const CMD_ADD: &str = "add";
pub const CMD_REMOVE: &str = "remove";
pub const CMD_FIELDS: &str = "fields";
pub const ARG_MECHANISM: &str = "mechanism";

#[must_use]
pub fn validator_mechanism() -> ValueParser {
    ValueParser::from(|raw: &str| raw.parse::<MfaMechanism>())
}

fn mechanism_arg(required: bool) -> Arg {
    Arg::new(ARG_MECHANISM)
        .short('m')
        .long(ARG_MECHANISM)
        .help("MFA mechanism: email, sms or totp")
        .required(required)
        .value_parser(validator_mechanism())
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_MFA)
        .about("Inspect and change MFA authenticators in the login flow")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_STATUS)
                .about("Show whether each mechanism is in the login flow")
                .arg(mechanism_arg(false).help("Only show this mechanism (default: all)")),
        )
        .subcommand(
            Command::new(CMD_ADD)
                .about("Add a mechanism to the login flow")
                .arg(mechanism_arg(true)),
        )
        .subcommand(
            Command::new(CMD_REMOVE)
                .about("Remove a mechanism from the login flow")
                .arg(mechanism_arg(true)),
        )
        .subcommand(
            Command::new(CMD_FIELDS)
                .about("List the settings form fields of a mechanism")
                .arg(mechanism_arg(true)),
        )
}
