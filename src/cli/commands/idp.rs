use crate::features::idp::PatchOperation;
use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const CMD_IDP: &str = "idp";
pub const CMD_PATCH: &str = "patch";
pub const ARG_IDP_ID: &str = "idp-id";
pub const ARG_OPERATION: &str = "op";

#[must_use]
pub fn validator_operation() -> ValueParser {
    ValueParser::from(|raw: &str| raw.parse::<PatchOperation>())
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_IDP)
        .about("Manage identity provider settings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_PATCH)
                .about("Apply REPLACE operations to an identity provider")
                .arg(
                    Arg::new(ARG_IDP_ID)
                        .long(ARG_IDP_ID)
                        .help("Identity provider to patch")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_OPERATION)
                        .long(ARG_OPERATION)
                        .help("Operation as /path=value; value is JSON or a plain string")
                        .action(ArgAction::Append)
                        .required(true)
                        .value_parser(validator_operation()),
                ),
        )
}
