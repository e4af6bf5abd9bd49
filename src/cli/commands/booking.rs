use clap::{Arg, Command};

pub const CMD_BOOKING: &str = "booking";
pub const CMD_UPDATE: &str = "update";
pub const ARG_BOOKING_ID: &str = "booking-id";
pub const ARG_PAYLOAD: &str = "payload";

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_BOOKING)
        .about("Manage bookings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Replace a booking with PUT /org/{org-id}/bookings/{booking-id}")
                .arg(
                    Arg::new(ARG_BOOKING_ID)
                        .long(ARG_BOOKING_ID)
                        .help("Booking to update")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_PAYLOAD)
                        .long(ARG_PAYLOAD)
                        .help("JSON body, or @path to read it from a file")
                        .long_help(
                            "JSON body sent as is, or @path to read it from a file. Without it the request has no body.",
                        ),
                ),
        )
}
