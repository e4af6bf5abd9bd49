use crate::api::ApiConfig;
use crate::features::applications::RetryPolicy;
use anyhow::{bail, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use std::time::Duration;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_BOOKING_API_URL: &str = "booking-api-url";
pub const ARG_ACCESS_TOKEN: &str = "access-token";
pub const ARG_ORG_ID: &str = "org-id";
pub const ARG_APPLICATION_NAME: &str = "application-name";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_RETRIES: &str = "retries";

#[derive(Debug, Clone)]
pub struct Options {
    pub config: ApiConfig,
    pub access_token: SecretString,
    pub org_id: String,
    pub application_name: Option<String>,
    pub retry: RetryPolicy,
}

impl Options {
    /// Parse connection and session arguments from matches.
    ///
    /// # Errors
    /// Returns an error if a required argument is missing or a URL is invalid.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        // clap passes "" through when the env var is set but empty
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let Some(api_url) = get_non_empty(ARG_API_URL) else {
            bail!("missing required argument: --{ARG_API_URL}");
        };
        let Some(access_token) = get_non_empty(ARG_ACCESS_TOKEN) else {
            bail!("missing required argument: --{ARG_ACCESS_TOKEN}");
        };
        let Some(org_id) = get_non_empty(ARG_ORG_ID) else {
            bail!("missing required argument: --{ARG_ORG_ID}");
        };

        let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10);
        let attempts = matches.get_one::<u32>(ARG_RETRIES).copied().unwrap_or(3);

        let config = ApiConfig::new(&api_url, get_non_empty(ARG_BOOKING_API_URL).as_deref())?
            .with_timeout(Duration::from_secs(timeout));

        Ok(Self {
            config,
            access_token: SecretString::from(access_token),
            org_id: org_id.trim().to_string(),
            application_name: get_non_empty(ARG_APPLICATION_NAME),
            retry: RetryPolicy {
                attempts,
                ..RetryPolicy::default()
            },
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the identity and application management API")
                .env("PETCARE_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_BOOKING_API_URL)
                .long(ARG_BOOKING_API_URL)
                .help("Base URL of the booking API (defaults to --api-url)")
                .env("PETCARE_BOOKING_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_ACCESS_TOKEN)
                .long(ARG_ACCESS_TOKEN)
                .help("Bearer access token for the remote APIs")
                .env("PETCARE_ACCESS_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_ORG_ID)
                .long(ARG_ORG_ID)
                .help("Organization the session acts for")
                .env("PETCARE_ORG_ID")
                .global(true),
        )
        .arg(
            Arg::new(ARG_APPLICATION_NAME)
                .long(ARG_APPLICATION_NAME)
                .help("Only consider applications with this name")
                .long_help(
                    "Only consider applications with this name. Without it, the first application listed by the server is used.",
                )
                .env("PETCARE_APPLICATION_NAME")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .default_value("10")
                .env("PETCARE_TIMEOUT_SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_RETRIES)
                .long(ARG_RETRIES)
                .help("Attempts for application reads that fail transiently")
                .default_value("3")
                .env("PETCARE_FETCH_RETRIES")
                .global(true)
                .value_parser(clap::value_parser!(u32).range(1..=10)),
        )
}
