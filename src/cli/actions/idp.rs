use crate::cli::globals::GlobalArgs;
use crate::features::idp::{patch_identity_provider, PatchOperation};
use anyhow::{Context, Result};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub idp_id: String,
    pub operations: Vec<PatchOperation>,
}

/// # Errors
/// Returns an error if the PATCH fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = args.globals.client()?;

    let idp = patch_identity_provider(
        &client,
        &args.globals.session,
        &args.idp_id,
        &args.operations,
    )
    .await
    .with_context(|| format!("failed to patch identity provider {}", args.idp_id))?;

    println!("{}", serde_json::to_string_pretty(&idp)?);

    Ok(())
}
