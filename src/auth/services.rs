use tokio::sync::OnceCell;
use tracing::{error, warn};

use crate::{
    auth::password::{hash_password_blocking, verify_password_blocking},
    error::ApiError,
    store::Directory,
};

// Verified against when the account is missing so both failure paths cost
// one Argon2 run.
static DECOY_HASH: OnceCell<String> = OnceCell::const_new();

async fn decoy_hash() -> anyhow::Result<&'static str> {
    let digest = DECOY_HASH
        .get_or_try_init(|| hash_password_blocking("decoy-password".into()))
        .await?;
    Ok(digest.as_str())
}

/// Compute the decoy digest up front so the first unknown-account login
/// does not pay for it.
pub async fn prepare_decoy() -> anyhow::Result<()> {
    decoy_hash().await.map(|_| ())
}

/// Check a payroll identifier and plaintext password against the stored
/// digest. Unknown accounts and wrong passwords fail identically.
pub async fn authenticate(
    store: &dyn Directory,
    identifier: i64,
    password: String,
) -> Result<(), ApiError> {
    let Some(account) = store.find_account_by_employee(identifier).await? else {
        match decoy_hash().await {
            Ok(decoy) => {
                let _ = verify_password_blocking(password, decoy.to_owned()).await;
            }
            Err(e) => error!(error = %e, "decoy digest unavailable"),
        }
        warn!(identifier, "login for unknown account");
        return Err(ApiError::AuthenticationFailed);
    };

    if !verify_password_blocking(password, account.password_hash).await? {
        warn!(identifier, account_id = account.id, "login invalid password");
        return Err(ApiError::AuthenticationFailed);
    }
    Ok(())
}
