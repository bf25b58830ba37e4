use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use deployer::{
    Deployer, DevNode, Identity, Wallet, ANVIL_MASTER_PRIVATE_KEY,
    DEFAULT_FUNDING_WEI, MASTER_PRIVATE_KEY_ENV_VAR_NAME,
    RPC_URL_ENV_VAR_NAME,
};
use eyre::WrapErr;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Type that corresponds to a test account.
#[derive(Clone)]
pub struct Account {
    /// The account's identity.
    pub identity: Identity,
    /// The account's wallet -- a provider signing as [`Self::identity`].
    pub wallet: Wallet,
    url: Url,
}

impl Account {
    /// Create a new account with a default funding of
    /// [`DEFAULT_FUNDING_WEI`].
    ///
    /// # Errors
    ///
    /// May fail if `RPC_URL` is not set or funding the account fails.
    pub async fn new() -> eyre::Result<Self> {
        AccountFactory::create().await
    }

    /// Get a hex-encoded String representing this account's private key.
    #[must_use]
    pub fn pk(&self) -> String {
        alloy::hex::encode(self.identity.signer().to_bytes())
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.identity.address()
    }

    /// The rpc endpoint this account's wallet is connected to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Create a smart contract deployer on behalf of this account.
    #[must_use]
    pub fn as_deployer(&self) -> Deployer {
        Deployer::new(self.wallet.clone(), self.address())
    }

    /// Get gas token balance.
    ///
    /// # Errors
    ///
    /// May fail if the node can't be reached.
    pub async fn balance(&self) -> eyre::Result<U256> {
        self.wallet
            .get_balance(self.address())
            .await
            .wrap_err("should get balance")
    }
}

/// A unit struct used as a synchronization mechanism in
/// [`AccountFactory::lock`].
struct AccountFactory;

impl AccountFactory {
    /// Get access to the factory in a synchronized manner.
    async fn lock() -> MutexGuard<'static, Self> {
        /// Since accounts get funded from a single master account, we must
        /// synchronize account creation (otherwise the nonce will be too
        /// low).
        static SYNC_ACCOUNT_FACTORY: Lazy<Mutex<AccountFactory>> =
            Lazy::new(|| Mutex::new(AccountFactory));

        SYNC_ACCOUNT_FACTORY.lock().await
    }

    /// Create a random account and fund it from the master account.
    async fn create() -> eyre::Result<Account> {
        let _lock = AccountFactory::lock().await;

        let url: Url = std::env::var(RPC_URL_ENV_VAR_NAME)
            .wrap_err(format!("failed to load {RPC_URL_ENV_VAR_NAME}"))?
            .parse()
            .wrap_err(format!("failed to parse {RPC_URL_ENV_VAR_NAME}"))?;

        let node = DevNode::connect(url.clone(), Some(get_master_signer()?));
        let identity = Identity::from_signer(PrivateKeySigner::random());
        node.fund(identity.address(), DEFAULT_FUNDING_WEI)
            .await
            .wrap_err("account's wallet wasn't funded")?;

        debug!(
            address = %identity.address(),
            url = %node.url(),
            "created funded test account"
        );

        let wallet = node.wallet(&identity);
        Ok(Account { identity, wallet, url })
    }
}

/// Get master signer for the chain.
fn get_master_signer() -> eyre::Result<PrivateKeySigner> {
    let key = std::env::var(MASTER_PRIVATE_KEY_ENV_VAR_NAME)
        .unwrap_or_else(|_| ANVIL_MASTER_PRIVATE_KEY.to_owned());
    PrivateKeySigner::from_str(&key).wrap_err("failed to create master signer")
}
