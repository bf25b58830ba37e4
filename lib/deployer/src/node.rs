//! Development EVM nodes a contract gets deployed to.
use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    node_bindings::{Anvil, AnvilInstance},
    primitives::{uint, Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::{ContextCompat, WrapErr};
use tracing::{debug, info};

use crate::credential::Identity;

/// Env var holding the RPC endpoint of an already running dev node.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// Env var holding the key of a pre-funded account on that node.
pub const MASTER_PRIVATE_KEY_ENV_VAR_NAME: &str = "MASTER_PRIVATE_KEY";

/// First pre-funded account of an anvil node.
pub const ANVIL_MASTER_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Amount a fresh caller identity gets funded with: 1 ETH.
pub const DEFAULT_FUNDING_WEI: U256 = uint!(1_000_000_000_000_000_000_U256);

/// Convenience type alias for a provider that signs on behalf of an
/// [`Identity`].
pub type Wallet = DynProvider;

/// An EVM execution environment.
///
/// Either a local anvil node owned by this value, which gets killed once it is
/// dropped, or an external endpoint.
#[derive(Debug)]
pub struct DevNode {
    url: Url,
    master: Option<PrivateKeySigner>,
    anvil: Option<AnvilInstance>,
}

impl DevNode {
    /// Spawn a fresh local anvil node.
    ///
    /// # Errors
    ///
    /// May fail if `anvil` is not installed or doesn't come up.
    pub fn spawn() -> eyre::Result<Self> {
        let anvil = Anvil::new()
            .try_spawn()
            .wrap_err("failed to spawn a local anvil node")?;
        let key = anvil
            .keys()
            .first()
            .context("anvil didn't expose any pre-funded account")?;
        let master = PrivateKeySigner::from_slice(&key.to_bytes())
            .wrap_err("anvil exposed an invalid pre-funded key")?;

        let url = anvil.endpoint_url();
        info!(%url, chain_id = anvil.chain_id(), "spawned local dev node");
        Ok(Self { url, master: Some(master), anvil: Some(anvil) })
    }

    /// Use the node listening at `url`.
    ///
    /// Callers only get funded when `master` is provided. No request is made
    /// until the node is first used.
    #[must_use]
    pub fn connect(url: Url, master: Option<PrivateKeySigner>) -> Self {
        debug!(%url, funded = master.is_some(), "using external node");
        Self { url, master, anvil: None }
    }

    /// The node's RPC endpoint.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the node was spawned by this process.
    #[must_use]
    pub fn is_spawned(&self) -> bool {
        self.anvil.is_some()
    }

    /// Whether callers can be funded from a master account.
    #[must_use]
    pub fn can_fund(&self) -> bool {
        self.master.is_some()
    }

    /// A provider connected to this node that signs as `identity`.
    #[must_use]
    pub fn wallet(&self, identity: &Identity) -> Wallet {
        ProviderBuilder::new()
            .wallet(identity.wallet())
            .connect_http(self.url.clone())
            .erased()
    }

    /// Send `value` gas token from the master account to `to`.
    ///
    /// Returns `false` without sending anything if the node has no master
    /// account.
    ///
    /// # Errors
    ///
    /// May fail if the transfer is rejected or never confirmed.
    pub async fn fund(&self, to: Address, value: U256) -> eyre::Result<bool> {
        let Some(master) = &self.master else {
            return Ok(false);
        };

        let master_wallet = ProviderBuilder::new()
            .wallet(EthereumWallet::from(master.clone()))
            .connect_http(self.url.clone());

        let tx = TransactionRequest::default()
            .with_from(master.address())
            .with_to(to)
            .with_value(value);

        let tx_hash = master_wallet
            .send_transaction(tx)
            .await
            .wrap_err(format!("failed to fund {to}"))?
            .watch()
            .await
            .wrap_err(format!("funding of {to} was not confirmed"))?;

        info!(%to, %value, %tx_hash, "funded account");
        Ok(true)
    }
}
