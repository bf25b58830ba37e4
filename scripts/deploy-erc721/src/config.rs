//! Runtime configuration: command line flags with environment fallbacks.
use std::path::PathBuf;

use alloy::transports::http::reqwest::Url;
use clap::Parser;
use deployer::{
    Compiler, Credential, DevNode, Identity, DEFAULT_VYPER,
    MASTER_PRIVATE_KEY_ENV_VAR_NAME, RPC_URL_ENV_VAR_NAME,
};
use eyre::WrapErr;

/// Contract source deployed when no `--artifact` is given, relative to the
/// working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "contracts/erc721_mock.vy";

/// Deploy the mock ERC-721 contract to a dev node and smoke-test it.
///
/// The private key is always read interactively, never from flags or the
/// environment.
#[derive(Clone, Debug, Parser)]
#[command(name = "deploy-erc721", version, about, long_about = None)]
pub struct Config {
    /// Contract source (`.vy`) or compiler artifact (`.json`) to deploy.
    #[arg(long, env = "ARTIFACT_PATH", default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,

    /// RPC endpoint of a running dev node. A local anvil node is spawned
    /// when unset.
    #[arg(long, env = RPC_URL_ENV_VAR_NAME)]
    pub rpc_url: Option<Url>,

    /// Vyper compiler used for `.vy` sources.
    #[arg(long, env = "VYPER", default_value = DEFAULT_VYPER)]
    pub vyper: PathBuf,

    /// Key of a pre-funded account on the node behind `--rpc-url`.
    ///
    /// Only read from `MASTER_PRIVATE_KEY`, see [`Config::load`].
    #[arg(skip)]
    pub master_private_key: Option<Credential>,
}

impl Config {
    /// Parse the command line, then pick up `MASTER_PRIVATE_KEY`.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::parse();
        config.master_private_key = std::env::var(
            MASTER_PRIVATE_KEY_ENV_VAR_NAME,
        )
        .ok()
        .map(Credential::new);
        config
    }

    /// Compilers to turn [`Config::artifact`] into bytecode with.
    #[must_use]
    pub fn compiler(&self) -> Compiler {
        Compiler::vyper(self.vyper.clone())
    }

    /// The node to deploy to.
    ///
    /// # Errors
    ///
    /// May fail if the master key is malformed or a local node can't be
    /// spawned.
    pub fn node(&self) -> eyre::Result<DevNode> {
        let Some(url) = &self.rpc_url else {
            return DevNode::spawn();
        };

        let master = self
            .master_private_key
            .as_ref()
            .map(Identity::from_credential)
            .transpose()
            .wrap_err(format!("invalid {MASTER_PRIVATE_KEY_ENV_VAR_NAME}"))?
            .map(|master| master.signer().clone());
        Ok(DevNode::connect(url.clone(), master))
    }
}
