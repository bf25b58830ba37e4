//! # Deployer
//!
//! Plumbing for putting a contract on a development EVM node: turning an
//! operator's private key into an [`Identity`], loading or compiling an
//! [`Artifact`], reaching a [`DevNode`] and sending the creation transaction
//! through a [`Deployer`].
//!
//! ```rust,ignore
//! let identity = Identity::from_credential(&credential)?;
//! let artifact = Artifact::load("contracts/erc721_mock.vy", &Compiler::default()).await?;
//!
//! let node = DevNode::spawn()?;
//! node.fund(identity.address(), DEFAULT_FUNDING_WEI).await?;
//!
//! let (_, address) = Deployer::new(node.wallet(&identity), identity.address())
//!     .with_constructor(ctor_args)
//!     .deploy(&artifact)
//!     .await?;
//! ```
mod artifact;
mod credential;
mod deploy;
mod node;
mod receipt;

pub use artifact::{Artifact, Compiler, DEFAULT_VYPER};
pub use credential::{Credential, Identity};
pub use deploy::Deployer;
pub use node::{
    DevNode, Wallet, ANVIL_MASTER_PRIVATE_KEY, DEFAULT_FUNDING_WEI,
    MASTER_PRIVATE_KEY_ENV_VAR_NAME, RPC_URL_ENV_VAR_NAME,
};
pub use receipt::Ext as ReceiptExt;
