//! # E2E - End-to-end testing against a dev node
//!
//! Tests annotated with [`#[e2e::test]`][test_attribute] receive freshly
//! funded [`Account`]s on the node behind the `RPC_URL` environment variable.
//! The account that funds them is read from `MASTER_PRIVATE_KEY` and defaults
//! to anvil's first pre-funded account.
//!
//! ```rust,ignore
//! #[e2e::test]
//! async fn deploys(alice: Account) -> eyre::Result<()> {
//!     let (receipt, address) = alice.as_deployer().deploy(&artifact).await?;
//!     assert!(receipt.status());
//!     Ok(())
//! }
//! ```
//!
//! [test_attribute]: crate::test
mod account;
mod error;
mod event;

pub use account::Account;
pub use e2e_proc::test;
pub use error::RevertExt;
pub use event::Ext as EventExt;
