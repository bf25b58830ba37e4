//! The deploy-and-probe sequence run against a dev node.
use std::io::Write;

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, U256},
};
use deployer::{
    Artifact, Credential, Deployer, Identity, DEFAULT_FUNDING_WEI,
};
use eyre::{bail, ensure, WrapErr};
use tracing::{debug, info};

use crate::{
    config::Config,
    erc721::{self, Erc721Mock, MINT_AMOUNT},
};

/// Values observed while deploying and probing the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmokeReport {
    /// Address derived from the operator's private key.
    pub caller: Address,
    /// Address of the freshly deployed contract.
    pub contract: Address,
    /// `name()` as returned by the contract.
    pub name: String,
    /// `symbol()` as returned by the contract.
    pub symbol: String,
    /// `balanceOf(caller)` before minting.
    pub balance_before: U256,
    /// `balanceOf(caller)` after minting.
    pub balance_after: U256,
}

/// Deploy the mock ERC-721 contract as the holder of `credential` and probe
/// it, writing one line per observed value to `out`.
///
/// Steps run strictly in order and the first failure aborts the run. The
/// credential and the artifact are both validated before any node is
/// spawned or contacted.
///
/// # Errors
///
/// May error if:
///
/// - `credential` is not a valid private key.
/// - The artifact is missing, fails to compile or doesn't look like the mock.
/// - The node can't be reached, or the deployment or any call is rejected.
/// - Minting didn't raise the caller's balance by [`MINT_AMOUNT`].
pub async fn run<W: Write>(
    config: &Config,
    credential: &Credential,
    out: &mut W,
) -> eyre::Result<SmokeReport> {
    let identity = Identity::from_credential(credential)?;
    let caller = identity.address();
    info!(%caller, "derived caller identity");
    writeln!(out, "Address: {caller}")?;

    let artifact = Artifact::load(&config.artifact, &config.compiler()).await?;
    erc721::ensure_interface(&artifact)?;

    let node = config.node()?;
    info!(url = %node.url(), spawned = node.is_spawned(), "using dev node");
    if node.can_fund() {
        node.fund(caller, DEFAULT_FUNDING_WEI).await?;
    } else {
        debug!(%caller, "no master account, caller pays from its own balance");
    }

    let wallet = node.wallet(&identity);
    let (_, contract) = Deployer::new(wallet.clone(), caller)
        .with_constructor(erc721::constructor_args())
        .deploy(&artifact)
        .await?;
    writeln!(out, "Contract Address: {contract}")?;

    let token = Erc721Mock::new(contract, wallet);

    let name = token.name().call().await.wrap_err("call name")?;
    writeln!(out, "Name: {name}")?;

    let symbol = token.symbol().call().await.wrap_err("call symbol")?;
    writeln!(out, "Symbol: {symbol}")?;

    let balance_before =
        token.balanceOf(caller).call().await.wrap_err("call balanceOf")?;
    writeln!(out, "Balance: {balance_before}")?;

    let receipt = token
        ._customMint(caller, MINT_AMOUNT)
        .send()
        .await
        .wrap_err("send _customMint")?
        .get_receipt()
        .await
        .wrap_err("confirm _customMint")?;
    if !receipt.status() {
        bail!("_customMint reverted in transaction {}", receipt.transaction_hash);
    }
    info!(amount = %MINT_AMOUNT, tx_hash = %receipt.transaction_hash, "minted tokens");

    let balance_after =
        token.balanceOf(caller).call().await.wrap_err("call balanceOf")?;
    writeln!(out, "Balance after mint: {balance_after}")?;

    ensure!(
        balance_after == balance_before + MINT_AMOUNT,
        "balance went from {balance_before} to {balance_after} after minting {MINT_AMOUNT}"
    );

    Ok(SmokeReport {
        caller,
        contract,
        name,
        symbol,
        balance_before,
        balance_after,
    })
}
