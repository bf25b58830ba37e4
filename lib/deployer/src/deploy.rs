use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::Address,
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use eyre::{bail, WrapErr};
use tracing::info;

use crate::{artifact::Artifact, node::Wallet, receipt::Ext as _};

/// A basic smart contract deployer.
pub struct Deployer {
    wallet: Wallet,
    from: Address,
    ctr_args: Option<Vec<u8>>,
    gas_limit: Option<u64>,
}

impl Deployer {
    /// Deploy on behalf of `from`, signing through `wallet`.
    #[must_use]
    pub fn new(wallet: Wallet, from: Address) -> Self {
        Self { wallet, from, ctr_args: None, gas_limit: None }
    }

    /// Add abi-encoded constructor arguments to the deployer.
    #[must_use]
    pub fn with_constructor(mut self, ctr_args: impl Into<Vec<u8>>) -> Self {
        self.ctr_args = Some(ctr_args.into());
        self
    }

    /// Send the creation transaction with a fixed gas limit instead of an
    /// estimate.
    ///
    /// Init code that reverts makes gas estimation fail before anything is
    /// sent. With a fixed limit the transaction is mined and
    /// [`Deployer::deploy`] reports the reverted receipt.
    #[must_use]
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Deploy `artifact` with the configured constructor arguments.
    /// Consumes currently configured deployer.
    ///
    /// # Errors
    ///
    /// May error if:
    ///
    /// - The creation transaction is rejected by the node.
    /// - The creation transaction reverts.
    /// - The receipt carries no contract address.
    pub async fn deploy(
        self,
        artifact: &Artifact,
    ) -> eyre::Result<(TransactionReceipt, Address)> {
        let mut code = artifact.bytecode.to_vec();
        if let Some(ctr_args) = &self.ctr_args {
            code.extend_from_slice(ctr_args);
        }

        let mut tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(code);
        if let Some(gas_limit) = self.gas_limit {
            tx.set_gas_limit(gas_limit);
        }

        let receipt = self
            .wallet
            .send_transaction(tx)
            .await
            .wrap_err(format!("failed to deploy {}", artifact.path.display()))?
            .get_receipt()
            .await
            .wrap_err(format!(
                "deployment of {} was not confirmed",
                artifact.path.display()
            ))?;

        if !receipt.status() {
            bail!(
                "deployment of {} reverted in transaction {}",
                artifact.path.display(),
                receipt.transaction_hash
            );
        }

        let address = receipt.address()?;
        info!(
            %address,
            tx_hash = %receipt.transaction_hash,
            gas_used = receipt.gas_used,
            "deployed contract"
        );
        Ok((receipt, address))
    }
}

#[cfg(test)]
mod tests {
    use alloy::providers::{Provider, ProviderBuilder};

    use super::*;

    fn deployer() -> Deployer {
        let wallet = ProviderBuilder::new()
            .connect_http("http://127.0.0.1:1".parse().unwrap())
            .erased();
        Deployer::new(wallet, Address::ZERO)
    }

    #[test]
    fn estimates_gas_by_default() {
        let deployer = deployer();
        assert_eq!(deployer.gas_limit, None);
        assert_eq!(deployer.ctr_args, None);
    }

    #[test]
    fn keeps_builder_settings() {
        let deployer =
            deployer().with_constructor(vec![0xAB, 0xCD]).with_gas_limit(1_000_000);
        assert_eq!(deployer.gas_limit, Some(1_000_000));
        assert_eq!(deployer.ctr_args, Some(vec![0xAB, 0xCD]));
    }
}
