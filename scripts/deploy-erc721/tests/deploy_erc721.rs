#![cfg(feature = "e2e")]

use std::path::PathBuf;

use alloy::{
    network::ReceiptResponse,
    primitives::{uint, Address, U256},
};
use deploy_erc721::{
    erc721::{self, Erc721Mock, MINT_AMOUNT},
    run, Config,
};
use deployer::{
    Artifact, Compiler, Credential, DEFAULT_FUNDING_WEI, DEFAULT_VYPER,
};
use e2e::{Account, EventExt, RevertExt};

fn source_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../contracts/erc721_mock.vy")
}

async fn deploy(account: &Account) -> eyre::Result<Address> {
    let artifact = Artifact::load(source_path(), &Compiler::default()).await?;
    let (_, address) = account
        .as_deployer()
        .with_constructor(erc721::constructor_args())
        .deploy(&artifact)
        .await?;
    Ok(address)
}

#[e2e::test]
async fn runner_reports_every_step(alice: Account) -> eyre::Result<()> {
    let config = Config {
        artifact: source_path(),
        rpc_url: Some(alice.url().clone()),
        vyper: PathBuf::from(DEFAULT_VYPER),
        master_private_key: None,
    };

    let mut out = Vec::new();
    let report = run(&config, &Credential::new(alice.pk()), &mut out).await?;

    assert_eq!(report.caller, alice.address());
    assert_eq!(report.name, "TEST 721");
    assert_eq!(report.symbol, "ERC");
    assert_eq!(report.balance_before, U256::ZERO);
    assert_eq!(report.balance_after, MINT_AMOUNT);

    let out = String::from_utf8(out)?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            format!("Address: {}", alice.address()),
            format!("Contract Address: {}", report.contract),
            "Name: TEST 721".to_owned(),
            "Symbol: ERC".to_owned(),
            "Balance: 0".to_owned(),
            "Balance after mint: 10".to_owned(),
        ]
    );
    Ok(())
}

#[e2e::test]
async fn reruns_deploy_fresh_contracts(alice: Account) -> eyre::Result<()> {
    let first = deploy(&alice).await?;
    let second = deploy(&alice).await?;
    assert_ne!(first, second);
    Ok(())
}

#[e2e::test]
async fn constructs(alice: Account) -> eyre::Result<()> {
    let contract = Erc721Mock::new(deploy(&alice).await?, &alice.wallet);

    assert_eq!(contract.name().call().await?, erc721::NAME);
    assert_eq!(contract.symbol().call().await?, erc721::SYMBOL);
    assert_eq!(contract.totalSupply().call().await?, U256::ZERO);
    assert_eq!(contract.balanceOf(alice.address()).call().await?, U256::ZERO);
    Ok(())
}

#[e2e::test]
async fn mints_to_caller(alice: Account, bob: Account) -> eyre::Result<()> {
    let contract = Erc721Mock::new(deploy(&alice).await?, &alice.wallet);

    let receipt = contract
        ._customMint(alice.address(), MINT_AMOUNT)
        .send()
        .await?
        .get_receipt()
        .await?;
    assert!(receipt.status());
    assert!(receipt.emits(Erc721Mock::Transfer {
        from: Address::ZERO,
        to: alice.address(),
        tokenId: uint!(9_U256),
    }));

    assert_eq!(contract.balanceOf(alice.address()).call().await?, MINT_AMOUNT);
    assert_eq!(contract.balanceOf(bob.address()).call().await?, U256::ZERO);
    assert_eq!(contract.totalSupply().call().await?, MINT_AMOUNT);
    assert_eq!(contract.ownerOf(U256::ZERO).call().await?, alice.address());
    assert_eq!(
        contract.tokenURI(uint!(3_U256)).call().await?,
        format!("{}3", erc721::BASE_URI)
    );
    Ok(())
}

#[e2e::test]
async fn second_mint_adds_to_balance(alice: Account) -> eyre::Result<()> {
    let contract = Erc721Mock::new(deploy(&alice).await?, &alice.wallet);

    let mint = contract._customMint(alice.address(), MINT_AMOUNT);
    mint.send().await?.watch().await?;
    let before = contract.balanceOf(alice.address()).call().await?;
    mint.send().await?.watch().await?;
    let after = contract.balanceOf(alice.address()).call().await?;

    assert_eq!(after, before + MINT_AMOUNT);
    Ok(())
}

#[e2e::test]
async fn minting_to_zero_address_reverts(alice: Account) -> eyre::Result<()> {
    let contract = Erc721Mock::new(deploy(&alice).await?, &alice.wallet);

    let err = contract
        ._customMint(Address::ZERO, MINT_AMOUNT)
        .send()
        .await
        .expect_err("should not mint to the zero address");
    assert!(err.reverts());
    Ok(())
}

#[e2e::test]
async fn deploying_invalid_bytecode_fails(alice: Account) -> eyre::Result<()> {
    // INVALID opcode: the creation transaction reverts once mined.
    let artifact = Artifact::from_json(
        &source_path(),
        r#"{"abi":[],"bytecode":"0xfe"}"#,
    )?;
    let err = alice
        .as_deployer()
        .with_gas_limit(1_000_000)
        .deploy(&artifact)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("reverted in transaction"));
    Ok(())
}

#[e2e::test]
async fn accounts_pay_for_deployment(alice: Account) -> eyre::Result<()> {
    let funded = alice.balance().await?;
    assert_eq!(funded, DEFAULT_FUNDING_WEI);

    deploy(&alice).await?;

    assert!(alice.balance().await? < funded);
    Ok(())
}
