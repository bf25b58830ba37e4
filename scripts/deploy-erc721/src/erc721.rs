//! Typed interface of the mock ERC-721 contract and the fixed values it gets
//! deployed and probed with.
#![allow(missing_docs)]
use alloy::{
    primitives::{uint, U256},
    sol,
    sol_types::SolConstructor,
};
use deployer::Artifact;

/// Token name passed to the constructor.
pub const NAME: &str = "TEST 721";
/// Token symbol passed to the constructor.
pub const SYMBOL: &str = "ERC";
/// Base URI passed to the constructor.
pub const BASE_URI: &str = "base_uri_";
/// EIP-712 domain name passed to the constructor.
pub const NAME_EIP712: &str = "name_eip712_";
/// EIP-712 domain version passed to the constructor.
pub const VERSION_EIP712: &str = "version_eip712_";

/// Number of tokens minted to the caller.
pub const MINT_AMOUNT: U256 = uint!(10_U256);

const CONSTRUCTOR_INPUTS: [&str; 5] = ["string"; 5];
const REQUIRED_FUNCTIONS: [&str; 4] =
    ["name", "symbol", "balanceOf", "_customMint"];

sol!(
    #[sol(rpc, all_derives)]
    contract Erc721Mock {
        constructor(
            string memory name_,
            string memory symbol_,
            string memory base_uri_,
            string memory name_eip712_,
            string memory version_eip712_
        );

        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function totalSupply() external view returns (uint256);

        function balanceOf(address owner) external view returns (uint256 balance);
        function ownerOf(uint256 tokenId) external view returns (address owner);

        function _customMint(address owner, uint256 amount) external;

        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
    }
);

/// Abi-encoded constructor arguments the runner deploys with.
#[must_use]
pub fn constructor_args() -> Vec<u8> {
    Erc721Mock::constructorCall {
        name_: NAME.to_owned(),
        symbol_: SYMBOL.to_owned(),
        base_uri_: BASE_URI.to_owned(),
        name_eip712_: NAME_EIP712.to_owned(),
        version_eip712_: VERSION_EIP712.to_owned(),
    }
    .abi_encode()
}

/// Checks that `artifact` can be deployed and probed as an [`Erc721Mock`].
///
/// # Errors
///
/// May fail if the constructor doesn't take five strings or one of the probed
/// functions is missing.
pub fn ensure_interface(artifact: &Artifact) -> eyre::Result<()> {
    artifact.ensure_constructor(&CONSTRUCTOR_INPUTS)?;
    artifact.ensure_functions(&REQUIRED_FUNCTIONS)
}
