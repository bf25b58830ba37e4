//! Procedural macros for the `e2e` test harness.
use proc_macro::TokenStream;


/// Defines an end-to-end test that injects funded test accounts from its
/// arguments.
///
/// Every parameter is created with `<Type>::new().await?` before the body
/// runs, so the test must return a `Result` whose error type accepts
/// `eyre::Report`.
///
/// # Examples
///
/// ```rust,ignore
/// #[e2e::test]
/// async fn mints(alice: Account) -> eyre::Result<()> {
///     let contract = deploy(&alice).await?;
///     let _ = contract._customMint(alice.address(), uint!(10_U256)).send().await?;
///     let balance = contract.balanceOf(alice.address()).call().await?;
///     assert_eq!(balance, uint!(10_U256));
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, input: TokenStream) -> TokenStream {
    test::test(attr, input)
}
