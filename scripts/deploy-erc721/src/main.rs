//! Command line entry point: prompts for a private key, then deploys and
//! probes the mock ERC-721 contract.
use deploy_erc721::{prompt, run, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    let credential = prompt::read_credential()?;

    println!();
    run(&config, &credential, &mut std::io::stdout()).await?;

    Ok(())
}
