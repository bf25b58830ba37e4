//! Non-echoing input of the operator's private key.
use deployer::Credential;
use eyre::{bail, WrapErr};

/// Text shown before reading the key.
pub const PROMPT: &str = "Enter private key: ";

/// Read the private key from the terminal without echoing it.
///
/// # Errors
///
/// May fail if there is no terminal to read from or nothing was entered.
pub fn read_credential() -> eyre::Result<Credential> {
    let input = rpassword::prompt_password(PROMPT)
        .wrap_err("failed to read private key")?;
    from_input(input)
}

fn from_input(input: String) -> eyre::Result<Credential> {
    let credential = Credential::new(input);
    if credential.is_blank() {
        bail!("no private key entered");
    }
    Ok(credential)
}
