//! Contract definitions loaded from a compiler artifact or compiled from
//! source.
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use alloy::{hex, json_abi::JsonAbi, primitives::Bytes};
use eyre::{bail, ensure, ContextCompat, WrapErr};
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

/// Name of the Vyper compiler binary looked up on `PATH` by default.
pub const DEFAULT_VYPER: &str = "vyper";

/// A deployable contract definition.
#[derive(Clone, Debug)]
pub struct Artifact {
    /// Where the definition was loaded from.
    pub path: PathBuf,
    /// The contract's JSON ABI.
    pub abi: JsonAbi,
    /// Init (creation) bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

/// External tools used to turn contract sources into artifacts.
#[derive(Clone, Debug)]
pub struct Compiler {
    vyper: PathBuf,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::vyper(DEFAULT_VYPER)
    }
}

/// Layout of `.json` artifacts emitted by common EVM toolchains.
#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// `"bytecode": "0x..."`.
    Hex(String),
    /// `"bytecode": { "object": "0x...", ... }`.
    Object { object: String },
}

impl RawBytecode {
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(code) | RawBytecode::Object { object: code } => {
                code
            }
        }
    }
}

impl Artifact {
    /// Load the contract definition at `path`.
    ///
    /// `.json` files are read as compiler artifacts, `.vy` files are compiled
    /// with `compiler`.
    ///
    /// # Errors
    ///
    /// May error if:
    ///
    /// - The file does not exist or has an unsupported extension.
    /// - The artifact is malformed or its bytecode is empty.
    /// - The compiler can't be executed or rejects the source.
    pub async fn load(
        path: impl AsRef<Path>,
        compiler: &Compiler,
    ) -> eyre::Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("contract artifact not found at {}", path.display());
        }

        let artifact = match path.extension().and_then(OsStr::to_str) {
            Some("json") => {
                let json = tokio::fs::read_to_string(path).await.wrap_err(
                    format!("failed to read {}", path.display()),
                )?;
                Self::from_json(path, &json)?
            }
            Some("vy") => compiler.compile_vyper(path).await?,
            _ => bail!(
                "unsupported contract artifact {}: expected a `.vy` source or a `.json` compiler artifact",
                path.display()
            ),
        };

        info!(
            path = %artifact.path.display(),
            bytecode_len = artifact.bytecode.len(),
            "loaded contract artifact"
        );
        Ok(artifact)
    }

    /// Parse a `.json` compiler artifact. `path` is only recorded.
    ///
    /// # Errors
    ///
    /// May fail if `json` has no `abi` or `bytecode`, or if the bytecode is
    /// not valid non-empty hex.
    pub fn from_json(path: &Path, json: &str) -> eyre::Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json).wrap_err(format!(
            "invalid contract artifact {}",
            path.display()
        ))?;
        let bytecode = decode_bytecode(path, raw.bytecode.as_hex())?;
        Ok(Self { path: path.to_path_buf(), abi: raw.abi, bytecode })
    }

    /// Checks that the ABI declares a constructor taking exactly `inputs`.
    ///
    /// # Errors
    ///
    /// May fail if there is no constructor or its parameter types differ.
    pub fn ensure_constructor(&self, inputs: &[&str]) -> eyre::Result<()> {
        let constructor = self.abi.constructor().with_context(|| {
            format!("{} declares no constructor", self.path.display())
        })?;
        let actual: Vec<&str> =
            constructor.inputs.iter().map(|param| param.ty.as_str()).collect();
        ensure!(
            actual == inputs,
            "{} constructor takes ({}), expected ({})",
            self.path.display(),
            actual.join(","),
            inputs.join(",")
        );
        Ok(())
    }

    /// Checks that the ABI declares every function in `names`.
    ///
    /// # Errors
    ///
    /// May fail on the first function missing from the ABI.
    pub fn ensure_functions(&self, names: &[&str]) -> eyre::Result<()> {
        for name in names {
            ensure!(
                self.abi.function(name).is_some(),
                "{} does not declare function `{name}`",
                self.path.display()
            );
        }
        Ok(())
    }
}

impl Compiler {
    /// Use `bin` as the Vyper compiler.
    pub fn vyper(bin: impl Into<PathBuf>) -> Self {
        Self { vyper: bin.into() }
    }

    /// Compile the Vyper source at `path` into an [`Artifact`].
    ///
    /// Runs the following command:
    ///
    /// ```bash
    /// vyper -f abi,bytecode <path>
    /// ```
    async fn compile_vyper(&self, path: &Path) -> eyre::Result<Artifact> {
        debug!(compiler = %self.vyper.display(), source = %path.display(), "compiling contract");
        let output = Command::new(&self.vyper)
            .args(["-f", "abi,bytecode"])
            .arg(path)
            .output()
            .await
            .wrap_err(format!(
                "failed to execute `{} -f abi,bytecode`",
                self.vyper.display()
            ))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("failed to compile {}:\n{stderr}", path.display());
        }

        parse_vyper_output(path, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Vyper prints one line per requested output format, in request order.
fn parse_vyper_output(path: &Path, stdout: &str) -> eyre::Result<Artifact> {
    let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());
    let abi = lines.next().context("compiler output is missing the ABI")?;
    let bytecode =
        lines.next().context("compiler output is missing the bytecode")?;

    let abi: JsonAbi = serde_json::from_str(abi)
        .wrap_err("failed to parse the ABI emitted by the compiler")?;
    let bytecode = decode_bytecode(path, bytecode)?;
    Ok(Artifact { path: path.to_path_buf(), abi, bytecode })
}

fn decode_bytecode(path: &Path, raw: &str) -> eyre::Result<Bytes> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    let bytecode = hex::decode(raw)
        .wrap_err(format!("invalid bytecode in {}", path.display()))?;
    ensure!(!bytecode.is_empty(), "{} has empty bytecode", path.display());
    Ok(bytecode.into())
}
