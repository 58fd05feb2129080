//! Yandex mystem backend
//!
//! Runs one long-lived `mystem` process in interactive JSON mode. Each
//! message is written as a single line to stdin; mystem answers with one
//! JSON array per input line:
//!
//! ```text
//! [{"analysis":[{"lex":"здравствовать","wt":1,"gr":"V,несов,пе=пов,мн"}],"text":"Здравствуйте"},{"text":"\n"}]
//! ```

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;

use call_insights_core::{Error, MorphAnalysis, MorphAnalyzer, Result, TokenAnalysis};

/// Mystem process configuration
#[derive(Debug, Clone)]
pub struct MystemConfig {
    /// Path or name of the executable
    pub binary: String,
    /// Command line arguments
    pub args: Vec<String>,
}

fn default_args() -> Vec<String> {
    // copy input, grammar info, disambiguation, weights, JSON, UTF-8
    ["-c", "-i", "-d", "--weight", "--format", "json", "-e", "utf-8"]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
}

impl Default for MystemConfig {
    fn default() -> Self {
        Self {
            binary: "mystem".to_string(),
            args: default_args(),
        }
    }
}

impl MystemConfig {
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }
}

struct MystemProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Mystem subprocess backend
pub struct MystemAnalyzer {
    config: MystemConfig,
    process: Mutex<Option<MystemProcess>>,
}

impl MystemAnalyzer {
    /// Start the mystem process
    ///
    /// # Errors
    /// Returns `Error::Analyzer` when the executable cannot be started.
    pub async fn spawn(config: MystemConfig) -> Result<Self> {
        let mut child = Command::new(&config.binary)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::analyzer(format!("failed to start {}: {}", config.binary, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::analyzer("mystem stdin not captured"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::analyzer("mystem stdout not captured"))?;

        tracing::info!(
            binary = %config.binary,
            pid = child.id(),
            "Started mystem analyzer"
        );

        Ok(Self {
            config,
            process: Mutex::new(Some(MystemProcess {
                child,
                stdin,
                stdout: BufReader::new(stdout),
            })),
        })
    }

    pub fn config(&self) -> &MystemConfig {
        &self.config
    }
}

#[async_trait]
impl MorphAnalyzer for MystemAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Vec<TokenAnalysis>> {
        let mut guard = self.process.lock().await;
        let process = guard
            .as_mut()
            .ok_or_else(|| Error::analyzer("mystem analyzer already shut down"))?;

        // one input line per message
        let line = text.replace(['\r', '\n'], " ");
        process.stdin.write_all(line.as_bytes()).await?;
        process.stdin.write_all(b"\n").await?;
        process.stdin.flush().await?;

        let mut output = String::new();
        let read = process.stdout.read_line(&mut output).await?;
        if read == 0 {
            return Err(Error::analyzer("mystem closed its output"));
        }

        parse_mystem_output(&output)
    }

    async fn shutdown(&self) -> Result<()> {
        let Some(process) = self.process.lock().await.take() else {
            return Ok(());
        };
        let MystemProcess {
            mut child,
            stdin,
            stdout,
        } = process;

        // closing stdin ends the interactive session
        drop(stdin);
        drop(stdout);
        let status = child.wait().await?;

        tracing::info!(%status, "Stopped mystem analyzer");
        Ok(())
    }

    fn name(&self) -> &str {
        "mystem"
    }
}

#[derive(Debug, Deserialize)]
struct MystemToken {
    text: String,
    #[serde(default)]
    analysis: Vec<MystemAnalysis>,
}

#[derive(Debug, Deserialize)]
struct MystemAnalysis {
    lex: Option<String>,
    gr: Option<String>,
    wt: Option<f64>,
}

/// Parse one line of mystem JSON output
///
/// Only the first (best) analysis of each token is kept. Tokens with an
/// absent or empty `analysis` list come back unanalyzed.
pub fn parse_mystem_output(line: &str) -> Result<Vec<TokenAnalysis>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<MystemToken> = serde_json::from_str(line)
        .map_err(|e| Error::analyzer(format!("invalid mystem output: {}", e)))?;

    Ok(tokens
        .into_iter()
        .map(|token| TokenAnalysis {
            surface: token.text,
            analysis: token.analysis.into_iter().next().map(|a| MorphAnalysis {
                lemma: a.lex,
                tag: a.gr,
                weight: a.wt,
            }),
        })
        .collect())
}
