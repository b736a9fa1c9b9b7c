// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Gates between demo steps

use crate::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::debug;

const PROMPT: &str = "..... Press Enter to Continue .....\n";

/// Decides when the runner may move on to its next step
#[allow(async_fn_in_trait)]
pub trait Confirm {
    async fn confirm(&mut self) -> Result<()>;
}

/// Continue immediately, used for `--yes` and in tests
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    async fn confirm(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Print a prompt and block until a line has been read.
/// End of input counts as a confirmation.
pub struct Interactive<R, W> {
    input: R,
    output: W,
}

impl Interactive<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Interactive<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R, W> Confirm for Interactive<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn confirm(&mut self) -> Result<()> {
        self.output.write_all(PROMPT.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            debug!("Reached end of input, continuing");
        }
        Ok(())
    }
}
