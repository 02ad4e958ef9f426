/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use anyhow::Context as _;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use uvmerge::{merge_dynamic_images, RowShift, ThreadingPolicy};

#[derive(Parser, Debug)]
#[command(name = "uvmerge", version, about = "Merge white and UV captures into one composite")]
struct Cli {
    /// Capture taken under white light.
    #[arg(long)]
    white: PathBuf,

    /// Capture taken under ultraviolet light.
    #[arg(long)]
    uv: PathBuf,

    /// Sensor offset in rows, positive pushes the white capture down.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    shift: i32,

    /// Output path, format is taken from the extension.
    #[arg(long)]
    out: PathBuf,

    /// Worker count, adaptive when omitted.
    #[arg(long, conflicts_with = "single_thread")]
    threads: Option<NonZeroUsize>,

    /// Run on the calling thread only.
    #[arg(long)]
    single_thread: bool,
}

impl Cli {
    fn threading_policy(&self) -> ThreadingPolicy {
        match (self.single_thread, self.threads) {
            (true, _) => ThreadingPolicy::Single,
            (false, Some(threads)) => ThreadingPolicy::Fixed(threads),
            (false, None) => ThreadingPolicy::Adaptive,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let white = image::open(&cli.white)
        .with_context(|| format!("open white capture '{}'", cli.white.display()))?;
    let uv = image::open(&cli.uv)
        .with_context(|| format!("open uv capture '{}'", cli.uv.display()))?;

    let start_time = Instant::now();
    let composite = merge_dynamic_images(&white, &uv, RowShift(cli.shift), cli.threading_policy())
        .context("merge captures")?;
    tracing::info!(
        width = composite.width(),
        height = composite.height(),
        elapsed = ?start_time.elapsed(),
        "composite ready"
    );

    if let Some(parent) = cli.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create '{}'", parent.display()))?;
        }
    }
    composite
        .save(&cli.out)
        .with_context(|| format!("save composite '{}'", cli.out.display()))?;
    Ok(())
}
