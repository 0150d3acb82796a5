//! Subcommand implementations. Each returns the text to print and whether
//! the command's verdict was positive.

use std::fmt::Write;
use std::path::Path;

use anyhow::Context;

use pow_types::{BlockHash, CompactTarget, ConsensusParams, Target};
use pow_work::{check_proof_of_work, diagnostics, retarget, RetargetRule};

use crate::window::{BlockWindow, WindowFile};

#[derive(Debug)]
pub struct Report {
    pub text: String,
    pub ok: bool,
}

impl Report {
    fn ok(text: String) -> Self {
        Self { text, ok: true }
    }
}

pub fn decode(bits: CompactTarget) -> Report {
    let decoded = bits.decode();
    let mut text = String::new();
    let _ = writeln!(text, "bits     {bits}");
    let _ = writeln!(text, "target   {}", decoded.target);
    let _ = writeln!(text, "negative {}", decoded.negative);
    let _ = write!(text, "overflow {}", decoded.overflow);
    Report::ok(text)
}

pub fn encode(target_hex: &str) -> anyhow::Result<Report> {
    let target = Target::from_hex(target_hex).context("target must be 64 hex digits")?;
    Ok(Report::ok(target.to_compact().to_string()))
}

pub fn check_work(
    hash_hex: &str,
    bits: CompactTarget,
    params: &ConsensusParams,
) -> anyhow::Result<Report> {
    let hash: BlockHash = hash_hex.parse().context("hash must be 64 hex digits")?;
    Ok(match check_proof_of_work(&hash, bits, params) {
        Ok(()) => Report::ok(format!("accept: {hash} meets {bits}")),
        Err(err) => {
            diagnostics::record_rejection(&err);
            Report {
                text: format!("reject: {err}"),
                ok: false,
            }
        }
    })
}

pub fn next_target(path: &Path, params: &ConsensusParams) -> anyhow::Result<Report> {
    let file = WindowFile::load(path)?;
    let window = BlockWindow::new(file.blocks)
        .with_context(|| format!("invalid window file {}", path.display()))?;
    let tip = window.tip();
    let candidate_time = file
        .candidate_time
        .unwrap_or_else(|| tip.time.saturating_add(params.target_spacing));

    let result = retarget(&window, &tip, candidate_time, params).map_err(|err| {
        diagnostics::record_rejection(&err);
        err
    })?;
    diagnostics::record_retarget(&tip, &result);

    let rule = match result.rule {
        RetargetRule::MinDifficultyGap => "min-difficulty gap",
        RetargetRule::InsufficientHistory => "insufficient history",
        RetargetRule::Lwma { floored: false } => "lwma",
        RetargetRule::Lwma { floored: true } => "lwma (floored)",
    };
    let mut text = String::new();
    let _ = writeln!(text, "height {}", u64::from(tip.height) + 1);
    let _ = writeln!(text, "bits   {}", result.bits);
    let _ = write!(text, "rule   {rule}");
    Ok(Report::ok(text))
}

pub fn params(params: &ConsensusParams) -> anyhow::Result<Report> {
    Ok(Report::ok(toml::to_string_pretty(params)?))
}
