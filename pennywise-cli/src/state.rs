use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn pennywise_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pennywise"))
}

pub fn ensure_pennywise_home() -> Result<PathBuf> {
    let dir = pennywise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Directory for daily chat transcripts and the chat-mode log file.
pub fn ensure_chat_dir() -> Result<PathBuf> {
    let dir = ensure_pennywise_home()?.join("chat");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
