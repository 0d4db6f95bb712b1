use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    format!("{:x}", h.finalize())
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// `raw` as an RFC 3339 timestamp, or the current time when absent.
pub fn timestamp_or_now(raw: Option<&str>) -> Result<OffsetDateTime> {
    match raw {
        Some(s) => OffsetDateTime::parse(s, &Rfc3339)
            .with_context(|| format!("invalid RFC 3339 timestamp: {s}")),
        None => Ok(OffsetDateTime::now_utc()),
    }
}
