//! Effect handlers that talk to the outside world.

use anyhow::{Context, Result, bail};
use url::Url;

/// Schemes the system opener is allowed to receive.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Checks that `href` is an absolute link with an allowed scheme.
pub fn validate_link(href: &str) -> Result<Url> {
    let url = Url::parse(href).with_context(|| format!("Invalid link: {href}"))?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        bail!("Refusing to open {} link: {href}", url.scheme());
    }
    Ok(url)
}

/// Opens a link in a new browser context (or mail client for `mailto:`).
pub fn open_link(href: &str) -> Result<()> {
    let url = validate_link(href)?;
    open::that_detached(url.as_str()).with_context(|| format!("Failed to open {href}"))?;
    tracing::info!(url = %url, "link opened");
    Ok(())
}

/// Reads plain text from the system clipboard.
pub fn read_clipboard() -> Result<String> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .get_text()
        .context("Clipboard holds no text")
}
