#[cfg(test)]
#[path = "locale_test.rs"]
mod tests;

use eyre::{Context, Result, bail};

use crate::config::constants::DEFAULT_LOCALE;
use crate::storage::{ArcStorage, LOCALE_KEY};

pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh", "ja"];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LOCALES.contains(&code)
}

/// The stored locale, falling back to the default when nothing or an
/// unsupported code is stored.
pub async fn load_locale(storage: &ArcStorage) -> Result<String> {
    let stored = storage
        .get(LOCALE_KEY)
        .await
        .wrap_err("loading locale")?;
    match stored {
        Some(code) if is_supported(&code) => Ok(code),
        Some(code) => {
            log::warn!("Unsupported locale {}, using {}", code, DEFAULT_LOCALE);
            Ok(DEFAULT_LOCALE.to_string())
        }
        None => Ok(DEFAULT_LOCALE.to_string()),
    }
}

pub async fn set_locale(storage: &ArcStorage, code: &str) -> Result<()> {
    if !is_supported(code) {
        bail!(
            "unsupported locale {}, expected one of: {}",
            code,
            SUPPORTED_LOCALES.join(", ")
        );
    }
    storage
        .set(LOCALE_KEY, code)
        .await
        .wrap_err("saving locale")
}
