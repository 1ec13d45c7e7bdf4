pub mod locale;
pub mod theme;

pub use locale::{SUPPORTED_LOCALES, load_locale, set_locale};
pub use theme::{Theme, ThemePreference, ThemeState, detect_system_dark};
