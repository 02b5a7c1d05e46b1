//! Languages the codex is exported in.

/// Known language codes and their display names, in menu order.
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("zh-hans", "简体中文")];

/// Language used when no setting has been saved.
pub const DEFAULT_LANGUAGE: &str = "zh-hans";

/// Display name for a language code, if known.
pub fn language_label(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, label)| *label)
}
