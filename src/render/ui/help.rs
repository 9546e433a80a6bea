//! Key binding summary shown in the help overlay.

/// `(keys, description)` pairs in display order.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("j / Down", "next entry"),
    ("k / Up", "previous entry"),
    ("g / Home", "first entry"),
    ("G / End", "last entry"),
    ("Space / PgDn / +", "scroll log forward"),
    ("PgUp / -", "scroll log back"),
    ("t", "sort by date"),
    ("c", "sort by class"),
    ("a", "sort by category / package"),
    ("r", "reverse sort order"),
    ("/", "search package names"),
    ("n", "find next match"),
    ("dd / d<n>d", "delete selected / next n"),
    ("da / dG / dg", "delete all / to end / to start"),
    ("Ctrl-Z", "suspend"),
    ("h / ?", "this help"),
    ("q", "quit"),
];

/// Width of the key column, in characters.
pub fn key_column_width() -> usize {
    KEY_BINDINGS
        .iter()
        .map(|(keys, _)| keys.chars().count())
        .max()
        .unwrap_or(0)
}

/// Help overlay text, one row per binding.
pub fn help_lines() -> Vec<String> {
    let width = key_column_width();
    KEY_BINDINGS
        .iter()
        .map(|(keys, description)| format!("{keys:<width$}  {description}"))
        .collect()
}
