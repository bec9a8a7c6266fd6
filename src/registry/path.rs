pub const MENU_SEPARATOR: char = '>';

/// Collapses the `"A > B"` spelling to the canonical `"A>B"`.
pub fn normalize_path(raw: &str) -> String {
    raw.replace(" > ", ">")
}

pub fn segment_count(path: &str) -> usize {
    path.split(MENU_SEPARATOR).count()
}

/// Splits a canonical path into `(category, label)`; `None` unless the path
/// has exactly one separator.
pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let mut segments = path.split(MENU_SEPARATOR);
    let category = segments.next()?;
    let label = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    Some((category, label))
}
