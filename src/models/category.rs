use std::cmp::Ordering;

/// Default category set, in canonical order. Ties and listings follow this order.
pub(crate) const DEFAULT_CATEGORIES: &[&str] = &[
    "Salary",
    "Food",
    "Shopping",
    "Transport",
    "Bills",
    "Investment",
    "Healthcare",
    "Entertainment",
    "Other",
];

/// Map a user-typed name onto the canonical spelling when it matches a default
/// category case-insensitively. Unknown names are kept (trimmed) as new categories.
pub(crate) fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    DEFAULT_CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .map(|c| c.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Position in the canonical order; categories outside the default set rank last.
pub(crate) fn rank(name: &str) -> usize {
    DEFAULT_CATEGORIES
        .iter()
        .position(|c| *c == name)
        .unwrap_or(DEFAULT_CATEGORIES.len())
}

/// Canonical ordering: default categories first, then everything else alphabetically.
pub(crate) fn compare(a: &str, b: &str) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}
