//! Alias resolution for namespace-qualified names.

/// Resolve a namespace-qualified name to its local part.
///
/// `None` and the empty string are returned unchanged. Otherwise the text
/// after the last `.` is returned, or the whole input when it has no `.`.
///
/// # Example
///
/// ```rust
/// use odata_explorer_sdk::import::alias::resolve_alias_name;
///
/// assert_eq!(resolve_alias_name(Some("NorthwindModel.Customer")), Some("Customer"));
/// assert_eq!(resolve_alias_name(Some("Customer")), Some("Customer"));
/// assert_eq!(resolve_alias_name(None), None);
/// ```
pub fn resolve_alias_name(name: Option<&str>) -> Option<&str> {
    name.map(local_name)
}

/// Non-optional form of [`resolve_alias_name`].
pub fn local_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}
