use uuid::Uuid;

/// Returns the cache key holding the item collection of a list.
///
/// The key is the bare hyphenated list ID with no prefix, so entries written
/// by other producers of the same cache remain addressable.
pub fn list_items_key(list_id: Uuid) -> String {
    list_id.to_string()
}

/// Parses a cache key back into the list ID it addresses.
///
/// Returns `None` for keys that are not item-collection keys.
///
/// # Examples
///
/// ```
/// use simpletodo_core::cache::{list_items_key, parse_list_items_key};
/// use uuid::Uuid;
///
/// let id = Uuid::new_v4();
/// assert_eq!(parse_list_items_key(&list_items_key(id)), Some(id));
/// assert_eq!(parse_list_items_key("user:123"), None);
/// ```
pub fn parse_list_items_key(key: &str) -> Option<Uuid> {
    Uuid::parse_str(key).ok()
}
