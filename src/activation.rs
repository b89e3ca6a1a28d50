//! Decide whether a freshly opened document should get link decorations

use crate::document::Document;
use crate::grammar;

/// True when `category` is allowed (an empty allow-list allows everything)
/// and `text` contains at least one link-shaped run.
pub fn should_activate(category: Option<&str>, text: &str, allow_list: &[String]) -> bool {
    let allowed = allow_list.is_empty()
        || category.is_some_and(|category| {
            allow_list
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(category))
        });

    allowed && grammar::has_link(text)
}

/// Enable decorations on `document` when [`should_activate`] agrees.
/// Returns whether decorations are now on.
pub fn auto_activate(document: &mut Document, allow_list: &[String], face: &str) -> bool {
    let category = document.category();
    if !should_activate(category.as_deref(), document.text(), allow_list) {
        return false;
    }

    document.enable_decorations(face);
    tracing::debug!(
        category = category.as_deref().unwrap_or("-"),
        links = document.decorator().map_or(0, |d| d.len()),
        "auto-activated link decorations"
    );
    true
}
