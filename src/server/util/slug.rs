//! URL slug generation for posts.

const MAX_SLUG_BASE_LENGTH: usize = 80;
const EMPTY_SLUG_FALLBACK: &str = "post";

/// Converts a title into a URL-safe slug base.
///
/// ASCII alphanumerics are lowercased and kept, every run of other characters collapses
/// into a single `-`, and the result is trimmed of dashes and truncated to 80 characters.
/// Titles with no usable characters produce `post`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_BASE_LENGTH);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        EMPTY_SLUG_FALLBACK.to_string()
    } else {
        slug.to_string()
    }
}

/// Appends the row id, which makes the slug unique.
pub fn post_slug(title: &str, id: i32) -> String {
    format!("{}-{}", slugify(title), id)
}
