//! URL slug derived from a post title.

/// Lowercase the trimmed input and replace every run of characters that are
/// not ASCII letters or digits with a single `-`. The slug never starts or
/// ends with `-`.
///
/// `"Intro To AI"` becomes `"intro-to-ai"`. Applying it to its own output is
/// a no-op.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut in_gap = false;
    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
#[path = "slug_test.rs"]
mod tests;
