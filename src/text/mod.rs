use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random suffix appended to generated slugs.
const SLUG_SUFFIX_LEN: usize = 5;

/// Derive a URL-safe slug fragment from a post title.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and trims leading/trailing dashes. Returns `"post"` for titles
/// with no usable characters so the suffix still produces a valid slug.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() {
        out.push_str("post");
    }
    out
}

/// Random alphanumeric suffix used to keep generated slugs unique.
pub fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Full slug for a title: derived fragment plus random suffix.
pub fn make_slug(title: &str) -> String {
    format!("{}-{}", slugify(title), random_suffix())
}

/// Escape HTML metacharacters so stored content is inert when rendered.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  A  B  "), "a-b");
        assert_eq!(slugify("Rust 2024 -- roadmap"), "rust-2024-roadmap");
    }

    #[test]
    fn slugify_handles_empty_titles() {
        assert_eq!(slugify(""), "post");
        assert_eq!(slugify("!!!"), "post");
    }

    #[test]
    fn make_slug_appends_suffix() {
        let slug = make_slug("Hello World");
        assert!(slug.starts_with("hello-world-"));
        let suffix = slug.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), SLUG_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn make_slug_is_not_deterministic() {
        // Two slugs for the same title should differ in suffix (5 alnum chars,
        // collision odds are negligible for a unit test).
        assert_ne!(make_slug("same title"), make_slug("same title"));
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b \"c\""), "a &amp; b &quot;c&quot;");
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
