//! Unique `id` rewriting for icon bodies.
//!
//! Icons with `<defs>` reference their own elements by id. Two copies of the
//! same icon on one page would share those ids, so every render gets a fresh
//! set.

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::{Captures, Regex};
use uuid::Uuid;

static ID_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sid=["']([^"'\s]+)["']"#).expect("valid id pattern"));

/// Returns a prefix unique to this call: `IconifyId-<time>-<salt>-`.
pub fn fresh_prefix() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    let salt = Uuid::new_v4().as_fields().0;
    format!("IconifyId-{seconds:x}-{salt:x}-")
}

/// Rewrites every id in `body`, and the references to it, to a fresh name.
pub fn replace_ids(body: &str) -> String {
    if !ID_ATTRIBUTE.is_match(body) {
        return body.to_owned();
    }
    replace_ids_with(body, &fresh_prefix())
}

/// Rewrites ids to `<prefix><n>`, numbering them in order of appearance.
///
/// An id is replaced wherever it follows `#`, `;` or a quote and is followed
/// by a quote, `)` or a `.name` suffix, which covers `id="x"`, `id='x'`,
/// `url(#x)` and `href="#x"`.
pub fn replace_ids_with(body: &str, prefix: &str) -> String {
    let mut ids: Vec<&str> = Vec::new();
    for caps in ID_ATTRIBUTE.captures_iter(body) {
        if let Some(id) = caps.get(1).map(|m| m.as_str()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    let mut result = body.to_owned();
    for (index, id) in ids.iter().enumerate() {
        let pattern = format!(r#"([#;"']){}(["')]|\.[a-z])"#, regex::escape(id));
        let Ok(reference) = Regex::new(&pattern) else {
            tracing::debug!("skipping unmatchable id {:?}", id);
            continue;
        };
        let replacement = format!("{prefix}{index}");
        result = reference
            .replace_all(&result, |caps: &Captures| {
                format!("{}{}{}", &caps[1], replacement, &caps[2])
            })
            .into_owned();
    }
    result
}
