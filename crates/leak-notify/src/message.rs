use leak_core::entities::Post;

/// Render the notification text for one post.
///
/// The description, when present, goes on its own line below the title.
#[must_use]
pub fn render(entity: &str, post: &Post) -> String {
    match post.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => {
            format!("New post from {entity}: {}\n{description}", post.title)
        }
        _ => format!("New post from {entity}: {}", post.title),
    }
}
