use itertools::Itertools;

/// URL-safe form of a name: lowercase alphanumeric runs joined by `-`
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .join("-")
}

/// Link segment for a task, e.g. `add-index-to-stock-12`
pub fn task_slug(name: &str, id: &str) -> String {
    let name = slug(name);
    if name.is_empty() {
        id.to_string()
    } else {
        format!("{}-{}", name, id)
    }
}

/// The id a slug built by [`task_slug`] ends with
pub fn id_from_slug(slug: &str) -> Option<&str> {
    slug.rsplit('-').next().filter(|id| !id.is_empty())
}
