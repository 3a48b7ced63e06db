use alloc::string::String;

/// Non-empty components of a slash separated path
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Normalized absolute form, `/` for the root directory
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

pub(crate) fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let mut path = String::with_capacity(parent.len() + name.len() + 1);
    path.push_str(parent);
    path.push('/');
    path.push_str(name);
    path
}
