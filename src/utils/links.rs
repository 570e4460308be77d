/// Join URL fragments with exactly one slash between them.
///
/// Query strings on any fragment are collected and appended to the end, so
/// `join_links(&["admin?stage=Live", "pages/edit"])` yields
/// `admin/pages/edit?stage=Live`. Empty fragments are skipped.
pub fn join_links<S: AsRef<str>>(parts: &[S]) -> String {
    let mut path = String::new();
    let mut queries: Vec<&str> = Vec::new();

    for part in parts {
        let (segment, query) = match part.as_ref().split_once('?') {
            Some((segment, query)) => (segment, Some(query)),
            None => (part.as_ref(), None),
        };
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            queries.push(query);
        }
        if segment.is_empty() {
            continue;
        }
        if path.is_empty() {
            path.push_str(segment);
        } else {
            let trimmed = path.trim_end_matches('/').len();
            path.truncate(trimmed);
            path.push('/');
            path.push_str(segment.trim_start_matches('/'));
        }
    }

    if !queries.is_empty() {
        path.push('?');
        path.push_str(&queries.join("&"));
    }
    path
}
