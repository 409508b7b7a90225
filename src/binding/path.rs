//! Path composition.
//!
//! All functions are pure: same input, same output, no side effects.

/// Join a controller base path and an endpoint sub-path into the absolute
/// request path.
///
/// The base defaults to `/` and is normalized to exactly one trailing
/// separator; at most one leading separator is stripped from the endpoint
/// path, so `one` and `/one` are equivalent. A sub-path that is still
/// absolute after that strip replaces the base, as a relative-reference
/// join would. Dot segments pass through untouched.
pub fn join_paths(base: Option<&str>, endpoint: &str) -> String {
    let base = base.unwrap_or("/");
    let base = base.trim_end_matches('/');

    let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
    if endpoint.starts_with('/') {
        return endpoint.to_string();
    }

    format!("{base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_separator_at_the_boundary_in_all_four_combinations() {
        assert_eq!(join_paths(Some("/clsctl/alpha"), "one"), "/clsctl/alpha/one");
        assert_eq!(join_paths(Some("/clsctl/alpha/"), "one"), "/clsctl/alpha/one");
        assert_eq!(join_paths(Some("/clsctl/alpha"), "/one"), "/clsctl/alpha/one");
        assert_eq!(join_paths(Some("/clsctl/alpha/"), "/one"), "/clsctl/alpha/one");
    }

    #[test]
    fn missing_base_means_site_root() {
        assert_eq!(join_paths(None, "/"), "/");
        assert_eq!(join_paths(None, ""), "/");
        assert_eq!(join_paths(None, "abc"), "/abc");
        assert_eq!(join_paths(None, "/abc"), "/abc");
    }

    #[test]
    fn root_endpoint_path_lands_on_the_base() {
        assert_eq!(join_paths(Some("/clsctl/alpha"), "/"), "/clsctl/alpha/");
        assert_eq!(join_paths(Some("/clsctl/alpha"), ""), "/clsctl/alpha/");
    }

    #[test]
    fn extra_trailing_separators_collapse() {
        assert_eq!(join_paths(Some("/clsctl/alpha//"), "one"), "/clsctl/alpha/one");
    }

    #[test]
    fn still_absolute_endpoint_replaces_the_base() {
        assert_eq!(join_paths(Some("/clsctl/alpha"), "//one"), "/one");
    }

    #[test]
    fn nested_endpoint_paths_keep_their_segments() {
        assert_eq!(
            join_paths(Some("/api"), "v1/users"),
            "/api/v1/users"
        );
    }
}
