//! Path-prefix rewrite rule.

/// Maps `{prefix}{rest}` to `{base}{rest}`, keeping the query string.
///
/// Matching is segment-aware: with prefix `/api/llama`, the paths
/// `/api/llama` and `/api/llama/chat` match but `/api/llamas` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    prefix: String,
    base: String,
}

impl RewriteRule {
    pub fn new(prefix: impl Into<String>, base: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let base = base.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `path` (without query) falls under the prefix.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(&self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Rewrite a path-and-query, or `None` if the path is not under the prefix.
    #[must_use]
    pub fn rewrite(&self, path_and_query: &str) -> Option<String> {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };
        if !self.matches(path) {
            return None;
        }

        let rest = &path[self.prefix.len()..];
        let mut rewritten = format!("{}{}", self.base, rest);
        if rewritten.is_empty() {
            rewritten.push('/');
        }
        if let Some(query) = query {
            rewritten.push('?');
            rewritten.push_str(query);
        }
        Some(rewritten)
    }
}

/// One-shot form of [`RewriteRule::rewrite`].
#[must_use]
pub fn rewrite(path_and_query: &str, prefix: &str, base: &str) -> Option<String> {
    RewriteRule::new(prefix, base).rewrite(path_and_query)
}
