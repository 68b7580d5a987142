//! JQL search links for created issues.

/// JQL matching exactly `keys`: `issuekey in ("A-1", "A-2")`.
///
/// Returns `None` when there are no keys.
#[must_use]
pub fn keys_jql<S: AsRef<str>>(keys: &[S]) -> Option<String> {
    if keys.is_empty() {
        return None;
    }
    let quoted: Vec<String> = keys
        .iter()
        .map(|key| format!("\"{}\"", key.as_ref()))
        .collect();
    Some(format!("issuekey in ({})", quoted.join(", ")))
}

/// Link to a Jira issue search listing exactly `keys`.
///
/// The JQL from [`keys_jql`] is percent-encoded except for `(`, `)` and `,`.
/// Returns `None` when there are no keys.
#[must_use]
pub fn issues_link<S: AsRef<str>>(base_url: &str, keys: &[S]) -> Option<String> {
    let jql = keys_jql(keys)?;
    let encoded = urlencoding::encode(&jql)
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2C", ",");
    Some(format!(
        "{}/issues/?jql={encoded}",
        base_url.trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn encodes_jql_keeping_parens_and_commas() {
        let link = issues_link("https://jira.example.com/", &["QA-1", "QA-2"]).unwrap();
        assert_eq!(
            link,
            "https://jira.example.com/issues/?jql=issuekey%20in%20(%22QA-1%22,%20%22QA-2%22)"
        );
    }

    #[test]
    fn no_keys_no_link() {
        assert!(issues_link::<&str>("https://jira.example.com", &[]).is_none());
        assert!(keys_jql::<&str>(&[]).is_none());
    }

    #[test]
    fn jql_quotes_each_key() {
        assert_eq!(
            keys_jql(&["QA-1", "QA-2"]).as_deref(),
            Some(r#"issuekey in ("QA-1", "QA-2")"#)
        );
    }
}
