use lift_config::ENV_PREFIX;

/// Config sections reachable through `LIFTLOG_<SECTION>__<KEY>`.
const SECTIONS: &[&str] = &["REMOTE", "AUTH", "CACHE", "GENERAL"];

/// Emit warnings for env vars that look like config keys but use a single
/// underscore after the section, which figment silently ignores.
pub fn warn_misnamed_env() {
    for warning in collect_misnamed_env(std::env::vars().map(|(key, _)| key)) {
        tracing::warn!("{warning}");
    }
}

fn collect_misnamed_env<I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    keys.into_iter()
        .filter_map(|key| {
            let rest = key.strip_prefix(ENV_PREFIX)?;
            let section = SECTIONS.iter().find(|section| {
                rest.strip_prefix(*section)
                    .is_some_and(|tail| tail.starts_with('_') && !tail.starts_with("__"))
            })?;
            let field = &rest[section.len() + 1..];
            Some(format!(
                "{key} is ignored. Use a double underscore after the section (example: {ENV_PREFIX}{section}__{field})."
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::collect_misnamed_env;

    #[test]
    fn warns_for_single_underscore_sections() {
        let warnings = collect_misnamed_env([
            "LIFTLOG_REMOTE_URL".to_string(),
            "LIFTLOG_AUTH_REDIRECT_URL".to_string(),
        ]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("LIFTLOG_REMOTE__URL"));
        assert!(warnings[1].contains("LIFTLOG_AUTH__REDIRECT_URL"));
    }

    #[test]
    fn ignores_correct_and_unrelated_keys() {
        let warnings = collect_misnamed_env([
            "LIFTLOG_REMOTE__URL".to_string(),
            "LIFTLOG_LOG".to_string(),
            "LIFTLOG_GENERALLY".to_string(),
            "PATH".to_string(),
        ]);
        assert!(warnings.is_empty());
    }
}
