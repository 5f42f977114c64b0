use figment::Jail;
use lift_config::LiftConfig;

#[test]
fn env_vars_fill_config_values() {
    Jail::expect_with(|jail| {
        jail.set_env("LIFTLOG_REMOTE__URL", "https://env.supabase.co");
        jail.set_env("LIFTLOG_REMOTE__ANON_KEY", "anon-from-env");
        jail.set_env("LIFTLOG_GENERAL__CHART_WIDTH", "72");

        let config = LiftConfig::load().expect("config loads");
        assert_eq!(config.remote.url, "https://env.supabase.co");
        assert_eq!(config.remote.anon_key, "anon-from-env");
        assert_eq!(config.general.chart_width, 72);
        assert!(config.remote.is_configured());
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".liftlog")?;
        jail.create_file(
            ".liftlog/config.toml",
            r#"
[remote]
table = "from_toml"
"#,
        )?;
        jail.set_env("LIFTLOG_REMOTE__TABLE", "from_env");

        let config = LiftConfig::load().expect("config loads");
        assert_eq!(config.remote.table, "from_env");
        Ok(())
    });
}

#[test]
fn single_underscore_keys_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("LIFTLOG_REMOTE_URL", "https://typo.supabase.co");

        let config = LiftConfig::load().expect("config loads");
        assert!(config.remote.url.is_empty());
        Ok(())
    });
}
