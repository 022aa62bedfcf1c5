use figment::Jail;
use lexi_config::LexiConfig;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("LEXI_SCHEDULE__HOUR_FROM", "7");
        jail.set_env("LEXI_BATCH__TARGET_SIZE", "25");
        jail.set_env("LEXI_DATABASE__PATH", "/tmp/lexi-env.db");

        let config = LexiConfig::load().expect("config loads");
        assert_eq!(config.schedule.hour_from, 7);
        assert_eq!(config.batch.target_size, 25);
        assert_eq!(config.database.path, "/tmp/lexi-env.db");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lexi")?;
        jail.create_file(
            ".lexi/config.toml",
            r#"
[callbacks]
ttl_secs = 120
"#,
        )?;
        jail.set_env("LEXI_CALLBACKS__TTL_SECS", "240");

        let config = LexiConfig::load().expect("config loads");
        assert_eq!(config.callbacks.ttl_secs, 240);
        Ok(())
    });
}

#[test]
fn env_tenant_list() {
    Jail::expect_with(|jail| {
        jail.set_env("LEXI_GENERAL__TENANTS", "[11, 22, 33]");

        let config = LexiConfig::load().expect("config loads");
        assert_eq!(config.general.tenants, vec![11, 22, 33]);
        Ok(())
    });
}
