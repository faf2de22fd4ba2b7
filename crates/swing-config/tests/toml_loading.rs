//! TOML configuration loading, sandboxed with `figment::Jail`.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use swing_config::SwingConfig;

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[matching]
window_seconds = 4.5

[metrics]
hard_hit_threshold = 100.0

[clock]
utc_offset_minutes = -300

[display]
session_limit = 7
",
        )?;

        let config: SwingConfig = Figment::from(Serialized::defaults(SwingConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!((config.matching.window_seconds - 4.5).abs() < f64::EPSILON);
        assert!((config.metrics.hard_hit_threshold - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.clock.utc_offset_minutes, Some(-300));
        assert_eq!(config.display.session_limit, 7);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[metrics]
hard_hit_threshold = 90.0
",
        )?;

        let config: SwingConfig = Figment::from(Serialized::defaults(SwingConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!((config.metrics.hard_hit_threshold - 90.0).abs() < f64::EPSILON);
        assert!((config.matching.window_seconds - 7.0).abs() < f64::EPSILON);
        assert_eq!(config.clock.utc_offset_minutes, None);
        assert_eq!(config.display.session_limit, 20);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_dir(".swingsync")?;
        jail.create_file(
            ".swingsync/config.toml",
            r"
[matching]
window_seconds = 3.0
",
        )?;

        let config = SwingConfig::load().expect("config loads");
        let settings = config.reconcile_settings().expect("valid settings");
        assert!((settings.window_seconds - 3.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn project_config_overrides_user_config() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.create_dir("xdg/swingsync")?;
        jail.create_file(
            "xdg/swingsync/config.toml",
            r"
[matching]
window_seconds = 9.0

[display]
session_limit = 50
",
        )?;
        jail.create_dir(".swingsync")?;
        jail.create_file(
            ".swingsync/config.toml",
            r"
[matching]
window_seconds = 5.0
",
        )?;

        let config = SwingConfig::load().expect("config loads");
        assert!((config.matching.window_seconds - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.display.session_limit, 50);
        Ok(())
    });
}

#[test]
fn malformed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".swingsync")?;
        jail.create_file(
            ".swingsync/config.toml",
            r#"
[display]
session_limit = "lots"
"#,
        )?;

        let err = SwingConfig::load().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    });
}

#[test]
fn negative_window_in_file_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".swingsync")?;
        jail.create_file(
            ".swingsync/config.toml",
            r"
[matching]
window_seconds = -1.0
",
        )?;

        let config = SwingConfig::load().expect("config parses");
        let err = config.reconcile_settings().unwrap_err();
        assert!(err.to_string().contains("matching.window_seconds"));
        Ok(())
    });
}
