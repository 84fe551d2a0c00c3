use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.server.base_url, "http://127.0.0.1:5000");
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.ui.tick_ms, 50);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.server.base_url = "  ".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.tick_ms = 5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.volume_step = 0.0;
    assert!(s.validate().is_err());
}

#[test]
fn resolve_config_path_prefers_vinilo_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VINILO_CONFIG_PATH", "/tmp/vinilo-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/vinilo-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("vinilo")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("vinilo")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "http://music.local:8080"

[audio]
volume = 0.8

[ui]
tick_ms = 100
volume_step = 0.1
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VINILO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VINILO__SERVER__BASE_URL");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://music.local:8080");
    assert_eq!(s.audio.volume, 0.8);
    assert_eq!(s.ui.tick_ms, 100);
    assert_eq!(s.ui.volume_step, 0.1);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[server]
base_url = "http://from-file:5000"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VINILO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VINILO__SERVER__BASE_URL", "http://from-env:5000");

    let s = Settings::load().unwrap();
    assert_eq!(s.server.base_url, "http://from-env:5000");
}
