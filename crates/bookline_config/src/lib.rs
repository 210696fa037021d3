use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Layering, lowest priority first: `config/default`, `config/{RUN_ENV}`,
/// then environment variables with the `BOOKLINE` prefix and `__` separator
/// (e.g. `BOOKLINE_SERVER__PORT=8080`). After deserialization, string values
/// equal to `"secret_from_env"` are replaced from the environment so secrets
/// never live in checked-in files.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BOOKLINE".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all "secret_from_env" string values with environment
/// variable values. The variable name is the uppercased path of the field,
/// joined with underscores (`whereby.api_key` -> `WHEREBY_API_KEY`).
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == "secret_from_env" => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = std::env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    tracing::warn!("env var {} not found for secret_from_env", env_key);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in the
/// serialized config.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("config not serializable: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("config not deserializable: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded at most once per process. `DOTENV_OVERRIDE` names an
/// alternative file; otherwise a leading `.env*` command line argument is
/// honored, defaulting to ".env".
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Serializes tests that touch process environment variables.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn sample_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_marketplace: false,
            use_availability: true,
            use_whereby: false,
            marketplace: None,
            availability: Some(AvailabilityConfig {
                time_zone: Some("Europe/Zurich".to_string()),
                weeks_to_generate: Some(4),
            }),
            whereby: Some(WherebyConfig {
                subdomain: "bookline".to_string(),
                api_base_url: None,
                api_key: Some("secret_from_env".to_string()),
                webhook_secret: None,
                default_duration_minutes: None,
            }),
        }
    }

    #[test]
    fn marker_is_replaced_from_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("WHEREBY_API_KEY", "key-from-env");

        let config = apply_env_overrides_from_marker(sample_config()).unwrap();

        assert_eq!(
            config.whereby.as_ref().and_then(|w| w.api_key.clone()),
            Some("key-from-env".to_string()),
            "secret_from_env marker should be replaced by WHEREBY_API_KEY"
        );
        std::env::remove_var("WHEREBY_API_KEY");
    }

    #[test]
    fn marker_survives_when_env_var_is_missing() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("WHEREBY_API_KEY");

        let config = apply_env_overrides_from_marker(sample_config()).unwrap();

        assert_eq!(
            config.whereby.as_ref().and_then(|w| w.api_key.clone()),
            Some("secret_from_env".to_string()),
            "marker is left in place when no env var is set"
        );
    }

    #[test]
    fn runtime_flags_default_to_false() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "host": "0.0.0.0", "port": 3000 }
        }))
        .unwrap();

        assert!(!config.use_marketplace);
        assert!(!config.use_availability);
        assert!(!config.use_whereby);
        assert!(config.marketplace.is_none());
        assert!(config.availability.is_none());
        assert!(config.whereby.is_none());
    }
}
