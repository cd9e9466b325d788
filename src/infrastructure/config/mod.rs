//! Process configuration, resolved once at startup and passed by reference
//! from then on.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::record_store::FORMS_FILE;

/// All settings live under one env prefix: TELEGRAM_BOT_TOKEN,
/// TELEGRAM_BOT_USERNAME, TELEGRAM_ALLOWED_GROUP_IDS, TELEGRAM_DATA_DIR,
/// TELEGRAM_API_BASE_URL.
const ENV_PREFIX: &str = "TELEGRAM_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub bot_token: String,
    pub bot_username: String,
    pub allowed_group_ids: String,
    pub data_dir: PathBuf,
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            bot_username: String::new(),
            allowed_group_ids: String::new(),
            data_dir: PathBuf::from("data"),
            api_base_url: "https://api.telegram.org".to_string(),
        }
    }
}

impl Settings {
    /// Reads the environment over the built-in defaults. A missing or empty
    /// bot token is a fatal configuration error.
    pub fn load() -> Result<Settings> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;
        if settings.bot_token.trim().is_empty() {
            return Err(AppError::Config(
                "TELEGRAM_BOT_TOKEN is not set".to_string(),
            ));
        }
        Ok(settings)
    }

    /// Configured bot username, with any leading @ stripped. Empty counts
    /// as unset and the dispatcher falls back to getMe.
    pub fn bot_username(&self) -> Option<&str> {
        let trimmed = self.bot_username.trim().trim_start_matches('@');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Allow-listed group chat ids from the comma-separated list. A
    /// non-numeric entry is a configuration error rather than a silently
    /// narrower gate.
    pub fn allowed_group_ids(&self) -> Result<HashSet<i64>> {
        let mut ids = HashSet::new();
        for part in self.allowed_group_ids.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let id = part.parse().map_err(|_| {
                AppError::Config(format!(
                    "invalid chat id in TELEGRAM_ALLOWED_GROUP_IDS: {:?}",
                    part
                ))
            })?;
            ids.insert(id);
        }
        Ok(ids)
    }

    pub fn forms_csv_path(&self) -> PathBuf {
        self.data_dir.join(FORMS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_fails_without_token() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TELEGRAM_BOT_TOKEN", "");
            let err = Settings::load().unwrap_err();
            match err {
                AppError::Config(msg) => assert!(msg.contains("TELEGRAM_BOT_TOKEN")),
                other => panic!("unexpected error: {:?}", other),
            }
            Ok(())
        });
    }

    #[test]
    fn test_load_reads_prefixed_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TELEGRAM_BOT_TOKEN", "123:abc");
            jail.set_env("TELEGRAM_BOT_USERNAME", "@SkillMapBot");
            jail.set_env("TELEGRAM_DATA_DIR", "/tmp/forms-data");

            let settings = Settings::load().expect("settings should load");
            assert_eq!(settings.bot_token, "123:abc");
            assert_eq!(settings.bot_username(), Some("SkillMapBot"));
            assert_eq!(settings.data_dir, PathBuf::from("/tmp/forms-data"));
            assert_eq!(settings.api_base_url, "https://api.telegram.org");
            Ok(())
        });
    }

    #[test]
    fn test_unset_username_reads_as_none() {
        let settings = Settings::default();
        assert_eq!(settings.bot_username(), None);

        let settings = Settings {
            bot_username: "  ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.bot_username(), None);
    }

    #[test]
    fn test_allowed_group_ids_parse() {
        let settings = Settings {
            allowed_group_ids: " -100500 , 42,, ".to_string(),
            ..Settings::default()
        };
        let ids = settings.allowed_group_ids().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&-100500));
        assert!(ids.contains(&42));

        let empty = Settings::default().allowed_group_ids().unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_malformed_group_id_is_a_config_error() {
        let settings = Settings {
            allowed_group_ids: "-100500,grupo".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.allowed_group_ids(),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_forms_path_lives_in_data_dir() {
        let settings = Settings::default();
        assert_eq!(settings.forms_csv_path(), PathBuf::from("data/forms.csv"));
    }
}
