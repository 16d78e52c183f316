use crate::commands::{CmdMessage, CmdResult, CopydeckPaths};
use crate::config::CopydeckConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &CopydeckPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = CopydeckConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = CopydeckConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = CopydeckConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    fn paths(dir: &tempfile::TempDir) -> CopydeckPaths {
        CopydeckPaths {
            data_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &paths(&dir),
            ConfigAction::Set("match-titles".into(), "no".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        let shown = run(
            &paths(&dir),
            ConfigAction::ShowKey("match-titles".into()),
        )
        .unwrap();
        assert_eq!(shown.messages[0].content, "false");
    }

    #[test]
    fn unknown_key_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn show_all_returns_config() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(CopydeckConfig::default()));
    }
}
