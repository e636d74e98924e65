use crate::commands::{CmdMessage, CmdResult, NotesPaths};
use crate::config::{ConfigKey, NotesConfig};
use crate::error::{NotesError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &NotesPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data;
    match action {
        ConfigAction::ShowAll => {
            let config = NotesConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = NotesConfig::load(dir)?;
            let mut result = CmdResult::default();
            match key.parse::<ConfigKey>() {
                Ok(key) => result.add_message(CmdMessage::info(config.get(key))),
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = NotesConfig::load(dir)?;
            let applied = key
                .parse::<ConfigKey>()
                .and_then(|k| config.set(k, &value).map(|_| k));
            let key = match applied {
                Ok(key) => key,
                Err(NotesError::Config(msg)) => {
                    let mut res = CmdResult::default();
                    res.add_message(CmdMessage::error(msg));
                    return Ok(res);
                }
                Err(e) => return Err(e),
            };
            config.save(dir)?;
            let display_val = config.get(key);
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
    use tempfile::tempdir;

    fn paths(dir: &std::path::Path) -> NotesPaths {
        NotesPaths {
            data: dir.to_path_buf(),
        }
    }

    #[test]
    fn shows_defaults() {
        let dir = tempdir().unwrap();
        let result = run(&paths(dir.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(NotesConfig::default()));
        assert_eq!(result.config_entries.len(), 3);
    }

    #[test]
    fn sets_and_persists() {
        let dir = tempdir().unwrap();
        let p = paths(dir.path());
        let result = run(
            &p,
            ConfigAction::Set("confirm".into(), "false".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "confirm set to false");

        let shown = run(&p, ConfigAction::ShowKey("confirm".into())).unwrap();
        assert_eq!(shown.messages[0].content, "false");
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = tempdir().unwrap();
        let p = paths(dir.path());
        let result = run(&p, ConfigAction::Set("color".into(), "red".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());

        let shown = run(&p, ConfigAction::ShowKey("color".into())).unwrap();
        assert_eq!(shown.messages[0].level, MessageLevel::Error);
    }
}
