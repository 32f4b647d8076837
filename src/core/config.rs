use crate::config::{Config, SETTABLE_KEYS};
use crate::errors::{AppError, AppResult};
use std::process::Command;

pub struct ConfigLogic;

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("'{}' is not a valid value for {}", value, key)))
}

fn non_negative<T: PartialOrd + Default + std::fmt::Display>(key: &str, v: T) -> AppResult<T> {
    if v < T::default() {
        return Err(AppError::Config(format!("{} must not be negative (got {})", key, v)));
    }
    Ok(v)
}

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Apply a `KEY=VALUE` assignment to `cfg`.
    pub fn set(cfg: &mut Config, assignment: &str) -> AppResult<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| AppError::Config(format!("expected KEY=VALUE, got '{}'", assignment)))?;
        let key = key.trim();

        match key {
            "currency" => cfg.currency = value.trim().to_string(),
            "default_rate" => cfg.default_rate = non_negative(key, parse_number(key, value)?)?,
            "overtime_threshold_hours" => {
                cfg.overtime_threshold_hours = non_negative(key, parse_number(key, value)?)?
            }
            "overtime_multiplier" => {
                cfg.overtime_multiplier = non_negative(key, parse_number(key, value)?)?
            }
            "break_minutes" => cfg.break_minutes = non_negative(key, parse_number(key, value)?)?,
            "rounding_minutes" => {
                cfg.rounding_minutes = non_negative(key, parse_number(key, value)?)?
            }
            other => {
                return Err(AppError::UnknownSetting(format!(
                    "{} (valid keys: {})",
                    other,
                    SETTABLE_KEYS.join(", ")
                )));
            }
        }

        cfg.pay_settings().validate().map_err(AppError::Config)?;
        Ok(())
    }

    pub fn edit(editor: &Option<String>) -> AppResult<()> {
        let path = Config::config_file();

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                println!(
                    "✅ Configuration file edited successfully using '{}'",
                    editor_to_use
                );
                Ok(())
            }
            _ if editor_to_use != default_editor => {
                eprintln!(
                    "⚠️  Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                );
                Command::new(&default_editor)
                    .arg(&path)
                    .status()
                    .map_err(|e| AppError::Config(e.to_string()))?;
                Ok(())
            }
            Ok(_) => Err(AppError::Config(format!(
                "editor '{}' exited with an error",
                editor_to_use
            ))),
            Err(e) => Err(AppError::Config(e.to_string())),
        }
    }
}
