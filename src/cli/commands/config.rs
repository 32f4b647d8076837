use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
        set,
    } = cmd
    {
        if !set.is_empty() {
            let mut updated = cfg.clone();
            for assignment in set {
                ConfigLogic::set(&mut updated, assignment)?;
            }

            if is_test {
                info("Test mode: configuration not written.");
            } else {
                updated.save()?;
                success(format!(
                    "Configuration saved to {}",
                    Config::config_file().display()
                ));
            }

            if *print_config {
                println!("📄 Current configuration:\n");
                ConfigLogic::print(&updated)?;
            }
        } else if *print_config {
            println!("📄 Current configuration:\n");
            ConfigLogic::print(cfg)?;
        }

        if *edit_config {
            ConfigLogic::edit(editor)?;
        }
    }

    Ok(())
}
