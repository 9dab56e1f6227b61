use anyhow::Result;
use clap::{ArgGroup, CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use cfgswitch::{
    commands, guard,
    paths::SwitchEnv,
    settings::FailurePolicy,
    ui::{ColorMode, Ui},
};

#[derive(Parser)]
#[command(name = "cfgswitch")]
#[command(about = "Configuration switcher - activate a named set of config files by symlinking it into place")]
#[command(version)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["list", "switch", "status", "completions"])
))]
struct Cli {
    /// Show available configurations
    #[arg(short, long)]
    list: bool,

    /// Search configuration by name and switch to it
    #[arg(short, long, value_name = "CONFIG_NAME")]
    switch: Option<String>,

    /// Show where each managed link currently points
    #[arg(long)]
    status: bool,

    /// Print a shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Settings file (default: ./cfgswitch.json, then the user config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stop at the first link that cannot be replaced
    #[arg(long)]
    abort_on_error: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ui = Ui::new(cli.color, cli.no_color);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "cfgswitch", &mut std::io::stdout());
        return Ok(());
    }

    let mut env = SwitchEnv::from_process(cli.config.as_deref())?;
    if cli.abort_on_error {
        env.policy = FailurePolicy::Abort;
    }
    guard::check_environment(&env)?;

    if cli.list {
        commands::list(&env, &ui)
    } else if cli.status {
        commands::status(&env, &ui)
    } else if let Some(name) = cli.switch {
        commands::switch(&env, &name, &ui)
    } else {
        unreachable!("clap requires one action")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_action_required() {
        assert!(Cli::try_parse_from(["cfgswitch"]).is_err());
    }

    #[test]
    fn test_actions_are_exclusive() {
        assert!(Cli::try_parse_from(["cfgswitch", "-l", "-s", "a"]).is_err());
    }

    #[test]
    fn test_switch_flag() {
        let cli = Cli::try_parse_from(["cfgswitch", "-s", "work", "--abort-on-error"]).unwrap();
        assert_eq!(cli.switch.as_deref(), Some("work"));
        assert!(cli.abort_on_error);
        assert!(!cli.list);
    }
}
