// CLI definitions using clap

use clap::Parser;

/// Options are plain tokens handed to the command dispatcher in order, so
/// clap only collects them; `--help` is one of the dispatcher's commands.
#[derive(Parser, Debug)]
#[command(name = "htt_util")]
#[command(author, about = "HTT touch panel configuration utility")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Commands and their arguments, e.g. --device 1 --backlight 200
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTION")]
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_kept_in_order() {
        let cli = Cli::try_parse_from([
            "htt_util",
            "--device",
            "1",
            "--alarm",
            "3",
            "-1",
            "2",
            "--help",
        ])
        .unwrap();
        assert_eq!(
            cli.tokens,
            ["--device", "1", "--alarm", "3", "-1", "2", "--help"]
        );
    }

    #[test]
    fn test_no_tokens() {
        let cli = Cli::try_parse_from(["htt_util"]).unwrap();
        assert!(cli.tokens.is_empty());
    }
}
