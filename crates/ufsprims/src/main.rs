mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ufsprims", version, about = "UFS BSG control and diagnostics CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_subcommand() {
        let cli = Cli::try_parse_from([
            "ufsprims",
            "query",
            "--device",
            "/dev/ufs-bsg0",
            "--opcode",
            "3",
            "--idn",
            "0x2d",
            "--index",
            "0",
            "--selector",
            "0",
        ])
        .expect("query args should parse");

        assert!(matches!(cli.command, Command::Query(_)));
    }

    #[test]
    fn parses_uic_get() {
        let cli = Cli::try_parse_from([
            "ufsprims",
            "uic",
            "--device",
            "/dev/ufs-bsg0",
            "--get",
            "--id",
            "0x00f6",
            "--peer",
            "--rx",
            "--lane",
            "1",
        ])
        .expect("uic args should parse");

        match cli.command {
            Command::Uic(args) => {
                assert!(args.get);
                assert_eq!(args.id, Some(0xf6));
                assert!(args.peer && args.rx);
                assert_eq!(args.lane, Some(1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_uic_get_and_set() {
        let err = Cli::try_parse_from([
            "ufsprims",
            "uic",
            "--device",
            "/dev/ufs-bsg0",
            "--get",
            "--set",
            "0x44",
            "--id",
            "0x00f6",
        ])
        .expect_err("conflicting get/set should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_conflicting_eom_sides() {
        let err = Cli::try_parse_from([
            "ufsprims",
            "eom",
            "--device",
            "/dev/ufs-bsg0",
            "--local",
            "--peer",
            "--output",
            "/tmp",
        ])
        .expect_err("conflicting local/peer should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_eom_with_negative_voltage() {
        let cli = Cli::try_parse_from([
            "ufsprims",
            "eom",
            "--device",
            "/dev/ufs-bsg0",
            "--local",
            "--data",
            "--voltage",
            "-3",
            "--output",
            "/data",
        ])
        .expect("eom args should parse");

        match cli.command {
            Command::Eom(args) => {
                assert!(args.local && args.data);
                assert_eq!(args.voltage, Some(-3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
