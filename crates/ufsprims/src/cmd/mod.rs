use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod eom;
pub mod query;
pub mod uic;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a query request (descriptor/attribute/flag access).
    Query(QueryArgs),
    /// Send a UIC DME get/set command.
    Uic(UicArgs),
    /// Run a receiver eye-opening (EOM) sweep and write a report.
    Eom(EomArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Query(args) => query::run(args, format),
        Command::Uic(args) => uic::run(args, format),
        Command::Eom(args) => eom::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Path to the ufs-bsg device node (e.g. /dev/ufs-bsg0).
    #[arg(long, short = 'd', value_name = "DEVICE")]
    pub device: PathBuf,
    /// Query opcode: 1 read-desc, 3 read-attr, 4 write-attr, 5 read-flag,
    /// 6 set-flag, 7 clear-flag, 8 toggle-flag.
    #[arg(long, short = 'o', value_parser = parse_u8)]
    pub opcode: Option<u8>,
    /// IDN of the descriptor/attribute/flag.
    #[arg(long, short = 'i', value_parser = parse_u8)]
    pub idn: Option<u8>,
    /// Index of the descriptor/attribute/flag.
    #[arg(long, short = 'I', value_parser = parse_u8)]
    pub index: Option<u8>,
    /// Selector of the descriptor/attribute/flag.
    #[arg(long, short = 's', value_parser = parse_u8)]
    pub selector: Option<u8>,
    /// Attribute value; only applicable to write-attribute.
    #[arg(long, short = 'v', value_parser = parse_u64)]
    pub value: Option<u64>,
}

#[derive(Args, Debug)]
pub struct UicArgs {
    /// Path to the ufs-bsg device node.
    #[arg(long, short = 'd', value_name = "DEVICE")]
    pub device: PathBuf,
    /// DME get.
    #[arg(long, short = 'g', conflicts_with = "set")]
    pub get: bool,
    /// DME set, followed by the value to write.
    #[arg(long, short = 's', value_parser = parse_u32)]
    pub set: Option<u32>,
    /// UniPro or M-PHY attribute id.
    #[arg(long, short = 'i', value_parser = parse_u32)]
    pub id: Option<u32>,
    /// Address the peer (the storage device).
    #[arg(long, short = 'p', conflicts_with = "local")]
    pub peer: bool,
    /// Address the local host controller.
    #[arg(long, short = 'l')]
    pub local: bool,
    /// Select the TX side.
    #[arg(long, short = 't', conflicts_with = "rx")]
    pub tx: bool,
    /// Select the RX side.
    #[arg(long, short = 'r')]
    pub rx: bool,
    /// Lane number.
    #[arg(long, short = 'L', value_parser = parse_u32)]
    pub lane: Option<u32>,
}

#[derive(Args, Debug)]
pub struct EomArgs {
    /// Path to the ufs-bsg device node.
    #[arg(long, short = 'd', value_name = "DEVICE")]
    pub device: PathBuf,
    /// Characterize the local (host) receiver.
    #[arg(long, short = 'l', conflicts_with = "peer")]
    pub local: bool,
    /// Characterize the peer (device) receiver.
    #[arg(long, short = 'p')]
    pub peer: bool,
    /// Stress the link with I/O while the monitor runs.
    #[arg(long, short = 'D')]
    pub data: bool,
    /// Lane number (0 or 1); all connected lanes when omitted.
    #[arg(long, short = 'L', value_parser = parse_u32)]
    pub lane: Option<u32>,
    /// Collect EOM data for this voltage offset only.
    #[arg(long, short = 'v', value_parser = parse_i32, allow_hyphen_values = true)]
    pub voltage: Option<i32>,
    /// Target test count.
    #[arg(long, short = 't', value_parser = parse_u32)]
    pub target: Option<u32>,
    /// Directory the EOM report is written to.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}

// Numeric arguments accept decimal or 0x-prefixed hex.

fn parse_with_radix(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| format!("invalid numeric value: {input}"))
}

pub(crate) fn parse_u8(input: &str) -> Result<u8, String> {
    parse_with_radix(input)?
        .try_into()
        .map_err(|_| format!("value out of range: {input}"))
}

pub(crate) fn parse_u32(input: &str) -> Result<u32, String> {
    parse_with_radix(input)?
        .try_into()
        .map_err(|_| format!("value out of range: {input}"))
}

pub(crate) fn parse_u64(input: &str) -> Result<u64, String> {
    parse_with_radix(input)
}

pub(crate) fn parse_i32(input: &str) -> Result<i32, String> {
    let trimmed = input.trim();
    match trimmed.strip_prefix('-') {
        Some(rest) => {
            let magnitude: i64 = parse_with_radix(rest)?
                .try_into()
                .map_err(|_| format!("value out of range: {input}"))?;
            (-magnitude)
                .try_into()
                .map_err(|_| format!("value out of range: {input}"))
        }
        None => parse_with_radix(trimmed)?
            .try_into()
            .map_err(|_| format!("value out of range: {input}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_parsers_accept_hex_and_decimal() {
        assert_eq!(parse_u8("0x2d").unwrap(), 0x2d);
        assert_eq!(parse_u8("45").unwrap(), 45);
        assert_eq!(parse_u32("0x00F6").unwrap(), 0xF6);
        assert_eq!(parse_u64("0x1234567890").unwrap(), 0x1234567890);
        assert_eq!(parse_i32("-5").unwrap(), -5);
        assert_eq!(parse_i32("-0x2").unwrap(), -2);
        assert_eq!(parse_i32("7").unwrap(), 7);
    }

    #[test]
    fn numeric_parsers_reject_garbage() {
        assert!(parse_u8("0xzz").is_err());
        assert!(parse_u8("256").is_err());
        assert!(parse_u8("").is_err());
        assert!(parse_i32("--3").is_err());
    }
}
