use ufsprims_device::{execute_query, QuerySpec};
use ufsprims_transport::{BsgDevice, Direction};

use crate::cmd::QueryArgs;
use crate::exit::{device_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_query_outcome, OutputFormat};

pub fn run(args: QueryArgs, format: OutputFormat) -> CliResult<i32> {
    let spec = QuerySpec {
        opcode: args.opcode,
        idn: args.idn,
        index: args.index,
        selector: args.selector,
        value: args.value,
    };
    let op = spec
        .validate()
        .map_err(|err| CliError::new(USAGE, err.to_string()))?;

    // Reads need no write access to the device node.
    let dev = match op.opcode.direction() {
        Direction::FromDevice => BsgDevice::open_read_only(&args.device),
        Direction::ToDevice => BsgDevice::open(&args.device),
    }
    .map_err(|err| transport_error("failed to open device", err))?;

    let outcome =
        execute_query(&dev, &op).map_err(|err| device_error("query request failed", err))?;
    print_query_outcome(&op, &outcome, format);

    Ok(SUCCESS)
}
