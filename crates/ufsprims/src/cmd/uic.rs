use tracing::info;
use ufsprims_device::{dme_get, dme_set, DmeTarget};
use ufsprims_transport::BsgDevice;
use ufsprims_upiu::{mib_sel, select_rx, select_tx, ATTR_SET_NOR};

use crate::cmd::UicArgs;
use crate::exit::{device_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_uic_result, OutputFormat};

pub fn run(args: UicArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.get && args.set.is_none() {
        return Err(CliError::new(USAGE, "get/set is not given"));
    }
    let attr_id = args
        .id
        .ok_or_else(|| CliError::new(USAGE, "attribute ID is not given"))?;

    let target = if args.peer {
        DmeTarget::Peer
    } else {
        if !args.local {
            info!("local/peer is not given, assume local");
        }
        DmeTarget::Local
    };

    let rx = if args.rx {
        true
    } else {
        if !args.tx {
            info!("Tx/Rx is not given, assume Tx");
        }
        false
    };

    let lane = args.lane.unwrap_or_else(|| {
        info!("lane is not given, assume lane 0");
        0
    });

    let selector = if rx { select_rx(lane) } else { select_tx(lane) };
    let attr_sel = mib_sel(attr_id, selector);

    match args.set {
        None => {
            let dev = BsgDevice::open_read_only(&args.device)
                .map_err(|err| transport_error("failed to open device", err))?;
            let value = dme_get(&dev, attr_sel, target)
                .map_err(|err| device_error("UIC get failed", err))?;
            print_uic_result(target, attr_id, Some(value), format);
        }
        Some(value) => {
            let dev = BsgDevice::open(&args.device)
                .map_err(|err| transport_error("failed to open device", err))?;
            dme_set(&dev, attr_sel, ATTR_SET_NOR, value, target)
                .map_err(|err| device_error("UIC set failed", err))?;
            print_uic_result(target, attr_id, None, format);
        }
    }

    Ok(SUCCESS)
}
