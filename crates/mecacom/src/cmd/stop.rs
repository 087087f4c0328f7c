use tracing::info;

use crate::cmd::drive::connect;
use crate::cmd::StopArgs;
use crate::exit::{client_error, CliResult, SUCCESS};

pub fn run(args: StopArgs) -> CliResult<i32> {
    let mut client = connect(&args.connect)?;

    // Fresh session: the dedup flag is clear and the rate gate is open,
    // so this always reaches the wire.
    client
        .stop()
        .map_err(|err| client_error("stop failed", err))?;
    client
        .shutdown()
        .map_err(|err| client_error("shutdown failed", err))?;

    info!(
        host = %args.connect.host,
        port = args.connect.port,
        "STOPZERO sent"
    );
    Ok(SUCCESS)
}
