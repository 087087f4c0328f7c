use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("mecacom {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: mecacom");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("default_port: {}", mecacom_client::DEFAULT_PORT);
    println!(
        "default_send_interval_ms: {}",
        mecacom_client::DEFAULT_SEND_INTERVAL.as_millis()
    );

    Ok(SUCCESS)
}
