use anyhow::Result;
use fwaudit::snapshot::load_snapshot;
use log::info;

use crate::audit_cmd::publish;
use crate::cli::OfflineArgs;

pub fn run_offline(args: OfflineArgs) -> Result<()> {
    let mut snapshot = load_snapshot(&args.snapshot)?;
    if let Some(vendor) = args.vendor {
        snapshot.set_vendor(vendor.into());
    }
    info!(
        "loaded {} network(s) from {}",
        snapshot.scopes.len(),
        args.snapshot.display()
    );
    publish(snapshot.vendor, &snapshot.scopes, &args.report)
}
