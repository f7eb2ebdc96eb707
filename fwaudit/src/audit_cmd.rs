use std::time::Duration;

use anyhow::{bail, Context, Result};
use fwaudit::audit::{collect_scopes, evaluate};
use fwaudit::fetch::meraki::NetworkSelection;
use fwaudit::fetch::{ConfigFetcher, MerakiClient, SonicWallClient, TransportConfig, Vendor};
use fwaudit::report::{render_console, write_report_file};
use fwaudit::snapshot::{save_snapshot, Snapshot};
use fwaudit_core::{load_policy_with_source, ScopeConfig};
use log::{info, warn};

use crate::cli::{ConnectionArgs, MerakiArgs, ReportArgs, SonicWallArgs};

pub fn run_meraki(args: MerakiArgs) -> Result<()> {
    let selection = match args.org_id {
        Some(org_id) => NetworkSelection::Organization(org_id),
        None => NetworkSelection::Networks(args.network),
    };
    let mut client = MerakiClient::new(
        &args.base_url,
        &args.api_key,
        selection,
        &transport(&args.connection),
    )?;
    run_network(&mut client, &args.connection, &args.report)
}

pub fn run_sonicwall(args: SonicWallArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password(format!("Password for {}: ", args.username))
            .context("failed to read password")?,
    };
    let base_url = if args.host.contains("://") {
        args.host.clone()
    } else {
        format!("https://{}", args.host)
    };
    let mut client = SonicWallClient::new(
        &base_url,
        &args.username,
        &password,
        &transport(&args.connection),
    )?;
    run_network(&mut client, &args.connection, &args.report)
}

fn transport(args: &ConnectionArgs) -> TransportConfig {
    if args.insecure {
        warn!("TLS certificate verification is disabled");
    }
    TransportConfig {
        timeout: Duration::from_secs(args.timeout),
        accept_invalid_certs: args.insecure,
    }
}

fn run_network(
    client: &mut dyn ConfigFetcher,
    connection: &ConnectionArgs,
    report: &ReportArgs,
) -> Result<()> {
    let vendor = client.vendor();
    let scopes = collect_scopes(client)
        .with_context(|| format!("{} audit failed", vendor.display_name()))?;

    if let Some(path) = &connection.save_snapshot {
        let snapshot = Snapshot {
            vendor,
            scopes: scopes.clone(),
        };
        save_snapshot(path, &snapshot)?;
        info!("snapshot={}", path.display());
    }

    publish(vendor, &scopes, report)
}

/// Analyze, write the report artifact and print the console summary.
///
/// In strict mode the run fails after the report is written when any
/// high-severity issue was found.
pub fn publish(vendor: Vendor, scopes: &[ScopeConfig], args: &ReportArgs) -> Result<()> {
    let (policy, policy_source) = load_policy_with_source(args.policy.as_deref())?;
    info!("policy={policy_source}");

    let outcome = evaluate(scopes, &policy);
    let path = write_report_file(
        &args.output_dir,
        vendor,
        args.format.into(),
        &outcome.issues,
        &outcome.summary,
    )
    .context("failed to write report")?;

    println!("{}", render_console(&outcome.issues, &outcome.summary));
    println!("report={}", path.display());

    if args.strict && outcome.has_high() {
        bail!(
            "strict mode failed: {} high-severity issue(s)",
            outcome.summary.high
        );
    }
    Ok(())
}
