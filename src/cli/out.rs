//! `out` step - compose, resolve and deliver a HipChat notification
//!
//! Concourse passes the request JSON on stdin and the build directory as the only
//! argument. stdout is reserved for the version document.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tracing::{error, info, warn};

use crate::config::OutRequest;
use crate::context::BuildContext;
use crate::message::{MessageBody, MessageComposer};
use crate::notification::{HipChatClient, HipChatConfig, HipChatMessage};
use crate::report::{Reporter, TracingReporter};
use crate::template::TokenResolver;

/// `out` command arguments
#[derive(Args, Debug)]
pub struct OutArgs {
    /// Build directory holding the step's inputs (file tokens resolve against it)
    pub root_dir: PathBuf,
    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

/// Outbound request, ready to send
#[derive(Debug, Clone)]
pub struct PreparedNotification {
    pub config: HipChatConfig,
    pub message: HipChatMessage,
    pub fail_on_error: bool,
}

/// Version document Concourse expects on stdout
pub fn version_output() -> serde_json::Value {
    serde_json::json!({ "version": { "ref": "none" } })
}

/// Turn a request into a resolved payload
///
/// Composition and token problems are reported and degrade; only invalid input
/// (missing required properties, no room) fails.
pub fn prepare(
    mut request: OutRequest,
    context: &BuildContext,
    root_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<PreparedNotification> {
    MessageComposer::new(reporter).apply_defaults(&mut request.params, Some(root_dir));

    let config = request.client_config(reporter)?;

    let resolver = TokenResolver::new(context, reporter);
    let text = resolver
        .resolve(
            request.params.message.as_ref().and_then(MessageBody::text),
            Some(&request.params.tokens),
            Some(root_dir),
        )
        .ok_or_else(|| anyhow!("message could not be resolved"))?;

    let message = HipChatMessage::new(config.room_id.clone(), text).with_params(&request.params);

    Ok(PreparedNotification {
        config,
        message,
        fail_on_error: request.source.fail_on_error(),
    })
}

/// Deliver a prepared notification; returns the process exit code
pub async fn deliver(prepared: PreparedNotification, dry_run: bool) -> Result<i32> {
    if dry_run {
        eprintln!("[DRY-RUN] Would send to {}:", prepared.config.server_url);
        eprintln!("{}", serde_json::to_string_pretty(&prepared.message)?);
        return Ok(0);
    }

    let client = HipChatClient::new(prepared.config).map_err(|e| anyhow!(e))?;

    if let Err(e) = client.send(&prepared.message).await {
        error!(
            fail_on_error = prepared.fail_on_error,
            "Error sending notification. Fail on error: {}", prepared.fail_on_error
        );
        error!("{}", e);
        if prepared.fail_on_error {
            return Ok(1);
        }
        warn!("Continuing despite delivery failure");
    }

    Ok(0)
}

/// Handle `out`: read stdin, send, print the version document
pub async fn handle_out(args: OutArgs) -> Result<i32> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request from stdin")?;
    let request = OutRequest::from_json(&input).context("Invalid request JSON")?;

    let context = BuildContext::from_env();
    info!(
        build_id = ?context.build_id,
        pipeline = ?context.pipeline_name,
        job = ?context.job_name,
        root_dir = %args.root_dir.display(),
        "Preparing notification"
    );

    let prepared = match prepare(request, &context, &args.root_dir, &TracingReporter) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{:#}", e);
            return Ok(1);
        }
    };

    let code = deliver(prepared, args.dry_run).await?;
    if code == 0 {
        println!("{}", version_output());
    }
    Ok(code)
}
