//! Upload command - send images for grayscale conversion

use std::path::PathBuf;

use anyhow::{bail, Result};
use mosaic_client::MosaicClient;

use crate::output::{OutputContext, UploadRow};

/// Upload each file in turn; keep going past failures and fail at the end
pub async fn upload(client: &MosaicClient, files: &[PathBuf], ctx: &OutputContext) -> Result<()> {
    let mut rows = Vec::with_capacity(files.len());
    let mut failures = 0usize;

    for file in files {
        let display = file.display().to_string();
        match client.upload_file(file).await {
            Ok(response) => {
                tracing::debug!(file = %file.display(), result = %response.result_path, "Uploaded");
                rows.push(UploadRow::converted(display, response));
            }
            Err(e) => {
                failures += 1;
                ctx.error(&format!("{}: {}", display, e));
                rows.push(UploadRow::failed(display, &e));
            }
        }
    }

    ctx.print_uploads(&rows);

    if failures > 0 {
        bail!("{} of {} upload(s) failed", failures, files.len());
    }
    ctx.success(&format!("Converted {} image(s)", files.len()));
    Ok(())
}
