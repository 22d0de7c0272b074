/// Restream service - launches ffmpeg against a signed ingest URL
use crate::error::{Result, ServerError};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::task::JoinHandle;
use url::Url;

/// Query parameter carrying the signing digest.
const SECRET_PARAM: &str = "lal_secret";

/// Mux delay handed to the transcoder, in seconds.
const MUX_DELAY: &str = "0.1";

#[derive(Debug, Clone)]
pub struct RestreamService {
    ffmpeg_path: PathBuf,
    base_url: Url,
    master_key: String,
}

impl RestreamService {
    pub fn new(ffmpeg_path: PathBuf, mut base_url: Url, master_key: String) -> Self {
        // Url::join treats a base without a trailing slash as a file and
        // would replace its last segment instead of appending.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            ffmpeg_path,
            base_url,
            master_key,
        }
    }

    /// Hex digest authorizing a restream of `basename`.
    ///
    /// Covers the master key concatenated with the file's base name, so the
    /// same pair always signs to the same token.
    pub fn sign(&self, basename: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.master_key.as_bytes());
        hasher.update(basename.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Signed ingest URL: `<base>/<basename>?lal_secret=<digest>`.
    pub fn ingest_url(&self, basename: &str) -> Result<Url> {
        let mut url = self.base_url.join(basename)?;
        url.query_pairs_mut()
            .append_pair(SECRET_PARAM, &self.sign(basename));
        Ok(url)
    }

    /// Launch the external transcoder restreaming `file` to the signed
    /// ingest URL.
    ///
    /// The input is paced at its native rate and the codecs pass through
    /// untouched. Failures to start surface to the caller; once the process
    /// is up, its exit is awaited and logged on a detached task. The handle
    /// is returned for callers that want to await the outcome. No retry,
    /// no queueing; concurrent launches are uncoordinated.
    pub fn start(&self, file: &Path) -> Result<JoinHandle<()>> {
        let basename = file.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            ServerError::Restream(format!("no usable base name in {}", file.display()))
        })?;
        let url = self.ingest_url(basename)?;

        tracing::debug!("restreaming {} to {}", file.display(), url);

        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.arg("-re")
            .arg("-i")
            .arg(file)
            .args(["-c:a", "copy", "-c:v", "copy"])
            .args(["-muxdelay", MUX_DELAY])
            .args(["-f", "flv"])
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            ServerError::Restream(format!(
                "failed to start {}: {}",
                self.ffmpeg_path.display(),
                e
            ))
        })?;

        let display = file.display().to_string();
        let handle = tokio::spawn(async move {
            match child.wait_with_output().await {
                Ok(output) if output.status.success() => {
                    tracing::info!("restream of {} finished", display);
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    tracing::error!(
                        "restream of {} exited with {}: {}",
                        display,
                        output.status,
                        stderr.trim()
                    );
                }
                Err(e) => {
                    tracing::error!("failed to wait for restream of {}: {}", display, e);
                }
            }
        });

        Ok(handle)
    }
}
