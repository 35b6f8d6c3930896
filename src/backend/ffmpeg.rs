use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use crate::config::EncodeConfig;
use crate::error::{BackendError, ProbeError};

use super::{MediaBackend, RenderRequest};

/// Drives external `ffmpeg` and `ffprobe` processes
pub struct FfmpegBackend {
    encode: EncodeConfig,
}

impl FfmpegBackend {
    pub fn new(encode: EncodeConfig) -> Self {
        Self { encode }
    }

    /// Map the 0-100 quality setting onto the encoder's CRF scale
    fn quality_to_crf(&self) -> u8 {
        (51 - ((self.encode.quality as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
    }

    /// The shortest encodable clip is one frame; requests below that
    /// (including the degenerate zero-duration case) come up to it
    fn encode_duration(&self, requested: f64) -> f64 {
        requested.max(1.0 / self.encode.fps)
    }

    fn tool_available(tool: &str) -> bool {
        Command::new(tool)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn run(mut cmd: Command, tool: &str) -> Result<Vec<u8>, BackendError> {
        let output = cmd.output().map_err(|e| BackendError::SpawnFailed {
            tool: tool.to_string(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::CommandFailed {
                tool: tool.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl MediaBackend for FfmpegBackend {
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        let mut cmd = Command::new("ffprobe");
        cmd.args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path);

        let stdout = Self::run(cmd, "ffprobe").map_err(|e| ProbeError::ProcessFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        parse_probe_duration(path, &stdout)
    }

    fn render(&self, request: &RenderRequest) -> Result<(), BackendError> {
        let duration = self.encode_duration(request.duration);
        debug!("Rendering {:?} ({:.3}s)", request.output, duration);

        let mut cmd = Command::new("ffmpeg");
        for input in request.graph.inputs() {
            cmd.arg("-i").arg(input);
        }
        cmd.arg("-filter_complex").arg(request.graph.filter_script());
        cmd.arg("-map").arg(format!("[{}]", request.graph.video_pin()));
        cmd.arg("-map").arg(format!("[{}]", request.graph.audio_pin()));
        cmd.args(["-t", &format!("{:.3}", duration)]);
        cmd.args(["-r", &self.encode.fps.to_string()]);
        cmd.args(["-ar", &self.encode.audio_sample_rate.to_string()]);
        cmd.args(["-c:v", &self.encode.video_codec]);
        cmd.args(["-crf", &self.quality_to_crf().to_string()]);
        cmd.args(["-pix_fmt", "yuv420p"]);
        cmd.args(["-c:a", &self.encode.audio_codec]);
        cmd.arg("-y").arg(&request.output);

        Self::run(cmd, "ffmpeg").map(|_| ())
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<(), BackendError> {
        debug!("Concatenating {:?} -> {:?}", manifest, output);

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-f", "concat", "-safe", "0"]);
        cmd.arg("-i").arg(manifest);
        cmd.args(["-r", &self.encode.fps.to_string()]);
        cmd.args(["-ar", &self.encode.audio_sample_rate.to_string()]);
        cmd.args(["-c:v", &self.encode.video_codec]);
        cmd.args(["-crf", &self.quality_to_crf().to_string()]);
        cmd.args(["-pix_fmt", "yuv420p"]);
        cmd.args(["-c:a", &self.encode.audio_codec]);
        cmd.arg("-y").arg(output);

        Self::run(cmd, "ffmpeg").map(|_| ())
    }

    fn is_available(&self) -> bool {
        Self::tool_available("ffmpeg") && Self::tool_available("ffprobe")
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Pull a duration out of the probe's JSON report
///
/// The container duration is preferred; stream durations are the fallback
/// for formats that only report per-stream.
fn parse_probe_duration(path: &Path, stdout: &[u8]) -> Result<f64, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|_| ProbeError::ParseFailed { path: path.display().to_string() })?;

    parsed
        .format
        .and_then(|format| format.duration)
        .or_else(|| parsed.streams.into_iter().find_map(|stream| stream.duration))
        .and_then(|duration| duration.parse::<f64>().ok())
        .ok_or_else(|| ProbeError::MissingDuration { path: path.display().to_string() })
}
