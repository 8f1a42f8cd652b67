//! GStreamer-based video frame source.
//!
//! Decodes a video file into packed RGB frames through an appsink. The
//! pipeline is built from a parse-launch string, waited into the Playing
//! state so that an unopenable file or unsupported codec fails the open call
//! rather than the first read, and torn down to Null on drop.

use std::path::Path;
use std::sync::OnceLock;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;

use poselens_analysis_core::FrameSource;
use poselens_common::error::{PoselensError, PoselensResult};
use poselens_pose_model::VideoFrame;

/// Sequential RGB frame reader over a video file.
pub struct GstFrameSource {
    pipeline: gst::Pipeline,
    appsink: gst_app::AppSink,
    fps: f64,
    finished: bool,
}

impl GstFrameSource {
    /// Open a video file for decoding.
    ///
    /// Fails when the file does not exist, GStreamer is unavailable, or the
    /// pipeline cannot reach the Playing state (bad container, unsupported
    /// codec).
    pub fn open(path: &Path) -> PoselensResult<Self> {
        init_gstreamer()?;

        if !path.exists() {
            return Err(PoselensError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let location = escape_path(path);
        // max-buffers bounds decoded-frame memory; sync=false decodes as
        // fast as the reader consumes instead of pacing to wall-clock time.
        let launch = format!(
            "filesrc location=\"{location}\" ! decodebin ! videoconvert ! video/x-raw,format=RGB ! appsink name=sink sync=false max-buffers=4"
        );

        let element = gst::parse::launch(&launch).map_err(|e| {
            PoselensError::source_open(format!("Failed to build decode pipeline: {e}"))
        })?;
        let pipeline = element
            .dynamic_cast::<gst::Pipeline>()
            .map_err(|_| PoselensError::source_open("Launch string did not produce a pipeline"))?;

        let appsink = pipeline
            .by_name("sink")
            .and_then(|e| e.dynamic_cast::<gst_app::AppSink>().ok())
            .ok_or_else(|| PoselensError::source_open("Decode pipeline has no appsink"))?;

        pipeline.set_state(gst::State::Playing).map_err(|e| {
            PoselensError::source_open(format!("Failed to start decode pipeline: {e:?}"))
        })?;

        // State changes are async; wait so that open errors surface here.
        let (state_result, state, _) = pipeline.state(gst::ClockTime::from_seconds(10));
        if state_result.is_err() || state != gst::State::Playing {
            let detail = drain_bus_error(&pipeline)
                .unwrap_or_else(|| format!("pipeline stuck in {state:?}"));
            let _ = pipeline.set_state(gst::State::Null);
            return Err(PoselensError::source_open(format!(
                "Could not open {}: {detail}",
                path.display()
            )));
        }

        let fps = probe_fps(&appsink);
        tracing::debug!(path = %path.display(), fps, "Opened video source");

        Ok(Self {
            pipeline,
            appsink,
            fps,
            finished: false,
        })
    }
}

impl FrameSource for GstFrameSource {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn next_frame(&mut self) -> PoselensResult<Option<VideoFrame>> {
        if self.finished {
            return Ok(None);
        }

        let sample = match self.appsink.pull_sample() {
            Ok(sample) => sample,
            Err(_) => {
                self.finished = true;
                if self.appsink.is_eos() {
                    return Ok(None);
                }
                let detail = drain_bus_error(&self.pipeline)
                    .unwrap_or_else(|| "appsink stopped without EOS".to_string());
                return Err(PoselensError::decode(detail));
            }
        };

        let caps = sample
            .caps()
            .ok_or_else(|| PoselensError::decode("Sample carries no caps"))?;
        let structure = caps
            .structure(0)
            .ok_or_else(|| PoselensError::decode("Sample caps are empty"))?;
        let width = structure
            .get::<i32>("width")
            .map_err(|e| PoselensError::decode(format!("Missing frame width: {e}")))?
            as u32;
        let height = structure
            .get::<i32>("height")
            .map_err(|e| PoselensError::decode(format!("Missing frame height: {e}")))?
            as u32;

        let buffer = sample
            .buffer()
            .ok_or_else(|| PoselensError::decode("Sample carries no buffer"))?;
        let map = buffer
            .map_readable()
            .map_err(|e| PoselensError::decode(format!("Failed to map frame buffer: {e}")))?;

        Ok(Some(copy_rgb_frame(map.as_slice(), width, height)?))
    }
}

impl Drop for GstFrameSource {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

/// Copy packed RGB data out of a mapped buffer, stripping row padding.
///
/// GStreamer may pad RGB rows to 4-byte alignment, in which case the mapped
/// size exceeds `width * height * 3` and each row must be copied separately.
fn copy_rgb_frame(data: &[u8], width: u32, height: u32) -> PoselensResult<VideoFrame> {
    let row_bytes = width as usize * 3;
    let expected = row_bytes * height as usize;

    if data.len() == expected {
        return Ok(VideoFrame::new(width, height, data.to_vec()));
    }

    if height == 0 || data.len() < expected {
        return Err(PoselensError::decode(format!(
            "Frame buffer too small: {} bytes for {}x{}",
            data.len(),
            width,
            height
        )));
    }

    let stride = data.len() / height as usize;
    let mut out = Vec::with_capacity(expected);
    for row in 0..height as usize {
        let start = row * stride;
        out.extend_from_slice(&data[start..start + row_bytes]);
    }
    Ok(VideoFrame::new(width, height, out))
}

/// Read the negotiated frame rate off the appsink pad, if any.
///
/// Returns 0.0 when the container does not report one; the sampler applies
/// its own fallback stride in that case.
fn probe_fps(appsink: &gst_app::AppSink) -> f64 {
    let Some(pad) = appsink.static_pad("sink") else {
        return 0.0;
    };
    let Some(caps) = pad.current_caps() else {
        return 0.0;
    };
    let Some(structure) = caps.structure(0) else {
        return 0.0;
    };
    match structure.get::<gst::Fraction>("framerate") {
        Ok(fraction) if fraction.denom() != 0 => {
            f64::from(fraction.numer()) / f64::from(fraction.denom())
        }
        _ => 0.0,
    }
}

/// Pull the first error message off the pipeline bus, if one is queued.
fn drain_bus_error(pipeline: &gst::Pipeline) -> Option<String> {
    let bus = pipeline.bus()?;
    while let Some(msg) = bus.pop() {
        if let gst::MessageView::Error(e) = msg.view() {
            return Some(e.error().to_string());
        }
    }
    None
}

fn init_gstreamer() -> PoselensResult<()> {
    static GST_INIT: OnceLock<Result<(), String>> = OnceLock::new();
    let init_res = GST_INIT.get_or_init(|| gst::init().map_err(|e| e.to_string()));
    match init_res {
        Ok(()) => Ok(()),
        Err(e) => Err(PoselensError::missing_dependency(format!(
            "Failed to initialize GStreamer: {e}. Install the GStreamer runtime and base/good plugin sets."
        ))),
    }
}

/// Whether the decode stack is usable on this system.
pub fn decode_available() -> bool {
    init_gstreamer().is_ok()
}

fn escape_path(path: &Path) -> String {
    path.to_string_lossy().replace('"', "\\\"")
}
