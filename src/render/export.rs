//! Frame sequence exporters built on the `image` crate.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat};

use super::{ExportError, ExportSettings, FrameExporter, RenderedFrame};

fn check(frames: &[RenderedFrame], settings: &ExportSettings) -> Result<(), ExportError> {
    if frames.is_empty() {
        return Err(ExportError::NoFrames);
    }
    if settings.frame_rate == 0 {
        return Err(ExportError::InvalidFrameRate(settings.frame_rate));
    }
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes an infinitely looping animated GIF.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifExporter;

impl GifExporter {
    /// Create a GIF exporter.
    pub fn new() -> Self {
        Self
    }
}

impl FrameExporter for GifExporter {
    fn export(&mut self, frames: &[RenderedFrame], settings: &ExportSettings) -> Result<(), ExportError> {
        check(frames, settings)?;
        let path = &settings.output_path;
        create_parent(path)?;

        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite)?;

        let delay = Delay::from_numer_denom_ms(1000, settings.frame_rate);
        log::info!(
            "Writing {} frames to {} at {} fps",
            frames.len(),
            path.display(),
            settings.frame_rate
        );
        encoder.encode_frames(
            frames
                .iter()
                .map(|f| Frame::from_parts(f.image.clone(), 0, 0, delay)),
        )?;
        Ok(())
    }
}

/// Writes one numbered PNG per frame into a directory.
#[derive(Debug, Clone)]
pub struct PngSequenceExporter {
    prefix: String,
}

impl Default for PngSequenceExporter {
    fn default() -> Self {
        Self::new("frame")
    }
}

impl PngSequenceExporter {
    /// Files are named `<prefix>_<index>.png`, index zero-padded to 4 digits.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// File name for frame `index`.
    pub fn file_name(&self, index: usize) -> String {
        format!("{}_{:04}.png", self.prefix, index)
    }
}

impl FrameExporter for PngSequenceExporter {
    fn export(&mut self, frames: &[RenderedFrame], settings: &ExportSettings) -> Result<(), ExportError> {
        check(frames, settings)?;
        let dir = &settings.output_path;
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.clone(),
            source,
        })?;

        log::info!("Writing {} PNG frames to {}", frames.len(), dir.display());
        for frame in frames {
            let path = dir.join(self.file_name(frame.index));
            frame.image.save_with_format(&path, ImageFormat::Png)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::path::PathBuf;

    fn frames(n: usize) -> Vec<RenderedFrame> {
        (0..n)
            .map(|index| RenderedFrame {
                index,
                image: RgbaImage::from_pixel(4, 4, image::Rgba([index as u8 * 40, 0, 200, 255])),
            })
            .collect()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("holoface_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_gif_written() {
        let path = temp_path("anim.gif");
        let settings = ExportSettings {
            frame_rate: 30,
            output_path: path.clone(),
        };
        GifExporter::new().export(&frames(3), &settings).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(bytes.starts_with(b"GIF89a"));
    }

    #[test]
    fn test_png_sequence_written() {
        let dir = temp_path("pngs");
        let settings = ExportSettings {
            frame_rate: 12,
            output_path: dir.clone(),
        };
        let mut exporter = PngSequenceExporter::default();
        exporter.export(&frames(2), &settings).unwrap();
        assert!(dir.join("frame_0000.png").exists());
        assert!(dir.join("frame_0001.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rejects_empty_and_zero_rate() {
        let settings = ExportSettings {
            frame_rate: 0,
            output_path: temp_path("never.gif"),
        };
        assert!(matches!(
            GifExporter::new().export(&[], &settings),
            Err(ExportError::NoFrames)
        ));
        assert!(matches!(
            GifExporter::new().export(&frames(1), &settings),
            Err(ExportError::InvalidFrameRate(0))
        ));
    }
}
