//! File loading: boundary JSON, calibration JSON and background images.
//!
//! Every loader either yields a complete [`MeasureEvent`] or a [`LoadError`];
//! nothing is applied to the state on failure, so a bad file leaves the
//! previous value in place.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::calibration::Calibration;
use crate::data::geometry::Boundary;
use crate::data::state::{BackgroundImage, MeasureEvent};

const JSON_EXTENSIONS: &[&str] = &["json"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff"];

/// Which slot a file is loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Boundary,
    Image,
    Calibration,
}

impl LoadKind {
    pub fn label(self) -> &'static str {
        match self {
            LoadKind::Boundary => "boundary",
            LoadKind::Image => "image",
            LoadKind::Calibration => "calibration",
        }
    }

    /// File-dialog filter for this slot.
    pub fn filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            LoadKind::Boundary => ("Boundary JSON", JSON_EXTENSIONS),
            LoadKind::Calibration => ("Calibration JSON", JSON_EXTENSIONS),
            LoadKind::Image => ("Image", IMAGE_EXTENSIONS),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed {what} input: {source}")]
    MalformedInput {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("calibration must be a positive number of mm per pixel, got {0}")]
    InvalidCalibration(f64),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("{} is not a boundary, calibration or image file", .0.display())]
    Unrecognized(PathBuf),
}

impl LoadError {
    /// True for the JSON-level failures (parse errors and bad calibration values).
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            LoadError::MalformedInput { .. } | LoadError::InvalidCalibration(_)
        )
    }
}

/// Parse a JSON array of `{start:{x,y}, end:{x,y}}` objects.
pub fn parse_boundary(text: &str) -> Result<Boundary, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::MalformedInput {
        what: "boundary",
        source,
    })
}

/// Parse a single JSON number (millimeters per pixel).
pub fn parse_calibration(text: &str) -> Result<Calibration, LoadError> {
    let value: f64 = serde_json::from_str(text).map_err(|source| LoadError::MalformedInput {
        what: "calibration",
        source,
    })?;
    Calibration::new(value).ok_or(LoadError::InvalidCalibration(value))
}

/// Decode any bitmap the `image` crate understands into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<BackgroundImage, LoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(BackgroundImage {
        size,
        rgba: rgba.into_raw(),
    })
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `path` into the given slot.
pub fn load(kind: LoadKind, path: &Path) -> Result<MeasureEvent, LoadError> {
    match kind {
        LoadKind::Boundary => parse_boundary(&read_text(path)?).map(MeasureEvent::BoundaryLoaded),
        LoadKind::Calibration => {
            parse_calibration(&read_text(path)?).map(MeasureEvent::CalibrationLoaded)
        }
        LoadKind::Image => decode_image(&read(path)?).map(MeasureEvent::ImageLoaded),
    }
}

/// Work out which slot a dropped file belongs to and load it.
///
/// Recognized bitmaps go to the image slot; a JSON array is a boundary and a
/// JSON number is a calibration.
pub fn load_dropped(path: &Path) -> Result<MeasureEvent, LoadError> {
    let bytes = read(path)?;
    classify_bytes(path, &bytes)
}

pub fn classify_bytes(path: &Path, bytes: &[u8]) -> Result<MeasureEvent, LoadError> {
    if image::guess_format(bytes).is_ok() {
        return decode_image(bytes).map(MeasureEvent::ImageLoaded);
    }
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(_) => return Err(LoadError::Unrecognized(path.to_path_buf())),
    };
    match value {
        serde_json::Value::Array(_) => serde_json::from_value::<Boundary>(value)
            .map(MeasureEvent::BoundaryLoaded)
            .map_err(|source| LoadError::MalformedInput {
                what: "boundary",
                source,
            }),
        serde_json::Value::Number(n) => {
            let v = n.as_f64().unwrap_or(f64::NAN);
            Calibration::new(v)
                .map(MeasureEvent::CalibrationLoaded)
                .ok_or(LoadError::InvalidCalibration(v))
        }
        _ => Err(LoadError::Unrecognized(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_for_json_object() {
        let err = classify_bytes(Path::new("x.json"), br#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, LoadError::Unrecognized(_)));
    }

    #[test]
    fn unrecognized_for_plain_text() {
        let err = classify_bytes(Path::new("notes.txt"), b"hello").unwrap_err();
        assert!(matches!(err, LoadError::Unrecognized(_)));
    }
}
