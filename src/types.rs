//! Core types for newswire

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One news result, fully assembled
///
/// Produced fresh on every pipeline trigger and replaced wholesale by
/// the next trigger's batch; nothing about an `Article` persists across
/// fetches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline (the `fields.headline` value)
    pub title: String,

    /// Section the article was published under (the `sectionName` value)
    pub section: String,

    /// Publication date, reformatted to `dd-MM-yyyy`
    ///
    /// When the upstream value does not match the expected ISO-8601
    /// shape the raw string is kept unchanged.
    pub published: String,

    /// Contributor name, or `"No author"` when the article has no
    /// contributor tag
    pub author: String,

    /// Absolute URL of the article on the website
    pub url: String,

    /// Downloaded thumbnail, absent when the image was unreachable or
    /// not a recognizable image
    pub thumbnail: Option<Thumbnail>,
}

/// Encoded image format, detected from leading magic bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG/JFIF
    Jpeg,
    /// GIF (87a or 89a)
    Gif,
    /// WebP (RIFF container)
    Webp,
}

impl ImageFormat {
    /// Detect the image format from the first bytes of an encoded image
    ///
    /// Returns `None` when the bytes match no known signature.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }

    /// MIME type for this format
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        };
        write!(f, "{}", name)
    }
}

/// A downloaded article thumbnail
///
/// Holds the encoded bytes exactly as served; rendering them is the
/// consumer's concern. Construction validates the image signature, so a
/// `Thumbnail` always has a known [`ImageFormat`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Detected image format
    pub format: ImageFormat,

    /// Encoded image bytes as served by the image host
    pub data: Vec<u8>,
}

impl Thumbnail {
    /// Validate downloaded bytes as an image and wrap them
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the bytes match no known image
    /// signature (including an empty body).
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        match ImageFormat::sniff(&data) {
            Some(format) => Ok(Self { format, data }),
            None => Err(Error::Decode(format!(
                "unrecognized image signature in {} byte body",
                data.len()
            ))),
        }
    }
}
