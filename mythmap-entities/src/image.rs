use crate::{id::*, time::*};

/// The item an image is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageParent {
    Place(Id),
    Note(Id),
}

impl ImageParent {
    pub fn id(&self) -> &Id {
        match self {
            Self::Place(id) | Self::Note(id) => id,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id           : Id,
    pub parent       : ImageParent,
    /// Key of the stored file in the media store
    pub file_name    : String,
    pub content_type : String,
    pub created_at   : Timestamp,
}

/// Derive a file extension from an `image/*` media type.
pub fn file_extension(content_type: &str) -> Option<&'static str> {
    let subtype = content_type
        .split(';')
        .next()?
        .trim()
        .strip_prefix("image/")?;
    match subtype.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" | "pjpeg" => Some("jpg"),
        "png" => Some("png"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        "svg+xml" => Some("svg"),
        "bmp" => Some("bmp"),
        "tiff" => Some("tiff"),
        "avif" => Some("avif"),
        "heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_of_image_types() {
        assert_eq!(Some("jpg"), file_extension("image/jpeg"));
        assert_eq!(Some("png"), file_extension("image/PNG"));
        assert_eq!(Some("svg"), file_extension("image/svg+xml; charset=utf-8"));
        assert_eq!(None, file_extension("image/x-unknown"));
        assert_eq!(None, file_extension("text/plain"));
        assert_eq!(None, file_extension(""));
    }
}
