//! Cheap change detection for clipboard content.
//!
//! Fingerprints only answer "is this the same as what I saw last tick?". Collisions are
//! tolerable: text uses a non-cryptographic 64-bit hash, images use MD5 over the encoded PNG
//! (falling back to the pixel dimensions when encoding fails).

use twox_hash::xxh3::hash64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    Text(u64),
    FilePaths(u64),
    Image(String),
    ImageDimensions { width: usize, height: usize },
}

pub fn of_text(text: &str) -> Fingerprint {
    Fingerprint::Text(hash_str(text))
}

/// Fingerprint of a file list already joined with line breaks.
pub fn of_file_paths(joined: &str) -> Fingerprint {
    Fingerprint::FilePaths(hash_str(joined))
}

pub fn of_encoded_image(png: &[u8]) -> Fingerprint {
    Fingerprint::Image(format!("{:x}", md5::compute(png)))
}

pub fn of_image_dimensions(width: usize, height: usize) -> Fingerprint {
    Fingerprint::ImageDimensions { width, height }
}

fn hash_str(text: &str) -> u64 {
    hash64(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_text_gives_equal_fingerprints() {
        assert_eq!(of_text("hello"), of_text("hello"));
        assert_ne!(of_text("hello"), of_text("hello!"));
    }

    #[test]
    fn text_and_file_lists_never_compare_equal() {
        assert_ne!(of_text("/tmp/a"), of_file_paths("/tmp/a"));
    }

    #[test]
    fn image_fingerprint_is_md5_hex() {
        assert_eq!(
            of_encoded_image(b""),
            Fingerprint::Image("d41d8cd98f00b204e9800998ecf8427e".to_string())
        );
    }

    #[test]
    fn dimension_fallback_compares_sizes() {
        assert_eq!(of_image_dimensions(4, 3), of_image_dimensions(4, 3));
        assert_ne!(of_image_dimensions(4, 3), of_image_dimensions(3, 4));
    }
}
