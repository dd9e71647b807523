use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::DataUrlError;

/// Fixed filename the download action writes.
pub const DOWNLOAD_FILENAME: &str = "qr_code.png";

/// Encodes raw bytes as a `data:<mime>;base64,...` URL.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Encodes an image file's bytes, sniffing the mime type from its magic
/// numbers.
pub fn encode_image(bytes: &[u8]) -> String {
    encode(sniff_mime(bytes), bytes)
}

/// Decodes the payload of a base64 `data:` URL. The mime type is ignored;
/// only the `;base64,` framing matters.
pub fn decode(data_url: &str) -> Result<Vec<u8>, DataUrlError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(DataUrlError::MissingPrefix)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPrefix)?;
    if !header.ends_with(";base64") {
        return Err(DataUrlError::MissingPrefix);
    }
    Ok(STANDARD.decode(payload)?)
}

/// Writes the decoded image under [`DOWNLOAD_FILENAME`] in `dir` and
/// returns the full path. The bytes written are exactly the decoded
/// payload of the data URL.
pub fn save_download(data_url: &str, dir: &Path) -> Result<PathBuf, DataUrlError> {
    let bytes = decode(data_url)?;
    let path = dir.join(DOWNLOAD_FILENAME);
    std::fs::write(&path, bytes).map_err(|source| DataUrlError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips() {
        let bytes = [0x89, b'P', b'N', b'G', 1, 2, 3];
        let url = encode_image(&bytes);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&url).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_non_data_urls() {
        assert!(matches!(
            decode("https://example.com/a.png"),
            Err(DataUrlError::MissingPrefix)
        ));
        assert!(matches!(
            decode("data:image/png,notbase64framing"),
            Err(DataUrlError::MissingPrefix)
        ));
        assert!(matches!(
            decode("data:image/png;base64,@@@"),
            Err(DataUrlError::Base64(_))
        ));
    }

    #[test]
    fn jpeg_magic_is_sniffed() {
        let url = encode_image(&[0xFF, 0xD8, 0xFF, 0xE0]);
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn download_writes_exact_decoded_bytes() {
        let dir = std::env::temp_dir().join("glowdeck-dataurl-test");
        std::fs::create_dir_all(&dir).unwrap();

        let url = "data:image/png;base64,AAAA";
        let path = save_download(url, &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILENAME);
        assert_eq!(std::fs::read(&path).unwrap(), decode(url).unwrap());

        std::fs::remove_file(path).unwrap();
    }
}
