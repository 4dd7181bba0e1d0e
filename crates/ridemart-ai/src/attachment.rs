//! Image attachments for diagnosis requests

use ridemart_types::{Error, ImageAttachment, Result};

/// Sniff the image format from its header bytes
pub fn attachment_from_bytes(bytes: Vec<u8>) -> Result<ImageAttachment> {
    let format = image::guess_format(&bytes)
        .map_err(|e| Error::InvalidInput(format!("Unsupported image: {}", e)))?;
    Ok(ImageAttachment {
        mime_type: format.to_mime_type().to_string(),
        bytes,
    })
}
