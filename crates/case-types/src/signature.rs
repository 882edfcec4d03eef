//! Validation of captured signature images.
//!
//! Signatures arrive as PNG bytes drawn on a canvas. We only check shape
//! here; decoding for PDF embedding happens in the renderer, which falls
//! back to a text placeholder if the data turns out to be undecodable.

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Reject signature uploads above this size.
pub const MAX_SIGNATURE_BYTES: usize = 512 * 1024;

/// Validate a captured signature image before it is stored on a memo.
pub fn validate_signature_png(image_data: &[u8]) -> Result<(), &'static str> {
    if image_data.is_empty() {
        return Err("Signature image data must not be empty");
    }
    if image_data.len() < PNG_MAGIC.len() {
        return Err("PNG data too short");
    }
    if !image_data.starts_with(&PNG_MAGIC) {
        return Err("Invalid PNG magic bytes");
    }
    if image_data.len() > MAX_SIGNATURE_BYTES {
        return Err("Signature image too large");
    }
    Ok(())
}
