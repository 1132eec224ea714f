//! Payload chunking into commitment-compatible field elements.
//!
//! A blob is 4096 field elements of 32 bytes each. A field element is only
//! guaranteed to be a valid member of the scalar field if its value stays
//! below the field modulus, so the first byte of every element is reserved
//! as zero and each element carries at most 31 payload bytes.
//!
//! The writer stops one element short of the end of the blob, so the final
//! element is always zero padding and the usable capacity is
//! (4096 - 1) * 31 bytes. Payloads longer than that are silently truncated;
//! callers are not told. This matches the deployed wire behavior.

use alloy::eips::eip4844::{Blob, BYTES_PER_BLOB, FIELD_ELEMENTS_PER_BLOB};

/// Size of one field element in bytes.
pub const ELEMENT_SIZE: usize = 32;

/// Payload bytes carried per element (one byte reserved as zero).
pub const DATA_BYTES_PER_ELEMENT: usize = ELEMENT_SIZE - 1;

/// Maximum payload bytes one blob can carry.
pub const MAX_PAYLOAD_BYTES: usize =
    (FIELD_ELEMENTS_PER_BLOB as usize - 1) * DATA_BYTES_PER_ELEMENT;

/// Pack a payload into a single blob.
///
/// Pure and total: no error conditions, no allocation beyond the fixed blob.
/// Unused space, including the leading byte of every element, stays zero.
pub fn chunk(payload: &[u8]) -> Box<Blob> {
    let mut blob = Box::new(Blob::ZERO);

    let mut woffset = 0;
    let mut roffset = 0;
    while roffset < payload.len() && woffset < BYTES_PER_BLOB - ELEMENT_SIZE {
        // first byte of the element stays zero
        woffset += 1;
        let take = DATA_BYTES_PER_ELEMENT.min(payload.len() - roffset);
        blob[woffset..woffset + take].copy_from_slice(&payload[roffset..roffset + take]);
        woffset += DATA_BYTES_PER_ELEMENT;
        roffset += take;
    }

    blob
}
