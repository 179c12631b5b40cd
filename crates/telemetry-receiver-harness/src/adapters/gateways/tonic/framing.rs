//! gRPC length-prefixed message framing.
//!
//! Every message is preceded by a 5 byte header: 1 byte compression flag and
//! a 4 byte big-endian length.

use thiserror::Error;

const HEADER_LEN: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum FrameError {
    #[error("truncated frame header ({0} bytes)")]
    Truncated(usize),

    #[error("compressed messages are not supported")]
    Compressed,

    #[error("frame declares {declared} bytes but {present} are present")]
    Length { declared: usize, present: usize },
}

/// Extract the single message of a unary request body.
pub(crate) fn decode_frame(body: &[u8]) -> Result<&[u8], FrameError> {
    if body.len() < HEADER_LEN {
        return Err(FrameError::Truncated(body.len()));
    }
    if body[0] != 0 {
        return Err(FrameError::Compressed);
    }
    let declared = u32::from_be_bytes([body[1], body[2], body[3], body[4]]) as usize;
    let present = body.len() - HEADER_LEN;
    if present < declared {
        return Err(FrameError::Length { declared, present });
    }
    Ok(&body[HEADER_LEN..HEADER_LEN + declared])
}

pub(crate) fn encode_frame(message: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + message.len());
    frame.push(0); // No compression
    frame.extend_from_slice(&(message.len() as u32).to_be_bytes());
    frame.extend_from_slice(message);
    frame
}
