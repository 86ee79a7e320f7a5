//! Length-prefixed bincode framing
//!
//! A frame is a 4-byte big-endian payload length followed by the bincode
//! payload. Oversized frames are refused on both ends; the reader checks
//! the header before allocating.

use std::io::ErrorKind;

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::TransportError;

const HEADER_LEN: usize = 4;

pub fn encode_frame<T: Serialize>(
    msg: &T,
    max_frame_bytes: usize,
) -> Result<Vec<u8>, TransportError> {
    let payload =
        bincode::serialize(msg).map_err(|e| TransportError::Serialization(e.to_string()))?;
    let too_large = TransportError::FrameTooLarge {
        size: payload.len(),
        max: max_frame_bytes,
    };
    if payload.len() > max_frame_bytes {
        return Err(too_large);
    }
    let len = u32::try_from(payload.len()).map_err(|_| too_large)?;

    let mut framed = Vec::with_capacity(HEADER_LEN + payload.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(&payload);
    Ok(framed)
}

pub fn decode_payload<T: DeserializeOwned>(payload: &[u8]) -> Result<T, TransportError> {
    bincode::deserialize(payload).map_err(|e| TransportError::Deserialization(e.to_string()))
}

/// Read one frame; `Ok(None)` on a clean EOF between frames
pub async fn read_frame<R, T>(
    reader: &mut R,
    max_frame_bytes: usize,
) -> Result<Option<T>, TransportError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut header = [0u8; HEADER_LEN];
    match reader.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(header) as usize;
    if len > max_frame_bytes {
        return Err(TransportError::FrameTooLarge {
            size: len,
            max: max_frame_bytes,
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    decode_payload(&payload).map(Some)
}

pub async fn write_frame<W, T>(
    writer: &mut W,
    msg: &T,
    max_frame_bytes: usize,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = encode_frame(msg, max_frame_bytes)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        id: u64,
        label: String,
    }

    #[test]
    fn test_frame_is_length_prefixed() {
        let probe = Probe {
            id: 7,
            label: "ready".to_string(),
        };
        let encoded = encode_frame(&probe, 1024).unwrap();

        let mut header = [0u8; 4];
        header.copy_from_slice(&encoded[..4]);
        assert_eq!(u32::from_be_bytes(header) as usize + 4, encoded.len());

        let decoded: Probe = decode_payload(&encoded[4..]).unwrap();
        assert_eq!(decoded, probe);
    }

    #[test]
    fn test_encode_rejects_oversized_payload() {
        let probe = Probe {
            id: 1,
            label: "x".repeat(64),
        };
        let err = encode_frame(&probe, 16).unwrap_err();
        assert!(matches!(err, TransportError::FrameTooLarge { max: 16, .. }));
    }

    #[tokio::test]
    async fn test_read_frame_checks_header_before_allocating() {
        let mut bytes: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3];
        let err = read_frame::<_, Probe>(&mut bytes, 1024).await.unwrap_err();
        assert!(matches!(err, TransportError::FrameTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_read_frame_clean_eof() {
        let mut bytes: &[u8] = &[];
        let frame = read_frame::<_, Probe>(&mut bytes, 1024).await.unwrap();
        assert!(frame.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let probe = Probe {
            id: 42,
            label: "ping".to_string(),
        };
        let mut buf = Vec::new();
        write_frame(&mut buf, &probe, 1024).await.unwrap();

        let mut reader: &[u8] = &buf;
        let decoded: Option<Probe> = read_frame(&mut reader, 1024).await.unwrap();
        assert_eq!(decoded, Some(probe));
    }
}
