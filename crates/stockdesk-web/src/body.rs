//! Size-bounded request body reading.

use axum::body::Body;
use futures::StreamExt;

#[derive(Debug)]
pub enum BodyReadError {
    /// The running total passed the limit; the rest of the body was never read.
    TooLarge,
    Stream(axum::Error),
}

/// Collects `body` chunk by chunk, failing as soon as more than `limit` bytes arrive.
pub async fn read_limited(body: Body, limit: usize) -> Result<Vec<u8>, BodyReadError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(BodyReadError::Stream)?;
        if buf.len() + chunk.len() > limit {
            return Err(BodyReadError::TooLarge);
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}
