//! Bounded reading of one request from a connection.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::parser::{declared_content_length, find_header_end, Error as ParserError};
use crate::server::config::ServerConfig;
use crate::server::error::Error;

/// Read one request's bytes.
///
/// Reads until the header block ends, then, if `Content-Length` is
/// declared, until that many body bytes have arrived. Both sections are
/// bounded by the configuration. An empty result means the peer closed the
/// connection without sending anything.
pub async fn read_request<S>(socket: &mut S, config: &ServerConfig) -> Result<Vec<u8>, Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = vec![0; config.read_buffer_size.max(1)];

    let head_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        if buf.len() > config.max_header_size {
            return Err(ParserError::HeadersTooLarge(config.max_header_size).into());
        }
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            // No blank line ever came; let the parser judge what we have
            return Ok(buf);
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    if head_end > config.max_header_size {
        return Err(ParserError::HeadersTooLarge(config.max_header_size).into());
    }

    let Some(length) = declared_content_length(&buf[..head_end])? else {
        return Ok(buf);
    };
    if length > config.max_body_size {
        return Err(ParserError::BodyTooLarge {
            length,
            limit: config.max_body_size,
        }
        .into());
    }

    let total = head_end + length;
    while buf.len() < total {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(ParserError::IncompleteBody {
                expected: length,
                received: buf.len() - head_end,
            }
            .into());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    buf.truncate(total);

    Ok(buf)
}
