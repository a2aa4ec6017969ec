// Chunked update streaming - one JSON document per line
use crate::application::streaming_service::StreamMessage;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;

/// Create a chunked NDJSON streaming response
pub fn ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamMessage> + Send + 'static,
{
    let byte_stream = stream.map(|msg| serialize_line(&msg));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message to a newline-terminated chunk
fn serialize_line(msg: &StreamMessage) -> Result<Bytes, std::io::Error> {
    let payload = serde_json::to_vec(msg)?;
    let mut chunk = BytesMut::with_capacity(payload.len() + 1);
    chunk.put_slice(&payload);
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub fn stream_from_receiver(mut rx: mpsc::Receiver<StreamMessage>) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match ndjson_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::Region;
    use crate::domain::destination::Destination;

    #[tokio::test]
    async fn test_messages_become_lines() {
        let messages = async_stream::stream! {
            yield StreamMessage::Skeleton {
                destination: Destination::new("Bishop, CA"),
                regions: vec![Region::Conditions],
            };
            yield StreamMessage::Complete {
                applied: 1,
                failed: 0,
                discarded: 0,
                duration_ms: 12,
            };
        };

        let response = ndjson_stream(messages).unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-ndjson");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "skeleton");
        assert_eq!(lines[0]["destination"], "Bishop, CA");
        assert_eq!(lines[1]["type"], "complete");
        assert_eq!(lines[1]["applied"], 1);
        assert!(text.ends_with('\n'));
    }
}
