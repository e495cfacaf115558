//! Upload of rendered marker layers to S3.

use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// Serialized JSON body and the key it should be stored under.
pub struct Payload {
    pub key: String,
    pub body: Vec<u8>,
    pub gzip: bool,
}

/// Serializes `value`, gzip-compressing it (and suffixing the key) when asked.
pub fn prepare_json(key: &str, value: &impl Serialize, gzip: bool) -> Result<Payload> {
    let body = serde_json::to_vec(value)?;

    if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&body)?;
        Ok(Payload {
            key: format!("{key}.gz"),
            body: encoder.finish()?,
            gzip,
        })
    } else {
        Ok(Payload {
            key: key.to_string(),
            body,
            gzip,
        })
    }
}

/// Uploads `value` as JSON with `application/json` content type.
#[tracing::instrument(skip(client, value))]
pub async fn write_json_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    value: &impl Serialize,
    gzip: bool,
) -> Result<()> {
    let payload = prepare_json(key, value, gzip)?;
    let size = payload.body.len();

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(&payload.key)
        .body(ByteStream::from(payload.body))
        .content_type("application/json");
    if payload.gzip {
        request = request.content_encoding("gzip");
    }
    request.send().await?;

    info!(key = %payload.key, bytes = size, "Uploaded to S3");
    Ok(())
}
