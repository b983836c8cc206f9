use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Uploads a resume PDF to object storage under the given key.
pub async fn upload_pdf(
    s3: &S3Client,
    bucket: &str,
    key: &str,
    data: Bytes,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(data))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("upload of {key} failed: {e}")))?;

    info!("Uploaded resume PDF to s3://{bucket}/{key}");
    Ok(())
}

/// Downloads a stored resume PDF. Used when the extracted text is not
/// cached on the resume row yet.
pub async fn download_pdf(s3: &S3Client, bucket: &str, key: &str) -> Result<Vec<u8>, AppError> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("download of {key} failed: {e}")))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::Storage(format!("reading body of {key} failed: {e}")))?;

    Ok(data.into_bytes().to_vec())
}
