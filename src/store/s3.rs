use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::CrawlerError;
use crate::traits::ImageSink;

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

pub struct S3ImageSink {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ImageSink {
    pub fn new(config: &StorageConfig) -> Result<Self, CrawlerError> {
        if config.bucket.trim().is_empty() {
            return Err(CrawlerError::Config("S3 버킷 이름이 비어 있습니다".into()));
        }

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl ImageSink for S3ImageSink {
    async fn store(&self, bytes: &[u8], key: &str) -> Result<(), CrawlerError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(IMAGE_CONTENT_TYPE)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| CrawlerError::Image(format!("S3 업로드 오류: key={}, {}", key, e)))?;

        debug!("S3 업로드 완료: bucket={}, key={}, size={}bytes", self.bucket, key, bytes.len());
        Ok(())
    }
}
