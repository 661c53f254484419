//! 仓库访问存储服务的接口

use super::{config::InstanceOptions, error::RepositoryError};
use crate::{
    common::{Acl, ObjectsList},
    Error, OssClient,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::path::Path;

/// 仓库用到的存储操作
///
/// 每个方法对应一次请求，不做重试
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 列举文件，delimiter为None时递归列举
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        max_keys: u32,
    ) -> Result<ObjectsList, Error>;

    /// 生成有效期为 expires_in 的签名url
    fn sign_url(&self, bucket: &str, key: &str, expires_in: Duration) -> String;

    /// 文件是否存在
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, Error>;

    /// 下载文件到本地，返回写入的字节数
    async fn download(&self, bucket: &str, key: &str, save_path: &Path) -> Result<u64, Error>;

    /// 存储空间的ACL，用于确认存储空间可以访问
    async fn bucket_acl(&self, bucket: &str) -> Result<Acl, Error>;
}

/// 基于 OssClient 的实现，所有存储空间都在同一个地域
#[derive(Debug, Clone)]
pub struct OssStore {
    client: OssClient,
    endpoint: String,
}

impl OssStore {
    pub fn new(client: OssClient, endpoint: impl Into<String>) -> Self {
        OssStore {
            client,
            endpoint: endpoint.into(),
        }
    }
    /// 根据实例配置创建，AccessKey不能为空
    pub fn connect(options: &InstanceOptions) -> Result<Self, RepositoryError> {
        if options.access_key.trim().is_empty() {
            return Err(RepositoryError::NeedAccessKey);
        }
        let client = OssClient::new(&options.access_key, &options.secret_key);
        Ok(OssStore::new(client, options.endpoint_host()))
    }
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ObjectStore for OssStore {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        max_keys: u32,
    ) -> Result<ObjectsList, Error> {
        let mut list = self
            .client
            .bucket(bucket, &self.endpoint)
            .list_objects()
            .set_max_keys(max_keys);
        if let Some(prefix) = prefix {
            list = list.set_prefix(prefix);
        }
        if let Some(delimiter) = delimiter {
            list = list.set_delimiter(delimiter);
        }
        list.send().await
    }

    fn sign_url(&self, bucket: &str, key: &str, expires_in: Duration) -> String {
        self.client
            .bucket(bucket, &self.endpoint)
            .object(key)
            .get_object_url(Utc::now() + expires_in)
            .build()
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, Error> {
        self.client
            .bucket(bucket, &self.endpoint)
            .object(key)
            .head_object()
            .exists()
            .await
    }

    async fn download(&self, bucket: &str, key: &str, save_path: &Path) -> Result<u64, Error> {
        self.client
            .bucket(bucket, &self.endpoint)
            .object(key)
            .get_object()
            .download_to_file(save_path)
            .await
    }

    async fn bucket_acl(&self, bucket: &str) -> Result<Acl, Error> {
        self.client
            .bucket(bucket, &self.endpoint)
            .get_bucket_acl()
            .send()
            .await
    }
}
