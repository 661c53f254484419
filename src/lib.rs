//!
//! 把阿里云对象存储服务（Object Storage Service，简称OSS）的存储空间作为学习管理系统的文件仓库，
//! 用户可以浏览、搜索存储空间中的文件，并通过有时效的签名url直接访问。
//!
//! 没有复杂的结构，分为两部分：
//!
//! - OssClient - OssBucket - OssObject 三层结构的OSS客户端，只实现了仓库需要的少量API：
//!   列举文件、获取存储空间ACL、下载文件、获取文件元信息、生成签名url
//! - [`repository`] 仓库适配层，把文件列表转换为宿主的列表格式，生成签名url跳转，
//!   并可以把mp4文件替换为转码存储空间中的m3u8文件
//!
//! ##### 初始化
//!  ```
//! use ossbucket_repository::OssClient;
//!
//! let client = OssClient::new("Your AccessKey ID", "Your AccessKey Secret");
//! let bucket = client.bucket("for-rs-test", "oss-cn-zhangjiakou.aliyuncs.com");
//! ```
//!
//! ##### 查询存储空间中文件列表
//! ```no_run
//! # use ossbucket_repository::OssClient;
//! # async fn run() {
//! # let bucket = OssClient::new("ak", "sk").bucket("for-rs-test", "oss-cn-zhangjiakou.aliyuncs.com");
//! let objects = bucket.list_objects()
//!              .set_max_keys(200)
//!              .set_prefix("rust/")
//!              .set_delimiter("/")
//!              .send()
//!              .await;
//! # }
//! ```
//!
//! ##### 获取文件访问地址
//! ```
//! use chrono::{Duration, Utc};
//! # use ossbucket_repository::OssClient;
//! # let bucket = OssClient::new("ak", "sk").bucket("for-rs-test", "oss-cn-zhangjiakou.aliyuncs.com");
//!
//! let url = bucket.object("rust.png").get_object_url(Utc::now() + Duration::days(3)).build();
//! ```

#[doc(inline)]
pub use crate::bucket::OssBucket;
#[doc(inline)]
pub use crate::client::OssClient;
#[doc(inline)]
pub use crate::error::{Error, OssError};
#[doc(inline)]
pub use crate::object::OssObject;

pub mod bucket;
pub mod client;
pub mod common;
mod error;
pub mod object;
pub mod repository;
mod request;
