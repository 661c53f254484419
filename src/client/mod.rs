//! 包括AccessKey和EndPoint信息的基础服务

pub use self::oss_client::OssClient;

mod oss_client;
