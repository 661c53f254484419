//! 仓库的配置项
//!
//! 配置由宿主保存为扁平的键值记录，这里只负责解析和回写

use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

/// 仓库实例的配置项名称
pub const INSTANCE_OPTION_NAMES: [&str; 6] = [
    "access_key",
    "secret_key",
    "endpoint",
    "bucket_name",
    "use_m3u8_bucket",
    "m3u8_bucket",
];

/// 仓库类型的配置项名称
pub const TYPE_OPTION_NAMES: [&str; 1] = ["duration"];

/// 签名url有效期的可选值，单位分钟
pub const DURATION_CHOICES: [u32; 6] = [1, 2, 10, 15, 30, 60];

pub const DEFAULT_DURATION: u32 = 2;
pub const DEFAULT_ENDPOINT: &str = "oss-cn-beijing";
pub const DEFAULT_M3U8_BUCKET: &str = "kltomo-temp";

/// 可选的地域，(地域ID, 描述)
pub const REGIONS: [(&str, &str); 18] = [
    ("oss-cn-hangzhou", "China (Hangzhou)"),
    ("oss-cn-shanghai", "China (Shanghai)"),
    ("oss-cn-qingdao", "China (Qingdao)"),
    ("oss-cn-beijing", "China (Beijing)"),
    ("oss-cn-zhangjiakou", "China (Zhangjiakou)"),
    ("oss-cn-huhehaote", "China (Hohhot)"),
    ("oss-cn-wulanchabu", "China (Ulanqab)"),
    ("oss-cn-shenzhen", "China (Shenzhen)"),
    ("oss-cn-heyuan", "China (Heyuan)"),
    ("oss-cn-guangzhou", "China (Guangzhou)"),
    ("oss-cn-chengdu", "China (Chengdu)"),
    ("oss-cn-hongkong", "China (Hong Kong)"),
    ("oss-us-west-1", "US (Silicon Valley)"),
    ("oss-us-east-1", "US (Virginia)"),
    ("oss-ap-southeast-1", "Singapore"),
    ("oss-ap-northeast-1", "Japan (Tokyo)"),
    ("oss-eu-central-1", "Germany (Frankfurt)"),
    ("oss-eu-west-1", "UK (London)"),
];

/// 仓库实例配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceOptions {
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    /// 地域ID，比如 oss-cn-beijing
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub bucket_name: String,
    /// 是否优先使用转码后的m3u8文件
    #[serde(default)]
    pub use_m3u8_bucket: bool,
    /// 存放m3u8文件的存储空间
    #[serde(default = "default_m3u8_bucket")]
    pub m3u8_bucket: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn default_m3u8_bucket() -> String {
    DEFAULT_M3U8_BUCKET.to_owned()
}

// 复选框提交的值
fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

impl Default for InstanceOptions {
    fn default() -> Self {
        InstanceOptions {
            access_key: String::new(),
            secret_key: String::new(),
            endpoint: default_endpoint(),
            bucket_name: String::new(),
            use_m3u8_bucket: false,
            m3u8_bucket: default_m3u8_bucket(),
        }
    }
}

impl InstanceOptions {
    /// 从宿主保存的键值记录中读取配置，值会去掉首尾空白
    pub fn from_records(records: &HashMap<String, String>) -> Self {
        let get = |name: &str| {
            records
                .get(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        InstanceOptions {
            access_key: get("access_key").unwrap_or_default(),
            secret_key: get("secret_key").unwrap_or_default(),
            endpoint: get("endpoint").unwrap_or_else(default_endpoint),
            bucket_name: get("bucket_name").unwrap_or_default(),
            use_m3u8_bucket: get("use_m3u8_bucket")
                .map(|value| is_checked(&value))
                .unwrap_or(false),
            m3u8_bucket: get("m3u8_bucket").unwrap_or_else(default_m3u8_bucket),
        }
    }
    /// 转换为键值记录，交给宿主保存
    pub fn to_records(&self) -> HashMap<String, String> {
        let mut records = HashMap::with_capacity(INSTANCE_OPTION_NAMES.len());
        records.insert("access_key".to_owned(), self.access_key.clone());
        records.insert("secret_key".to_owned(), self.secret_key.clone());
        records.insert("endpoint".to_owned(), self.endpoint.clone());
        records.insert("bucket_name".to_owned(), self.bucket_name.clone());
        records.insert(
            "use_m3u8_bucket".to_owned(),
            if self.use_m3u8_bucket { "1" } else { "0" }.to_owned(),
        );
        records.insert("m3u8_bucket".to_owned(), self.m3u8_bucket.clone());
        records
    }
    /// 访问域名
    ///
    /// endpoint 为地域ID时拼接为 {地域ID}.aliyuncs.com，已经是完整域名时原样使用
    pub fn endpoint_host(&self) -> String {
        let endpoint = self
            .endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        if endpoint.contains('.') {
            endpoint.to_owned()
        } else {
            format!("{}.aliyuncs.com", endpoint)
        }
    }
}

/// 仓库类型配置，所有实例共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOptions {
    /// 签名url有效期，单位分钟
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION
}

impl Default for TypeOptions {
    fn default() -> Self {
        TypeOptions {
            duration: DEFAULT_DURATION,
        }
    }
}

impl TypeOptions {
    pub fn from_records(records: &HashMap<String, String>) -> Self {
        let duration = records
            .get("duration")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|duration| *duration > 0)
            .unwrap_or(DEFAULT_DURATION);
        TypeOptions { duration }
    }
    pub fn to_records(&self) -> HashMap<String, String> {
        HashMap::from([("duration".to_owned(), self.duration.to_string())])
    }
    /// 签名url的有效期
    pub fn expires_in(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.duration))
    }
}
