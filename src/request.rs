use crate::{
    common::{query_encode, url_encode},
    Error,
};
use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, Utc};
use hyper::{client::ResponseFuture, header, Body, Client, Method, Request};
use hyper_tls::HttpsConnector;
use ring::hmac;
use std::{borrow::Cow, collections::BTreeMap};

// 参与签名的子资源
const SUB_RESOURCES: [&str; 24] = [
    "acl",
    "bucketInfo",
    "continuation-token",
    "location",
    "objectMeta",
    "regionList",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "security-token",
    "stat",
    "symlink",
    "tagging",
    "versionId",
    "versions",
    "x-oss-ac-forward-allow",
    "x-oss-ac-source-ip",
    "x-oss-ac-subnet-mask",
    "x-oss-ac-vpc-id",
    "x-oss-process",
    "x-oss-traffic-limit",
];

//Oss基础结构
#[derive(Debug, Clone)]
pub(crate) struct Oss {
    pub ak_id: Cow<'static, str>,
    pub ak_secret: Cow<'static, str>,
    pub security_token: Option<Cow<'static, str>>,
    pub endpoint: Cow<'static, str>,
    pub bucket: Option<Cow<'static, str>>,
    pub object: Option<Cow<'static, str>>,
    pub enable_https: bool,
}
impl Oss {
    pub fn new(ak_id: &str, ak_secret: &str) -> Self {
        Oss {
            ak_id: ak_id.to_owned().into(),
            ak_secret: ak_secret.to_owned().into(),
            security_token: None,
            endpoint: "oss.aliyuncs.com".into(),
            bucket: None,
            object: None,
            enable_https: true,
        }
    }
    pub fn set_bucket(&mut self, bucket: impl ToString) {
        self.bucket = Some(bucket.to_string().into());
    }
    pub fn set_endpoint(&mut self, endpoint: impl ToString) {
        self.endpoint = endpoint.to_string().into();
    }
    pub fn set_object(&mut self, object: impl ToString) {
        self.object = Some(object.to_string().into());
    }
    pub fn set_https(&mut self, https: bool) {
        self.enable_https = https;
    }
    pub fn set_security_token(&mut self, security_token: impl ToString) {
        self.security_token = Some(security_token.to_string().into());
    }
}

// 单次请求
#[derive(Debug)]
pub(crate) struct OssRequest {
    pub oss: Oss,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub querys: BTreeMap<String, String>,
    pub body: Body,
}
impl OssRequest {
    pub fn new(oss: Oss, method: Method) -> Self {
        OssRequest {
            oss,
            method,
            headers: BTreeMap::new(),
            querys: BTreeMap::new(),
            body: Body::empty(),
        }
    }
    pub fn insert_header(&mut self, key: impl ToString, value: impl ToString) {
        self.headers.insert(key.to_string(), value.to_string());
    }
    pub fn insert_query(&mut self, key: impl ToString, value: impl ToString) {
        self.querys.insert(key.to_string(), value.to_string());
    }
    pub fn uri(&self) -> String {
        let host = match &self.oss.bucket {
            Some(bucket) => format!("{}.{}", bucket, self.oss.endpoint),
            None => self.oss.endpoint.to_string(),
        };
        let query = self
            .querys
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.to_string()
                } else {
                    format!("{}={}", key, query_encode(value))
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        let query_str = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        };
        format!(
            "{}://{}/{}{}",
            if self.oss.enable_https { "https" } else { "http" },
            host,
            url_encode(self.oss.object.as_deref().unwrap_or("")),
            query_str
        )
    }
    // 构建待签名字符串，date_or_expires 为 Date 头或者 Expires 时间戳
    pub fn string_to_sign(&self, date_or_expires: &str, for_query: bool) -> String {
        //提取header数据
        let mut content_type = "";
        let mut content_md5 = "";
        let mut oss_headers = BTreeMap::new();
        for (key, value) in self.headers.iter() {
            let lower_key = key.to_ascii_lowercase();
            if lower_key.starts_with("x-oss-") {
                oss_headers.insert(lower_key, value.trim());
            } else if lower_key == "content-type" {
                content_type = value.as_str();
            } else if lower_key == "content-md5" {
                content_md5 = value.as_str();
            }
        }
        let canonicalized_ossheaders = oss_headers
            .iter()
            .map(|(key, value)| format!("{}:{}\n", key, value))
            .collect::<String>();
        //构建sub_resource，querys本身有序
        let sub_resource = self
            .querys
            .iter()
            .filter(|(key, _)| SUB_RESOURCES.contains(&key.as_str()))
            .filter(|(key, _)| !(for_query && key.as_str() == "x-oss-ac-source-ip"))
            .map(|(key, value)| {
                if value.is_empty() {
                    key.to_owned()
                } else {
                    format!("{}={}", key, value)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        //构建canonicalized_resource
        let mut canonicalized_resource = format!(
            "/{}{}",
            self.oss
                .bucket
                .as_deref()
                .map_or(String::new(), |v| format!("{}/", v)),
            self.oss.object.as_deref().unwrap_or("")
        );
        if !sub_resource.is_empty() {
            canonicalized_resource.push('?');
            canonicalized_resource.push_str(&sub_resource);
        }
        format!(
            "{}\n{}\n{}\n{}\n{}{}",
            self.method,
            content_md5,
            content_type,
            date_or_expires,
            canonicalized_ossheaders,
            canonicalized_resource
        )
    }
    fn sign(&self, unsign_str: &str) -> String {
        let key = hmac::Key::new(
            hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            self.oss.ak_secret.as_bytes(),
        );
        general_purpose::STANDARD.encode(hmac::sign(&key, unsign_str.as_bytes()))
    }
    // url签名，签名信息放在查询参数中
    pub fn query_sign(&mut self, expires: DateTime<Utc>) {
        if let Some(security_token) = self.oss.security_token.clone() {
            self.insert_query("security-token", security_token);
        };
        let expires = expires.timestamp().to_string();
        let sign_str = self.sign(&self.string_to_sign(&expires, true));
        self.insert_query("Expires", expires);
        self.insert_query("OSSAccessKeyId", self.oss.ak_id.clone());
        self.insert_query("Signature", sign_str);
    }
    // header签名，签名信息放在Authorization头中
    pub fn header_sign(&mut self) {
        if let Some(security_token) = self.oss.security_token.clone() {
            self.insert_header("x-oss-security-token", security_token);
        };
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let sign_str = self.sign(&self.string_to_sign(&date, false));
        self.insert_header(header::DATE, date);
        self.insert_header(
            header::AUTHORIZATION,
            format!("OSS {}:{}", self.oss.ak_id, sign_str),
        );
    }
    pub fn send_to_oss(mut self) -> Result<ResponseFuture, Error> {
        //完成签名
        self.header_sign();
        //构建http请求
        let mut req = Request::builder().method(&self.method).uri(&self.uri());
        for (key, value) in self.headers.iter() {
            req = req.header(key, value);
        }
        let request = req.body(self.body)?;
        let client = Client::builder().build::<_, hyper::Body>(HttpsConnector::new());
        Ok(client.request(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn object_request() -> OssRequest {
        let mut oss = Oss::new("ak", "secret");
        oss.set_endpoint("oss-cn-beijing.aliyuncs.com");
        oss.set_bucket("kltomo");
        oss.set_object("course/第一课.mp4");
        OssRequest::new(oss, Method::GET)
    }

    #[test]
    fn string_to_sign_uses_raw_key_and_sorted_sub_resources() {
        let mut req = object_request();
        req.insert_query("x-oss-process", "video/snapshot");
        req.insert_query("prefix", "ignored");
        req.insert_query("acl", "");
        req.insert_header("x-oss-meta-b", "2");
        req.insert_header("X-Oss-Meta-A", "1");
        req.insert_header("Content-Type", "video/mp4");
        assert_eq!(
            req.string_to_sign("1622536200", true),
            "GET\n\nvideo/mp4\n1622536200\nx-oss-meta-a:1\nx-oss-meta-b:2\n\
             /kltomo/course/第一课.mp4?acl&x-oss-process=video/snapshot"
        );
    }

    #[test]
    fn bucket_level_resource_ends_with_slash() {
        let mut oss = Oss::new("ak", "secret");
        oss.set_bucket("kltomo");
        let mut req = OssRequest::new(oss, Method::GET);
        req.insert_query("acl", "");
        assert_eq!(req.string_to_sign("date", false), "GET\n\n\ndate\n/kltomo/?acl");
        assert_eq!(req.uri(), "https://kltomo.oss.aliyuncs.com/?acl");
    }

    #[test]
    fn query_sign_appends_credentials() {
        let mut req = object_request();
        let expires = Utc.timestamp_opt(1_622_536_200, 0).unwrap();
        req.query_sign(expires);
        let uri = req.uri();
        assert!(uri.starts_with(
            "https://kltomo.oss-cn-beijing.aliyuncs.com/course/%E7%AC%AC%E4%B8%80%E8%AF%BE.mp4?"
        ));
        assert!(uri.contains("Expires=1622536200"));
        assert!(uri.contains("OSSAccessKeyId=ak"));
        assert!(uri.contains("&Signature="));
        assert!(!req.headers.contains_key("Date"));
    }

    #[test]
    fn security_token_is_signed_into_url() {
        let mut req = object_request();
        req.oss.set_security_token("sts-token");
        req.query_sign(Utc.timestamp_opt(1_622_536_200, 0).unwrap());
        assert_eq!(
            req.querys.get("security-token").map(String::as_str),
            Some("sts-token")
        );
    }

    #[test]
    fn header_sign_sets_authorization() {
        let mut req = object_request();
        req.header_sign();
        let auth = req.headers.get("authorization").unwrap();
        assert!(auth.starts_with("OSS ak:"));
        assert!(req.headers.contains_key("date"));
    }
}
