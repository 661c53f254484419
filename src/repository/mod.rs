//! 把OSS存储空间作为宿主的文件仓库
//!
//! 宿主负责表单渲染、配置保存和权限检查，这里把这些入口接到存储服务上：
//! 浏览、搜索、生成签名url跳转、下载文件以及配置表单。
//!
//! ```no_run
//! use ossbucket_repository::repository::{InstanceOptions, OssRepository, TypeOptions};
//!
//! # async fn run() -> Result<(), ossbucket_repository::repository::RepositoryError> {
//! let options = InstanceOptions {
//!     access_key: "Your AccessKey ID".to_owned(),
//!     secret_key: "Your AccessKey Secret".to_owned(),
//!     bucket_name: "for-rs-test".to_owned(),
//!     ..InstanceOptions::default()
//! };
//! let repository = OssRepository::new("Course files", options, TypeOptions::default());
//! let listing = repository.get_listing("", 1).await?;
//! let redirect = repository.send_file("course/intro.mp4").await?;
//! # Ok(())
//! # }
//! ```

pub use self::{
    config::{InstanceOptions, TypeOptions, INSTANCE_OPTION_NAMES, TYPE_OPTION_NAMES},
    error::RepositoryError,
    form::{instance_config_form, type_config_form, ConfigForm, FormElement},
    listing::{IconResolver, Listing, ListingEntry, PathCrumb, PixIcons, SearchResult},
    redirect::Redirect,
    store::{ObjectStore, OssStore},
};

pub mod config;
mod error;
pub mod form;
pub mod listing;
mod redirect;
mod store;
pub mod strings;

use self::{
    listing::{basename, breadcrumbs, directory_entry, normalize_prefix, object_entry},
    redirect::m3u8_candidate,
    strings::get_string,
};
use chrono::Duration;
use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    sync::OnceLock,
    time::Instant,
};
use tracing::{debug, warn};

/// 单次列举的最大数量
pub const MAX_KEYS: u32 = 1000;

/// 文件状态：源文件丢失
pub const FILE_STATUS_SOURCE_MISSING: u32 = 666;

/// 仓库支持的返回方式，可以按位组合
pub const FILE_EXTERNAL: u32 = 1;
pub const FILE_INTERNAL: u32 = 2;
pub const FILE_REFERENCE: u32 = 4;

/// 宿主的上下文层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextLevel {
    System,
    User,
    CourseCategory,
    Course,
    Module,
    Block,
}

/// 下载到本地的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownload {
    /// 本地路径
    pub path: PathBuf,
    /// 源文件的key
    pub url: String,
    /// 写入的字节数
    pub size: u64,
}

/// 根据实例配置创建存储客户端
pub type Connector<S> = fn(&InstanceOptions) -> Result<S, RepositoryError>;

/// OSS存储空间仓库
///
/// 存储客户端在第一次使用时创建，之后在实例的生命周期内复用
pub struct OssRepository<S: ObjectStore = OssStore> {
    name: String,
    options: InstanceOptions,
    type_options: TypeOptions,
    disabled: bool,
    download_dir: PathBuf,
    icons: Box<dyn IconResolver + Send + Sync>,
    connector: Connector<S>,
    store: OnceLock<S>,
}

impl OssRepository<OssStore> {
    pub fn new(name: impl Into<String>, options: InstanceOptions, type_options: TypeOptions) -> Self {
        OssRepository::with_connector(name, options, type_options, OssStore::connect)
    }
}

impl<S: ObjectStore> OssRepository<S> {
    /// 使用自定义的存储客户端
    pub fn with_connector(
        name: impl Into<String>,
        options: InstanceOptions,
        type_options: TypeOptions,
        connector: Connector<S>,
    ) -> Self {
        OssRepository {
            name: name.into(),
            options,
            type_options,
            disabled: false,
            download_dir: std::env::temp_dir(),
            icons: Box::new(PixIcons::default()),
            connector,
            store: OnceLock::new(),
        }
    }
    /// 设置缩略图地址的生成方式
    pub fn set_icons(mut self, icons: impl IconResolver + Send + Sync + 'static) -> Self {
        self.icons = Box::new(icons);
        self
    }
    /// 设置 get_file 的下载目录
    pub fn set_download_dir(mut self, download_dir: impl Into<PathBuf>) -> Self {
        self.download_dir = download_dir.into();
        self
    }
    /// 禁用仓库，已引用的文件不再可用
    pub fn set_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn options(&self) -> &InstanceOptions {
        &self.options
    }
    pub fn type_options(&self) -> &TypeOptions {
        &self.type_options
    }

    fn store(&self) -> Result<&S, RepositoryError> {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }
        let store = (self.connector)(&self.options)?;
        Ok(self.store.get_or_init(|| store))
    }

    fn communication_error(&self, err: crate::Error) -> RepositoryError {
        warn!(repository = %self.name, error = %err, "oss request failed");
        RepositoryError::communication(&self.name, err)
    }

    /// 浏览目录
    ///
    /// path 为 "" 或 "." 时浏览根目录，否则作为前缀处理
    pub async fn get_listing(&self, path: &str, page: u32) -> Result<Listing, RepositoryError> {
        let bucket = &self.options.bucket_name;
        let prefix = normalize_prefix(path);
        debug!(%bucket, ?prefix, page, "listing oss bucket");
        let results = self
            .store()?
            .list_objects(bucket, prefix.as_deref(), Some("/"), MAX_KEYS)
            .await
            .map_err(|e| self.communication_error(e))?;

        let icons: &dyn IconResolver = &*self.icons;
        let mut list: Vec<ListingEntry> = results
            .common_prefixes
            .iter()
            .map(|common_prefix| directory_entry(&common_prefix.prefix, icons))
            .collect();
        list.extend(
            results
                .contents
                .iter()
                // 前缀本身作为占位对象也会出现在结果中
                .filter(|object| Some(object.key.as_str()) != prefix.as_deref())
                .filter_map(|object| object_entry(object, icons)),
        );

        Ok(Listing {
            list,
            path: breadcrumbs(bucket, prefix.as_deref()),
            manage: false,
            dynload: true,
            nologin: true,
            nosearch: false,
        })
    }

    /// 按文件名搜索，不区分大小写
    pub async fn search(&self, q: &str, page: u32) -> Result<SearchResult, RepositoryError> {
        let bucket = &self.options.bucket_name;
        debug!(%bucket, query = q, page, "searching oss bucket");
        let results = self
            .store()?
            .list_objects(bucket, None, None, MAX_KEYS)
            .await
            .map_err(|e| self.communication_error(e))?;

        let needle = q.trim().to_lowercase();
        let icons: &dyn IconResolver = &*self.icons;
        let list = results
            .contents
            .iter()
            .filter(|object| basename(&object.key).to_lowercase().contains(&needle))
            .filter_map(|object| {
                if listing::is_directory_key(&object.key) {
                    Some(directory_entry(&object.key, icons))
                } else {
                    object_entry(object, icons)
                }
            })
            .collect();

        Ok(SearchResult {
            list,
            dynload: true,
            pages: 0,
            page,
        })
    }

    /// 跳转到引用文件的签名url，有效期取仓库类型配置
    pub async fn send_file(&self, reference: &str) -> Result<Redirect, RepositoryError> {
        self.send_other_file(reference, self.type_options.expires_in())
            .await
    }

    /// 跳转到文件的签名url
    ///
    /// 开启了m3u8存储空间并且文件是mp4时，优先使用转码后的m3u8文件
    pub async fn send_other_file(
        &self,
        reference: &str,
        expires_in: Duration,
    ) -> Result<Redirect, RepositoryError> {
        if reference.is_empty() {
            return Err(RepositoryError::CannotDownload);
        }
        let store = self.store()?;
        let mut signed_url = store.sign_url(&self.options.bucket_name, reference, expires_in);

        if self.options.use_m3u8_bucket {
            if let Some(m3u8_reference) = m3u8_candidate(reference) {
                let started = Instant::now();
                let m3u8_bucket = &self.options.m3u8_bucket;
                // 替换是可选的，检查失败时保留原url
                let exists = match store.object_exists(m3u8_bucket, &m3u8_reference).await {
                    Ok(exists) => exists,
                    Err(e) => {
                        warn!(%m3u8_bucket, key = %m3u8_reference, error = %e, "m3u8 check failed");
                        false
                    }
                };
                debug!(
                    %m3u8_bucket,
                    key = %m3u8_reference,
                    exists,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "checked m3u8 replacement"
                );
                if exists {
                    signed_url = store.sign_url(m3u8_bucket, &m3u8_reference, expires_in);
                }
            }
        }
        Ok(Redirect::new(signed_url))
    }

    /// 引用文件的可读描述
    pub fn get_reference_details(
        &self,
        reference: &str,
        file_status: u32,
    ) -> Result<String, RepositoryError> {
        if self.disabled {
            return Err(RepositoryError::CannotDownload);
        }
        let reference = if file_status == FILE_STATUS_SOURCE_MISSING {
            ""
        } else {
            reference
        };
        Ok(self.get_file_source_info(reference))
    }

    /// 文件来源，形如 oss://bucket/key，超过50个字符会被截断
    pub fn get_file_source_info(&self, reference: &str) -> String {
        if reference.is_empty() {
            return get_string("unknownsource");
        }
        listing::short_filename(
            &format!("oss://{}/{}", self.options.bucket_name, reference),
            50,
        )
    }

    /// 下载文件到下载目录
    ///
    /// file_name 为空时使用key的文件名，只取最后一段，不会写到下载目录之外
    pub async fn get_file(
        &self,
        key: &str,
        file_name: &str,
    ) -> Result<FileDownload, RepositoryError> {
        let name = match basename(file_name) {
            "" | "." | ".." => basename(key),
            name => name,
        };
        if key.is_empty() || name.is_empty() {
            return Err(RepositoryError::CannotDownload);
        }
        let path = self.download_dir.join(name);
        debug!(bucket = %self.options.bucket_name, %key, path = %path.display(), "downloading object");
        let size = self
            .store()?
            .download(&self.options.bucket_name, key, &path)
            .await
            .map_err(|e| self.communication_error(e))?;
        Ok(FileDownload {
            path,
            url: key.to_owned(),
            size,
        })
    }

    /// 默认的返回方式
    pub fn default_return_type(&self) -> u32 {
        FILE_REFERENCE
    }

    /// 支持的返回方式
    pub fn supported_return_types(&self) -> u32 {
        FILE_INTERNAL | FILE_REFERENCE | FILE_EXTERNAL
    }

    /// 用户级上下文中的仓库访问的是私有数据
    pub fn contains_private_data(&self, context: ContextLevel) -> bool {
        context == ContextLevel::User
    }

    /// 仓库类型配置项名称
    pub fn type_option_names() -> &'static [&'static str] {
        &TYPE_OPTION_NAMES
    }

    /// 仓库实例配置项名称
    pub fn instance_option_names() -> &'static [&'static str] {
        &INSTANCE_OPTION_NAMES
    }
}

/// 校验实例配置表单
///
/// 必填项缺失时返回对应字段的错误；凭证齐全时会读取一次存储空间ACL确认可以访问
pub async fn validate_instance_form<S: ObjectStore>(
    data: &HashMap<String, String>,
    connector: Connector<S>,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for name in ["access_key", "secret_key", "bucket_name"] {
        let missing = data.get(name).map_or(true, |value| value.trim().is_empty());
        if missing {
            errors.insert(name.to_owned(), get_string("required"));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    let options = InstanceOptions::from_records(data);
    let checked = match connector(&options) {
        Ok(store) => store
            .bucket_acl(&options.bucket_name)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(message) = checked {
        warn!(bucket = %options.bucket_name, error = %message, "bucket check failed");
        errors.insert(
            "bucket_name".to_owned(),
            get_string("errorwhilecommunicatingwith"),
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{Acl, CommonPrefix, ObjectInfo, ObjectsList, StorageClass},
        error::OssError,
        Error,
    };
    use async_trait::async_trait;
    use hyper::StatusCode;
    use std::{
        collections::HashSet,
        path::Path,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    static CONNECTS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct FakeStore {
        objects: Vec<ObjectInfo>,
        prefixes: Vec<String>,
        existing: HashSet<(String, String)>,
        fail: bool,
        denied_bucket: Option<String>,
        list_calls: Mutex<Vec<(String, Option<String>, Option<String>)>>,
        sign_calls: Mutex<Vec<(String, String, Duration)>>,
    }

    fn object(key: &str, size: u64) -> ObjectInfo {
        ObjectInfo {
            key: key.to_owned(),
            last_modified: "2021-06-01T08:30:00.000Z".to_owned(),
            e_tag: String::new(),
            size,
            storage_class: StorageClass::Standard,
        }
    }

    fn access_denied() -> Error {
        Error::OssError(
            StatusCode::FORBIDDEN,
            OssError {
                code: "AccessDenied".to_owned(),
                message: "You have no right to access this object.".to_owned(),
                request_id: String::new(),
                host_id: String::new(),
            },
        )
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn list_objects(
            &self,
            bucket: &str,
            prefix: Option<&str>,
            delimiter: Option<&str>,
            _max_keys: u32,
        ) -> Result<ObjectsList, Error> {
            self.list_calls.lock().unwrap().push((
                bucket.to_owned(),
                prefix.map(str::to_owned),
                delimiter.map(str::to_owned),
            ));
            if self.fail {
                return Err(access_denied());
            }
            Ok(ObjectsList {
                contents: self.objects.clone(),
                common_prefixes: self
                    .prefixes
                    .iter()
                    .map(|prefix| CommonPrefix {
                        prefix: prefix.clone(),
                    })
                    .collect(),
                ..ObjectsList::default()
            })
        }

        fn sign_url(&self, bucket: &str, key: &str, expires_in: Duration) -> String {
            self.sign_calls
                .lock()
                .unwrap()
                .push((bucket.to_owned(), key.to_owned(), expires_in));
            format!(
                "https://{}.oss-cn-beijing.aliyuncs.com/{}?Expires={}",
                bucket,
                key,
                expires_in.num_seconds()
            )
        }

        async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, Error> {
            if self.fail || self.denied_bucket.as_deref() == Some(bucket) {
                return Err(access_denied());
            }
            Ok(self.existing.contains(&(bucket.to_owned(), key.to_owned())))
        }

        async fn download(&self, bucket: &str, key: &str, save_path: &Path) -> Result<u64, Error> {
            if self.fail {
                return Err(access_denied());
            }
            let content = format!("{}/{}", bucket, key);
            tokio::fs::write(save_path, &content).await?;
            Ok(content.len() as u64)
        }

        async fn bucket_acl(&self, bucket: &str) -> Result<Acl, Error> {
            if self.fail || bucket != "kltomo" {
                return Err(access_denied());
            }
            Ok(Acl::Private)
        }
    }

    fn options() -> InstanceOptions {
        InstanceOptions {
            access_key: "ak".to_owned(),
            secret_key: "sk".to_owned(),
            bucket_name: "kltomo".to_owned(),
            ..InstanceOptions::default()
        }
    }

    fn course_store(_: &InstanceOptions) -> Result<FakeStore, RepositoryError> {
        Ok(FakeStore {
            objects: vec![
                object("course/", 0),
                object("course/intro.mp4", 1024),
                object("course/intro-seg-001.ts", 512),
                object("course/Syllabus.PDF", 64),
            ],
            prefixes: vec!["course/week1/".to_owned()],
            ..FakeStore::default()
        })
    }

    fn hls_store(_: &InstanceOptions) -> Result<FakeStore, RepositoryError> {
        let mut existing = HashSet::new();
        existing.insert(("kltomo-temp".to_owned(), "course/intro.m3u8".to_owned()));
        Ok(FakeStore {
            existing,
            ..FakeStore::default()
        })
    }

    fn denied_m3u8_store(_: &InstanceOptions) -> Result<FakeStore, RepositoryError> {
        let mut existing = HashSet::new();
        existing.insert(("kltomo-temp".to_owned(), "course/intro.m3u8".to_owned()));
        Ok(FakeStore {
            existing,
            denied_bucket: Some("kltomo-temp".to_owned()),
            ..FakeStore::default()
        })
    }

    fn failing_store(_: &InstanceOptions) -> Result<FakeStore, RepositoryError> {
        Ok(FakeStore {
            fail: true,
            ..FakeStore::default()
        })
    }

    fn counted_store(_: &InstanceOptions) -> Result<FakeStore, RepositoryError> {
        CONNECTS.fetch_add(1, Ordering::SeqCst);
        Ok(FakeStore::default())
    }

    fn repository(connector: Connector<FakeStore>) -> OssRepository<FakeStore> {
        OssRepository::with_connector("Course files", options(), TypeOptions::default(), connector)
    }

    #[tokio::test]
    async fn listing_maps_prefixes_and_objects() {
        let repository = repository(course_store);
        let listing = repository.get_listing("course", 1).await.unwrap();

        let titles: Vec<_> = listing.list.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["week1", "intro.mp4", "Syllabus.PDF"]);
        assert!(listing.list[0].is_dir());
        assert_eq!(listing.list[0].path, "course/week1/");
        assert_eq!(listing.list[1].path, "course/intro.mp4");
        assert_eq!(listing.list[1].size, Some(1024));
        assert_eq!(listing.path.last().unwrap().path, "course/");
        assert!(listing.dynload && listing.nologin && !listing.manage && !listing.nosearch);

        let store = repository.store().unwrap();
        let calls = store.list_calls.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                "kltomo".to_owned(),
                Some("course/".to_owned()),
                Some("/".to_owned())
            )
        );
    }

    #[tokio::test]
    async fn root_listing_has_no_prefix() {
        let repository = repository(course_store);
        let listing = repository.get_listing(".", 1).await.unwrap();
        assert_eq!(listing.path.len(), 1);
        assert_eq!(listing.path[0].name, "kltomo");
        let store = repository.store().unwrap();
        assert_eq!(store.list_calls.lock().unwrap()[0].1, None);
    }

    #[tokio::test]
    async fn listing_serializes_to_host_shape() {
        let repository = repository(course_store);
        let listing = repository.get_listing("course/", 1).await.unwrap();
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["list"][0]["children"], serde_json::json!([]));
        assert_eq!(value["list"][1]["source"], "course/intro.mp4");
        assert_eq!(value["list"][1]["datemodified"], 1_622_536_200);
        assert_eq!(value["nosearch"], false);
    }

    #[tokio::test]
    async fn search_filters_by_name() {
        let repository = repository(course_store);
        let result = repository.search("syllabus", 3).await.unwrap();
        assert_eq!(result.list.len(), 1);
        assert_eq!(result.list[0].path, "course/Syllabus.PDF");
        assert_eq!(result.page, 3);
        assert_eq!(result.pages, 0);

        let all = repository.search("", 1).await.unwrap();
        let paths: Vec<_> = all.list.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["course/", "course/intro.mp4", "course/Syllabus.PDF"]);
        assert!(all.list[0].is_dir());

        let store = repository.store().unwrap();
        assert_eq!(store.list_calls.lock().unwrap()[0], ("kltomo".to_owned(), None, None));
    }

    #[tokio::test]
    async fn send_file_signs_configured_bucket_and_duration() {
        let repository = OssRepository::with_connector(
            "Course files",
            options(),
            TypeOptions { duration: 15 },
            course_store,
        );
        let redirect = repository.send_file("course/intro.mp4").await.unwrap();
        assert_eq!(
            redirect.location,
            "https://kltomo.oss-cn-beijing.aliyuncs.com/course/intro.mp4?Expires=900"
        );
        let store = repository.store().unwrap();
        let calls = store.sign_calls.lock().unwrap();
        assert_eq!(
            *calls,
            [(
                "kltomo".to_owned(),
                "course/intro.mp4".to_owned(),
                Duration::minutes(15)
            )]
        );
    }

    #[tokio::test]
    async fn m3u8_replacement_needs_flag_and_mp4() {
        // 未开启时不替换
        let repository = repository(hls_store);
        let redirect = repository
            .send_other_file("course/intro.mp4", Duration::minutes(2))
            .await
            .unwrap();
        assert!(redirect.location.starts_with("https://kltomo."));

        let enabled = InstanceOptions {
            use_m3u8_bucket: true,
            ..options()
        };
        let repository =
            OssRepository::with_connector("Course files", enabled, TypeOptions::default(), hls_store);
        let redirect = repository
            .send_other_file("course/intro.mp4", Duration::minutes(2))
            .await
            .unwrap();
        assert_eq!(
            redirect.location,
            "https://kltomo-temp.oss-cn-beijing.aliyuncs.com/course/intro.m3u8?Expires=120"
        );

        // 非mp4文件不替换
        let redirect = repository
            .send_other_file("course/intro.mov", Duration::minutes(2))
            .await
            .unwrap();
        assert!(redirect.location.starts_with("https://kltomo."));

        // m3u8文件不存在时保留原url
        let redirect = repository
            .send_other_file("course/outro.mp4", Duration::minutes(2))
            .await
            .unwrap();
        assert!(redirect.location.contains("/course/outro.mp4?"));
    }

    #[tokio::test]
    async fn m3u8_check_failure_keeps_original_url() {
        let enabled = InstanceOptions {
            use_m3u8_bucket: true,
            ..options()
        };
        let repository = OssRepository::with_connector(
            "Course files",
            enabled,
            TypeOptions::default(),
            denied_m3u8_store,
        );
        let redirect = repository.send_file("course/intro.mp4").await.unwrap();
        assert_eq!(
            redirect.location,
            "https://kltomo.oss-cn-beijing.aliyuncs.com/course/intro.mp4?Expires=120"
        );
        let store = repository.store().unwrap();
        assert_eq!(store.sign_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_reference_cannot_download() {
        let repository = repository(course_store);
        let err = repository.send_file("").await.unwrap_err();
        assert!(matches!(err, RepositoryError::CannotDownload));
        assert_eq!(err.string_key(), "cannotdownload");
    }

    #[tokio::test]
    async fn store_failures_become_communication_errors() {
        let repository = repository(failing_store);
        let err = repository.get_listing("", 1).await.unwrap_err();
        match err {
            RepositoryError::Communication {
                repository,
                message,
            } => {
                assert_eq!(repository, "Course files");
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            repository.search("a", 1).await,
            Err(RepositoryError::Communication { .. })
        ));
    }

    #[tokio::test]
    async fn missing_access_key_is_a_configuration_error() {
        let options = InstanceOptions {
            access_key: String::new(),
            ..options()
        };
        let repository = OssRepository::new("Course files", options, TypeOptions::default());
        let err = repository.get_listing("", 1).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NeedAccessKey));
        assert_eq!(err.string_key(), "needaccesskey");
    }

    #[tokio::test]
    async fn client_is_created_once() {
        let repository = repository(counted_store);
        let before = CONNECTS.load(Ordering::SeqCst);
        repository.get_listing("", 1).await.unwrap();
        repository.search("x", 1).await.unwrap();
        repository.send_file("a.pdf").await.unwrap();
        assert_eq!(CONNECTS.load(Ordering::SeqCst) - before, 1);
    }

    #[test]
    fn reference_details() {
        let repository = repository(course_store);
        assert_eq!(
            repository.get_reference_details("course/intro.mp4", 0).unwrap(),
            "oss://kltomo/course/intro.mp4"
        );
        assert_eq!(
            repository
                .get_reference_details("course/intro.mp4", FILE_STATUS_SOURCE_MISSING)
                .unwrap(),
            "Unknown source"
        );
        let disabled = repository.set_disabled(true);
        assert!(matches!(
            disabled.get_reference_details("course/intro.mp4", 0),
            Err(RepositoryError::CannotDownload)
        ));
    }

    #[tokio::test]
    async fn get_file_downloads_into_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let repository = repository(course_store).set_download_dir(dir.path());
        let file = repository.get_file("course/intro.mp4", "").await.unwrap();
        assert_eq!(file.path, dir.path().join("intro.mp4"));
        assert_eq!(file.url, "course/intro.mp4");
        let content = tokio::fs::read_to_string(&file.path).await.unwrap();
        assert_eq!(content, "kltomo/course/intro.mp4");
        assert_eq!(file.size, content.len() as u64);

        let renamed = repository
            .get_file("course/intro.mp4", "../../escape.mp4")
            .await
            .unwrap();
        assert_eq!(renamed.path, dir.path().join("escape.mp4"));
    }

    #[tokio::test]
    async fn get_file_failure_is_a_communication_error() {
        let dir = tempfile::tempdir().unwrap();
        let repository = repository(failing_store).set_download_dir(dir.path());
        match repository.get_file("course/intro.mp4", "").await {
            Err(RepositoryError::Communication { repository, message }) => {
                assert_eq!(repository, "Course files");
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!dir.path().join("intro.mp4").exists());
    }

    #[test]
    fn return_types_and_privacy() {
        let repository = repository(course_store);
        assert_eq!(repository.default_return_type(), FILE_REFERENCE);
        assert_eq!(repository.supported_return_types(), 7);
        assert!(repository.contains_private_data(ContextLevel::User));
        assert!(!repository.contains_private_data(ContextLevel::Course));
        assert_eq!(OssRepository::<FakeStore>::type_option_names(), ["duration"]);
        assert_eq!(OssRepository::<FakeStore>::instance_option_names().len(), 6);
    }

    #[tokio::test]
    async fn instance_form_validation() {
        let mut data: HashMap<String, String> = [
            ("access_key", "ak"),
            ("secret_key", "sk"),
            ("bucket_name", "kltomo"),
            ("endpoint", "oss-cn-beijing"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert!(validate_instance_form(&data, course_store).await.is_empty());

        data.insert("bucket_name".to_owned(), "missing".to_owned());
        let errors = validate_instance_form(&data, course_store).await;
        assert_eq!(
            errors.get("bucket_name").map(String::as_str),
            Some("Error while communicating with the repository")
        );

        data.remove("secret_key");
        let errors = validate_instance_form(&data, course_store).await;
        assert_eq!(errors.get("secret_key").map(String::as_str), Some("Required"));
    }
}
