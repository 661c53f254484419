//! 配置表单的描述
//!
//! 表单由宿主渲染，这里只给出元素、默认值和校验规则

use super::{
    config::{TypeOptions, DEFAULT_ENDPOINT, DEFAULT_M3U8_BUCKET, DURATION_CHOICES, REGIONS},
    strings::get_string,
};
use serde_derive::Serialize;
use std::collections::BTreeMap;

/// 表单元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    PasswordUnmask,
    Select,
    Checkbox,
}

/// 表单值的清洗方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Int,
    RawTrimmed,
}

/// 下拉框的选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// 表单元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormElement {
    pub kind: ElementKind,
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
    pub required: bool,
}

impl FormElement {
    fn new(kind: ElementKind, name: &str, label: String) -> Self {
        FormElement {
            kind,
            name: name.to_owned(),
            label,
            attributes: BTreeMap::new(),
            choices: Vec::new(),
            default: None,
            param_type: None,
            required: false,
        }
    }
}

/// 配置表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigForm {
    pub elements: Vec<FormElement>,
}

impl ConfigForm {
    pub fn element(&self, name: &str) -> Option<&FormElement> {
        self.elements.iter().find(|element| element.name == name)
    }
    fn add(&mut self, element: FormElement) -> &mut FormElement {
        self.elements.push(element);
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }
    fn add_text(&mut self, kind: ElementKind, name: &str, label: String) -> &mut FormElement {
        let element = self.add(FormElement::new(kind, name, label));
        element
            .attributes
            .insert("maxlength".to_owned(), "255".to_owned());
        element.attributes.insert("size".to_owned(), "50".to_owned());
        element.param_type = Some(ParamType::RawTrimmed);
        element
    }
}

/// 仓库类型的配置表单：签名url有效期
pub fn type_config_form(stored: &TypeOptions) -> ConfigForm {
    let mut form = ConfigForm::default();
    let element = form.add(FormElement::new(
        ElementKind::Select,
        "duration",
        get_string("duration"),
    ));
    element.choices = DURATION_CHOICES
        .iter()
        .map(|minutes| Choice {
            value: minutes.to_string(),
            label: minutes.to_string(),
        })
        .collect();
    element.default = Some(stored.duration.to_string());
    element.param_type = Some(ParamType::Int);
    form
}

/// 仓库实例的配置表单
pub fn instance_config_form() -> ConfigForm {
    let mut form = ConfigForm::default();
    form.add_text(
        ElementKind::PasswordUnmask,
        "access_key",
        get_string("access_key"),
    )
    .required = true;
    form.add_text(
        ElementKind::PasswordUnmask,
        "secret_key",
        get_string("secret_key"),
    )
    .required = true;
    form.add_text(ElementKind::Text, "bucket_name", get_string("bucketname"))
        .required = true;

    let endpoint = form.add(FormElement::new(
        ElementKind::Select,
        "endpoint",
        get_string("endpoint"),
    ));
    endpoint.choices = REGIONS
        .iter()
        .map(|(region, description)| Choice {
            value: (*region).to_owned(),
            label: (*description).to_owned(),
        })
        .collect();
    endpoint.default = Some(DEFAULT_ENDPOINT.to_owned());

    form.add(FormElement::new(
        ElementKind::Checkbox,
        "use_m3u8_bucket",
        get_string("use_m3u8_bucket"),
    ));
    form.add_text(ElementKind::Text, "m3u8_bucket", get_string("m3u8_bucket"))
        .default = Some(DEFAULT_M3U8_BUCKET.to_owned());
    form
}
