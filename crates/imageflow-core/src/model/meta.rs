//! オブジェクトメタデータと所有者参照

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// リソース共通のメタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// 名前の接頭辞（一意化サフィックスは外部の命名システムが付与する）
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub generate_name: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_references: Vec<OwnerReference>,
}

impl ObjectMeta {
    /// 名前と名前空間からメタデータを作成
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// ラベル値を取得
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// API グループ / バージョン / 種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupVersionKind {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
}

impl GroupVersionKind {
    /// `group/version` 形式の API バージョン文字列
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

/// 子リソースから親リソースへの所有者参照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_owner_deletion: Option<bool>,
}

/// 所有者参照を生成できるリソース
///
/// 親子関係を持つオーケストレーション基盤であれば、
/// このトレイトを実装することで所有者参照を供給できます。
pub trait OwnerRefable {
    fn object_meta(&self) -> &ObjectMeta;

    fn group_version_kind(&self) -> GroupVersionKind;
}

/// コントローラー参照を生成
///
/// `controller` と `block_owner_deletion` は常に true。
pub fn new_controller_ref<T: OwnerRefable + ?Sized>(owner: &T) -> OwnerReference {
    let gvk = owner.group_version_kind();
    let meta = owner.object_meta();
    OwnerReference {
        api_version: gvk.api_version(),
        kind: gvk.kind.to_string(),
        name: meta.name.clone(),
        uid: meta.uid.clone(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}
