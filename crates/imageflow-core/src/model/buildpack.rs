//! Buildpack メタデータ

use serde::{Deserialize, Serialize};
use std::fmt;

/// Buildpack の識別子
///
/// `id` と `version` の組で1つの Buildpack を表す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildpackMetadata {
    pub id: String,
    pub version: String,
}

impl BuildpackMetadata {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for BuildpackMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// Buildpack メタデータの一覧
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildpackMetadataList(Vec<BuildpackMetadata>);

impl BuildpackMetadataList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した Buildpack が含まれているか
    pub fn include(&self, buildpack: &BuildpackMetadata) -> bool {
        self.0.iter().any(|bp| bp == buildpack)
    }

    pub fn push(&mut self, buildpack: BuildpackMetadata) {
        self.0.push(buildpack);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildpackMetadata> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<BuildpackMetadata>> for BuildpackMetadataList {
    fn from(buildpacks: Vec<BuildpackMetadata>) -> Self {
        Self(buildpacks)
    }
}

impl FromIterator<BuildpackMetadata> for BuildpackMetadataList {
    fn from_iter<I: IntoIterator<Item = BuildpackMetadata>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BuildpackMetadataList {
    type Item = &'a BuildpackMetadata;
    type IntoIter = std::slice::Iter<'a, BuildpackMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_matches_id_and_version() {
        let list: BuildpackMetadataList = vec![
            BuildpackMetadata::new("io.buildpacks.java", "1.0"),
            BuildpackMetadata::new("io.buildpacks.node", "2.1"),
        ]
        .into();

        assert!(list.include(&BuildpackMetadata::new("io.buildpacks.java", "1.0")));
        assert!(!list.include(&BuildpackMetadata::new("io.buildpacks.java", "1.1")));
        assert!(!list.include(&BuildpackMetadata::new("io.buildpacks.go", "1.0")));
    }

    #[test]
    fn test_serialize_as_plain_list() {
        let list: BuildpackMetadataList =
            vec![BuildpackMetadata::new("io.buildpacks.java", "1.0")].into();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"id":"io.buildpacks.java","version":"1.0"}]"#);
    }
}
