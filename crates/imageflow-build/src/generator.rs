//! ビルドの生成
//!
//! イメージとビルダーから次の Build リソースを組み立てる。
//! ビルドカウンタは読み取るだけで、更新はリコンサイラに任せる。

use imageflow_core::{
    BUILD_NUMBER_LABEL, Build, BuildSpec, BuildStatus, Builder, IMAGE_LABEL, Image, ObjectMeta,
    new_controller_ref,
};
use std::collections::BTreeMap;

/// generate_name の上限
///
/// これを超える場合は1文字分を一意化サフィックス用に空けて切り詰める。
pub const MAX_GENERATE_NAME_LEN: usize = 64;

/// 次のビルド番号
pub fn next_build_number(image: &Image) -> u64 {
    image.status.build_counter + 1
}

/// ビルド名の接頭辞 `<image>-build-<n>-` を生成
///
/// 64バイトを超える場合は63バイトに切り詰める。
/// マルチバイト文字の途中では切らず、直前の文字境界まで戻す。
pub fn generate_build_name(image: &Image) -> String {
    let mut name = format!("{}-build-{}-", image.name(), next_build_number(image));
    if name.len() > MAX_GENERATE_NAME_LEN {
        let mut end = MAX_GENERATE_NAME_LEN - 1;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}

/// 次の Build を生成
pub fn create_build(image: &Image, builder: &Builder) -> Build {
    let build_number = next_build_number(image);

    let mut labels = BTreeMap::new();
    labels.insert(BUILD_NUMBER_LABEL.to_string(), build_number.to_string());
    labels.insert(IMAGE_LABEL.to_string(), image.name().to_string());

    tracing::debug!(
        image = %image.name(),
        build_number,
        builder = %builder.spec.image,
        "Generating build"
    );

    Build {
        metadata: ObjectMeta {
            generate_name: generate_build_name(image),
            namespace: image.namespace().to_string(),
            labels,
            owner_references: vec![new_controller_ref(image)],
            ..Default::default()
        },
        spec: BuildSpec {
            build_number,
            image: image.spec.image.clone(),
            builder: builder.spec.image.clone(),
            service_account: image.spec.service_account.clone(),
            source: image.spec.source.clone(),
        },
        status: BuildStatus::default(),
    }
}
