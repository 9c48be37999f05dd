//! レジストリ認証情報の解決
//!
//! イメージ参照に紐づくシークレット・サービスアカウントから
//! キーチェーンを選択し、接続先レジストリごとに認証情報を遅延解決します。
//!
//! # 概要
//!
//! - **SecretStore**: 名前空間とシークレット/サービスアカウントから認証情報を引く
//! - **Keychain**: レジストリホストを受け取り Authenticator を返す（匿名 / pull secret / サービスアカウント）
//! - **SecretKeychainFactory**: イメージ参照からキーチェーンを選ぶ

pub mod auth;
pub mod docker_config;
pub mod error;
pub mod keychain;
pub mod matcher;
pub mod reference;
pub mod secret;
pub mod store;

pub use auth::Authenticator;
pub use error::{KeychainError, SecretError};
pub use keychain::{
    AnonymousKeychain, ImageKeychain, Keychain, PullSecretKeychain, SecretKeychainFactory,
    ServiceAccountKeychain,
};
pub use matcher::{DOCKER_HUB_REGISTRY, normalize_registry, registry_matches};
pub use reference::{ImageRef, ImageReference, registry_host};
pub use secret::{BasicCredentials, SecretStore};
pub use store::KdlSecretStore;
