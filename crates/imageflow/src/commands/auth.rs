use anyhow::Context;
use imageflow_registry::{
    ImageRef, ImageReference, KdlSecretStore, Keychain, SecretKeychainFactory, SecretStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AuthArgs {
    pub image: String,
    pub namespace: String,
    pub secret: Option<String>,
    pub service_account: Option<String>,
    pub registry: Option<String>,
}

pub fn handle(secrets_path: Option<&Path>, args: AuthArgs) -> anyhow::Result<()> {
    let reference = ImageReference {
        image: args.image,
        namespace: args.namespace,
        secret_name: args.secret,
        service_account: args.service_account,
    };
    let registry = args.registry.unwrap_or_else(|| reference.registry());

    // シークレットが紐付いていなければストアは読まない
    let store: Arc<dyn SecretStore> = if reference.has_secret() {
        Arc::new(load_store(secrets_path)?)
    } else {
        Arc::new(KdlSecretStore::default())
    };

    let keychain = SecretKeychainFactory::new(store).keychain_for_image_ref(&reference);
    tracing::info!(
        image = %reference.image(),
        keychain = keychain.kind(),
        registry = %registry,
        "Resolving credentials"
    );

    let authenticator = keychain
        .resolve(&registry)
        .with_context(|| format!("レジストリ '{}' の認証に失敗しました", registry))?;

    match authenticator.authorization() {
        Some(header) => println!("{}", header),
        None => println!("anonymous"),
    }

    Ok(())
}

fn load_store(path: Option<&Path>) -> anyhow::Result<KdlSecretStore> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => imageflow_config::find_secrets_file()?,
    };

    KdlSecretStore::from_file(&path)
        .with_context(|| format!("{} の読み込みに失敗しました", path.display()))
}
