use crate::foundation::error::{TeaError, TeaResult};

/// Environment variable naming the IPFS gateway base URL.
pub const ENV_GATEWAY: &str = "TEAFORGE_IPFS_GATEWAY";

/// Environment variable naming the layers manifest CID.
pub const ENV_MANIFEST_CID: &str = "TEAFORGE_LAYERS_MANIFEST_CID";

#[derive(Clone, Debug, Default)]
/// Generator configuration, typically loaded from the environment.
pub struct GeneratorConfig {
    /// IPFS gateway base URL; the default public gateway is used when unset.
    pub gateway_base_url: Option<String>,
    /// CID of the layers manifest document.
    pub manifest_cid: Option<String>,
}

impl GeneratorConfig {
    /// Read configuration from the process environment. Unset or empty
    /// variables are treated as absent.
    pub fn from_env() -> Self {
        Self {
            gateway_base_url: env_var(ENV_GATEWAY),
            manifest_cid: env_var(ENV_MANIFEST_CID),
        }
    }

    /// The gateway base URL, falling back to the default public gateway.
    pub fn gateway_base(&self) -> &str {
        self.gateway_base_url
            .as_deref()
            .unwrap_or(crate::assets::resolve::DEFAULT_GATEWAY)
    }

    /// The manifest CID, or a configuration error naming the variable to set.
    pub fn require_manifest_cid(&self) -> TeaResult<&str> {
        self.manifest_cid.as_deref().ok_or_else(|| {
            TeaError::config(format!("layers manifest CID not set (set {ENV_MANIFEST_CID})"))
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
