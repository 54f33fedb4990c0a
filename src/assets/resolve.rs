/// Default public IPFS gateway.
pub const DEFAULT_GATEWAY: &str = "https://ipfs.filebase.io";

/// Resolve an asset reference to a fetchable URL.
///
/// Absolute `http(s)` URLs and root-relative paths pass through unchanged;
/// anything else is treated as a raw CID and routed through the gateway.
pub fn to_gateway_url(asset_ref: &str, gateway_base_url: Option<&str>) -> String {
    if asset_ref.starts_with("http://")
        || asset_ref.starts_with("https://")
        || asset_ref.starts_with('/')
    {
        return asset_ref.to_string();
    }
    let base = gateway_base_url.unwrap_or(DEFAULT_GATEWAY).trim_end_matches('/');
    format!("{base}/ipfs/{asset_ref}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
