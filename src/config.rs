use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` element holding
/// page-level overrides.
pub const CONFIG_ELEMENT_ID: &str = "shop-config";

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopConfig {
    pub cart_key: String,
    pub wishlist_key: String,
    pub tax_rate: f64,
    pub toast_ms: u32,
    pub toast_exit_ms: u32,
    pub tooltip_ms: u32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            cart_key: "cart".to_string(),
            wishlist_key: "wishlist".to_string(),
            tax_rate: 0.13,
            toast_ms: 3000,
            toast_exit_ms: 300,
            tooltip_ms: 2000,
        }
    }
}

impl ShopConfig {
    /// Parses page overrides; anything unreadable falls back to the defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                console_warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .map(|raw| Self::from_json(&raw))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = ShopConfig::from_json(r#"{ "taxRate": 0.05, "cartKey": "demo_cart" }"#);
        assert_eq!(config.tax_rate, 0.05);
        assert_eq!(config.cart_key, "demo_cart");
        assert_eq!(config.wishlist_key, "wishlist");
        assert_eq!(config.toast_ms, 3000);
    }

    #[test]
    fn malformed_config_uses_defaults() {
        assert_eq!(ShopConfig::from_json("{ not json"), ShopConfig::default());
    }
}
