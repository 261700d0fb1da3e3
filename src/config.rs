use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::CostInputs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub costs: CostsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    #[serde(default = "default_products_path")]
    pub products: String,
    #[serde(default = "default_listings_path")]
    pub listings: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CostsConfig {
    #[serde(default)]
    pub shipping: f64,
    #[serde(default)]
    pub misc: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub products: Option<PathBuf>,
    pub listings: Option<PathBuf>,
    pub shipping: Option<f64>,
    pub misc: Option<f64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/catalog-oracle/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(products) = overrides.products {
            self.inputs.products = products.to_string_lossy().into_owned();
        }
        if let Some(listings) = overrides.listings {
            self.inputs.listings = listings.to_string_lossy().into_owned();
        }
        if let Some(shipping) = overrides.shipping {
            self.costs.shipping = shipping;
        }
        if let Some(misc) = overrides.misc {
            self.costs.misc = misc;
        }
    }

    /// Batch-wide shipping/misc costs; both must be non-negative.
    pub fn cost_inputs(&self) -> Result<CostInputs> {
        if self.costs.shipping < 0.0 {
            bail!(
                "shipping cost must be non-negative: {}",
                self.costs.shipping
            );
        }
        if self.costs.misc < 0.0 {
            bail!("misc cost must be non-negative: {}", self.costs.misc);
        }
        Ok(CostInputs {
            shipping_cost: self.costs.shipping,
            misc_cost: self.costs.misc,
        })
    }

    pub fn products_path(&self) -> PathBuf {
        expand_tilde(&self.inputs.products)
    }

    pub fn listings_path(&self) -> PathBuf {
        expand_tilde(&self.inputs.listings)
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[inputs]
products = "products.json"
listings = "listings.json"

[costs]
shipping = 0.0
misc = 0.0
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            products: default_products_path(),
            listings: default_listings_path(),
        }
    }
}

fn default_products_path() -> String {
    "products.json".to_string()
}

fn default_listings_path() -> String {
    "listings.json".to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Config, ConfigOverrides};

    #[test]
    fn template_parses_back_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).unwrap();
        assert_eq!(parsed.inputs.products, "products.json");
        assert_eq!(parsed.inputs.listings, "listings.json");
        assert_eq!(parsed.costs.shipping, 0.0);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            products: Some(PathBuf::from("/data/vendor.json")),
            listings: None,
            shipping: Some(2.5),
            misc: None,
        });
        assert_eq!(config.inputs.products, "/data/vendor.json");
        assert_eq!(config.inputs.listings, "listings.json");
        assert_eq!(config.costs.shipping, 2.5);
        assert_eq!(config.costs.misc, 0.0);
    }

    #[test]
    fn negative_costs_are_rejected() {
        let mut config = Config::default();
        config.costs.shipping = -1.0;
        assert!(config.cost_inputs().is_err());
        config.costs.shipping = 0.0;
        config.costs.misc = -0.5;
        assert!(config.cost_inputs().is_err());
    }
}
