//! Configuration for the itinerary engine.

/// Parameters for itinerary computation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Price charged per kilometer of route, in currency units.
    pub price_per_km: f64,
}

impl EngineConfig {
    /// Create a configuration with the given per-kilometer price.
    pub fn new(price_per_km: f64) -> Self {
        Self { price_per_km }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { price_per_km: 0.15 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.price_per_km, 0.15);
    }

    #[test]
    fn custom_config() {
        let config = EngineConfig::new(0.25);
        assert_eq!(config.price_per_km, 0.25);
    }
}
