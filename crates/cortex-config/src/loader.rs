use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback model is missing, a weight is
    /// negative, or a catalog entry carries an out-of-range value
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_routing()?;
        self.validate_catalog()?;
        Ok(())
    }

    fn validate_routing(&self) -> anyhow::Result<()> {
        if self.routing.default_model.is_empty() {
            anyhow::bail!("routing.default_model must not be empty");
        }

        if self.routing.comparison.max_models == 0 {
            anyhow::bail!("routing.comparison.max_models must be at least 1");
        }

        if self.routing.comparison.closeness_threshold < 0.0 {
            anyhow::bail!("routing.comparison.closeness_threshold must not be negative");
        }

        let w = &self.routing.weights;
        let weights = [
            ("complexity", w.complexity),
            ("cost_efficiency", w.cost_efficiency),
            ("reliability", w.reliability),
            ("speed", w.speed),
            ("multimodal", w.multimodal),
            ("tool_use", w.tool_use),
            ("capability_match", w.capability_match),
            ("budget", w.budget),
        ];
        for (name, value) in weights {
            if value < 0.0 {
                anyhow::bail!("routing.weights.{name} must not be negative");
            }
        }

        Ok(())
    }

    fn validate_catalog(&self) -> anyhow::Result<()> {
        for entry in &self.catalog {
            let id = entry.id();

            if entry.provider.is_empty() || entry.model.is_empty() {
                anyhow::bail!("catalog entry '{id}' must set both provider and model");
            }

            for (name, rating) in [
                ("context_complexity", entry.context_complexity),
                ("reliability", entry.reliability),
                ("speed", entry.speed),
            ] {
                if let Some(value) = rating
                    && !(1..=5).contains(&value)
                {
                    anyhow::bail!("catalog entry '{id}': {name} must be between 1 and 5, got {value}");
                }
            }

            for (name, cost) in [
                ("input_cost_per_1k", entry.input_cost_per_1k),
                ("output_cost_per_1k", entry.output_cost_per_1k),
            ] {
                if let Some(value) = cost
                    && value < 0.0
                {
                    anyhow::bail!("catalog entry '{id}': {name} must not be negative");
                }
            }
        }

        Ok(())
    }
}
