use {
    crate::config::{CHART, PriceScaleMode},
    anyhow::{Result, bail},
    serde::{Deserialize, Serialize},
};

/// Aspect of a chart: how many days and how many price units share one view unit.
///
/// A scaling of 1 day : 4 price units makes a 45 degree line rise four price units per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScaling {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub units_of_time: f64,
    pub units_of_price: f64,
    #[serde(default)]
    pub price_mode: PriceScaleMode,
}

impl Default for ChartScaling {
    fn default() -> Self {
        Self {
            name: "1 day : 1 price unit".to_string(),
            description: String::new(),
            units_of_time: CHART.default_units_of_time,
            units_of_price: CHART.default_units_of_price,
            price_mode: PriceScaleMode::Linear,
        }
    }
}

impl ChartScaling {
    pub fn new(name: impl Into<String>, units_of_time: f64, units_of_price: f64) -> Self {
        Self {
            name: name.into(),
            units_of_time,
            units_of_price,
            ..Self::default()
        }
    }

    pub fn with_price_mode(mut self, price_mode: PriceScaleMode) -> Self {
        self.price_mode = price_mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.units_of_time.is_finite() && self.units_of_time > 0.0) {
            bail!(
                "Scaling '{}': units of time must be positive, got {}",
                self.name,
                self.units_of_time
            );
        }
        if !(self.units_of_price.is_finite() && self.units_of_price > 0.0) {
            bail!(
                "Scaling '{}': units of price must be positive, got {}",
                self.name,
                self.units_of_price
            );
        }
        Ok(())
    }

    #[inline]
    pub fn view_scaling_x(&self) -> f64 {
        1.0 / self.units_of_time
    }

    #[inline]
    pub fn view_scaling_y(&self) -> f64 {
        1.0 / self.units_of_price
    }
}

impl std::fmt::Display for ChartScaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} days : {} price, {})",
            self.name, self.units_of_time, self.units_of_price, self.price_mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_scaling() {
        let s = ChartScaling::new("1:4", 1.0, 4.0);
        assert_eq!(s.view_scaling_x(), 1.0);
        assert_eq!(s.view_scaling_y(), 0.25);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_units() {
        assert!(ChartScaling::new("zero", 0.0, 1.0).validate().is_err());
        assert!(ChartScaling::new("neg", 1.0, -2.0).validate().is_err());
        assert!(ChartScaling::new("nan", f64::NAN, 1.0).validate().is_err());
    }
}
