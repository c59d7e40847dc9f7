use {
    crate::config::{Price, PriceLike},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, PartialEq)]
pub enum BarType {
    Bullish,
    Bearish,
}

/// One OHLC bar of the chart's price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp_ms: i64,

    pub open_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    pub close_price: Price,

    #[serde(default)]
    pub volume: Option<f64>,
}

impl PriceBar {
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        PriceBar {
            timestamp_ms,
            open_price: Price::new(open),
            high_price: Price::new(high),
            low_price: Price::new(low),
            close_price: Price::new(close),
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn get_type(&self) -> BarType {
        if self.close_price.value() >= self.open_price.value() {
            BarType::Bullish
        } else {
            BarType::Bearish
        }
    }

    // Low and high of the bar body
    pub fn body_range(&self) -> (Price, Price) {
        match self.get_type() {
            BarType::Bullish => (self.open_price, self.close_price),
            BarType::Bearish => (self.close_price, self.open_price),
        }
    }

    pub fn mid_price(&self) -> Price {
        Price::new((self.high_price + self.low_price) / 2.0)
    }
}
