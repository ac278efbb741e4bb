// src/model/order.rs

use crate::error::GameError;
use std::str::FromStr;

/// A production order for the factory that has already been validated:
/// a whole, non-negative number of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FactoryOrder(u32);

impl FactoryOrder {
    pub fn new(quantity: u32) -> Self {
        Self(quantity)
    }

    pub fn quantity(self) -> u32 {
        self.0
    }
}

impl From<u32> for FactoryOrder {
    fn from(quantity: u32) -> Self {
        Self(quantity)
    }
}

impl TryFrom<i64> for FactoryOrder {
    type Error = GameError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(GameError::InvalidOrder(format!(
                "order cannot be negative ({value})"
            )));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| GameError::InvalidOrder(format!("order {value} is too large")))
    }
}

impl TryFrom<f64> for FactoryOrder {
    type Error = GameError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(GameError::InvalidOrder(format!(
                "order must be a whole number of units ({value})"
            )));
        }
        if value < 0.0 {
            return Err(GameError::InvalidOrder(format!(
                "order cannot be negative ({value})"
            )));
        }
        if value > u32::MAX as f64 {
            return Err(GameError::InvalidOrder(format!("order {value} is too large")));
        }
        Ok(Self(value as u32))
    }
}

impl FromStr for FactoryOrder {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(whole) = trimmed.parse::<i64>() {
            return Self::try_from(whole);
        }
        match trimmed.parse::<f64>() {
            Ok(real) => Self::try_from(real),
            Err(_) => Err(GameError::InvalidOrder(format!(
                "'{trimmed}' is not a number"
            ))),
        }
    }
}
