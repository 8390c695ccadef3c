use std::fmt::{Display, Formatter};
use std::str::FromStr;

use cadence_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Unit of a delayed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryUnit {
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
    /// Weeks.
    Weeks,
}

impl DeliveryUnit {
    /// Returns the plural storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::Days => "day",
            Self::Weeks => "week",
        }
    }

    /// Returns the delay expressed in minutes.
    #[must_use]
    pub fn minutes(&self, value: u32) -> u64 {
        let factor: u64 = match self {
            Self::Minutes => 1,
            Self::Hours => 60,
            Self::Days => 60 * 24,
            Self::Weeks => 60 * 24 * 7,
        };

        u64::from(value) * factor
    }
}

impl FromStr for DeliveryUnit {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            other => Err(AppError::Validation(format!(
                "unknown delivery unit '{other}'"
            ))),
        }
    }
}

/// When an action runs relative to the previous step of its connection plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryTiming {
    /// Run as soon as the plan reaches the action.
    Immediate,
    /// Run after a delay.
    Delay {
        /// Delay amount, greater than zero.
        value: u32,
        /// Delay unit.
        unit: DeliveryUnit,
    },
}

impl DeliveryTiming {
    /// Builds the timing from the editor's delivery type, value and unit inputs.
    pub fn from_parts(
        delivery_type: &str,
        delivery_value: Option<u32>,
        delivery_unit: Option<&str>,
    ) -> AppResult<Self> {
        match delivery_type.trim() {
            "immediate" | "immediately" => Ok(Self::Immediate),
            "delay" | "after" => {
                let value = delivery_value.ok_or_else(|| {
                    AppError::Validation("delayed delivery requires a value".to_owned())
                })?;
                if value == 0 {
                    return Err(AppError::Validation(
                        "delayed delivery value must be greater than zero".to_owned(),
                    ));
                }
                let unit = delivery_unit
                    .ok_or_else(|| {
                        AppError::Validation("delayed delivery requires a unit".to_owned())
                    })
                    .and_then(DeliveryUnit::from_str)?;

                Ok(Self::Delay { value, unit })
            }
            other => Err(AppError::Validation(format!(
                "unknown delivery type '{other}'"
            ))),
        }
    }

    /// Returns the delay in minutes, zero for immediate delivery.
    #[must_use]
    pub fn delay_minutes(&self) -> u64 {
        match self {
            Self::Immediate => 0,
            Self::Delay { value, unit } => unit.minutes(*value),
        }
    }
}

impl Display for DeliveryTiming {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate => formatter.write_str("immediate"),
            Self::Delay { value: 1, unit } => write!(formatter, "1 {}", unit.singular()),
            Self::Delay { value, unit } => write!(formatter, "{value} {}", unit.as_str()),
        }
    }
}

impl FromStr for DeliveryTiming {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("immediate") {
            return Ok(Self::Immediate);
        }

        let Some((amount, unit)) = trimmed.split_once(' ') else {
            return Err(AppError::Validation(format!(
                "invalid delivery timing '{trimmed}'"
            )));
        };
        let amount = amount.parse::<u32>().map_err(|_| {
            AppError::Validation(format!("invalid delivery timing amount '{amount}'"))
        })?;

        Self::from_parts("delay", Some(amount), Some(unit))
    }
}
