//! Supported currencies

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Currency {
    KRW,
    JPY,
    PHP,
    USD,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::KRW, Currency::JPY, Currency::PHP, Currency::USD];

    /// Currencies a remittance can be received in.
    pub const RECEIVABLE: [Currency; 3] = [Currency::KRW, Currency::JPY, Currency::PHP];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::KRW => "KRW",
            Currency::JPY => "JPY",
            Currency::PHP => "PHP",
            Currency::USD => "USD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "KRW" => Ok(Currency::KRW),
            "JPY" => Ok(Currency::JPY),
            "PHP" => Ok(Currency::PHP),
            "USD" => Ok(Currency::USD),
            _ => Err(anyhow!("Unsupported currency: {}", s)),
        }
    }
}
