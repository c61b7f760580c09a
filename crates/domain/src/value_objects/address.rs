//! Postal address value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// A postal address as returned by the geocoder
///
/// Every field is empty when the service did not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street name, followed by the building number when known
    pub street: String,
    /// City or municipality
    pub city: String,
    /// Postal code
    pub postal_code: String,
    /// State or region
    pub state: String,
    /// Country name
    pub country: String,
    /// ISO 3166 country code
    pub iso_country_code: String,
}

impl Address {
    /// Whether no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.postal_code.is_empty()
            && self.state.is_empty()
            && self.country.is_empty()
            && self.iso_country_code.is_empty()
    }

    /// Multi-line postal format, skipping empty parts
    ///
    /// ```text
    /// Meckenheimer Allee
    /// 53125 Bonn
    /// Nordrhein-Westfalen
    /// Deutschland
    /// ```
    #[must_use]
    pub fn formatted(&self) -> String {
        let locality = [self.postal_code.as_str(), self.city.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.as_str(),
            locality.as_str(),
            self.state.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}
