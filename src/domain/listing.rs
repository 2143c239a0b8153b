use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Sale,
    Rent,
}

impl OfferType {
    /// Anything mentioning "rent" is a rental; everything else is for sale.
    pub fn parse(raw: &str) -> Self {
        if raw.to_ascii_lowercase().contains("rent") {
            OfferType::Rent
        } else {
            OfferType::Sale
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OfferType::Sale => "For Sale",
            OfferType::Rent => "For Rent",
        }
    }
}

/// Which source produced a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Created by an agent through this site.
    Store,
    /// Read-only record from the scraped dataset.
    External,
}

/// The unified in-memory listing every raw record is normalized into.
/// Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub price: f64,
    pub offer_type: OfferType,
    pub property_type: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub living_area: f64,
    pub pictures: Vec<String>,
    pub description: String,
    pub source_url: String,
    pub origin: Origin,
}

impl Listing {
    pub fn is_store(&self) -> bool {
        self.origin == Origin::Store
    }

    pub fn price_label(&self) -> String {
        if self.price > 0.0 {
            format!("${}", group_thousands(self.price))
        } else {
            "Price on Request".to_string()
        }
    }

    pub fn type_label(&self) -> String {
        if self.property_type.is_empty() {
            "PROPERTY".to_string()
        } else {
            self.property_type.replace('_', " ")
        }
    }

    pub fn address(&self) -> String {
        let parts: Vec<&str> = [&self.street, &self.city, &self.state]
            .into_iter()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            "Location not available".to_string()
        } else {
            parts.join(", ")
        }
    }

    pub fn city_label(&self) -> &str {
        if self.city.is_empty() {
            "Unknown City"
        } else {
            &self.city
        }
    }

    pub fn state_label(&self) -> &str {
        if self.state.is_empty() {
            "Unknown State"
        } else {
            &self.state
        }
    }

    pub fn area_label(&self) -> String {
        if self.living_area > 0.0 {
            group_thousands(self.living_area)
        } else {
            "N/A".to_string()
        }
    }

    /// Normalized listings always carry at least one picture.
    pub fn cover_picture(&self) -> &str {
        self.pictures.first().map(String::as_str).unwrap_or_default()
    }

    /// Where a card links to: store listings have a details page,
    /// external ones go to their source.
    pub fn link(&self) -> String {
        match self.origin {
            Origin::Store => format!("/details?id={}", self.id),
            Origin::External => self.source_url.clone(),
        }
    }
}

/// Round to whole units and insert thousands separators: 1250000.4 -> "1,250,000".
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round().abs() as u64;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0.0 && rounded > 0 {
        out.insert(0, '-');
    }
    out
}

/// Whole numbers print without a fraction (3 beds, 2.5 baths).
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
