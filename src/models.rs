use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A product entry in the cart or the wishlist.
///
/// `title` is the identity key within a list. Cart entries carry a
/// quantity; wishlist entries are stored without one.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Item {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            description: String::new(),
            image_class: String::new(),
            quantity: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_class(mut self, image_class: impl Into<String>) -> Self {
        self.image_class = image_class.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Quantity as the cart sees it; entries written without one count as 1.
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    pub fn unit_price(&self) -> Money {
        Money::parse(&self.price).unwrap_or_else(|| {
            console_warn!("Unreadable price {:?} for {:?}, counting as $0.00", self.price, self.title);
            Money::ZERO
        })
    }

    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity()
    }
}

/// An amount in whole cents.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Money(pub u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Parses a display price such as `"$1,299.99"`, `" 5.5 "` or `"$5.00 each"`.
    ///
    /// A leading currency symbol is stripped and the longest decimal prefix
    /// of the remainder is read, rounded to the nearest cent. Amounts beyond
    /// the representable range saturate.
    pub fn parse(raw: &str) -> Option<Money> {
        let rest = raw
            .trim()
            .trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'));
        let mut seen_dot = false;
        let number: String = rest
            .chars()
            .filter(|c| *c != ',')
            .take_while(|c| match c {
                '.' if !seen_dot => {
                    seen_dot = true;
                    true
                }
                c => c.is_ascii_digit(),
            })
            .collect();
        let value: f64 = number.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        // `as` saturates at u64::MAX.
        Some(Money((value * 100.0).round() as u64))
    }

    /// Applies a fractional rate, rounding half-up to the cent.
    pub fn apply_rate(self, rate: f64) -> Money {
        let basis_points = (rate * 10_000.0).round().max(0.0) as u128;
        let cents = (u128::from(self.0) * basis_points + 5_000) / 10_000;
        Money(u64::try_from(cents).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Cart summary figures.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    pub fn compute(items: &[Item], tax_rate: f64) -> Self {
        let subtotal: Money = items.iter().map(Item::line_total).sum();
        let tax = subtotal.apply_rate(tax_rate);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prices_with_currency_symbol() {
        assert_eq!(Money::parse("$10.00"), Some(Money(1000)));
        assert_eq!(Money::parse("$5.5"), Some(Money(550)));
        assert_eq!(Money::parse(" $1,299.99 "), Some(Money(129_999)));
        assert_eq!(Money::parse("€ 3"), Some(Money(300)));
        assert_eq!(Money::parse("free"), None);
        assert_eq!(Money::parse("-$2.00"), None);
    }

    #[test]
    fn reads_the_leading_number_and_ignores_trailing_text() {
        assert_eq!(Money::parse("$5.00 each"), Some(Money(500)));
        assert_eq!(Money::parse("$3.50/kg"), Some(Money(350)));
        assert_eq!(Money::parse("$1.2.3"), Some(Money(120)));
        assert_eq!(Money::parse("$.75"), Some(Money(75)));
        assert_eq!(Money::parse("$."), None);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let huge = Money::parse("$99999999999999999999999999").unwrap();
        assert_eq!(huge, Money(u64::MAX));
        assert_eq!(huge * 2, Money(u64::MAX));
        assert_eq!(huge + Money(1), Money(u64::MAX));
        assert_eq!(huge.apply_rate(0.13), Money(u64::MAX));

        let big = Money::parse("$20000000000000.00").unwrap();
        assert_eq!(big, Money(2_000_000_000_000_000));
        assert_eq!(big.apply_rate(0.13), Money(260_000_000_000_000));
    }

    #[test]
    fn totals_saturate_on_extreme_lines() {
        let items = vec![
            Item::new("Yacht", "$99999999999999999999").with_quantity(u32::MAX),
            Item::new("Pen", "$1.00"),
        ];
        let totals = Totals::compute(&items, 0.13);
        assert_eq!(totals.subtotal, Money(u64::MAX));
        assert_eq!(totals.total, Money(u64::MAX));
    }

    #[test]
    fn formats_as_dollars_and_cents() {
        assert_eq!(Money(0).to_string(), "$0.00");
        assert_eq!(Money(5).to_string(), "$0.05");
        assert_eq!(Money(2882).to_string(), "$28.82");
    }

    #[test]
    fn totals_apply_thirteen_percent_tax() {
        let items = vec![
            Item::new("Headphones", "$10.00").with_quantity(2),
            Item::new("Cable", "$5.50").with_quantity(1),
        ];
        let totals = Totals::compute(&items, 0.13);
        assert_eq!(totals.subtotal.to_string(), "$25.50");
        assert_eq!(totals.tax.to_string(), "$3.32");
        assert_eq!(totals.total.to_string(), "$28.82");
    }

    #[test]
    fn missing_quantity_counts_as_one() {
        let item = Item::new("Mug", "$4.25");
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.line_total(), Money(425));
    }

    #[test]
    fn unreadable_price_counts_as_zero() {
        let items = vec![Item::new("Mystery", "call us"), Item::new("Pen", "$1.00")];
        let totals = Totals::compute(&items, 0.13);
        assert_eq!(totals.subtotal, Money(100));
    }

    #[test]
    fn serializes_with_page_field_names() {
        let item = Item::new("Lamp", "$20.00")
            .with_description("Desk lamp")
            .with_image_class("img-lamp");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Lamp","price":"$20.00","description":"Desk lamp","imageClass":"img-lamp"}"#
        );

        let back: Item = serde_json::from_str(r#"{"title":"Lamp","price":"$20.00","quantity":3}"#).unwrap();
        assert_eq!(back.quantity, Some(3));
        assert_eq!(back.description, "");
    }
}
