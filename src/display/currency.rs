//! Currency symbols and totals formatting
//!
//! Symbol lookup is a trait so that callers can supply their own table;
//! [`SymbolTable`] is the built-in one, optionally extended from settings.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::models::Money;
use crate::reports::CurrencyTotals;

/// Lookup of display symbols by currency code
pub trait CurrencySymbols {
    /// The symbol for a code, if known
    fn symbol(&self, code: &str) -> Option<&str>;

    /// The symbol for a code, or the code itself when unknown
    fn symbol_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.symbol(code).unwrap_or(code)
    }
}

/// Code-to-symbol table
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: BTreeMap<String, String>,
}

impl SymbolTable {
    /// The built-in table (NGN, USD, EUR, GBP)
    pub fn builtin() -> Self {
        let symbols = [("NGN", "₦"), ("USD", "$"), ("EUR", "€"), ("GBP", "£")]
            .into_iter()
            .map(|(code, symbol)| (code.to_string(), symbol.to_string()))
            .collect();
        Self { symbols }
    }

    /// Builder: add or replace symbols
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (code, symbol) in overrides {
            self.symbols
                .insert(code.trim().to_uppercase(), symbol.clone());
        }
        self
    }

    /// The built-in table extended with the user's symbols
    pub fn from_settings(settings: &Settings) -> Self {
        Self::builtin().with_overrides(&settings.symbols)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CurrencySymbols for SymbolTable {
    fn symbol(&self, code: &str) -> Option<&str> {
        self.symbols
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
    }
}

/// Formats amounts and totals according to settings
pub struct TotalsFormatter<'a, S: CurrencySymbols + ?Sized> {
    symbols: &'a S,
    default_currency: &'a str,
    decimal_places: u32,
    separator: &'a str,
}

impl<'a, S: CurrencySymbols + ?Sized> TotalsFormatter<'a, S> {
    pub fn new(symbols: &'a S, settings: &'a Settings) -> Self {
        Self {
            symbols,
            default_currency: &settings.default_currency,
            decimal_places: settings.decimal_places,
            separator: &settings.thousands_separator,
        }
    }

    /// The symbol shown for a code; the unknown-currency bucket borrows the
    /// default currency's symbol
    pub fn symbol_for<'b>(&'b self, code: &'b str) -> &'b str {
        let code = if code.is_empty() {
            self.default_currency
        } else {
            code
        };
        self.symbols.symbol_or_code(code)
    }

    /// A grouped amount without symbol
    pub fn amount(&self, amount: Money) -> String {
        amount.format_grouped(self.decimal_places, self.separator)
    }

    /// An amount prefixed with the symbol for `code`
    pub fn money(&self, code: &str, amount: Money) -> String {
        let symbol = self.symbol_for(code);
        let digits = self.amount(amount.abs());
        if amount.is_negative() {
            format!("-{}{}", symbol, digits)
        } else {
            format!("{}{}", symbol, digits)
        }
    }

    /// An amount inside a section table: no symbol when the section
    /// currency is unresolved
    pub fn section_money(&self, code: &str, amount: Money) -> String {
        if code.is_empty() {
            self.amount(amount)
        } else {
            self.money(code, amount)
        }
    }

    /// All amounts joined by ", " in first-encounter order, or the zero
    /// placeholder under the default currency when there are none
    pub fn totals(&self, totals: &CurrencyTotals) -> String {
        if totals.is_empty() {
            return self.money(self.default_currency, Money::zero());
        }
        totals
            .amounts
            .iter()
            .map(|(code, amount)| self.money(code, *amount))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// "N Quotes" counter text; the label stays plural for a single quote
    pub fn count(&self, totals: &CurrencyTotals) -> String {
        format!("{} Quotes", totals.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(amounts: &[(&str, i64)]) -> CurrencyTotals {
        CurrencyTotals {
            count: 1,
            amounts: amounts
                .iter()
                .map(|(c, a)| (c.to_string(), Money::from_major(*a)))
                .collect(),
        }
    }

    #[test]
    fn test_builtin_symbols() {
        let table = SymbolTable::builtin();
        assert_eq!(table.symbol("NGN"), Some("₦"));
        assert_eq!(table.symbol("usd"), Some("$"));
        assert_eq!(table.symbol_or_code("JPY"), "JPY");
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("ghs".to_string(), "GH₵".to_string());
        overrides.insert("USD".to_string(), "US$".to_string());
        let table = SymbolTable::builtin().with_overrides(&overrides);
        assert_eq!(table.symbol("GHS"), Some("GH₵"));
        assert_eq!(table.symbol("USD"), Some("US$"));
    }

    #[test]
    fn test_totals_joined_in_order() {
        let settings = Settings::default();
        let table = SymbolTable::builtin();
        let fmt = TotalsFormatter::new(&table, &settings);
        assert_eq!(
            fmt.totals(&totals(&[("USD", 1500), ("NGN", 20), ("JPY", 3)])),
            "$1,500.00, ₦20.00, JPY3.00"
        );
    }

    #[test]
    fn test_empty_totals_placeholder() {
        let settings = Settings::default();
        let table = SymbolTable::builtin();
        let fmt = TotalsFormatter::new(&table, &settings);
        assert_eq!(fmt.totals(&CurrencyTotals::default()), "₦0.00");
    }

    #[test]
    fn test_unknown_bucket_uses_default_symbol() {
        let settings = Settings::default();
        let table = SymbolTable::builtin();
        let fmt = TotalsFormatter::new(&table, &settings);
        assert_eq!(fmt.totals(&totals(&[("", 30), ("NGN", 20)])), "₦30.00, ₦20.00");
    }

    #[test]
    fn test_custom_lookup() {
        struct Codes;
        impl CurrencySymbols for Codes {
            fn symbol(&self, _code: &str) -> Option<&str> {
                None
            }
        }
        let settings = Settings::default();
        let fmt = TotalsFormatter::new(&Codes, &settings);
        assert_eq!(fmt.money("USD", Money::from_major(-5)), "-USD5.00");
    }

    #[test]
    fn test_count_text() {
        let settings = Settings::default();
        let table = SymbolTable::builtin();
        let fmt = TotalsFormatter::new(&table, &settings);
        assert_eq!(fmt.count(&totals(&[])), "1 Quotes");
        assert_eq!(fmt.count(&CurrencyTotals::default()), "0 Quotes");
    }
}
