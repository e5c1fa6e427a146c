//! Currency codes and the currency → country table backing the selectors

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A three-letter currency code, stored upper-case as shown in the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Self {
        CurrencyCode(code.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-case form used by the rates API, both in the URL and as JSON keys.
    pub fn api_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the flag image URL for an ISO country code.
pub fn flag_url(flag_base: &str, country_code: &str) -> String {
    format!("{}/{}/flat/64.png", flag_base.trim_end_matches('/'), country_code)
}

/// Ordered, immutable mapping from currency code to country code.
///
/// Iteration order is the order options appear in the selectors.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    entries: Vec<(CurrencyCode, String)>,
}

impl CurrencyTable {
    pub fn builtin() -> Self {
        Self::from_pairs(COUNTRY_LIST.iter().copied())
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<(CurrencyCode, String)> = Vec::new();
        for (code, country) in pairs {
            let code = CurrencyCode::new(code);
            if entries.iter().any(|(c, _)| *c == code) {
                continue;
            }
            entries.push((code, country.trim().to_uppercase()));
        }
        CurrencyTable { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &str)> {
        self.entries.iter().map(|(code, country)| (code, country.as_str()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.entries.iter().map(|(code, _)| code)
    }

    /// Case-insensitive lookup returning the table's own code.
    pub fn resolve(&self, code: &str) -> Option<&CurrencyCode> {
        let wanted = CurrencyCode::new(code);
        self.codes().find(|c| **c == wanted)
    }

    pub fn country_for(&self, code: &CurrencyCode) -> Option<&str> {
        self.iter()
            .find(|(c, _)| *c == code)
            .map(|(_, country)| country)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

const COUNTRY_LIST: &[(&str, &str)] = &[
    ("AED", "AE"),
    ("AFN", "AF"),
    ("XCD", "AG"),
    ("ALL", "AL"),
    ("AMD", "AM"),
    ("ANG", "AN"),
    ("AOA", "AO"),
    ("AQD", "AQ"),
    ("ARS", "AR"),
    ("AUD", "AU"),
    ("AZN", "AZ"),
    ("BAM", "BA"),
    ("BBD", "BB"),
    ("BDT", "BD"),
    ("XOF", "BE"),
    ("BGN", "BG"),
    ("BHD", "BH"),
    ("BIF", "BI"),
    ("BMD", "BM"),
    ("BND", "BN"),
    ("BOB", "BO"),
    ("BRL", "BR"),
    ("BSD", "BS"),
    ("NOK", "BV"),
    ("BWP", "BW"),
    ("BYR", "BY"),
    ("BZD", "BZ"),
    ("CAD", "CA"),
    ("CDF", "CD"),
    ("XAF", "CF"),
    ("CHF", "CH"),
    ("CLP", "CL"),
    ("CNY", "CN"),
    ("COP", "CO"),
    ("CRC", "CR"),
    ("CUP", "CU"),
    ("CVE", "CV"),
    ("CYP", "CY"),
    ("CZK", "CZ"),
    ("DJF", "DJ"),
    ("DKK", "DK"),
    ("DOP", "DO"),
    ("DZD", "DZ"),
    ("ECS", "EC"),
    ("EEK", "EE"),
    ("EGP", "EG"),
    ("ETB", "ET"),
    ("EUR", "FR"),
    ("FJD", "FJ"),
    ("FKP", "FK"),
    ("GBP", "GB"),
    ("GEL", "GE"),
    ("GGP", "GG"),
    ("GHS", "GH"),
    ("GIP", "GI"),
    ("GMD", "GM"),
    ("GNF", "GN"),
    ("GTQ", "GT"),
    ("GYD", "GY"),
    ("HKD", "HK"),
    ("HNL", "HN"),
    ("HRK", "HR"),
    ("HTG", "HT"),
    ("HUF", "HU"),
    ("IDR", "ID"),
    ("ILS", "IL"),
    ("INR", "IN"),
    ("IQD", "IQ"),
    ("IRR", "IR"),
    ("ISK", "IS"),
    ("JMD", "JM"),
    ("JOD", "JO"),
    ("JPY", "JP"),
    ("KES", "KE"),
    ("KGS", "KG"),
    ("KHR", "KH"),
    ("KMF", "KM"),
    ("KPW", "KP"),
    ("KRW", "KR"),
    ("KWD", "KW"),
    ("KYD", "KY"),
    ("KZT", "KZ"),
    ("LAK", "LA"),
    ("LBP", "LB"),
    ("LKR", "LK"),
    ("LRD", "LR"),
    ("LSL", "LS"),
    ("LTL", "LT"),
    ("LVL", "LV"),
    ("LYD", "LY"),
    ("MAD", "MA"),
    ("MDL", "MD"),
    ("MGA", "MG"),
    ("MKD", "MK"),
    ("MMK", "MM"),
    ("MNT", "MN"),
    ("MOP", "MO"),
    ("MRO", "MR"),
    ("MTL", "MT"),
    ("MUR", "MU"),
    ("MVR", "MV"),
    ("MWK", "MW"),
    ("MXN", "MX"),
    ("MYR", "MY"),
    ("MZN", "MZ"),
    ("NAD", "NA"),
    ("XPF", "NC"),
    ("NGN", "NG"),
    ("NIO", "NI"),
    ("NPR", "NP"),
    ("NZD", "NZ"),
    ("OMR", "OM"),
    ("PAB", "PA"),
    ("PEN", "PE"),
    ("PGK", "PG"),
    ("PHP", "PH"),
    ("PKR", "PK"),
    ("PLN", "PL"),
    ("PYG", "PY"),
    ("QAR", "QA"),
    ("RON", "RO"),
    ("RSD", "RS"),
    ("RUB", "RU"),
    ("RWF", "RW"),
    ("SAR", "SA"),
    ("SBD", "SB"),
    ("SCR", "SC"),
    ("SDG", "SD"),
    ("SEK", "SE"),
    ("SGD", "SG"),
    ("SKK", "SK"),
    ("SLL", "SL"),
    ("SOS", "SO"),
    ("SRD", "SR"),
    ("STD", "ST"),
    ("SVC", "SV"),
    ("SYP", "SY"),
    ("SZL", "SZ"),
    ("THB", "TH"),
    ("TJS", "TJ"),
    ("TMT", "TM"),
    ("TND", "TN"),
    ("TOP", "TO"),
    ("TRY", "TR"),
    ("TTD", "TT"),
    ("TWD", "TW"),
    ("TZS", "TZ"),
    ("UAH", "UA"),
    ("UGX", "UG"),
    ("USD", "US"),
    ("UYU", "UY"),
    ("UZS", "UZ"),
    ("VEF", "VE"),
    ("VND", "VN"),
    ("VUV", "VU"),
    ("YER", "YE"),
    ("ZAR", "ZA"),
    ("ZMK", "ZM"),
    ("ZWD", "ZW"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_normalizes_case() {
        let code = CurrencyCode::new(" usd ");
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.api_key(), "usd");
        assert_eq!(code.to_string(), "USD");
    }

    #[test]
    fn test_builtin_table_lookup() {
        let table = CurrencyTable::builtin();
        assert!(!table.is_empty());
        assert_eq!(table.country_for(&CurrencyCode::new("USD")), Some("US"));
        assert_eq!(table.country_for(&CurrencyCode::new("INR")), Some("IN"));
        assert_eq!(table.country_for(&CurrencyCode::new("EUR")), Some("FR"));
        assert_eq!(table.country_for(&CurrencyCode::new("XYZ")), None);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = CurrencyTable::builtin();
        assert_eq!(table.resolve("gbp").map(|c| c.as_str()), Some("GBP"));
        assert!(table.resolve("xyz").is_none());
    }

    #[test]
    fn test_from_pairs_keeps_order_and_drops_duplicates() {
        let table = CurrencyTable::from_pairs([("usd", "us"), ("EUR", "FR"), ("USD", "XX")]);
        let codes: Vec<&str> = table.codes().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EUR"]);
        assert_eq!(table.country_for(&CurrencyCode::new("USD")), Some("US"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_flag_url() {
        assert_eq!(
            flag_url("https://flagsapi.com", "IN"),
            "https://flagsapi.com/IN/flat/64.png"
        );
        assert_eq!(
            flag_url("https://flagsapi.com/", "US"),
            "https://flagsapi.com/US/flat/64.png"
        );
    }
}
