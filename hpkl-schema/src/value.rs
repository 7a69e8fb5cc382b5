//! Evaluated default values.

use indexmap::IndexMap;
use serde::Deserialize;

/// A value produced by evaluating a property's default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Lists, listings, and sets.
    List(Vec<Value>),
    /// Maps and mappings, in insertion order.
    Map(Vec<(Value, Value)>),
    Object(ObjectValue),
    Duration(Duration),
    DataSize(DataSize),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// An instance of a user-defined class.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    /// Qualified name of the object's class, e.g. `org.mod#Address`.
    pub class_name: String,
    pub properties: IndexMap<String, Value>,
}

/// A quantity of time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Duration {
    pub value: f64,
    pub unit: DurationUnit,
}

impl Duration {
    pub fn new(value: f64, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    /// Total length in nanoseconds, rounded to the nearest nanosecond.
    pub fn in_nanos(&self) -> i128 {
        (self.value * self.unit.nanos() as f64).round() as i128
    }

    /// ISO-8601 duration text in the style of `java.time.Duration::toString`.
    ///
    /// Days are expressed as hours, e.g. `1.d` is `PT24H` and `90.s` is `PT1M30S`.
    pub fn to_iso_string(&self) -> String {
        let total = self.in_nanos();
        if total == 0 {
            return "PT0S".to_string();
        }

        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        let seconds = total / 1_000_000_000;
        let nanos = total % 1_000_000_000;
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        let mut out = String::from("PT");
        if hours != 0 {
            out.push_str(&format!("{}{}H", sign, hours));
        }
        if minutes != 0 {
            out.push_str(&format!("{}{}M", sign, minutes));
        }
        if secs != 0 || nanos != 0 {
            out.push_str(sign);
            out.push_str(&secs.to_string());
            if nanos != 0 {
                let fraction = format!("{:09}", nanos);
                out.push('.');
                out.push_str(fraction.trim_end_matches('0'));
            }
            out.push('S');
        }
        out
    }
}

/// Units of [`Duration`], named by their source-language symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum DurationUnit {
    #[serde(rename = "ns")]
    Nanos,
    #[serde(rename = "us")]
    Micros,
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "min")]
    Minutes,
    #[serde(rename = "h")]
    Hours,
    #[serde(rename = "d")]
    Days,
}

impl DurationUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Nanos => "ns",
            Self::Micros => "us",
            Self::Millis => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }

    /// Constant name in the native `DurationUnit` enumerations.
    pub fn constant_name(self) -> &'static str {
        match self {
            Self::Nanos => "NANOSECONDS",
            Self::Micros => "MICROSECONDS",
            Self::Millis => "MILLISECONDS",
            Self::Seconds => "SECONDS",
            Self::Minutes => "MINUTES",
            Self::Hours => "HOURS",
            Self::Days => "DAYS",
        }
    }

    pub fn nanos(self) -> i64 {
        match self {
            Self::Nanos => 1,
            Self::Micros => 1_000,
            Self::Millis => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Hours => 3_600_000_000_000,
            Self::Days => 86_400_000_000_000,
        }
    }
}

/// A quantity of binary data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DataSize {
    pub value: f64,
    pub unit: DataSizeUnit,
}

impl DataSize {
    pub fn new(value: f64, unit: DataSizeUnit) -> Self {
        Self { value, unit }
    }

    /// Size in whole bytes, truncating any fractional byte.
    pub fn in_whole_bytes(&self) -> i64 {
        (self.value * self.unit.bytes() as f64) as i64
    }
}

/// Units of [`DataSize`], named by their source-language symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSizeUnit {
    B,
    Kb,
    Kib,
    Mb,
    Mib,
    Gb,
    Gib,
    Tb,
    Tib,
    Pb,
    Pib,
}

impl DataSizeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::B => "b",
            Self::Kb => "kb",
            Self::Kib => "kib",
            Self::Mb => "mb",
            Self::Mib => "mib",
            Self::Gb => "gb",
            Self::Gib => "gib",
            Self::Tb => "tb",
            Self::Tib => "tib",
            Self::Pb => "pb",
            Self::Pib => "pib",
        }
    }

    /// Constant name in the native `DataSizeUnit` enumeration.
    pub fn constant_name(self) -> &'static str {
        match self {
            Self::B => "BYTES",
            Self::Kb => "KILOBYTES",
            Self::Kib => "KIBIBYTES",
            Self::Mb => "MEGABYTES",
            Self::Mib => "MEBIBYTES",
            Self::Gb => "GIGABYTES",
            Self::Gib => "GIBIBYTES",
            Self::Tb => "TERABYTES",
            Self::Tib => "TEBIBYTES",
            Self::Pb => "PETABYTES",
            Self::Pib => "PEBIBYTES",
        }
    }

    pub fn bytes(self) -> i64 {
        match self {
            Self::B => 1,
            Self::Kb => 1_000,
            Self::Kib => 1 << 10,
            Self::Mb => 1_000_000,
            Self::Mib => 1 << 20,
            Self::Gb => 1_000_000_000,
            Self::Gib => 1 << 30,
            Self::Tb => 1_000_000_000_000,
            Self::Tib => 1 << 40,
            Self::Pb => 1_000_000_000_000_000,
            Self::Pib => 1 << 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_string_whole_units() {
        assert_eq!(Duration::new(1.0, DurationUnit::Seconds).to_iso_string(), "PT1S");
        assert_eq!(Duration::new(90.0, DurationUnit::Seconds).to_iso_string(), "PT1M30S");
        assert_eq!(Duration::new(1.0, DurationUnit::Days).to_iso_string(), "PT24H");
        assert_eq!(Duration::new(0.0, DurationUnit::Hours).to_iso_string(), "PT0S");
    }

    #[test]
    fn test_iso_string_fractions() {
        assert_eq!(Duration::new(1.5, DurationUnit::Seconds).to_iso_string(), "PT1.5S");
        assert_eq!(Duration::new(250.0, DurationUnit::Millis).to_iso_string(), "PT0.25S");
        assert_eq!(Duration::new(-2.0, DurationUnit::Minutes).to_iso_string(), "PT-2M");
    }

    #[test]
    fn test_whole_bytes() {
        assert_eq!(DataSize::new(2.0, DataSizeUnit::Kib).in_whole_bytes(), 2048);
        assert_eq!(DataSize::new(1.5, DataSizeUnit::Kb).in_whole_bytes(), 1500);
        assert_eq!(DataSize::new(0.5, DataSizeUnit::B).in_whole_bytes(), 0);
    }

    #[test]
    fn test_unit_symbols_deserialize() {
        let unit: DurationUnit = serde_json::from_str("\"min\"").unwrap();
        assert_eq!(unit, DurationUnit::Minutes);
        let unit: DataSizeUnit = serde_json::from_str("\"mib\"").unwrap();
        assert_eq!(unit, DataSizeUnit::Mib);
    }
}
