//! Integer widths and literal text shared by the target languages.

use hpkl_schema::{AliasId, ClassId, DataSizeUnit, DurationUnit, Registry, StdlibAlias, TypeRef};

/// Native duration class of the configuration runtime.
pub const NATIVE_DURATION: &str = "org.pkl.core.Duration";
/// Native duration unit enumeration of the configuration runtime.
pub const NATIVE_DURATION_UNIT: &str = "org.pkl.core.DurationUnit";
/// Native data size class of the configuration runtime.
pub const NATIVE_DATA_SIZE: &str = "org.pkl.core.DataSize";
/// Native data size unit enumeration of the configuration runtime.
pub const NATIVE_DATA_SIZE_UNIT: &str = "org.pkl.core.DataSizeUnit";
pub const JAVA_DURATION: &str = "java.time.Duration";
pub const JAVA_CHRONO_UNIT: &str = "java.time.temporal.ChronoUnit";
pub const KOTLIN_DURATION: &str = "kotlin.time.Duration";
pub const KOTLIN_DURATION_UNIT: &str = "kotlin.time.DurationUnit";

/// Width of a target integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    /// 8-bit signed
    Byte,
    /// 16-bit signed
    Short,
    /// 32-bit signed
    Int,
    /// 64-bit signed
    Long,
}

impl IntWidth {
    /// Target width of an integer width alias.
    ///
    /// Unsigned aliases map to the next wider signed type; unsigned 32 and 64
    /// bit both map to 64-bit signed without range checks.
    pub fn of_alias(alias: StdlibAlias) -> Option<Self> {
        match alias {
            StdlibAlias::Int8 => Some(Self::Byte),
            StdlibAlias::Int16 | StdlibAlias::UInt8 => Some(Self::Short),
            StdlibAlias::Int32 | StdlibAlias::UInt16 => Some(Self::Int),
            StdlibAlias::UInt32 | StdlibAlias::UInt => Some(Self::Long),
            StdlibAlias::DurationUnit
            | StdlibAlias::DataSizeUnit
            | StdlibAlias::Uri
            | StdlibAlias::NonNull => None,
        }
    }

    /// Whether `value` is representable without wrapping.
    pub fn contains(self, value: i64) -> bool {
        match self {
            Self::Byte => i8::try_from(value).is_ok(),
            Self::Short => i16::try_from(value).is_ok(),
            Self::Int => i32::try_from(value).is_ok(),
            Self::Long => true,
        }
    }
}

/// What a declared type means for rendering a default value of that type.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// An integer width alias.
    Width(IntWidth),
    /// An alias rendered as a generated enum.
    Enum(AliasId),
    DurationUnit,
    DataSizeUnit,
    /// A class, with type arguments after alias substitution.
    Class {
        class: ClassId,
        type_arguments: Vec<TypeRef>,
    },
    Other,
}

impl DeclaredType {
    /// Resolve `ty` through nullability, refinements, and transparent aliases.
    pub fn of(registry: &Registry, ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Nullable(inner) | TypeRef::Constrained(inner) => Self::of(registry, inner),
            TypeRef::Class {
                class,
                type_arguments,
            } => Self::Class {
                class: *class,
                type_arguments: type_arguments.clone(),
            },
            TypeRef::Alias {
                alias,
                type_arguments,
            } => {
                let definition = registry.alias(*alias);
                if let Some(well_known) = StdlibAlias::from_qualified_name(&definition.qualified_name)
                {
                    return match well_known {
                        StdlibAlias::DurationUnit => Self::DurationUnit,
                        StdlibAlias::DataSizeUnit => Self::DataSizeUnit,
                        other => IntWidth::of_alias(other).map_or(Self::Other, Self::Width),
                    };
                }
                if registry.declares_enum(definition) {
                    return Self::Enum(*alias);
                }
                let expanded = definition
                    .aliased_type
                    .substitute(&definition.bindings(type_arguments));
                Self::of(registry, &expanded)
            }
            TypeRef::Unknown
            | TypeRef::Nothing
            | TypeRef::StringLiteral(_)
            | TypeRef::Function
            | TypeRef::Union(_)
            | TypeRef::TypeVariable(_) => Self::Other,
        }
    }

    /// The `index`th type argument of a class, or unknown.
    pub fn type_argument(&self, index: usize) -> TypeRef {
        match self {
            Self::Class { type_arguments, .. } => type_arguments
                .get(index)
                .cloned()
                .unwrap_or(TypeRef::Unknown),
            _ => TypeRef::Unknown,
        }
    }
}

/// Quote and escape a string literal.
///
/// `escape_dollar` escapes `$`, which starts a template in Kotlin strings.
pub fn quote(value: &str, escape_dollar: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '$' if escape_dollar => out.push_str("\\$"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text of a double literal, valid in both Java and Kotlin.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "Double.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Double.POSITIVE_INFINITY".to_string()
        } else {
            "Double.NEGATIVE_INFINITY".to_string()
        }
    } else {
        format!("{:?}", value)
    }
}

/// How a duration default is written for a configured duration class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationLiteral<'a> {
    /// Construct the native duration from magnitude and unit.
    Native,
    /// Parse ISO-8601 text with the given static method of the class.
    Parse(&'static str),
    /// Call a converter function with the ISO-8601 text.
    Convert(&'a str),
    /// No way to build the value.
    Unresolved,
}

impl<'a> DurationLiteral<'a> {
    pub fn for_class(class: &str, converter: Option<&'a str>) -> Self {
        match class {
            NATIVE_DURATION => Self::Native,
            JAVA_DURATION => Self::Parse("parse"),
            KOTLIN_DURATION => Self::Parse("parseIsoString"),
            _ => converter.map_or(Self::Unresolved, Self::Convert),
        }
    }
}

/// How a data size default is written for a configured data size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSizeLiteral<'a> {
    /// Construct the native data size from magnitude and unit.
    Native,
    /// Call a converter function with the size in whole bytes.
    Convert(&'a str),
    /// No way to build the value.
    Unresolved,
}

impl<'a> DataSizeLiteral<'a> {
    pub fn for_class(class: &str, converter: Option<&'a str>) -> Self {
        match class {
            NATIVE_DATA_SIZE => Self::Native,
            _ => converter.map_or(Self::Unresolved, Self::Convert),
        }
    }
}

/// Constant of a duration unit enumeration, if `class` is a known one.
pub fn duration_unit_constant(class: &str, unit: DurationUnit) -> Option<&'static str> {
    match class {
        NATIVE_DURATION_UNIT | KOTLIN_DURATION_UNIT => Some(unit.constant_name()),
        JAVA_CHRONO_UNIT => Some(match unit {
            DurationUnit::Nanos => "NANOS",
            DurationUnit::Micros => "MICROS",
            DurationUnit::Millis => "MILLIS",
            DurationUnit::Seconds => "SECONDS",
            DurationUnit::Minutes => "MINUTES",
            DurationUnit::Hours => "HOURS",
            DurationUnit::Days => "DAYS",
        }),
        _ => None,
    }
}

/// Constant of a data size unit enumeration, if `class` is the native one.
pub fn data_size_unit_constant(class: &str, unit: DataSizeUnit) -> Option<&'static str> {
    (class == NATIVE_DATA_SIZE_UNIT).then(|| unit.constant_name())
}

/// Parse a duration unit symbol such as `min`.
pub fn parse_duration_unit(symbol: &str) -> Option<DurationUnit> {
    [
        DurationUnit::Nanos,
        DurationUnit::Micros,
        DurationUnit::Millis,
        DurationUnit::Seconds,
        DurationUnit::Minutes,
        DurationUnit::Hours,
        DurationUnit::Days,
    ]
    .into_iter()
    .find(|unit| unit.symbol() == symbol)
}

/// Parse a data size unit symbol such as `mib`.
pub fn parse_data_size_unit(symbol: &str) -> Option<DataSizeUnit> {
    [
        DataSizeUnit::B,
        DataSizeUnit::Kb,
        DataSizeUnit::Kib,
        DataSizeUnit::Mb,
        DataSizeUnit::Mib,
        DataSizeUnit::Gb,
        DataSizeUnit::Gib,
        DataSizeUnit::Tb,
        DataSizeUnit::Tib,
        DataSizeUnit::Pb,
        DataSizeUnit::Pib,
    ]
    .into_iter()
    .find(|unit| unit.symbol() == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_table() {
        assert_eq!(IntWidth::of_alias(StdlibAlias::Int8), Some(IntWidth::Byte));
        assert_eq!(IntWidth::of_alias(StdlibAlias::UInt8), Some(IntWidth::Short));
        assert_eq!(IntWidth::of_alias(StdlibAlias::Int16), Some(IntWidth::Short));
        assert_eq!(IntWidth::of_alias(StdlibAlias::UInt16), Some(IntWidth::Int));
        assert_eq!(IntWidth::of_alias(StdlibAlias::Int32), Some(IntWidth::Int));
        assert_eq!(IntWidth::of_alias(StdlibAlias::UInt32), Some(IntWidth::Long));
        assert_eq!(IntWidth::of_alias(StdlibAlias::UInt), Some(IntWidth::Long));
        assert_eq!(IntWidth::of_alias(StdlibAlias::Uri), None);
    }

    #[test]
    fn test_width_contains() {
        assert!(IntWidth::Byte.contains(-128));
        assert!(!IntWidth::Byte.contains(128));
        assert!(IntWidth::Short.contains(255));
        assert!(!IntWidth::Int.contains(i64::from(u32::MAX)));
        assert!(IntWidth::Long.contains(i64::MAX));
    }

    #[test]
    fn test_declared_type_resolution() {
        use hpkl_schema::testing::*;

        let mut module = ModuleBuilder::new("org.mod");
        let diet = module.alias("Diet", literals(&["Seeds", "Berries"]));
        let boxed_list = module.generic_alias(
            "Box",
            &[("T", hpkl_schema::Variance::Invariant)],
            list(variable("T")),
        );
        let schema = module.build();
        let registry = &schema.registry;

        assert_eq!(
            DeclaredType::of(registry, &nullable(width(StdlibAlias::Int8))),
            DeclaredType::Width(IntWidth::Byte)
        );
        assert_eq!(DeclaredType::of(registry, &alias(diet)), DeclaredType::Enum(diet));
        assert_eq!(
            DeclaredType::of(registry, &width(StdlibAlias::DurationUnit)),
            DeclaredType::DurationUnit
        );

        let boxed = DeclaredType::of(registry, &alias_of(boxed_list, vec![int()]));
        assert_eq!(boxed.type_argument(0), int());
        assert_eq!(boxed.type_argument(1), TypeRef::Unknown);
        assert_eq!(DeclaredType::of(registry, &any()).type_argument(0), TypeRef::Unknown);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain", false), "\"plain\"");
        assert_eq!(quote("a\"b\\c\nd", false), "\"a\\\"b\\\\c\\nd\"");
        assert_eq!(quote("$x", false), "\"$x\"");
        assert_eq!(quote("$x", true), "\"\\$x\"");
        assert_eq!(quote("\u{1}", false), "\"\\u0001\"");
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(1.0), "1.0");
        assert_eq!(format_double(-2.5), "-2.5");
        assert_eq!(format_double(f64::NAN), "Double.NaN");
        assert_eq!(format_double(f64::NEG_INFINITY), "Double.NEGATIVE_INFINITY");
    }

    #[test]
    fn test_duration_literal_forms() {
        assert_eq!(
            DurationLiteral::for_class(NATIVE_DURATION, Some("conv")),
            DurationLiteral::Native
        );
        assert_eq!(
            DurationLiteral::for_class(JAVA_DURATION, None),
            DurationLiteral::Parse("parse")
        );
        assert_eq!(
            DurationLiteral::for_class("com.acme.Span", Some("com.acme.Spans.of")),
            DurationLiteral::Convert("com.acme.Spans.of")
        );
        assert_eq!(
            DurationLiteral::for_class("com.acme.Span", None),
            DurationLiteral::Unresolved
        );
        assert_eq!(
            DataSizeLiteral::for_class("com.acme.Size", None),
            DataSizeLiteral::Unresolved
        );
    }

    #[test]
    fn test_unit_constants() {
        assert_eq!(
            duration_unit_constant(JAVA_CHRONO_UNIT, DurationUnit::Millis),
            Some("MILLIS")
        );
        assert_eq!(
            duration_unit_constant(KOTLIN_DURATION_UNIT, DurationUnit::Millis),
            Some("MILLISECONDS")
        );
        assert_eq!(duration_unit_constant("com.acme.Unit", DurationUnit::Days), None);
        assert_eq!(
            data_size_unit_constant(NATIVE_DATA_SIZE_UNIT, DataSizeUnit::Mib),
            Some("MEBIBYTES")
        );
        assert_eq!(parse_duration_unit("min"), Some(DurationUnit::Minutes));
        assert_eq!(parse_data_size_unit("tib"), Some(DataSizeUnit::Tib));
        assert_eq!(parse_duration_unit("weeks"), None);
    }
}
