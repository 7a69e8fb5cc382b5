//! Kotlin literals for evaluated default values.

use hpkl_codegen::enums::enum_constant_name;
use hpkl_codegen::imports::{ClassName, ImportCollector};
use hpkl_codegen::layout::PropertyLayout;
use hpkl_codegen::literals::{
    DataSizeLiteral, DeclaredType, DurationLiteral, IntWidth, NATIVE_DATA_SIZE,
    NATIVE_DATA_SIZE_UNIT, NATIVE_DURATION, NATIVE_DURATION_UNIT, data_size_unit_constant,
    duration_unit_constant, format_double, parse_data_size_unit, parse_duration_unit, quote,
};
use hpkl_schema::{BuiltinClass, DataSize, Duration, ObjectValue, TypeRef, Value};
use tracing::warn;

use crate::naming::KOTLIN_NAMING;
use crate::type_mapper::KotlinTypeMapper;

/// Renders default values as Kotlin expressions.
pub struct KotlinValueRenderer<'a, 's> {
    mapper: &'a KotlinTypeMapper<'s>,
    duration_converter: Option<&'a str>,
    data_size_converter: Option<&'a str>,
}

impl<'a, 's> KotlinValueRenderer<'a, 's> {
    pub fn new(
        mapper: &'a KotlinTypeMapper<'s>,
        duration_converter: Option<&'a str>,
        data_size_converter: Option<&'a str>,
    ) -> Self {
        Self {
            mapper,
            duration_converter,
            data_size_converter,
        }
    }

    /// Render `value`, declared with type `ty`.
    pub fn render(&self, value: &Value, ty: &TypeRef, imports: &mut ImportCollector) -> String {
        let registry = self.mapper.registry();
        let declared = DeclaredType::of(registry, ty);
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(value) => value.to_string(),
            Value::Int(value) => self.int(*value, &declared),
            Value::Float(value) => format_double(*value),
            Value::String(value) => self.string(value, &declared, imports),
            Value::List(elements) => {
                let is_set = matches!(
                    &declared,
                    DeclaredType::Class { class, .. } if registry.class(*class).is(BuiltinClass::Set)
                );
                let function = if is_set { "setOf" } else { "listOf" };
                let element_type = declared.type_argument(0);
                let elements: Vec<String> = elements
                    .iter()
                    .filter(|element| !element.is_null())
                    .map(|element| self.render(element, &element_type, imports))
                    .collect();
                format!("{}({})", function, elements.join(", "))
            }
            Value::Map(entries) => {
                let key_type = declared.type_argument(0);
                let value_type = declared.type_argument(1);
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{} to {}",
                            self.render(key, &key_type, imports),
                            self.render(value, &value_type, imports)
                        )
                    })
                    .collect();
                format!("mapOf({})", entries.join(", "))
            }
            Value::Object(object) => self.object(object, imports),
            Value::Duration(duration) => self.duration(duration, imports),
            Value::DataSize(size) => self.data_size(size, imports),
        }
    }

    fn int(&self, value: i64, declared: &DeclaredType) -> String {
        match declared {
            DeclaredType::Width(width) => {
                if !width.contains(value) {
                    warn!(value, ?width, "integer default does not fit its declared width");
                }
                // `-1.toByte()` would negate after the conversion.
                let operand = if value == i64::MIN {
                    long_literal(value)
                } else if value < 0 {
                    format!("({})", value)
                } else {
                    value.to_string()
                };
                match width {
                    IntWidth::Byte => format!("{}.toByte()", operand),
                    IntWidth::Short => format!("{}.toShort()", operand),
                    IntWidth::Int => value.to_string(),
                    IntWidth::Long => long_literal(value),
                }
            }
            DeclaredType::Class { class, .. } => {
                let class = self.mapper.registry().class(*class);
                if class.is(BuiltinClass::Float) || class.is(BuiltinClass::Number) {
                    format_double(value as f64)
                } else {
                    long_literal(value)
                }
            }
            _ => long_literal(value),
        }
    }

    fn string(&self, value: &str, declared: &DeclaredType, imports: &mut ImportCollector) -> String {
        let classes = self.mapper.classes();
        match declared {
            DeclaredType::Enum(alias) => {
                let alias = self.mapper.registry().alias(*alias);
                match enum_constant_name(value) {
                    Some(constant) => {
                        let name = imports.reference(&self.mapper.alias_name(alias));
                        format!("{}.{}", name, constant)
                    }
                    None => quote(value, true),
                }
            }
            DeclaredType::DurationUnit => {
                let unit_class = &classes.duration_unit;
                let constant = parse_duration_unit(value)
                    .and_then(|unit| duration_unit_constant(&unit_class.canonical(), unit));
                self.unit_constant(value, unit_class, constant, imports)
            }
            DeclaredType::DataSizeUnit => {
                let unit_class = &classes.data_size_unit;
                let constant = parse_data_size_unit(value)
                    .and_then(|unit| data_size_unit_constant(&unit_class.canonical(), unit));
                self.unit_constant(value, unit_class, constant, imports)
            }
            _ => quote(value, true),
        }
    }

    fn unit_constant(
        &self,
        value: &str,
        unit_class: &ClassName,
        constant: Option<&str>,
        imports: &mut ImportCollector,
    ) -> String {
        match constant {
            Some(constant) => format!("{}.{}", imports.reference(unit_class), constant),
            None => {
                warn!(unit = value, class = %unit_class, "no constant for unit, default set to null");
                "null".to_string()
            }
        }
    }

    fn object(&self, object: &ObjectValue, imports: &mut ImportCollector) -> String {
        let registry = self.mapper.registry();
        let Some(id) = registry.find_class(&object.class_name) else {
            warn!(class = %object.class_name, "unknown class of object default, default set to null");
            return "null".to_string();
        };
        let layout = PropertyLayout::new(registry, id, &KOTLIN_NAMING);
        let arguments: Vec<String> = layout
            .properties()
            .values()
            .map(|property| match object.properties.get(&property.simple_name) {
                Some(value) => self.render(value, &property.ty, imports),
                None => "null".to_string(),
            })
            .collect();
        let class = imports.reference(&self.mapper.class_name(registry.class(id)));
        format!("{}({})", class, arguments.join(", "))
    }

    fn duration(&self, duration: &Duration, imports: &mut ImportCollector) -> String {
        let class = &self.mapper.classes().duration;
        match DurationLiteral::for_class(&class.canonical(), self.duration_converter) {
            DurationLiteral::Native => native(
                imports,
                NATIVE_DURATION,
                NATIVE_DURATION_UNIT,
                duration.value,
                duration.unit.constant_name(),
            ),
            DurationLiteral::Parse(method) => format!(
                "{}.{}({})",
                imports.reference(class),
                method,
                quote(&duration.to_iso_string(), true)
            ),
            DurationLiteral::Convert(converter) => {
                format!("{}({})", converter, quote(&duration.to_iso_string(), true))
            }
            DurationLiteral::Unresolved => {
                warn!(class = %class, "no duration converter configured, default set to null");
                "null".to_string()
            }
        }
    }

    fn data_size(&self, size: &DataSize, imports: &mut ImportCollector) -> String {
        let class = &self.mapper.classes().data_size;
        match DataSizeLiteral::for_class(&class.canonical(), self.data_size_converter) {
            DataSizeLiteral::Native => native(
                imports,
                NATIVE_DATA_SIZE,
                NATIVE_DATA_SIZE_UNIT,
                size.value,
                size.unit.constant_name(),
            ),
            DataSizeLiteral::Convert(converter) => {
                format!("{}({}L)", converter, size.in_whole_bytes())
            }
            DataSizeLiteral::Unresolved => {
                warn!(class = %class, "no data size converter configured, default set to null");
                "null".to_string()
            }
        }
    }
}

/// `Duration(1.0, DurationUnit.SECONDS)` and the data size equivalent.
/// `-9223372036854775808L` does not compile: the literal is negated after it
/// is read as a positive `Long`.
fn long_literal(value: i64) -> String {
    if value == i64::MIN {
        "Long.MIN_VALUE".to_string()
    } else {
        format!("{}L", value)
    }
}

fn native(
    imports: &mut ImportCollector,
    class: &str,
    unit_class: &str,
    value: f64,
    constant: &str,
) -> String {
    let mut reference = |name: &str| {
        ClassName::best_guess(name).map_or_else(|| name.to_string(), |c| imports.reference(&c))
    };
    let class = reference(class);
    let unit = reference(unit_class);
    format!("{}({}, {}.{})", class, format_double(value), unit, constant)
}

#[cfg(test)]
mod tests {
    use hpkl_codegen::GeneratorOptions;
    use hpkl_codegen::naming::NameMapper;
    use hpkl_schema::testing::*;
    use hpkl_schema::{DataSizeUnit, DurationUnit, ModuleSchema, StdlibAlias};
    use indexmap::IndexMap;

    use super::*;
    use crate::type_mapper::KotlinClasses;

    struct Fixture {
        schema: ModuleSchema,
        options: GeneratorOptions,
    }

    impl Fixture {
        fn new(schema: ModuleSchema) -> Self {
            Self {
                schema,
                options: GeneratorOptions::default(),
            }
        }

        fn empty() -> Self {
            Self::new(ModuleBuilder::new("org.mod").build())
        }

        fn render(&self, value: &Value, ty: &TypeRef) -> (String, Vec<String>) {
            let classes = KotlinClasses::from_options(&self.options).unwrap();
            let mapper =
                KotlinTypeMapper::new(&self.schema.registry, NameMapper::default(), classes);
            let renderer = KotlinValueRenderer::new(
                &mapper,
                self.options.duration_converter.as_deref(),
                self.options.data_size_converter.as_deref(),
            );
            let mut imports = ImportCollector::new(
                mapper.module_type("org.mod"),
                &["kotlin", "kotlin.collections", "kotlin.text"],
            );
            let text = renderer.render(value, ty, &mut imports);
            (text, imports.imports())
        }

        fn text(&self, value: Value, ty: TypeRef) -> String {
            self.render(&value, &ty).0
        }
    }

    #[test]
    fn test_scalars() {
        let fixture = Fixture::empty();
        assert_eq!(fixture.text(Value::Int(10), int()), "10L");
        assert_eq!(fixture.text(Value::Int(10), float()), "10.0");
        assert_eq!(fixture.text(Value::Float(0.25), float()), "0.25");
        assert_eq!(fixture.text(Value::Boolean(false), boolean()), "false");
        assert_eq!(fixture.text(Value::Null, nullable(int())), "null");
    }

    #[test]
    fn test_long_extremes() {
        let fixture = Fixture::empty();
        assert_eq!(fixture.text(Value::Int(i64::MIN), int()), "Long.MIN_VALUE");
        assert_eq!(fixture.text(Value::Int(i64::MIN + 1), int()), "-9223372036854775807L");
        assert_eq!(fixture.text(Value::Int(i64::MAX), int()), "9223372036854775807L");
        assert_eq!(
            fixture.text(Value::Int(i64::MIN), width(StdlibAlias::Int8)),
            "Long.MIN_VALUE.toByte()"
        );
    }

    #[test]
    fn test_strings_escape_templates() {
        let fixture = Fixture::empty();
        assert_eq!(
            fixture.text(Value::String("cost: $5".into()), string()),
            "\"cost: \\$5\""
        );
    }

    #[test]
    fn test_width_conversions() {
        let fixture = Fixture::empty();
        let cases = [
            (StdlibAlias::Int8, 7, "7.toByte()"),
            (StdlibAlias::Int8, -7, "(-7).toByte()"),
            (StdlibAlias::UInt8, 7, "7.toShort()"),
            (StdlibAlias::Int32, 7, "7"),
            (StdlibAlias::UInt32, 7, "7L"),
        ];
        for (alias, value, expected) in cases {
            assert_eq!(fixture.text(Value::Int(value), width(alias)), expected);
        }
    }

    #[test]
    fn test_collections() {
        let fixture = Fixture::empty();
        let value = Value::List(vec![Value::Int(1), Value::Null, Value::Int(2)]);
        let (text, imports) = fixture.render(&value, &listing(width(StdlibAlias::Int16)));
        assert_eq!(text, "listOf(1.toShort(), 2.toShort())");
        assert!(imports.is_empty());

        let value = Value::List(vec![Value::String("a".into())]);
        assert_eq!(fixture.text(value, set(string())), "setOf(\"a\")");

        let value = Value::Map(vec![
            (Value::String("a".into()), Value::Int(1)),
            (Value::String("b".into()), Value::Int(2)),
        ]);
        assert_eq!(
            fixture.text(value, mapping(string(), int())),
            "mapOf(\"a\" to 1L, \"b\" to 2L)"
        );
    }

    #[test]
    fn test_enum_constant() {
        let mut module = ModuleBuilder::new("org.mod");
        let diet = module.alias("Diet", literals(&["Seeds", "Sun flower"]));
        let fixture = Fixture::new(module.build());
        assert_eq!(
            fixture.text(Value::String("Sun flower".into()), nullable(alias(diet))),
            "Diet.SUN_FLOWER"
        );
    }

    #[test]
    fn test_unit_constants() {
        let fixture = Fixture::empty();
        let (text, imports) = fixture.render(
            &Value::String("ms".into()),
            &width(StdlibAlias::DurationUnit),
        );
        assert_eq!(text, "DurationUnit.MILLISECONDS");
        assert_eq!(imports, vec!["kotlin.time.DurationUnit"]);

        let (text, imports) = fixture.render(
            &Value::String("gb".into()),
            &width(StdlibAlias::DataSizeUnit),
        );
        assert_eq!(text, "DataSizeUnit.GIGABYTES");
        assert_eq!(imports, vec!["org.pkl.core.DataSizeUnit"]);
    }

    #[test]
    fn test_object_positional_arguments() {
        let mut module = ModuleBuilder::new("org.mod");
        let base = module.class("Base").open().property("id", int()).id();
        let address = module
            .class("Address")
            .extends(base)
            .property("street", string())
            .id();
        let fixture = Fixture::new(module.build());

        let mut properties = IndexMap::new();
        properties.insert("street".to_string(), Value::String("Main".into()));
        let value = Value::Object(ObjectValue {
            class_name: "org.mod#Address".to_string(),
            properties,
        });
        assert_eq!(fixture.text(value, class(address)), "Address(null, \"Main\")");
    }

    #[test]
    fn test_durations() {
        let mut fixture = Fixture::empty();
        let value = Value::Duration(Duration::new(1.0, DurationUnit::Seconds));
        let (text, imports) = fixture.render(&value, &duration());
        assert_eq!(text, "Duration.parseIsoString(\"PT1S\")");
        assert_eq!(imports, vec!["kotlin.time.Duration"]);

        fixture.options.duration_class = Some("org.pkl.core.Duration".to_string());
        assert_eq!(
            fixture.render(&value, &duration()).0,
            "Duration(1.0, DurationUnit.SECONDS)"
        );

        fixture.options.duration_class = Some("com.acme.Span".to_string());
        assert_eq!(fixture.render(&value, &duration()).0, "null");
        fixture.options.duration_converter = Some("com.acme.span".to_string());
        assert_eq!(
            fixture.render(&value, &duration()).0,
            "com.acme.span(\"PT1S\")"
        );
    }

    #[test]
    fn test_data_sizes() {
        let mut fixture = Fixture::empty();
        let value = Value::DataSize(DataSize::new(2.0, DataSizeUnit::Kib));
        assert_eq!(
            fixture.render(&value, &data_size()).0,
            "DataSize(2.0, DataSizeUnit.KIBIBYTES)"
        );

        fixture.options.data_size_class = Some("com.acme.Size".to_string());
        fixture.options.data_size_converter = Some("com.acme.bytes".to_string());
        assert_eq!(fixture.render(&value, &data_size()).0, "com.acme.bytes(2048L)");
    }
}
