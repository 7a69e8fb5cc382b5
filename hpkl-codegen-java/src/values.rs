//! Java literals for evaluated default values.

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

use crate::naming::JAVA_NAMING;
use crate::type_mapper::JavaTypeMapper;

/// Map literals with more entries than this use `Map.ofEntries`.
const MAP_OF_LIMIT: usize = 10;

/// Renders default values as Java expressions.
///
/// Dispatches on the runtime value; the declared type only refines the literal
/// (integer widths, enum constants, collection kind, nested object class).
pub struct JavaValueRenderer<'a, 's> {
    mapper: &'a JavaTypeMapper<'s>,
    duration_converter: Option<&'a str>,
    data_size_converter: Option<&'a str>,
}

impl<'a, 's> JavaValueRenderer<'a, 's> {
    pub fn new(
        mapper: &'a JavaTypeMapper<'s>,
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
                let collection = if is_set { "Set" } else { "List" };
                let collection = imports.reference(&ClassName::new("java.util", collection));
                let element_type = declared.type_argument(0);
                let elements: Vec<String> = elements
                    .iter()
                    .filter(|element| !element.is_null())
                    .map(|element| self.render(element, &element_type, imports))
                    .collect();
                format!("{}.of({})", collection, elements.join(", "))
            }
            Value::Map(entries) => {
                let map = imports.reference(&ClassName::new("java.util", "Map"));
                let key_type = declared.type_argument(0);
                let value_type = declared.type_argument(1);
                let entries: Vec<(String, String)> = entries
                    .iter()
                    .map(|(key, value)| {
                        (
                            self.render(key, &key_type, imports),
                            self.render(value, &value_type, imports),
                        )
                    })
                    .collect();
                if entries.len() > MAP_OF_LIMIT {
                    let entries: Vec<String> = entries
                        .iter()
                        .map(|(key, value)| format!("{}.entry({}, {})", map, key, value))
                        .collect();
                    format!("{}.ofEntries({})", map, entries.join(", "))
                } else {
                    let entries: Vec<String> = entries
                        .iter()
                        .map(|(key, value)| format!("{}, {}", key, value))
                        .collect();
                    format!("{}.of({})", map, entries.join(", "))
                }
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
                match width {
                    IntWidth::Byte => format!("(byte) {}", value),
                    IntWidth::Short => format!("(short) {}", value),
                    IntWidth::Int => value.to_string(),
                    IntWidth::Long => format!("{}L", value),
                }
            }
            DeclaredType::Class { class, .. } => {
                let class = self.mapper.registry().class(*class);
                if class.is(BuiltinClass::Float) || class.is(BuiltinClass::Number) {
                    format_double(value as f64)
                } else {
                    format!("{}L", value)
                }
            }
            _ => format!("{}L", value),
        }
    }

    fn string(&self, value: &str, declared: &DeclaredType, imports: &mut ImportCollector) -> String {
        let classes = self.mapper.classes();
        match declared {
            DeclaredType::Enum(alias) => {
                let alias = self.mapper.registry().alias(*alias);
                match enum_constant_name(value) {
                    Some(constant) => {
                        let name = imports.reference(&self.mapper.enum_name(alias));
                        format!("{}.{}", name, constant)
                    }
                    None => quote(value, false),
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
            _ => quote(value, false),
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
        let layout = PropertyLayout::new(registry, id, &JAVA_NAMING);
        let arguments: Vec<String> = layout
            .properties()
            .values()
            .map(|property| match object.properties.get(&property.simple_name) {
                Some(value) => self.render(value, &property.ty, imports),
                None => "null".to_string(),
            })
            .collect();
        let class = imports.reference(&self.mapper.class_name(registry.class(id)));
        format!("new {}({})", class, arguments.join(", "))
    }

    fn duration(&self, duration: &Duration, imports: &mut ImportCollector) -> String {
        let class = &self.mapper.classes().duration;
        match DurationLiteral::for_class(&class.canonical(), self.duration_converter) {
            DurationLiteral::Native => {
                let unit = ClassName::best_guess(NATIVE_DURATION_UNIT);
                native(imports, NATIVE_DURATION, unit, duration.value, duration.unit.constant_name())
            }
            DurationLiteral::Parse(method) => format!(
                "{}.{}({})",
                imports.reference(class),
                method,
                quote(&duration.to_iso_string(), false)
            ),
            DurationLiteral::Convert(converter) => {
                format!("{}({})", converter, quote(&duration.to_iso_string(), false))
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
            DataSizeLiteral::Native => {
                let unit = ClassName::best_guess(NATIVE_DATA_SIZE_UNIT);
                native(imports, NATIVE_DATA_SIZE, unit, size.value, size.unit.constant_name())
            }
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

/// `new Duration(1.0, DurationUnit.SECONDS)` and the data size equivalent.
fn native(
    imports: &mut ImportCollector,
    class: &str,
    unit_class: Option<ClassName>,
    value: f64,
    constant: &str,
) -> String {
    let class = ClassName::best_guess(class).map_or_else(|| class.to_string(), |c| imports.reference(&c));
    let unit = unit_class.map_or_else(String::new, |c| imports.reference(&c));
    format!("new {}({}, {}.{})", class, format_double(value), unit, constant)
}
