//! Emission of one Kotlin class.

use hpkl_codegen::Result;
use hpkl_codegen::defaults::{DefaultValues, DefaultsRequest, lookup_defaults};
use hpkl_codegen::imports::{ClassName, ImportCollector};
use hpkl_codegen::layout::PropertyLayout;
use hpkl_codegen::literals::quote;
use hpkl_schema::{Annotation, BuiltinClass, ClassDef, ClassId, PropertyDef, TypeRef};
use indexmap::IndexMap;
use tracing::debug;

use crate::ast::{Class, ClassKind, Function, Param, Property};
use crate::generator::Generator;
use crate::naming::{KOTLIN_NAMING, escape, template_reference};
use crate::values::KotlinValueRenderer;

const CONFIGURATION_PROPERTIES: (&str, &str) = (
    "org.springframework.boot.context.properties",
    "ConfigurationProperties",
);

/// Builds the declaration of one schema class.
pub(crate) struct ClassEmitter<'g, 'a> {
    generator: &'g Generator<'a>,
    id: ClassId,
    class: &'a ClassDef,
    layout: PropertyLayout<'a>,
}

impl<'g, 'a> ClassEmitter<'g, 'a> {
    pub(crate) fn new(generator: &'g Generator<'a>, id: ClassId) -> Self {
        let registry = &generator.schema().registry;
        Self {
            generator,
            id,
            class: registry.class(id),
            layout: PropertyLayout::new(registry, id, &KOTLIN_NAMING),
        }
    }

    /// A data class needs no emitted superclass, must be final, and needs at
    /// least one constructor property.
    fn is_data_class(&self) -> bool {
        self.layout.superclass().is_none()
            && !self.class.is_abstract
            && !self.class.is_open
            && !self.layout.properties().is_empty()
    }

    pub(crate) fn emit(&self, imports: &mut ImportCollector) -> Result<Class> {
        let options = self.generator.options();
        let mapper = self.generator.mapper();
        let class = self.class;
        let class_name = mapper.class_name(class);
        let self_type = imports.reference(&class_name);

        let mut types = IndexMap::new();
        for (name, property) in self.layout.properties() {
            let ty = mapper.map(&property.ty)?.render(imports);
            types.insert(name.as_str(), ty);
        }
        let defaults = self.defaults();
        let data_class = self.is_data_class();

        let kind = if data_class {
            ClassKind::DataClass
        } else {
            ClassKind::Class
        };
        let mut decl = Class::new(class_name.simple_name(), kind)
            .doc(self.generator.doc(class.doc_comment.as_deref()));
        if class.is_abstract {
            decl = decl.modifier("abstract");
        } else if class.is_open {
            decl = decl.modifier("open");
        }

        if let Some(deprecation) = class.deprecation() {
            decl = decl.annotation(deprecated(deprecation));
        }
        if options.generate_framework_config {
            if let Some(annotation) = self.configuration_properties(imports) {
                decl = decl.annotation(annotation);
            }
        }

        for (name, property) in self.layout.properties() {
            decl = decl.param(self.param(name, property, &types[name.as_str()], &defaults, imports));
        }

        if let Some(superclass) = self.layout.superclass() {
            let superclass = mapper.class_name(self.generator.schema().class(superclass));
            let args = self
                .layout
                .super_properties()
                .keys()
                .map(|name| escape(name).into_owned())
                .collect();
            decl = decl.extends(imports.reference(&superclass), args);
        }

        if options.implement_serializable && !class.is_abstract {
            decl = decl
                .implements(imports.reference(&ClassName::new("java.io", "Serializable")))
                .companion(serial_version_companion());
        }

        if data_class {
            let has_regex = self
                .layout
                .own_properties()
                .values()
                .any(|property| self.is_regex(property));
            if has_regex {
                let objects = imports.reference(&ClassName::new("java.util", "Objects"));
                decl = decl
                    .function(self.equals(&self_type))
                    .function(self.hash_code(&objects));
            }
        } else if !class.is_abstract {
            if !options.mutable_properties {
                for copy in self.copy_methods(&self_type, imports)? {
                    decl = decl.function(copy);
                }
            }
            let objects = imports.reference(&ClassName::new("java.util", "Objects"));
            decl = decl
                .function(self.equals(&self_type))
                .function(self.hash_code(&objects))
                .function(self.to_string_method(class_name.simple_name()));
        }

        debug!(
            class = %class.qualified_name,
            data_class,
            properties = self.layout.properties().len(),
            "emitted class"
        );
        Ok(decl)
    }

    fn defaults(&self) -> DefaultValues {
        if !self.generator.options().set_default_values {
            return DefaultValues::new();
        }
        let request = DefaultsRequest::new(self.generator.schema(), self.class);
        lookup_defaults(self.generator.defaults(), &request)
    }

    /// `@ConfigurationProperties` for the module class, or with the property name
    /// for a class referenced by exactly one module property.
    fn configuration_properties(&self, imports: &mut ImportCollector) -> Option<String> {
        let schema = self.generator.schema();
        let annotation_class = ClassName::new(CONFIGURATION_PROPERTIES.0, CONFIGURATION_PROPERTIES.1);
        if self.class.is_module_class {
            return Some(format!("@{}", imports.reference(&annotation_class)));
        }

        let mut matching = schema
            .all_properties(schema.module_class)
            .into_values()
            .filter(|property| !property.is_hidden)
            .filter(|property| {
                matches!(
                    property.ty.unwrap_refinements(),
                    TypeRef::Class { class, .. } if *class == self.id
                )
            });
        let property = matching.next()?;
        if matching.next().is_some() {
            return None;
        }
        Some(format!(
            "@{}({})",
            imports.reference(&annotation_class),
            quote(&property.simple_name, true)
        ))
    }

    fn param(
        &self,
        name: &str,
        property: &PropertyDef,
        ty: &str,
        defaults: &DefaultValues,
        imports: &mut ImportCollector,
    ) -> Param {
        let options = self.generator.options();
        let mut param = Param::new(escape(name), ty);
        if self.layout.is_own(name) {
            param = param.doc(self.generator.doc(property.doc_comment.as_deref()));
            if let Some(deprecation) = property.deprecation() {
                param = param.annotation(deprecated(deprecation));
            }
            if self.layout.is_inherited(name) {
                param = param.modifier("override");
            }
            if self.class.is_open || self.class.is_abstract {
                param = param.modifier("open");
            }
            param = param.binding(if options.mutable_properties { "var" } else { "val" });
        }

        let default = defaults
            .get(&property.simple_name)
            .filter(|value| !value.is_null())
            .map(|value| {
                KotlinValueRenderer::new(
                    self.generator.mapper(),
                    options.duration_converter.as_deref(),
                    options.data_size_converter.as_deref(),
                )
                .render(value, &property.ty, imports)
            });
        if let Some(default) = default {
            param = param.default_value(default);
        }
        param
    }

    /// One `copy` per distinct arity along the superclass chain, so that every
    /// inherited `copy` returns this class.
    fn copy_methods(&self, self_type: &str, imports: &mut ImportCollector) -> Result<Vec<Function>> {
        let registry = &self.generator.schema().registry;
        let mut copies = Vec::new();
        let mut previous_arity = usize::MAX;
        for (id, ancestor) in registry.ancestry(self.id) {
            if ancestor.is_abstract {
                continue;
            }
            let params = visible_properties(registry.all_properties(id));
            if params.len() >= previous_arity {
                continue;
            }
            let is_override = id != self.id || self.inherits_copy_with_same_arity();
            copies.push(self.copy_method(&params, is_override, self_type, imports)?);
            previous_arity = params.len();
        }
        Ok(copies)
    }

    fn inherits_copy_with_same_arity(&self) -> bool {
        let registry = &self.generator.schema().registry;
        registry
            .ancestry(self.id)
            .skip(1)
            .find(|(_, ancestor)| !ancestor.is_abstract)
            .is_some_and(|(id, _)| {
                visible_properties(registry.all_properties(id)).len()
                    == self.layout.properties().len()
            })
    }

    fn copy_method(
        &self,
        params: &IndexMap<&str, &PropertyDef>,
        is_override: bool,
        self_type: &str,
        imports: &mut ImportCollector,
    ) -> Result<Function> {
        let mapper = self.generator.mapper();
        let mut method = Function::new("copy").returns(self_type);
        if is_override {
            method = method.modifier("override");
        }
        if self.class.is_open || self.class.is_abstract {
            method = method.modifier("open");
        }
        for (name, property) in params {
            let name = escape(name);
            let mut param = Param::new(name.as_ref(), mapper.map(&property.ty)?.render(imports));
            if !is_override {
                param = param.default_value(format!("this.{}", name));
            }
            method = method.param(param);
        }
        let arguments: Vec<String> = self
            .layout
            .properties()
            .keys()
            .map(|name| escape(name).into_owned())
            .collect();
        Ok(method.statement(format!("return {}({})", self_type, arguments.join(", "))))
    }

    fn is_regex(&self, property: &PropertyDef) -> bool {
        let registry = &self.generator.schema().registry;
        matches!(
            property.ty.unwrap_refinements(),
            TypeRef::Class { class, .. } if registry.class(*class).is(BuiltinClass::Regex)
        )
    }

    /// The value `equals` and `hashCode` use for a property of `receiver`;
    /// patterns compare by their source text.
    fn compared_value(&self, receiver: &str, name: &str, property: &PropertyDef) -> String {
        if !self.is_regex(property) {
            format!("{}.{}", receiver, name)
        } else if property.ty.is_nullable() {
            format!("{}.{}?.pattern", receiver, name)
        } else {
            format!("{}.{}.pattern", receiver, name)
        }
    }

    fn equals(&self, self_type: &str) -> Function {
        let mut method = Function::new("equals")
            .modifier("override")
            .param(Param::new("other", "Any?"))
            .returns("Boolean")
            .statement("if (this === other) return true")
            .statement("if (this.javaClass != other?.javaClass) return false")
            .statement(format!("other as {}", self_type));
        for (name, property) in self.layout.properties() {
            let name = escape(name);
            method = method.statement(format!(
                "if ({} != {}) return false",
                self.compared_value("this", &name, property),
                self.compared_value("other", &name, property)
            ));
        }
        method.statement("return true")
    }

    fn hash_code(&self, objects: &str) -> Function {
        let mut method = Function::new("hashCode")
            .modifier("override")
            .returns("Int")
            .statement("var result = 1");
        for (name, property) in self.layout.properties() {
            let name = escape(name);
            method = method.statement(format!(
                "result = 31 * result + {}.hashCode({})",
                objects,
                self.compared_value("this", &name, property)
            ));
        }
        method.statement("return result")
    }

    /// Same text as a data class's `toString`.
    fn to_string_method(&self, simple_name: &str) -> Function {
        let fields: Vec<String> = self
            .layout
            .properties()
            .keys()
            .map(|name| {
                let label = quote(name, true);
                format!("{}={}", &label[1..label.len() - 1], template_reference(name))
            })
            .collect();
        let label = quote(simple_name, true);
        Function::new("toString")
            .modifier("override")
            .returns("String")
            .statement(format!(
                "return \"{}({})\"",
                &label[1..label.len() - 1],
                fields.join(", ")
            ))
    }
}

fn visible_properties<'s>(properties: IndexMap<&'s str, &'s PropertyDef>) -> IndexMap<&'s str, &'s PropertyDef> {
    properties
        .into_iter()
        .filter(|(_, property)| !property.is_hidden)
        .collect()
}

/// `@Deprecated(message = "...")`; Kotlin requires the message.
pub(crate) fn deprecated(deprecation: &Annotation) -> String {
    format!(
        "@Deprecated(message = {})",
        quote(deprecation.message().unwrap_or_default(), true)
    )
}

fn serial_version_companion() -> Class {
    Class::companion_object().property(
        Property::new("serialVersionUID", "Long", "0L")
            .modifier("private")
            .modifier("const"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deprecated_annotation() {
        assert_eq!(
            deprecated(&Annotation::deprecated(Some("use \"b\""))),
            "@Deprecated(message = \"use \\\"b\\\"\")"
        );
        assert_eq!(
            deprecated(&Annotation::deprecated(None)),
            "@Deprecated(message = \"\")"
        );
    }
}
