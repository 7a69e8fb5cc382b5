//! Emission of one Java class.

use hpkl_codegen::defaults::{DefaultValues, DefaultsRequest, lookup_defaults};
use hpkl_codegen::imports::{ClassName, ImportCollector};
use hpkl_codegen::layout::PropertyLayout;
use hpkl_codegen::literals::quote;
use hpkl_codegen::naming::capitalize;
use hpkl_codegen::Result;
use hpkl_schema::{Annotation, BuiltinClass, ClassDef, ClassId, PropertyDef, TypeRef, Value};
use indexmap::IndexMap;
use tracing::debug;

use crate::ast::{Class, Field, Method, Param};
use crate::generator::{Generator, javadoc};
use crate::naming::JAVA_NAMING;
use crate::values::JavaValueRenderer;

const CONFIGURATION_PROPERTIES: (&str, &str) = (
    "org.springframework.boot.context.properties",
    "ConfigurationProperties",
);

/// Builds the declaration of one schema class.
pub(crate) struct ClassEmitter<'g, 'a> {
    generator: &'g Generator<'a>,
    class: &'a ClassDef,
    layout: PropertyLayout<'a>,
    instantiable: bool,
}

impl<'g, 'a> ClassEmitter<'g, 'a> {
    pub(crate) fn new(generator: &'g Generator<'a>, id: ClassId) -> Self {
        let registry = &generator.schema().registry;
        let class = registry.class(id);
        let layout = PropertyLayout::new(registry, id, &JAVA_NAMING);
        let instantiable = layout.is_instantiable(class);
        Self {
            generator,
            class,
            layout,
            instantiable,
        }
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

        let mut decl = Class::new(class_name.simple_name()).modifier("public");
        if !class.is_module_class {
            decl = decl.modifier("static");
        }
        if class.is_abstract {
            decl = decl.modifier("abstract");
        } else if !class.is_open {
            decl = decl.modifier("final");
        }

        decl = decl.doc(self.doc(class.doc_comment.as_deref(), class.deprecation()));
        if class.deprecation().is_some() {
            decl = decl.annotation("@Deprecated");
        }
        if options.generate_framework_config {
            if let Some(prefix) = self.config_prefix() {
                let annotation = imports.reference(&ClassName::new(
                    CONFIGURATION_PROPERTIES.0,
                    CONFIGURATION_PROPERTIES.1,
                ));
                decl = decl.annotation(format!("@{}(prefix = {})", annotation, quote(prefix, false)));
            }
        }

        if let Some(superclass) = self.layout.superclass() {
            let superclass = mapper.class_name(self.generator.schema().class(superclass));
            decl = decl.extends(imports.reference(&superclass));
        }

        if options.implement_serializable && self.instantiable {
            decl = decl
                .implements(imports.reference(&ClassName::new("java.io", "Serializable")))
                .field(
                    Field::new("serialVersionUID", "long")
                        .modifier("private")
                        .modifier("static")
                        .modifier("final")
                        .initializer("0L"),
                );
        }

        if !self.layout.properties().is_empty() {
            decl = decl.constructor(self.constructor(&class_name, &types, imports));
        }
        if options.generate_empty_constructor {
            decl = decl.constructor(
                Method::constructor(class_name.simple_name()).modifier(self.constructor_access()),
            );
        }

        for (name, property) in self.layout.properties() {
            let ty = &types[name.as_str()];
            if self.layout.is_own(name) {
                decl = decl.field(self.field(name, property, ty, &defaults, imports));
                if options.generate_getters {
                    decl = decl.method(self.getter(name, property, ty));
                }
                if options.generate_setters {
                    decl = decl.method(self.setter(name, property, ty));
                }
            }
            if !options.generate_setters && self.instantiable {
                decl = decl.method(self.with_method(name, property, ty, &self_type));
            }
        }

        if !class.is_abstract {
            let objects = imports.reference(&ClassName::new("java.util", "Objects"));
            decl = decl
                .method(self.equals(&self_type, &objects))
                .method(self.hash_code(&objects))
                .method(self.to_string_method(&self_type));
        }

        debug!(
            class = %class.qualified_name,
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

    /// Javadoc text, including the deprecation message when docs are on.
    fn doc(&self, doc_comment: Option<&str>, deprecation: Option<&Annotation>) -> Option<String> {
        if !self.generator.options().generate_doc_comments {
            return None;
        }
        let doc = doc_comment.map(|doc| javadoc(doc.trim_end()));
        let message = deprecation
            .and_then(Annotation::message)
            .map(|message| javadoc(&format!("@deprecated {}", message)));
        match (doc, message) {
            (Some(doc), Some(message)) => Some(format!("{}\n\n{}", doc, message)),
            (doc, message) => doc.or(message),
        }
    }

    fn config_prefix(&self) -> Option<&'a str> {
        let wanted = &self.generator.options().framework_config_annotation_name;
        self.class
            .annotations
            .iter()
            .filter(|annotation| simple_name(&annotation.class_name) == wanted.as_str())
            .find_map(|annotation| match annotation.properties.get("prefix") {
                Some(Value::String(prefix)) => Some(prefix.as_str()),
                _ => None,
            })
    }

    fn constructor_access(&self) -> &'static str {
        if self.instantiable {
            "public"
        } else if self.class.is_abstract || self.class.is_open {
            "protected"
        } else {
            "private"
        }
    }

    fn constructor(
        &self,
        class_name: &ClassName,
        types: &IndexMap<&str, String>,
        imports: &mut ImportCollector,
    ) -> Method {
        let parameter_annotation = self
            .generator
            .mapper()
            .classes()
            .parameter_annotation
            .as_ref()
            .map(|annotation| imports.reference(annotation));

        let mut constructor =
            Method::constructor(class_name.simple_name()).modifier(self.constructor_access());
        for (name, property) in self.layout.properties() {
            let mut param = Param::new(name, &types[name.as_str()]);
            if let Some(annotation) = &parameter_annotation {
                param = param.annotation(format!(
                    "@{}({})",
                    annotation,
                    quote(&property.simple_name, false)
                ));
            }
            constructor = constructor.param(param);
        }

        let super_properties = self.layout.super_properties();
        if !super_properties.is_empty() {
            let arguments: Vec<&str> = super_properties.keys().map(String::as_str).collect();
            constructor = constructor.statement(format!("super({});", arguments.join(", ")));
        }
        for name in self.layout.own_properties().keys() {
            constructor = constructor.statement(format!("this.{} = {};", name, name));
        }
        constructor
    }

    fn field(
        &self,
        name: &str,
        property: &PropertyDef,
        ty: &str,
        defaults: &DefaultValues,
        imports: &mut ImportCollector,
    ) -> Field {
        let options = self.generator.options();
        let mut field = Field::new(name, ty);
        if options.generate_getters {
            field = field.modifier(if self.class.is_abstract || self.class.is_open {
                "protected"
            } else {
                "private"
            });
        } else {
            field = field.doc(self.doc(property.doc_comment.as_deref(), property.deprecation()));
            if property.deprecation().is_some() {
                field = field.annotation("@Deprecated");
            }
            field = field.modifier("public");
        }

        let initializer = defaults
            .get(&property.simple_name)
            .filter(|value| !value.is_null())
            .map(|value| {
                JavaValueRenderer::new(
                    self.generator.mapper(),
                    options.duration_converter.as_deref(),
                    options.data_size_converter.as_deref(),
                )
                .render(value, &property.ty, imports)
            });
        // A field with an initializer stays assignable from the constructor.
        if !options.generate_setters && initializer.is_none() {
            field = field.modifier("final");
        }
        if let Some(initializer) = initializer {
            field = field.initializer(initializer);
        }
        field
    }

    fn accessor(&self, method: Method, name: &str, property: &PropertyDef) -> Method {
        let mut method = method;
        if self.layout.is_inherited(name) {
            method = method.annotation("@Override");
        }
        if property.deprecation().is_some() {
            method = method.annotation("@Deprecated");
        }
        method.doc(self.doc(property.doc_comment.as_deref(), property.deprecation()))
    }

    fn getter(&self, name: &str, property: &PropertyDef, ty: &str) -> Method {
        let registry = &self.generator.schema().registry;
        let is_boolean = matches!(
            &property.ty,
            TypeRef::Class { class, .. } if registry.class(*class).is(BuiltinClass::Boolean)
        );
        let prefix = if is_boolean { "is" } else { "get" };
        let method = Method::new(format!("{}{}", prefix, capitalize(&property.simple_name)), ty)
            .modifier("public")
            .statement(format!("return {};", name));
        self.accessor(method, name, property)
    }

    fn setter(&self, name: &str, property: &PropertyDef, ty: &str) -> Method {
        let method = Method::new(format!("set{}", capitalize(&property.simple_name)), "void")
            .modifier("public")
            .param(Param::new(name, ty))
            .statement(format!("this.{} = {};", name, name));
        self.accessor(method, name, property)
    }

    fn with_method(&self, name: &str, property: &PropertyDef, ty: &str, self_type: &str) -> Method {
        let arguments: Vec<&str> = self.layout.properties().keys().map(String::as_str).collect();
        let mut method = Method::new(format!("with{}", capitalize(&property.simple_name)), self_type)
            .modifier("public")
            .param(Param::new(name, ty))
            .statement(format!("return new {}({});", self_type, arguments.join(", ")));
        if property.deprecation().is_some() {
            method = method.annotation("@Deprecated");
        }
        method.doc(self.doc(None, property.deprecation()))
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
            format!("{r}.{n} == null ? null : {r}.{n}.pattern()", r = receiver, n = name)
        } else {
            format!("{}.{}.pattern()", receiver, name)
        }
    }

    fn equals(&self, self_type: &str, objects: &str) -> Method {
        let mut method = Method::new("equals", "boolean")
            .annotation("@Override")
            .modifier("public")
            .param(Param::new("obj", "Object"))
            .statement("if (this == obj) return true;")
            .statement("if (obj == null) return false;")
            .statement("if (this.getClass() != obj.getClass()) return false;")
            .statement(format!("{} other = ({}) obj;", self_type, self_type));
        for (name, property) in self.layout.properties() {
            method = method.statement(format!(
                "if (!{}.equals({}, {})) return false;",
                objects,
                self.compared_value("this", name, property),
                self.compared_value("other", name, property)
            ));
        }
        method.statement("return true;")
    }

    fn hash_code(&self, objects: &str) -> Method {
        let mut method = Method::new("hashCode", "int")
            .annotation("@Override")
            .modifier("public")
            .statement("int result = 1;");
        for (name, property) in self.layout.properties() {
            method = method.statement(format!(
                "result = 31 * result + {}.hashCode({});",
                objects,
                self.compared_value("this", name, property)
            ));
        }
        method.statement("return result;")
    }

    fn to_string_method(&self, self_type: &str) -> Method {
        let properties = self.layout.properties();
        let mut method = Method::new("toString", "String")
            .annotation("@Override")
            .modifier("public")
            .statement(format!(
                "StringBuilder builder = new StringBuilder({});",
                50 + 50 * properties.len()
            ))
            .statement(format!(
                r#"builder.append({}.class.getSimpleName()).append(" {{");"#,
                self_type
            ));
        for name in properties.keys() {
            method = method.statement(format!(
                "appendProperty(builder, {}, this.{});",
                quote(name, false),
                name
            ));
        }
        method
            .statement(r#"builder.append("\n}");"#)
            .statement("return builder.toString();")
    }
}

/// `org.mod#Name` or `org.mod.Name` to `Name`.
fn simple_name(qualified: &str) -> &str {
    qualified
        .rsplit_once('#')
        .or_else(|| qualified.rsplit_once('.'))
        .map_or(qualified, |(_, simple)| simple)
}
