//! Kotlin declarations and source writer.

use std::fmt;

use crate::{
    Annotation, AttributeKind, CodeBlock, FormattingOptions, Parameter, SourceWriter,
    format_enum_value, io::IndentingWriter, requires_import, unqualified,
};

/// Kotlin declaration modifiers. Writers sort declared modifiers in this
/// order and drop `public`, the implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KotlinModifier {
    Public,
    Protected,
    Private,
    Internal,
    Abstract,
    Final,
    Open,
    Const,
    Lateinit,
    Override,
    Suspend,
    Inline,
}

impl fmt::Display for KotlinModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::Open => "open",
            Self::Const => "const",
            Self::Lateinit => "lateinit",
            Self::Override => "override",
            Self::Suspend => "suspend",
            Self::Inline => "inline",
        };
        write!(f, "{keyword}")
    }
}

/// A statement in a Kotlin function body; closed, matched exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum KotlinStatement {
    /// An expression on its own line.
    Expression(CodeBlock),
    /// `return` of the given expression.
    Return(CodeBlock),
    /// Pre-formatted code written as-is.
    Code(CodeBlock),
}

impl KotlinStatement {
    fn block(&self) -> &CodeBlock {
        match self {
            Self::Expression(block) | Self::Return(block) | Self::Code(block) => block,
        }
    }
}

/// A custom property accessor body, written as a single expression for
/// getters (`get() = ...`) and as a block for setters.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinAccessor {
    body: CodeBlock,
}

impl KotlinAccessor {
    pub fn of(body: CodeBlock) -> Self {
        Self { body }
    }
}

/// A `val`/`var` property.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinPropertyDeclaration {
    name: String,
    mutable: bool,
    ty: Option<String>,
    value: Option<CodeBlock>,
    getter: Option<KotlinAccessor>,
    setter: Option<KotlinAccessor>,
    annotations: Vec<Annotation>,
}

impl KotlinPropertyDeclaration {
    pub fn val(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    fn new(name: impl Into<String>, mutable: bool) -> Self {
        Self {
            name: name.into(),
            mutable,
            ty: None,
            value: None,
            getter: None,
            setter: None,
            annotations: Vec::new(),
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Initialize the property with the given expression.
    pub fn value(mut self, value: CodeBlock) -> Self {
        self.value = Some(value);
        self
    }

    pub fn getter(mut self, accessor: KotlinAccessor) -> Self {
        self.getter = Some(accessor);
        self
    }

    pub fn setter(mut self, accessor: KotlinAccessor) -> Self {
        self.setter = Some(accessor);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A function, either a type member or top level.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinFunctionDeclaration {
    name: String,
    modifiers: Vec<KotlinModifier>,
    return_type: Option<String>,
    parameters: Vec<Parameter>,
    annotations: Vec<Annotation>,
    body: Vec<KotlinStatement>,
}

impl KotlinFunctionDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            return_type: None,
            parameters: Vec::new(),
            annotations: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = KotlinModifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn statement(mut self, statement: KotlinStatement) -> Self {
        self.body.push(statement);
        self
    }

    /// Append pre-formatted code to the body.
    pub fn code(self, block: CodeBlock) -> Self {
        self.statement(KotlinStatement::Code(block))
    }
}

/// A Kotlin class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinTypeDeclaration {
    name: String,
    modifiers: Vec<KotlinModifier>,
    extends: Option<String>,
    annotations: Vec<Annotation>,
    properties: Vec<KotlinPropertyDeclaration>,
    functions: Vec<KotlinFunctionDeclaration>,
}

impl KotlinTypeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            extends: None,
            annotations: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = KotlinModifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.extends = Some(supertype.into());
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn property(mut self, property: KotlinPropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn function(mut self, function: KotlinFunctionDeclaration) -> Self {
        self.functions.push(function);
        self
    }

    fn has_members(&self) -> bool {
        !self.properties.is_empty() || !self.functions.is_empty()
    }
}

/// One Kotlin source file: type declarations followed by top-level functions.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinCompilationUnit {
    package_name: String,
    name: String,
    types: Vec<KotlinTypeDeclaration>,
    top_level_functions: Vec<KotlinFunctionDeclaration>,
}

impl KotlinCompilationUnit {
    pub fn new(package_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            name: name.into(),
            types: Vec::new(),
            top_level_functions: Vec::new(),
        }
    }

    pub fn types(mut self, types: impl IntoIterator<Item = KotlinTypeDeclaration>) -> Self {
        self.types.extend(types);
        self
    }

    pub fn top_level_function(mut self, function: KotlinFunctionDeclaration) -> Self {
        self.top_level_functions.push(function);
        self
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Renders [`KotlinCompilationUnit`]s as Kotlin source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinSourceCodeWriter;

impl SourceWriter for KotlinSourceCodeWriter {
    type Unit = KotlinCompilationUnit;

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn render(&self, unit: &KotlinCompilationUnit) -> String {
        let mut writer = IndentingWriter::new();
        writer.println(&format!("package {}", unit.package_name));
        writer.newline();
        let imports = determine_imports(unit);
        if !imports.is_empty() {
            for import in &imports {
                writer.println(&format!("import {import}"));
            }
            writer.newline();
        }
        for type_declaration in &unit.types {
            write_type(&mut writer, type_declaration);
        }
        for function in &unit.top_level_functions {
            write_function(&mut writer, function);
        }
        writer.finish()
    }
}

fn write_type(writer: &mut IndentingWriter, declaration: &KotlinTypeDeclaration) {
    write_annotations(writer, &declaration.annotations);
    write_modifiers(writer, &declaration.modifiers);
    writer.print(&format!("class {}", declaration.name));
    if let Some(supertype) = &declaration.extends {
        writer.print(&format!(" : {}()", unqualified(supertype)));
    }
    // A class without members has no body at all.
    if !declaration.has_members() {
        writer.newline();
        writer.newline();
        return;
    }
    writer.println(" {");
    writer.newline();
    writer.indented(|writer| {
        for property in &declaration.properties {
            write_property(writer, property);
        }
        for function in &declaration.functions {
            write_function(writer, function);
        }
    });
    writer.println("}");
}

fn write_property(writer: &mut IndentingWriter, property: &KotlinPropertyDeclaration) {
    write_annotations(writer, &property.annotations);
    writer.print(if property.mutable { "var " } else { "val " });
    writer.print(&property.name);
    if let Some(ty) = &property.ty {
        writer.print(&format!(": {}", unqualified(ty)));
    }
    if let Some(value) = &property.value {
        writer.print(" = ");
        value.write(writer, FormattingOptions::KOTLIN);
    }
    writer.newline();
    writer.indented(|writer| {
        if let Some(getter) = &property.getter {
            writer.print("get() = ");
            getter.body.write(writer, FormattingOptions::KOTLIN);
            writer.newline();
        }
        if let Some(setter) = &property.setter {
            writer.println("set(value) {");
            writer.indented(|writer| {
                setter.body.write(writer, FormattingOptions::KOTLIN);
                writer.newline();
            });
            writer.println("}");
        }
    });
    writer.newline();
}

fn write_function(writer: &mut IndentingWriter, function: &KotlinFunctionDeclaration) {
    write_annotations(writer, &function.annotations);
    write_modifiers(writer, &function.modifiers);
    let parameters: Vec<String> = function
        .parameters
        .iter()
        .map(|parameter| format!("{}: {}", parameter.name(), unqualified(parameter.ty())))
        .collect();
    writer.print(&format!("fun {}({})", function.name, parameters.join(", ")));
    if let Some(return_type) = &function.return_type {
        writer.print(&format!(": {}", unqualified(return_type)));
    }
    writer.println(" {");
    writer.indented(|writer| {
        for statement in &function.body {
            match statement {
                KotlinStatement::Expression(expression) => {
                    expression.write(writer, FormattingOptions::KOTLIN);
                    writer.newline();
                }
                KotlinStatement::Return(expression) => {
                    writer.print("return ");
                    expression.write(writer, FormattingOptions::KOTLIN);
                    writer.newline();
                }
                KotlinStatement::Code(block) => block.write(writer, FormattingOptions::KOTLIN),
            }
        }
    });
    writer.println("}");
    writer.newline();
}

fn write_annotations(writer: &mut IndentingWriter, annotations: &[Annotation]) {
    for annotation in annotations {
        writer.println(&format_annotation(annotation));
    }
}

fn write_modifiers(writer: &mut IndentingWriter, declared: &[KotlinModifier]) {
    let mut modifiers: Vec<KotlinModifier> = declared
        .iter()
        .copied()
        .filter(|modifier| *modifier != KotlinModifier::Public)
        .collect();
    modifiers.sort();
    for modifier in modifiers {
        writer.print(&format!("{modifier} "));
    }
}

fn format_annotation(annotation: &Annotation) -> String {
    let mut out = format!("@{}", annotation.class_name().simple_name());
    let attributes = annotation.attributes();
    if !attributes.is_empty() {
        out.push('(');
        if attributes.len() == 1 && attributes[0].name() == "value" {
            out.push_str(&format_attribute(&attributes[0]));
        } else {
            let formatted: Vec<String> = attributes
                .iter()
                .map(|attribute| format!("{} = {}", attribute.name(), format_attribute(attribute)))
                .collect();
            out.push_str(&formatted.join(", "));
        }
        out.push(')');
    }
    out
}

fn format_attribute(attribute: &crate::AnnotationAttribute) -> String {
    let formatted: Vec<String> = attribute
        .values()
        .iter()
        .map(|value| match attribute.kind() {
            AttributeKind::Str => format!("\"{value}\""),
            AttributeKind::Class => format!("{}::class", unqualified(value)),
            AttributeKind::Enum => format_enum_value(value),
            AttributeKind::Literal => value.clone(),
        })
        .collect();
    if formatted.len() > 1 {
        format!("[{}]", formatted.join(", "))
    } else {
        formatted.join(", ")
    }
}

fn determine_imports(unit: &KotlinCompilationUnit) -> Vec<String> {
    let mut imports: Vec<String> = Vec::new();
    for declaration in &unit.types {
        imports.extend(declaration.extends.iter().cloned());
        for annotation in &declaration.annotations {
            imports.extend(annotation.imports());
        }
        for property in &declaration.properties {
            imports.extend(property.ty.iter().cloned());
            for annotation in &property.annotations {
                imports.extend(annotation.imports());
            }
            for block in property
                .value
                .iter()
                .chain(property.getter.as_ref().map(|accessor| &accessor.body))
                .chain(property.setter.as_ref().map(|accessor| &accessor.body))
            {
                imports.extend(block.imports().iter().cloned());
            }
        }
        for function in &declaration.functions {
            collect_function_imports(&mut imports, function);
        }
    }
    for function in &unit.top_level_functions {
        collect_function_imports(&mut imports, function);
    }
    imports.retain(|name| requires_import(name, &unit.package_name));
    imports.sort();
    imports.dedup();
    imports
}

fn collect_function_imports(imports: &mut Vec<String>, function: &KotlinFunctionDeclaration) {
    imports.extend(function.return_type.iter().cloned());
    for annotation in &function.annotations {
        imports.extend(annotation.imports());
    }
    for parameter in &function.parameters {
        imports.push(parameter.ty().to_string());
        for annotation in parameter.annotations() {
            imports.extend(annotation.imports());
        }
    }
    for statement in &function.body {
        imports.extend(statement.block().imports().iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use crate::ClassName;

    use super::*;

    #[test]
    fn test_empty_class_has_no_braces() {
        let unit = KotlinCompilationUnit::new("com.example.demo", "Marker")
            .types([KotlinTypeDeclaration::new("Marker")]);
        assert_eq!(
            KotlinSourceCodeWriter.render(&unit),
            "package com.example.demo\n\nclass Marker\n\n"
        );
    }

    #[test]
    fn test_supertype_uses_call_syntax() {
        let unit = KotlinCompilationUnit::new("com.example.demo", "Child").types([
            KotlinTypeDeclaration::new("Child")
                .extends("com.example.base.Parent")
                .function(KotlinFunctionDeclaration::new("run")),
        ]);
        let rendered = KotlinSourceCodeWriter.render(&unit);
        assert!(rendered.contains("class Child : Parent() {"));
        assert!(rendered.contains("import com.example.base.Parent\n"));
    }

    #[test]
    fn test_modifiers_sorted_and_public_dropped() {
        let unit = KotlinCompilationUnit::new("com.example.demo", "Service").types([
            KotlinTypeDeclaration::new("Service")
                .modifiers([KotlinModifier::Open, KotlinModifier::Public])
                .function(
                    KotlinFunctionDeclaration::new("configure")
                        .modifiers([KotlinModifier::Override, KotlinModifier::Open]),
                ),
        ]);
        let rendered = KotlinSourceCodeWriter.render(&unit);
        assert!(rendered.contains("open class Service {"));
        assert!(rendered.contains("    open override fun configure() {"));
    }

    #[test]
    fn test_property_with_getter() {
        let property = KotlinPropertyDeclaration::val("upper")
            .ty("String")
            .getter(KotlinAccessor::of(
                CodeBlock::of("name.uppercase()", &[]).unwrap(),
            ));
        let unit = KotlinCompilationUnit::new("com.example.demo", "Holder").types([
            KotlinTypeDeclaration::new("Holder")
                .property(KotlinPropertyDeclaration::val("name").ty("String"))
                .property(property),
        ]);
        let rendered = KotlinSourceCodeWriter.render(&unit);
        assert!(rendered.contains("    val upper: String\n        get() = name.uppercase()\n"));
    }

    #[test]
    fn test_var_property_with_initializer() {
        let property = KotlinPropertyDeclaration::var("count")
            .ty("Int")
            .value(CodeBlock::of("0", &[]).unwrap());
        let unit = KotlinCompilationUnit::new("com.example.demo", "Holder")
            .types([KotlinTypeDeclaration::new("Holder").property(property)]);
        assert!(KotlinSourceCodeWriter.render(&unit).contains("    var count: Int = 0\n"));
    }

    #[test]
    fn test_top_level_function_after_types() {
        let main = KotlinFunctionDeclaration::new("main")
            .parameter(crate::Parameter::new("args", "Array<String>"))
            .code(
                CodeBlock::of_statement("$T<Application>(*args)", &["com.example.platform.run".into()])
                    .unwrap(),
            );
        let unit = KotlinCompilationUnit::new("com.example.demo", "Application")
            .types([KotlinTypeDeclaration::new("Application")])
            .top_level_function(main);
        let rendered = KotlinSourceCodeWriter.render(&unit);
        let class_at = rendered.find("class Application").unwrap();
        let fun_at = rendered.find("fun main(args: Array<String>) {").unwrap();
        assert!(class_at < fun_at);
        assert!(rendered.contains("    run<Application>(*args)\n"));
        assert!(rendered.contains("import com.example.platform.run\n"));
    }

    #[test]
    fn test_annotation_class_attribute() {
        let annotation = Annotation::of(ClassName::parse("com.example.anno.Uses").unwrap())
            .attribute("value", AttributeKind::Class, ["com.example.Target"]);
        let unit = KotlinCompilationUnit::new("com.example.demo", "Annotated")
            .types([KotlinTypeDeclaration::new("Annotated").annotate(annotation)]);
        assert!(KotlinSourceCodeWriter.render(&unit).contains("@Uses(Target::class)"));
    }
}
