//! Groovy declarations and source writer.

use crate::{
    Annotation, AttributeKind, CodeBlock, FormattingOptions, Modifiers, Parameter, SourceWriter,
    format_enum_value, io::IndentingWriter, requires_import, unqualified,
};

/// Groovy classes are public by default, so the type table has no `public`.
const TYPE_MODIFIERS: [(Modifiers, &str); 5] = [
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
];

const FIELD_MODIFIERS: [(Modifiers, &str); 7] = [
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
    (Modifiers::TRANSIENT, "transient"),
    (Modifiers::VOLATILE, "volatile"),
];

const METHOD_MODIFIERS: [(Modifiers, &str); 7] = [
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
];

/// A statement in a Groovy method body; closed, matched exhaustively.
///
/// A `Return` renders the bare expression: Groovy methods return the last
/// expression, so the keyword is omitted.
#[derive(Debug, Clone, PartialEq)]
pub enum GroovyStatement {
    /// An expression on its own line.
    Expression(CodeBlock),
    /// An implicit return of the given expression.
    Return(CodeBlock),
    /// Pre-formatted code written as-is.
    Code(CodeBlock),
}

impl GroovyStatement {
    fn block(&self) -> &CodeBlock {
        match self {
            Self::Expression(block) | Self::Return(block) | Self::Code(block) => block,
        }
    }
}

/// A field of a Groovy class.
#[derive(Debug, Clone, PartialEq)]
pub struct GroovyFieldDeclaration {
    name: String,
    ty: String,
    modifiers: Modifiers,
    value: Option<String>,
    annotations: Vec<Annotation>,
}

impl GroovyFieldDeclaration {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: Modifiers::NONE,
            value: None,
            annotations: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A method of a Groovy class. Without a return type the method is `void`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroovyMethodDeclaration {
    name: String,
    modifiers: Modifiers,
    return_type: Option<String>,
    parameters: Vec<Parameter>,
    annotations: Vec<Annotation>,
    body: Vec<GroovyStatement>,
}

impl GroovyMethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::NONE,
            return_type: None,
            parameters: Vec::new(),
            annotations: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
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

    pub fn statement(mut self, statement: GroovyStatement) -> Self {
        self.body.push(statement);
        self
    }

    /// Append pre-formatted code to the body.
    pub fn code(self, block: CodeBlock) -> Self {
        self.statement(GroovyStatement::Code(block))
    }
}

/// A Groovy class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct GroovyTypeDeclaration {
    name: String,
    modifiers: Modifiers,
    extends: Option<String>,
    annotations: Vec<Annotation>,
    fields: Vec<GroovyFieldDeclaration>,
    methods: Vec<GroovyMethodDeclaration>,
}

impl GroovyTypeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::NONE,
            extends: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
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

    pub fn field(mut self, field: GroovyFieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: GroovyMethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// One Groovy source file.
#[derive(Debug, Clone, PartialEq)]
pub struct GroovyCompilationUnit {
    package_name: String,
    name: String,
    types: Vec<GroovyTypeDeclaration>,
}

impl GroovyCompilationUnit {
    pub fn new(package_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn types(mut self, types: impl IntoIterator<Item = GroovyTypeDeclaration>) -> Self {
        self.types.extend(types);
        self
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Renders [`GroovyCompilationUnit`]s as Groovy source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroovySourceCodeWriter;

impl SourceWriter for GroovySourceCodeWriter {
    type Unit = GroovyCompilationUnit;

    fn extension(&self) -> &'static str {
        "groovy"
    }

    fn render(&self, unit: &GroovyCompilationUnit) -> String {
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
        writer.finish()
    }
}

fn write_type(writer: &mut IndentingWriter, declaration: &GroovyTypeDeclaration) {
    write_annotations(writer, &declaration.annotations);
    write_modifiers(writer, &TYPE_MODIFIERS, declaration.modifiers);
    writer.print(&format!("class {}", declaration.name));
    if let Some(supertype) = &declaration.extends {
        writer.print(&format!(" extends {}", unqualified(supertype)));
    }
    writer.println(" {");
    writer.newline();
    writer.indented(|writer| {
        for field in &declaration.fields {
            write_field(writer, field);
        }
        for method in &declaration.methods {
            write_method(writer, method);
        }
    });
    writer.println("}");
}

fn write_field(writer: &mut IndentingWriter, field: &GroovyFieldDeclaration) {
    write_annotations(writer, &field.annotations);
    write_modifiers(writer, &FIELD_MODIFIERS, field.modifiers);
    writer.print(&format!("{} {}", unqualified(&field.ty), field.name));
    if let Some(value) = &field.value {
        writer.print(&format!(" = {value}"));
    }
    writer.newline();
    writer.newline();
}

fn write_method(writer: &mut IndentingWriter, method: &GroovyMethodDeclaration) {
    write_annotations(writer, &method.annotations);
    write_modifiers(writer, &METHOD_MODIFIERS, method.modifiers);
    let return_type = method.return_type.as_deref().map_or("void", unqualified);
    let parameters: Vec<String> = method
        .parameters
        .iter()
        .map(|parameter| format!("{} {}", unqualified(parameter.ty()), parameter.name()))
        .collect();
    writer.println(&format!(
        "{return_type} {}({}) {{",
        method.name,
        parameters.join(", ")
    ));
    writer.indented(|writer| {
        for statement in &method.body {
            match statement {
                GroovyStatement::Expression(expression) | GroovyStatement::Return(expression) => {
                    expression.write(writer, FormattingOptions::GROOVY);
                    writer.newline();
                }
                GroovyStatement::Code(block) => block.write(writer, FormattingOptions::GROOVY),
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

fn write_modifiers(
    writer: &mut IndentingWriter,
    table: &[(Modifiers, &str)],
    declared: Modifiers,
) {
    let keywords: Vec<&str> = table
        .iter()
        .filter(|(flag, _)| declared.contains(*flag))
        .map(|(_, keyword)| *keyword)
        .collect();
    if !keywords.is_empty() {
        writer.print(&keywords.join(" "));
        writer.print(" ");
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
            // A bare class reference is a class literal in Groovy.
            AttributeKind::Class => unqualified(value).to_string(),
            AttributeKind::Enum => format_enum_value(value),
            AttributeKind::Literal => value.clone(),
        })
        .collect();
    if formatted.len() > 1 {
        format!("[ {} ]", formatted.join(", "))
    } else {
        formatted.join(", ")
    }
}

fn determine_imports(unit: &GroovyCompilationUnit) -> Vec<String> {
    let mut imports: Vec<String> = Vec::new();
    for declaration in &unit.types {
        imports.extend(declaration.extends.iter().cloned());
        for annotation in &declaration.annotations {
            imports.extend(annotation.imports());
        }
        for field in &declaration.fields {
            imports.push(field.ty.clone());
            for annotation in &field.annotations {
                imports.extend(annotation.imports());
            }
        }
        for method in &declaration.methods {
            imports.extend(method.return_type.iter().cloned());
            for annotation in &method.annotations {
                imports.extend(annotation.imports());
            }
            for parameter in &method.parameters {
                imports.push(parameter.ty().to_string());
                for annotation in parameter.annotations() {
                    imports.extend(annotation.imports());
                }
            }
            for statement in &method.body {
                imports.extend(statement.block().imports().iter().cloned());
            }
        }
    }
    imports.retain(|name| requires_import(name, &unit.package_name));
    imports.sort();
    imports.dedup();
    imports
}

#[cfg(test)]
mod tests {
    use crate::ClassName;

    use super::*;

    #[test]
    fn test_type_modifier_table_omits_public() {
        let unit = GroovyCompilationUnit::new("com.example.demo", "Open").types([
            GroovyTypeDeclaration::new("Open").modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        ]);
        let rendered = GroovySourceCodeWriter.render(&unit);
        assert!(rendered.contains("final class Open {"));
        assert!(!rendered.contains("public final"));
    }

    #[test]
    fn test_no_statement_terminators() {
        let method = GroovyMethodDeclaration::new("describe")
            .returns("String")
            .statement(GroovyStatement::Return(
                CodeBlock::of("$S", &["done".into()]).unwrap(),
            ));
        let unit = GroovyCompilationUnit::new("com.example.demo", "Runner").types([
            GroovyTypeDeclaration::new("Runner")
                .field(GroovyFieldDeclaration::new("name", "String").value("'demo'"))
                .method(method),
        ]);
        let rendered = GroovySourceCodeWriter.render(&unit);
        assert!(rendered.contains("    String name = 'demo'\n"));
        // The return keyword is implicit.
        assert!(rendered.contains("    String describe() {\n        \"done\"\n    }\n"));
        assert!(!rendered.contains(';'));
    }

    #[test]
    fn test_extends_clause() {
        let unit = GroovyCompilationUnit::new("com.example.demo", "Child").types([
            GroovyTypeDeclaration::new("Child").extends("com.example.base.Parent"),
        ]);
        let rendered = GroovySourceCodeWriter.render(&unit);
        assert!(rendered.contains("class Child extends Parent {"));
        assert!(rendered.contains("import com.example.base.Parent\n"));
    }

    #[test]
    fn test_annotation_values() {
        let annotation = Annotation::of(ClassName::parse("com.example.anno.Uses").unwrap())
            .attribute("value", AttributeKind::Class, [
                "com.example.First",
                "com.example.Second",
            ]);
        let unit = GroovyCompilationUnit::new("com.example.demo", "Annotated")
            .types([GroovyTypeDeclaration::new("Annotated").annotate(annotation)]);
        let rendered = GroovySourceCodeWriter.render(&unit);
        assert!(rendered.contains("@Uses([ First, Second ])"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(GroovySourceCodeWriter.extension(), "groovy");
    }
}
