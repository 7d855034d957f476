//! The import list contains exactly the referenced external types, sorted,
//! with same-package and `java.lang` names filtered out.

use sprout_language::{
    Annotation, AttributeKind, ClassName, CodeBlock, Modifiers, SourceWriter,
    java::{JavaCompilationUnit, JavaFieldDeclaration, JavaMethodDeclaration,
        JavaSourceCodeWriter, JavaTypeDeclaration},
};

fn import_lines(rendered: &str) -> Vec<&str> {
    rendered
        .lines()
        .filter(|line| line.starts_with("import "))
        .collect()
}

#[test]
fn import_set_is_exact_and_sorted() {
    let annotation = Annotation::of(ClassName::parse("com.example.anno.NotNull").unwrap());
    let code = CodeBlock::of_statement(
        "$T.prepare($T.defaults())",
        &["com.example.util.Helper".into(), "com.example.api.Result".into()],
    )
    .unwrap();
    let unit = JavaCompilationUnit::new("com.example.demo", "Exact").types([
        JavaTypeDeclaration::new("Exact")
            .modifiers(Modifiers::PUBLIC)
            .field(
                JavaFieldDeclaration::new("names", "java.util.List")
                    .modifiers(Modifiers::PRIVATE)
                    .annotate(annotation),
            )
            .method(JavaMethodDeclaration::new("run").modifiers(Modifiers::PUBLIC).code(code)),
    ]);
    let rendered = JavaSourceCodeWriter.render(&unit);
    assert_eq!(
        import_lines(&rendered),
        [
            "import com.example.anno.NotNull;",
            "import com.example.api.Result;",
            "import com.example.util.Helper;",
            "import java.util.List;",
        ]
    );
}

#[test]
fn same_package_java_lang_and_enum_references_filter_correctly() {
    let mode = Annotation::of(ClassName::parse("com.example.anno.Mode").unwrap()).attribute(
        "value",
        AttributeKind::Enum,
        ["com.example.anno.Color.RED"],
    );
    let unit = JavaCompilationUnit::new("com.example.demo", "Filtered").types([
        JavaTypeDeclaration::new("Filtered")
            .modifiers(Modifiers::PUBLIC)
            .annotate(mode)
            .field(JavaFieldDeclaration::new("name", "java.lang.String"))
            .field(JavaFieldDeclaration::new("peer", "com.example.demo.Peer")),
    ]);
    let rendered = JavaSourceCodeWriter.render(&unit);
    assert_eq!(
        import_lines(&rendered),
        [
            "import com.example.anno.Color;",
            "import com.example.anno.Mode;",
        ]
    );
    assert!(rendered.contains("@Mode(Color.RED)"));
}
