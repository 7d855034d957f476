//! Golden renderings: one class with a `name: String` member and a no-arg
//! method, written in each output language.

use sprout_language::{
    Modifiers, Parameter, SourceWriter,
    groovy::{GroovyCompilationUnit, GroovyFieldDeclaration, GroovyMethodDeclaration,
        GroovySourceCodeWriter, GroovyTypeDeclaration},
    java::{JavaCompilationUnit, JavaFieldDeclaration, JavaMethodDeclaration,
        JavaSourceCodeWriter, JavaTypeDeclaration},
    kotlin::{KotlinCompilationUnit, KotlinFunctionDeclaration, KotlinPropertyDeclaration,
        KotlinSourceCodeWriter, KotlinTypeDeclaration},
};

#[test]
fn java_golden() {
    let unit = JavaCompilationUnit::new("com.example.demo", "Greeter").types([
        JavaTypeDeclaration::new("Greeter")
            .modifiers(Modifiers::PUBLIC)
            .field(JavaFieldDeclaration::new("name", "String").modifiers(Modifiers::PRIVATE))
            .method(JavaMethodDeclaration::new("greet").modifiers(Modifiers::PUBLIC)),
    ]);
    let expected = "package com.example.demo;\n\npublic class Greeter {\n\n    private String name;\n\n    public void greet() {\n    }\n\n}\n";
    assert_eq!(JavaSourceCodeWriter.render(&unit), expected);
}

#[test]
fn kotlin_golden() {
    let unit = KotlinCompilationUnit::new("com.example.demo", "Greeter").types([
        KotlinTypeDeclaration::new("Greeter")
            .property(KotlinPropertyDeclaration::val("name").ty("String"))
            .function(KotlinFunctionDeclaration::new("greet")),
    ]);
    let expected = "package com.example.demo\n\nclass Greeter {\n\n    val name: String\n\n    fun greet() {\n    }\n\n}\n";
    assert_eq!(KotlinSourceCodeWriter.render(&unit), expected);
}

#[test]
fn groovy_golden() {
    let unit = GroovyCompilationUnit::new("com.example.demo", "Greeter").types([
        GroovyTypeDeclaration::new("Greeter")
            .field(GroovyFieldDeclaration::new("name", "String").modifiers(Modifiers::PRIVATE))
            .method(GroovyMethodDeclaration::new("greet")),
    ]);
    let expected = "package com.example.demo\n\nclass Greeter {\n\n    private String name\n\n    void greet() {\n    }\n\n}\n";
    assert_eq!(GroovySourceCodeWriter.render(&unit), expected);
}

#[test]
fn java_golden_with_parameters_and_terminators() {
    let unit = JavaCompilationUnit::new("com.example.demo", "Greeter").types([
        JavaTypeDeclaration::new("Greeter")
            .modifiers(Modifiers::PUBLIC)
            .method(
                JavaMethodDeclaration::new("describe")
                    .modifiers(Modifiers::PUBLIC)
                    .returns("String")
                    .parameter(Parameter::new("subject", "String"))
                    .code(
                        sprout_language::CodeBlock::of_statement("return $S + subject", &["hello ".into()])
                            .unwrap(),
                    ),
            ),
    ]);
    let rendered = JavaSourceCodeWriter.render(&unit);
    insta::assert_snapshot!(rendered, @r###"
package com.example.demo;

public class Greeter {

    public String describe(String subject) {
        return "hello " + subject;
    }

}
"###);
}
