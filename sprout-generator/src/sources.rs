use sprout_language::{
    groovy::GroovyCompilationUnit, java::JavaCompilationUnit, kotlin::KotlinCompilationUnit,
};

use crate::Language;

/// The compilation units contributed for one request, split into the main
/// and test trees. The variant is fixed by the request's language; source
/// customizers match on it and contribute units of the matching model.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectSources {
    Java {
        main: Vec<JavaCompilationUnit>,
        test: Vec<JavaCompilationUnit>,
    },
    Kotlin {
        main: Vec<KotlinCompilationUnit>,
        test: Vec<KotlinCompilationUnit>,
    },
    Groovy {
        main: Vec<GroovyCompilationUnit>,
        test: Vec<GroovyCompilationUnit>,
    },
}

impl ProjectSources {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Java => Self::Java {
                main: Vec::new(),
                test: Vec::new(),
            },
            Language::Kotlin => Self::Kotlin {
                main: Vec::new(),
                test: Vec::new(),
            },
            Language::Groovy => Self::Groovy {
                main: Vec::new(),
                test: Vec::new(),
            },
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::Java { .. } => Language::Java,
            Self::Kotlin { .. } => Language::Kotlin,
            Self::Groovy { .. } => Language::Groovy,
        }
    }
}
