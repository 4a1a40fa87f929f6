use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub display_name: &'static str,
    pub value: &'static str,
}

const fn language(display_name: &'static str, value: &'static str) -> Language {
    Language {
        display_name,
        value,
    }
}

/// Languages offered by the dashboard selector.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    language("JavaScript", "javascript"),
    language("Python", "python"),
    language("TypeScript", "typescript"),
    language("Java", "java"),
    language("C#", "c#"),
    language("C++", "c++"),
    language("C", "c"),
    language("PHP", "php"),
    language("Go", "go"),
    language("Rust", "rust"),
    language("Ruby", "ruby"),
    language("Swift", "swift"),
    language("Kotlin", "kotlin"),
    language("Scala", "scala"),
    language("Dart", "dart"),
    language("R", "r"),
    language("MATLAB", "matlab"),
    language("Objective-C", "objective-c"),
    language("Shell", "shell"),
    language("PowerShell", "powershell"),
    language("Perl", "perl"),
    language("Lua", "lua"),
    language("Haskell", "haskell"),
    language("Clojure", "clojure"),
    language("Elixir", "elixir"),
];

pub const DEFAULT_LANGUAGES: [&str; 2] = ["python", "typescript"];

pub fn find(value: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|language| language.value == value)
}

/// Human name for a language key; unknown keys are shown as-is.
pub fn display_name(value: &str) -> &str {
    find(value).map_or(value, |language| language.display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_display_names() {
        assert_eq!(display_name("c#"), "C#");
        assert_eq!(display_name("objective-c"), "Objective-C");
        assert_eq!(display_name("zig"), "zig");
    }

    #[test]
    fn catalog_values_are_unique() {
        let mut values: Vec<_> = SUPPORTED_LANGUAGES.iter().map(|l| l.value).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), SUPPORTED_LANGUAGES.len());
        assert!(DEFAULT_LANGUAGES.iter().all(|value| find(value).is_some()));
    }
}
