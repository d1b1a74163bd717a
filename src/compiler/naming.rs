//! Dart identifier derivation for classes, files and state variables.

const DART_RESERVED: &[&str] = &[
    "abstract", "as", "assert", "async", "await", "break", "case", "catch", "class", "const",
    "continue", "covariant", "default", "deferred", "do", "dynamic", "else", "enum", "export",
    "extends", "extension", "external", "factory", "false", "final", "finally", "for",
    "function", "get", "hide", "if", "implements", "import", "in", "interface", "is", "late",
    "library", "mixin", "new", "null", "on", "operator", "part", "required", "rethrow",
    "return", "set", "show", "static", "super", "switch", "sync", "this", "throw", "true",
    "try", "typedef", "var", "void", "while", "with", "yield",
];

/// Names already bound inside a generated page's `build` method.
const SCOPE_RESERVED: &[&str] = &["context", "constraints", "widget", "mounted", "key"];

/// Inherited `State` members and core type names a field would clash with or shadow.
const MEMBER_RESERVED: &[&str] = &[
    "build", "activate", "deactivate", "dispose", "reassemble", "bool", "double", "int", "num",
];

/// `home` → `Home`, `user_profile` → `UserProfile`, `my page` → `MyPage`.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `UserProfilePage` → `user_profile_page`
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Class name of the page reached through `name` (a page name or a route
/// without its leading slash). Empty when the name has no usable characters.
pub fn page_class(name: &str) -> String {
    let base = pascal_case(name);
    if base.is_empty() {
        return base;
    }
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        format!("P{}Page", base)
    } else {
        format!("{}Page", base)
    }
}

/// `lib/pages/<snake>.dart` for a page class.
pub fn page_file(class_name: &str) -> String {
    format!("pages/{}.dart", snake_case(class_name))
}

/// Application widget class: spaces and punctuation dropped, `App` suffix added
/// unless the name already ends in "app".
pub fn app_class(name: &str) -> String {
    let mut raw: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if raw.is_empty() {
        return "GeneratedApp".to_string();
    }
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        raw.insert(0, 'A');
    }
    let mut chars = raw.chars();
    let mut class = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    if !class.to_ascii_lowercase().ends_with("app") {
        class.push_str("App");
    }
    class
}

/// State variable name derived from an interactive widget's label:
/// lower-cased with spaces (and anything else outside `[a-z0-9_]`) turned into
/// underscores.
pub fn state_name(label: &str) -> String {
    let mut name: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "v_");
    }
    if [DART_RESERVED, SCOPE_RESERVED, MEMBER_RESERVED]
        .iter()
        .any(|list| list.contains(&name.as_str()))
    {
        name.push_str("_value");
    }
    name
}

/// Dart package name (pubspec `name:`) derived from a free-form app name.
pub fn package_name(name: &str) -> String {
    let mut out = String::new();
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    let out = out.trim_end_matches('_').to_string();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        format!("app_{}", out).trim_end_matches('_').to_string()
    } else {
        out
    }
}
