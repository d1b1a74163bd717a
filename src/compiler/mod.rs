/// JSON UI specification to Flutter/Dart compiler
///
/// Pipeline: JSON → schema model → structural validation → state inference
/// (per page) → widget emission → page/app assembly.
pub mod assemble;
pub mod convert;
pub mod emit;
pub mod error;
pub mod naming;
pub mod schema;
pub mod state;
pub mod validate;
pub mod writer;

use std::collections::BTreeSet;

use tracing::{debug, warn};

pub use error::{CompileError, ConvertError, ValidationKind, Warning, WarningKind};
pub use schema::Specification;

/// An import the generated code needs beyond `package:flutter/material.dart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Import {
    /// `DateFormat`, used by date pickers.
    Intl,
}

impl Import {
    pub fn uri(&self) -> &'static str {
        match self {
            Import::Intl => "package:intl/intl.dart",
        }
    }

    /// The pubspec dependency that provides this import.
    pub fn package(&self) -> &'static str {
        match self {
            Import::Intl => "intl",
        }
    }

    pub fn directive(&self) -> String {
        format!("import '{}';", self.uri())
    }
}

/// One generated Dart source file, relative to the Flutter project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub path: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledApp {
    pub app_name: String,
    /// `lib/main.dart` first, then one unit per page in specification order.
    pub units: Vec<CompilationUnit>,
    pub imports: BTreeSet<Import>,
    pub warnings: Vec<Warning>,
}

impl CompiledApp {
    pub fn unit(&self, path: &str) -> Option<&CompilationUnit> {
        self.units.iter().find(|unit| unit.path == path)
    }

    pub fn main_unit(&self) -> Option<&CompilationUnit> {
        self.unit("lib/main.dart")
    }

    /// Packages the generated code depends on besides the Flutter SDK.
    pub fn dependencies(&self) -> Vec<&'static str> {
        self.imports.iter().map(|import| import.package()).collect()
    }

    /// Every unit under a `// <path>` banner, in unit order.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("// {}\n", unit.path));
            out.push_str(&unit.source);
        }
        out
    }
}

/// Compile a lowered specification into Dart units.
///
/// Fails as a whole: no unit is produced for a specification with an error.
pub fn compile(spec: &Specification) -> Result<CompiledApp, CompileError> {
    validate::validate(spec)?;

    let mut imports = BTreeSet::new();
    let mut warnings = Vec::new();
    let mut pages = Vec::with_capacity(spec.pages.len());

    for page in &spec.pages {
        let state = state::infer_state(&page.widgets);
        debug!(
            page = %page.name,
            stateful = state.is_stateful(),
            variables = state.variables.len(),
            "assembling page"
        );
        warnings.extend(validate::lint_page(page));
        warnings.extend(state.warnings.iter().cloned());

        let (unit, page_imports) = assemble::page_unit(spec, page, &state)?;
        imports.extend(page_imports);
        pages.push(unit);
    }

    let mut units = Vec::with_capacity(pages.len() + 1);
    units.push(assemble::app_unit(spec, &imports));
    units.extend(pages);

    for warning in &warnings {
        warn!("{}", warning);
    }
    debug!(units = units.len(), warnings = warnings.len(), "compiled {}", spec.name);

    Ok(CompiledApp {
        app_name: naming::app_class(&spec.name),
        units,
        imports,
        warnings,
    })
}

/// Parse, lower and compile a JSON document.
pub fn compile_str(source: &str) -> Result<CompiledApp, CompileError> {
    let spec = Specification::from_json(source)?;
    compile(&spec)
}
