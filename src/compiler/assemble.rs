//! Page and application compilation units.

use std::collections::BTreeSet;

use crate::compiler::convert::{dart_string, edge_insets, Dimension, EdgeSpec};
use crate::compiler::emit::emit;
use crate::compiler::error::CompileError;
use crate::compiler::naming::{app_class, page_class, page_file};
use crate::compiler::schema::{AppBarSpec, BottomNavSpec, FabSpec, Page, Specification};
use crate::compiler::state::PageState;
use crate::compiler::validate::route_class;
use crate::compiler::writer::SourceWriter;
use crate::compiler::{CompilationUnit, Import};

const MATERIAL_IMPORT: &str = "import 'package:flutter/material.dart';";
const DEFAULT_PAGE_PADDING: EdgeSpec = EdgeSpec::All(16.0);

/// `lib/pages/<snake>_page.dart` for one page, plus the imports it needed.
///
/// Fails with [`CompileError::RouteNotFound`] when the page has a bottom
/// navigation bar but no route of its own to highlight.
pub fn page_unit(
    spec: &Specification,
    page: &Page,
    state: &PageState,
) -> Result<(CompilationUnit, BTreeSet<Import>), CompileError> {
    let class = page_class(&page.name);
    let mut imports = BTreeSet::new();

    let mut w = SourceWriter::new();
    if state.is_stateful() {
        w.open(format!("class {} extends StatefulWidget {{", class));
        w.line(format!("const {}({{super.key}});", class));
        w.blank();
        w.line("@override");
        w.line(format!(
            "State<{}> createState() => _{}State();",
            class, class
        ));
        w.close("}");
        w.blank();
        w.open(format!("class _{}State extends State<{}> {{", class, class));
        for variable in &state.variables {
            w.line(variable.declaration());
        }
        w.blank();
    } else {
        w.open(format!("class {} extends StatelessWidget {{", class));
        w.line(format!("const {}({{super.key}});", class));
        w.blank();
    }

    w.line("@override");
    w.open("Widget build(BuildContext context) {");
    write_scaffold(&mut w, spec, page, &mut imports)?;
    w.close("}");
    w.close("}");
    let body = w.finish();

    let mut source = String::new();
    source.push_str(MATERIAL_IMPORT);
    source.push('\n');
    for import in &imports {
        source.push_str(&import.directive());
        source.push('\n');
    }
    source.push('\n');
    source.push_str(&body);

    let unit = CompilationUnit {
        path: format!("lib/{}", page_file(&class)),
        source,
    };
    Ok((unit, imports))
}

fn write_scaffold(
    w: &mut SourceWriter,
    spec: &Specification,
    page: &Page,
    imports: &mut BTreeSet<Import>,
) -> Result<(), CompileError> {
    let app_bar = page.app_bar();
    let bottom_nav = page.bottom_nav();

    w.open("return Scaffold(");
    if let Some(color) = page.background {
        w.line(format!("backgroundColor: const {},", color.literal()));
    }
    if let Some((_, bar)) = app_bar {
        write_app_bar(w, page, bar);
    }
    if let Some(fab) = &page.fab {
        write_fab(w, fab);
    }

    w.open("body: LayoutBuilder(");
    w.open("builder: (context, constraints) {");
    w.open("return SingleChildScrollView(");
    w.line(format!(
        "padding: const {},",
        edge_insets(Some(page.padding.as_ref().unwrap_or(&DEFAULT_PAGE_PADDING)))
    ));
    w.open("child: Column(");
    let consumed = [app_bar.map(|(i, _)| i), bottom_nav.map(|(i, _)| i)];
    let body: Vec<_> = page
        .widgets
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(&Some(*i)))
        .map(|(_, node)| node)
        .collect();
    if body.is_empty() {
        w.line("children: [],");
    } else {
        w.open("children: [");
        for node in body {
            let lines = emit(node, w.level(), imports);
            w.extend(lines);
        }
        w.close("],");
    }
    w.close("),");
    w.close(");");
    w.close("},");
    w.close("),");

    if let Some((index, nav)) = bottom_nav {
        write_bottom_nav(w, spec, page, &page.widgets[index].path, nav)?;
    }
    w.close(");");
    Ok(())
}

fn write_app_bar(w: &mut SourceWriter, page: &Page, bar: &AppBarSpec) {
    let title = dart_string(bar.title.as_deref().unwrap_or(&page.title));
    w.open("appBar: AppBar(");
    if let Some(color) = bar.background {
        w.line(format!("backgroundColor: const {},", color.literal()));
    }
    if let Some(height) = &bar.height {
        w.line(format!("toolbarHeight: {},", height.expr(Dimension::Height)));
    }
    match bar.text_color {
        Some(color) => w.line(format!(
            "title: Text({}, style: const TextStyle(color: {})),",
            title,
            color.literal()
        )),
        None => w.line(format!("title: Text({}),", title)),
    }
    w.close("),");
}

fn write_fab(w: &mut SourceWriter, fab: &FabSpec) {
    let on_pressed = format!(
        "onPressed: () => ScaffoldMessenger.of(context).showSnackBar(const SnackBar(content: Text({}))),",
        dart_string(&fab.action)
    );
    if fab.show_label {
        w.open("floatingActionButton: FloatingActionButton.extended(");
        w.line(on_pressed);
        w.line(format!("icon: const Icon(Icons.{}),", fab.icon));
        w.line(format!("label: Text({}),", dart_string(&fab.label)));
    } else {
        w.open("floatingActionButton: FloatingActionButton(");
        w.line(on_pressed);
        w.line(format!("child: const Icon(Icons.{}),", fab.icon));
    }
    w.close("),");
    w.line(format!("floatingActionButtonLocation: {},", fab.position.dart()));
}

fn write_bottom_nav(
    w: &mut SourceWriter,
    spec: &Specification,
    page: &Page,
    path: &str,
    nav: &BottomNavSpec,
) -> Result<(), CompileError> {
    let own = format!("/{}", page.name);
    let current = spec
        .routes
        .iter()
        .position(|r| *r == own)
        .ok_or_else(|| CompileError::RouteNotFound {
            path: path.to_string(),
            route: own.clone(),
        })?;

    w.open("bottomNavigationBar: BottomNavigationBar(");
    w.line(format!("currentIndex: {},", current));
    if let Some(color) = nav.selected_color {
        w.line(format!("selectedItemColor: const {},", color.literal()));
    }
    if let Some(color) = nav.unselected_color {
        w.line(format!("unselectedItemColor: const {},", color.literal()));
    }
    let targets: Vec<String> = nav.items.iter().map(|item| dart_string(&item.route)).collect();
    w.open("onTap: (index) {");
    w.line(format!("const targets = [{}];", targets.join(", ")));
    w.line("Navigator.pushReplacementNamed(context, targets[index]);");
    w.close("},");
    w.open("items: const [");
    for item in &nav.items {
        w.line(format!(
            "BottomNavigationBarItem(icon: Icon(Icons.{}), label: {}),",
            item.icon,
            dart_string(&item.label)
        ));
    }
    w.close("],");
    w.close("),");
    Ok(())
}

/// `lib/main.dart`: imports, `main()` and the `MaterialApp` route table.
pub fn app_unit(spec: &Specification, imports: &BTreeSet<Import>) -> CompilationUnit {
    let app = app_class(&spec.name);
    let primary = spec.theme.primary.literal();

    let routed: Vec<(&String, String)> = spec
        .routes
        .iter()
        .filter_map(|route| route_class(route).map(|class| (route, class)))
        .collect();

    let mut w = SourceWriter::new();
    w.line(MATERIAL_IMPORT);
    for import in imports {
        w.line(import.directive());
    }
    w.blank();

    let mut page_imports = BTreeSet::new();
    for (_, class) in &routed {
        page_imports.insert(page_file(class));
    }
    for file in &page_imports {
        w.line(format!("import '{}';", file));
    }
    if !page_imports.is_empty() {
        w.blank();
    }

    w.line(format!("void main() => runApp(const {}());", app));
    w.blank();
    w.open(format!("class {} extends StatelessWidget {{", app));
    w.line(format!("const {}({{super.key}});", app));
    w.blank();
    w.line("@override");
    w.open("Widget build(BuildContext context) {");
    w.open("return MaterialApp(");
    w.line(format!("title: {},", dart_string(&spec.name)));
    w.open("theme: ThemeData(");
    w.line(format!("primaryColor: const {},", primary));
    w.line(format!(
        "colorScheme: ColorScheme.fromSeed(seedColor: const {}),",
        primary
    ));
    w.close("),");
    if let Some(initial) = spec.routes.first() {
        w.line(format!("initialRoute: {},", dart_string(initial)));
    }
    w.open("routes: {");
    for (route, class) in &routed {
        w.line(format!("{}: (context) => const {}(),", dart_string(route), class));
    }
    w.close("},");
    w.close(");");
    w.close("}");
    w.close("}");

    CompilationUnit {
        path: "lib/main.dart".to_string(),
        source: w.finish(),
    }
}
