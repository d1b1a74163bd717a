/// End-to-end compiler behavior: scenarios and properties over whole
/// specifications.

use fluttergen::compiler::{compile_str, CompileError, CompiledApp, WarningKind};
use serde_json::{json, Value};

fn app(pages: Value, routes: Value) -> Value {
    json!({
        "name": "Demo",
        "theme": { "primary": "#2196F3" },
        "routes": routes,
        "pages": pages
    })
}

fn compile(value: &Value) -> Result<CompiledApp, CompileError> {
    compile_str(&value.to_string())
}

fn source<'a>(app: &'a CompiledApp, path: &str) -> &'a str {
    &app.unit(path)
        .unwrap_or_else(|| panic!("missing unit {}", path))
        .source
}

#[test]
fn test_minimal_stateless_page() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [ { "type": "text", "text": "Hi" } ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();

    let page = source(&app, "lib/pages/home_page.dart");
    assert!(page.contains("class HomePage extends StatelessWidget {"));
    assert!(!page.contains("StatefulWidget"));
    assert!(page.contains("Text('Hi'),"));

    let main = source(&app, "lib/main.dart");
    assert!(main.contains("'/home': (context) => const HomePage(),"));
    assert!(main.contains("import 'pages/home_page.dart';"));
}

#[test]
fn test_switch_makes_page_stateful() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [
            { "type": "switch", "label": "Dark Mode", "value": false }
        ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();

    let page = source(&app, "lib/pages/home_page.dart");
    assert!(page.contains("class HomePage extends StatefulWidget {"));
    assert!(page.contains("State<HomePage> createState() => _HomePageState();"));
    assert!(page.contains("class _HomePageState extends State<HomePage> {"));
    assert!(page.contains("  bool dark_mode = false;"));
    assert!(page.contains("SwitchListTile("));
    assert!(page.contains("value: dark_mode,"));
    assert!(page.contains("onChanged: (newValue) => setState(() => dark_mode = newValue),"));
}

#[test]
fn test_bottom_nav_without_own_route_fails() {
    let spec = app(
        json!([
            { "name": "home", "title": "Home", "widgets": [] },
            { "name": "settings", "title": "Settings", "widgets": [
                { "type": "bottomNavigationBar", "items": [
                    { "icon": "home", "label": "Home", "route": "/home" },
                    { "icon": "settings", "label": "Settings", "route": "/home" }
                ] }
            ] }
        ]),
        json!(["/home"]),
    );

    match compile(&spec) {
        Err(CompileError::RouteNotFound { path, route }) => {
            assert_eq!(path, "pages[1].widgets[0]");
            assert_eq!(route, "/settings");
        }
        other => panic!("expected RouteNotFound, got {:?}", other),
    }
}

#[test]
fn test_unknown_widget_degrades_to_placeholder() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [ { "type": "unknown_widget" } ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();

    assert!(source(&app, "lib/pages/home_page.dart").contains("Container(),"));
    assert_eq!(app.warnings.len(), 1);
    assert_eq!(app.warnings[0].path, "pages[0].widgets[0]");
    assert_eq!(
        app.warnings[0].kind,
        WarningKind::UnsupportedWidgetType("unknown_widget".to_string())
    );
}

#[test]
fn test_initial_route_is_first_route() {
    let spec = app(
        json!([
            { "name": "home", "title": "Home", "widgets": [] },
            { "name": "login", "title": "Login", "widgets": [] }
        ]),
        json!(["/login", "/home"]),
    );
    let app = compile(&spec).unwrap();

    assert!(source(&app, "lib/main.dart").contains("initialRoute: '/login',"));
}

#[test]
fn test_units_are_main_then_pages_in_order() {
    let spec = app(
        json!([
            { "name": "settings", "title": "Settings", "widgets": [] },
            { "name": "home", "title": "Home", "widgets": [] },
            { "name": "user_profile", "title": "Me", "widgets": [] }
        ]),
        json!(["/home", "/settings", "/user_profile"]),
    );
    let app = compile(&spec).unwrap();

    let paths: Vec<_> = app.units.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "lib/main.dart",
            "lib/pages/settings_page.dart",
            "lib/pages/home_page.dart",
            "lib/pages/user_profile_page.dart",
        ]
    );
}

#[test]
fn test_statefulness_follows_nested_interactive_widgets() {
    let interactive = [
        json!({ "type": "switch", "label": "A" }),
        json!({ "type": "checkbox", "label": "A" }),
        json!({ "type": "slider" }),
        json!({ "type": "radioGroup", "label": "A", "options": ["x", "y"] }),
        json!({ "type": "dropdown", "label": "A", "items": ["x", "y"] }),
        json!({ "type": "datePicker" }),
    ];
    for widget in interactive {
        let nested = json!([{ "type": "card", "children": [
            { "type": "row", "children": [ widget.clone() ] }
        ] }]);
        let spec = app(
            json!([{ "name": "home", "title": "Home", "widgets": nested }]),
            json!(["/home"]),
        );
        let app = compile(&spec).unwrap();
        assert!(
            source(&app, "lib/pages/home_page.dart").contains("extends StatefulWidget"),
            "{} should make the page stateful",
            widget
        );
    }

    let passive = json!([
        { "type": "text", "text": "t" },
        { "type": "button", "label": "Go" },
        { "type": "textField", "label": "Name" },
        { "type": "listTile", "title": "Row", "check": true },
        { "type": "progressIndicator", "value": 30 }
    ]);
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": passive }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();
    assert!(source(&app, "lib/pages/home_page.dart").contains("extends StatelessWidget"));
}

#[test]
fn test_compilation_is_deterministic() {
    let spec = app(
        json!([{ "name": "home", "title": "Home",
            "fab": { "icon": "add", "label": "New", "showLabel": true, "action": "Added" },
            "widgets": [
                { "type": "appBar", "backgroundColor": "#112233" },
                { "type": "dropdown", "label": "Size", "items": ["S", "M", "L"], "value": "M" },
                { "type": "datePicker" },
                { "type": "container", "width": "50%", "padding": "8px 4px", "children": [
                    { "type": "image", "src": "https://example.com/a.png", "height": "20px" }
                ] },
                { "type": "dataTable", "table": { "columns": ["A", "B"], "rows": [["1", 2]] } }
            ] }]),
        json!(["/home"]),
    );
    let first = compile(&spec).unwrap();
    let second = compile(&spec).unwrap();

    assert_eq!(first.listing(), second.listing());
    assert_eq!(first, second);
}

#[test]
fn test_relative_sizes_reference_layout_constraints() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [
            { "type": "container", "width": "50%", "height": "20px" }
        ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();
    let page = source(&app, "lib/pages/home_page.dart");

    assert!(page.contains("builder: (context, constraints) {"));
    assert!(page.contains("width: constraints.maxWidth * 0.5,"));
    assert!(page.contains("height: 20,"));
}

#[test]
fn test_errors_abort_without_output() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [
            { "type": "text", "text": "ok" },
            { "type": "row", "mainAxisAlignment": "middle", "children": [] }
        ] }]),
        json!(["/home"]),
    );

    match compile(&spec) {
        Err(CompileError::UnknownEnumValue { path, value, .. }) => {
            assert_eq!(path, "pages[0].widgets[1].mainAxisAlignment");
            assert_eq!(value, "middle");
        }
        other => panic!("expected UnknownEnumValue, got {:?}", other),
    }
}

#[test]
fn test_state_collision_is_reported() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [
            { "type": "switch", "label": "Notify", "value": false },
            { "type": "checkbox", "label": "notify", "value": true }
        ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();
    let page = source(&app, "lib/pages/home_page.dart");

    assert_eq!(page.matches("bool notify").count(), 1);
    assert!(page.contains("bool notify = true;"));
    assert_eq!(
        app.warnings[0].kind,
        WarningKind::StateCollision("notify".to_string())
    );
}

#[test]
fn test_extra_app_bar_is_ignored_with_warning() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [
            { "type": "appBar", "title": "First" },
            { "type": "column", "children": [ { "type": "appBar", "title": "Nested" } ] }
        ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();
    let page = source(&app, "lib/pages/home_page.dart");

    assert!(page.contains("title: Text('First'),"));
    assert!(!page.contains("Nested"));
    assert_eq!(
        app.warnings[0].kind,
        WarningKind::IgnoredSlot("appBar".to_string())
    );
}

#[test]
fn test_labels_matching_state_members_and_types_are_suffixed() {
    let spec = app(
        json!([{ "name": "home", "title": "Home", "widgets": [
            { "type": "switch", "label": "Activate", "value": false },
            { "type": "checkbox", "label": "Build", "value": false },
            { "type": "dropdown", "label": "Double", "items": ["S", "M"] },
            { "type": "slider", "value": 3, "min": 1, "max": 5 }
        ] }]),
        json!(["/home"]),
    );
    let app = compile(&spec).unwrap();
    let page = source(&app, "lib/pages/home_page.dart");

    assert!(page.contains("  bool activate_value = false;"));
    assert!(page.contains("  bool build_value = false;"));
    assert!(page.contains("  String double_value = '';"));
    assert!(page.contains("  double sliderValue = 3;"));
    assert!(!page.contains("bool build ="));
    assert!(!page.contains("String double ="));
    assert_eq!(page.matches(" build(").count(), 1);
    assert!(app.warnings.is_empty());
}

#[test]
fn test_not_json() {
    assert!(matches!(compile_str("not json"), Err(CompileError::Json(_))));
}
