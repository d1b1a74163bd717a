//! Whole-specification checks that run before anything is emitted.

use std::collections::HashMap;

use crate::compiler::error::{CompileError, Warning, WarningKind};
use crate::compiler::naming::page_class;
use crate::compiler::schema::{Page, Specification, Widget, WidgetNode};

/// Check routes, page identity and navigation targets.
///
/// A bottom navigation bar highlights the item at the index of its page's own
/// route in `routes`, so that route must exist and index into the items.
pub fn validate(spec: &Specification) -> Result<(), CompileError> {
    let mut classes: HashMap<String, usize> = HashMap::new();
    for (i, page) in spec.pages.iter().enumerate() {
        let class = page_class(&page.name);
        if class.is_empty() {
            return Err(CompileError::structure(
                format!("{}.name", page.path),
                format!("page name \"{}\" has no usable characters", page.name),
            ));
        }
        if let Some(first) = classes.insert(class.clone(), i) {
            return Err(CompileError::structure(
                format!("{}.name", page.path),
                format!("page class {} is already defined by pages[{}]", class, first),
            ));
        }
    }

    if spec.routes.is_empty() {
        return Err(CompileError::structure("routes", "at least one route is required"));
    }
    for (i, route) in spec.routes.iter().enumerate() {
        let path = format!("routes[{}]", i);
        let class = route_class(route).ok_or_else(|| {
            CompileError::structure(
                path.clone(),
                format!("route \"{}\" must look like \"/<page name>\"", route),
            )
        })?;
        if spec.routes[..i].contains(route) {
            return Err(CompileError::structure(
                path,
                format!("route \"{}\" is declared twice", route),
            ));
        }
        if !classes.contains_key(&class) {
            return Err(CompileError::structure(
                path,
                format!("route \"{}\" has no matching page ({})", route, class),
            ));
        }
    }

    for page in &spec.pages {
        if let Some((index, nav)) = page.bottom_nav() {
            let node_path = &page.widgets[index].path;
            let own = format!("/{}", page.name);
            let current = match spec.routes.iter().position(|r| *r == own) {
                Some(current) => current,
                None => {
                    return Err(CompileError::RouteNotFound {
                        path: node_path.clone(),
                        route: own,
                    })
                }
            };
            if current >= nav.items.len() {
                return Err(CompileError::structure(
                    format!("{}.items", node_path),
                    format!(
                        "route \"{}\" is routes[{}] but the bar only has {} items",
                        own,
                        current,
                        nav.items.len()
                    ),
                ));
            }
            for (i, item) in nav.items.iter().enumerate() {
                if !spec.routes.contains(&item.route) {
                    return Err(CompileError::RouteNotFound {
                        path: format!("{}.items[{}].route", node_path, i),
                        route: item.route.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Page class a route resolves to: `/user_profile` → `UserProfilePage`.
pub fn route_class(route: &str) -> Option<String> {
    let name = route.strip_prefix('/')?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    let class = page_class(name);
    if class.is_empty() {
        None
    } else {
        Some(class)
    }
}

/// Non-fatal findings for one page: placeholders for unsupported widget types
/// and bars that did not land in their Scaffold slot.
pub fn lint_page(page: &Page) -> Vec<Warning> {
    let app_bar = page.app_bar().map(|(i, _)| i);
    let bottom_nav = page.bottom_nav().map(|(i, _)| i);

    let mut warnings = Vec::new();
    for (i, node) in page.widgets.iter().enumerate() {
        if Some(i) == app_bar || Some(i) == bottom_nav {
            continue;
        }
        lint_node(node, &mut warnings);
    }
    warnings
}

fn lint_node(node: &WidgetNode, warnings: &mut Vec<Warning>) {
    let kind = match &node.widget {
        Widget::Unknown { type_name } => Some(WarningKind::UnsupportedWidgetType(type_name.clone())),
        Widget::AppBar(_) | Widget::BottomNavigationBar(_) => {
            Some(WarningKind::IgnoredSlot(node.widget.type_name().to_string()))
        }
        _ => None,
    };
    if let Some(kind) = kind {
        warnings.push(Warning {
            path: node.path.clone(),
            kind,
        });
    }
    for child in node.widget.children() {
        lint_node(child, warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> Specification {
        Specification::from_value(&value).unwrap()
    }

    fn two_pages(routes: serde_json::Value, home_widgets: serde_json::Value) -> Specification {
        spec(json!({
            "name": "Demo",
            "theme": { "primary": "#2196F3" },
            "routes": routes,
            "pages": [
                { "name": "home", "title": "Home", "widgets": home_widgets },
                { "name": "settings", "title": "Settings", "widgets": [] }
            ]
        }))
    }

    #[test]
    fn test_valid_specification() {
        let spec = two_pages(json!(["/home", "/settings"]), json!([]));
        assert_eq!(validate(&spec), Ok(()));
    }

    #[test]
    fn test_empty_routes() {
        let spec = two_pages(json!([]), json!([]));
        assert_eq!(validate(&spec).unwrap_err().path(), Some("routes"));
    }

    #[test]
    fn test_route_without_page() {
        let spec = two_pages(json!(["/home", "/profile"]), json!([]));
        assert_eq!(validate(&spec).unwrap_err().path(), Some("routes[1]"));
    }

    #[test]
    fn test_duplicate_route() {
        let spec = two_pages(json!(["/home", "/home"]), json!([]));
        assert_eq!(validate(&spec).unwrap_err().path(), Some("routes[1]"));
    }

    #[test]
    fn test_malformed_route() {
        let spec = two_pages(json!(["home"]), json!([]));
        assert_eq!(validate(&spec).unwrap_err().path(), Some("routes[0]"));
    }

    #[test]
    fn test_duplicate_page_class() {
        let spec = spec(json!({
            "name": "Demo",
            "theme": { "primary": "#2196F3" },
            "routes": ["/user_profile"],
            "pages": [
                { "name": "user_profile", "title": "A", "widgets": [] },
                { "name": "user profile", "title": "B", "widgets": [] }
            ]
        }));
        assert_eq!(validate(&spec).unwrap_err().path(), Some("pages[1].name"));
    }

    #[test]
    fn test_bottom_nav_needs_own_route() {
        let spec = spec(json!({
            "name": "Demo",
            "theme": { "primary": "#2196F3" },
            "routes": ["/home"],
            "pages": [
                { "name": "home", "title": "Home", "widgets": [] },
                { "name": "settings", "title": "Settings", "widgets": [
                    { "type": "bottomNavigationBar", "items": [
                        { "icon": "home", "label": "Home", "route": "/home" },
                        { "icon": "settings", "label": "Settings", "route": "/home" }
                    ] }
                ] }
            ]
        }));
        assert_eq!(
            validate(&spec),
            Err(CompileError::RouteNotFound {
                path: "pages[1].widgets[0]".to_string(),
                route: "/settings".to_string(),
            })
        );
    }

    #[test]
    fn test_bottom_nav_item_route_must_exist() {
        let spec = two_pages(
            json!(["/home", "/settings"]),
            json!([
                { "type": "bottomNavigationBar", "items": [
                    { "icon": "home", "label": "Home", "route": "/home" },
                    { "icon": "person", "label": "Profile", "route": "/profile" }
                ] }
            ]),
        );
        assert!(matches!(
            validate(&spec),
            Err(CompileError::RouteNotFound { ref route, .. }) if route == "/profile"
        ));
    }

    #[test]
    fn test_lint_reports_unknown_and_extra_bars() {
        let spec = two_pages(
            json!(["/home", "/settings"]),
            json!([
                { "type": "appBar" },
                { "type": "appBar" },
                { "type": "card", "children": [ { "type": "sparkles" } ] }
            ]),
        );
        let warnings = lint_page(&spec.pages[0]);
        assert_eq!(
            warnings,
            vec![
                Warning {
                    path: "pages[0].widgets[1]".into(),
                    kind: WarningKind::IgnoredSlot("appBar".into()),
                },
                Warning {
                    path: "pages[0].widgets[2].children[0]".into(),
                    kind: WarningKind::UnsupportedWidgetType("sparkles".into()),
                },
            ]
        );
    }
}
