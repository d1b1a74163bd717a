//! In-memory model of a UI specification.
//!
//! The model is lowered from a `serde_json::Value` by hand rather than through
//! `#[derive(Deserialize)]` so that every failure can name the exact JSON path
//! it came from (`pages[1].widgets[0].label`). Unknown fields are ignored.

use serde_json::{Map, Value};

use crate::compiler::convert::{
    BoxAlign, Color, CrossAxis, EdgeSpec, FabPosition, MainAxis, Size,
};
use crate::compiler::error::{CompileError, ConvertError, ValidationKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    pub name: String,
    pub theme: Theme,
    pub routes: Vec<String>,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub name: String,
    pub title: String,
    pub background: Option<Color>,
    pub padding: Option<EdgeSpec>,
    pub fab: Option<FabSpec>,
    pub widgets: Vec<WidgetNode>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FabSpec {
    pub icon: String,
    pub label: String,
    pub action: String,
    pub show_label: bool,
    pub position: FabPosition,
}

/// One node of a page's widget tree, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetNode {
    pub path: String,
    pub widget: Widget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Text(TextSpec),
    Heading(TextSpec),
    Icon { name: String },
    Image { src: String, width: Option<Size>, height: Option<Size> },
    Button { label: String, background: Option<Color> },
    TextField { label: Option<String>, placeholder: Option<String> },
    Checkbox(ToggleSpec),
    Switch(ToggleSpec),
    Slider(SliderSpec),
    RadioGroup(ChoiceSpec),
    Dropdown(ChoiceSpec),
    DatePicker { placeholder: String },
    CircleAvatar { radius: f64, src: Option<String> },
    Chip { text: String },
    ListView { height: Option<Size>, children: Vec<WidgetNode> },
    ListTile(ListTileSpec),
    Card { background: Option<Color>, children: Vec<WidgetNode> },
    Stack { background: Option<Color>, height: Option<Size>, children: Vec<WidgetNode> },
    Row(FlexSpec),
    Column(FlexSpec),
    Container(ContainerSpec),
    DataTable(TableSpec),
    AlertDialog(DialogSpec),
    ProgressIndicator { value: Option<f64> },
    AppBar(AppBarSpec),
    BottomNavigationBar(BottomNavSpec),
    Unknown { type_name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub font_size: Option<f64>,
    pub bold: bool,
    pub color: Option<Color>,
    pub align: Option<BoxAlign>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleSpec {
    pub label: String,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Shared by radio groups (`options`) and dropdowns (`items`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSpec {
    pub label: String,
    pub options: Vec<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListTileSpec {
    pub title: String,
    pub subtitle: Option<String>,
    pub icon: Option<TileIcon>,
    pub check: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileIcon {
    pub name: String,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlexSpec {
    pub main_axis: Option<MainAxis>,
    pub cross_axis: Option<CrossAxis>,
    pub children: Vec<WidgetNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub width: Option<Size>,
    pub height: Option<Size>,
    pub background: Option<Color>,
    pub alignment: Option<BoxAlign>,
    pub padding: Option<EdgeSpec>,
    pub main_axis: Option<MainAxis>,
    pub cross_axis: Option<CrossAxis>,
    pub children: Vec<WidgetNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogSpec {
    pub trigger: String,
    pub title: String,
    pub content: String,
    pub cancel: String,
    pub confirm: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppBarSpec {
    pub title: Option<String>,
    pub background: Option<Color>,
    pub text_color: Option<Color>,
    pub height: Option<Size>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BottomNavSpec {
    pub items: Vec<NavItem>,
    pub selected_color: Option<Color>,
    pub unselected_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub icon: String,
    pub label: String,
    pub route: String,
}

impl Widget {
    /// The JSON `type` tag this variant is written as.
    pub fn type_name(&self) -> &str {
        match self {
            Widget::Text(_) => "text",
            Widget::Heading(_) => "heading",
            Widget::Icon { .. } => "icon",
            Widget::Image { .. } => "image",
            Widget::Button { .. } => "button",
            Widget::TextField { .. } => "textField",
            Widget::Checkbox(_) => "checkbox",
            Widget::Switch(_) => "switch",
            Widget::Slider(_) => "slider",
            Widget::RadioGroup(_) => "radioGroup",
            Widget::Dropdown(_) => "dropdown",
            Widget::DatePicker { .. } => "datePicker",
            Widget::CircleAvatar { .. } => "circleAvatar",
            Widget::Chip { .. } => "chip",
            Widget::ListView { .. } => "listView",
            Widget::ListTile(_) => "listTile",
            Widget::Card { .. } => "card",
            Widget::Stack { .. } => "stack",
            Widget::Row(_) => "row",
            Widget::Column(_) => "column",
            Widget::Container(_) => "container",
            Widget::DataTable(_) => "dataTable",
            Widget::AlertDialog(_) => "alertDialog",
            Widget::ProgressIndicator { .. } => "progressIndicator",
            Widget::AppBar(_) => "appBar",
            Widget::BottomNavigationBar(_) => "bottomNavigationBar",
            Widget::Unknown { type_name } => type_name,
        }
    }

    /// Children of container-like variants; empty for leaves.
    pub fn children(&self) -> &[WidgetNode] {
        match self {
            Widget::ListView { children, .. }
            | Widget::Card { children, .. }
            | Widget::Stack { children, .. } => children,
            Widget::Row(flex) | Widget::Column(flex) => &flex.children,
            Widget::Container(container) => &container.children,
            _ => &[],
        }
    }
}

impl Page {
    /// The first top-level appBar; it fills the Scaffold's `appBar` slot.
    pub fn app_bar(&self) -> Option<(usize, &AppBarSpec)> {
        self.widgets.iter().enumerate().find_map(|(i, node)| match &node.widget {
            Widget::AppBar(bar) => Some((i, bar)),
            _ => None,
        })
    }

    /// The first top-level bottomNavigationBar; it fills the Scaffold's
    /// `bottomNavigationBar` slot.
    pub fn bottom_nav(&self) -> Option<(usize, &BottomNavSpec)> {
        self.widgets.iter().enumerate().find_map(|(i, node)| match &node.widget {
            Widget::BottomNavigationBar(nav) => Some((i, nav)),
            _ => None,
        })
    }
}

impl Specification {
    pub fn from_json(source: &str) -> Result<Self, CompileError> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| CompileError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, CompileError> {
        let root = Obj::new(value, "")?;

        let name = root.req_text("name")?;
        let theme = root.req_obj("theme")?;
        let theme = Theme {
            primary: theme.req_color("primary")?,
        };
        let routes = root.req_text_list("routes")?;

        let mut pages = Vec::new();
        for (i, page) in root.req_array("pages")?.iter().enumerate() {
            pages.push(lower_page(page, format!("pages[{}]", i))?);
        }

        Ok(Specification {
            name,
            theme,
            routes,
            pages,
        })
    }
}

fn lower_page(value: &Value, path: String) -> Result<Page, CompileError> {
    let page = Obj::new(value, path.clone())?;

    // An empty `fab` object means no FAB at all.
    let fab = match page.opt_obj("fab")? {
        Some(fab) if !fab.map.is_empty() => Some(FabSpec {
            icon: fab.opt_ident("icon")?.unwrap_or_else(|| "add".to_string()),
            label: fab.opt_text("label")?.unwrap_or_default(),
            action: fab.opt_text("action")?.unwrap_or_default(),
            show_label: fab.opt_bool("showLabel")?.unwrap_or(false),
            position: fab
                .opt_keyword("position", FabPosition::from_keyword)?
                .unwrap_or_default(),
        }),
        _ => None,
    };

    Ok(Page {
        name: page.req_text("name")?,
        title: page.req_text("title")?,
        background: page.opt_color("background")?,
        padding: page.opt_edge("padding")?,
        fab,
        widgets: page.children_at("widgets", true)?,
        path,
    })
}

fn lower_widget(value: &Value, path: String) -> Result<WidgetNode, CompileError> {
    let node = Obj::new(value, path.clone())?;
    let type_name = node.req_text("type")?;

    let widget = match type_name.as_str() {
        "text" => Widget::Text(text_spec(&node)?),
        "heading" => Widget::Heading(text_spec(&node)?),
        "icon" => Widget::Icon {
            name: node.req_ident("icon")?,
        },
        "image" => Widget::Image {
            src: node.req_text("src")?,
            width: node.opt_size("width")?,
            height: node.opt_size("height")?,
        },
        "button" => Widget::Button {
            label: node.req_text("label")?,
            background: node.opt_color("backgroundColor")?,
        },
        "textField" => Widget::TextField {
            label: node.opt_text("label")?,
            placeholder: node.opt_text("placeholder")?,
        },
        "checkbox" => Widget::Checkbox(toggle_spec(&node)?),
        "switch" => Widget::Switch(toggle_spec(&node)?),
        "slider" => {
            let min = node.opt_number("min")?.unwrap_or(0.0);
            let max = node.opt_number("max")?.unwrap_or(100.0);
            if min >= max {
                return Err(CompileError::structure(
                    node.field_path("min"),
                    format!("slider min ({}) must be below max ({})", min, max),
                ));
            }
            Widget::Slider(SliderSpec {
                value: node.opt_number("value")?.unwrap_or(0.0),
                min,
                max,
            })
        }
        "radioGroup" => Widget::RadioGroup(choice_spec(&node, "options")?),
        "dropdown" => {
            let choice = choice_spec(&node, "items")?;
            for (i, item) in choice.options.iter().enumerate() {
                if choice.options[..i].contains(item) {
                    return Err(CompileError::structure(
                        format!("{}[{}]", node.field_path("items"), i),
                        format!("duplicate dropdown item \"{}\"", item),
                    ));
                }
            }
            if !choice.value.is_empty() && !choice.options.contains(&choice.value) {
                return Err(CompileError::structure(
                    node.field_path("value"),
                    format!("dropdown value \"{}\" is not one of its items", choice.value),
                ));
            }
            Widget::Dropdown(choice)
        }
        "datePicker" => Widget::DatePicker {
            placeholder: node
                .opt_text("placeholder")?
                .unwrap_or_else(|| "Select date".to_string()),
        },
        "circleAvatar" => Widget::CircleAvatar {
            radius: node.opt_number("radius")?.unwrap_or(24.0),
            src: node.opt_text("src")?,
        },
        "chip" => Widget::Chip {
            text: node.req_text("text")?,
        },
        "listView" => Widget::ListView {
            height: node.opt_size("height")?,
            children: node.children_at("children", false)?,
        },
        "listTile" => {
            let icon = match node.opt_obj("icon")? {
                Some(icon) => Some(TileIcon {
                    name: icon.req_ident("name")?,
                    color: icon.opt_color("color")?,
                }),
                None => None,
            };
            Widget::ListTile(ListTileSpec {
                title: node.req_text("title")?,
                subtitle: node.opt_text("subtitle")?,
                icon,
                check: node.opt_bool("check")?.unwrap_or(false),
            })
        }
        "card" => Widget::Card {
            background: node.opt_color("backgroundColor")?,
            children: node.children_at("children", false)?,
        },
        "stack" => Widget::Stack {
            background: node.opt_color("backgroundColor")?,
            height: node.opt_size("height")?,
            children: node.children_at("children", false)?,
        },
        "row" => Widget::Row(flex_spec(&node)?),
        "column" => Widget::Column(flex_spec(&node)?),
        "container" => Widget::Container(ContainerSpec {
            width: node.opt_size("width")?,
            height: node.opt_size("height")?,
            background: node.opt_color("backgroundColor")?,
            alignment: node.opt_keyword("alignment", BoxAlign::from_keyword)?,
            padding: node.opt_edge("padding")?,
            main_axis: node.opt_keyword("mainAxisAlignment", MainAxis::from_keyword)?,
            cross_axis: node.opt_keyword("crossAxisAlignment", CrossAxis::from_keyword)?,
            children: node.children_at("children", false)?,
        }),
        "dataTable" => Widget::DataTable(table_spec(&node)?),
        "alertDialog" => {
            let dialog = node.req_obj("dialog")?;
            let buttons = dialog.req_obj("buttons")?;
            let confirm = buttons.req_obj("confirm")?.req_text("text")?;
            Widget::AlertDialog(DialogSpec {
                trigger: node.opt_text("label")?.unwrap_or_else(|| confirm.clone()),
                title: dialog.req_text("title")?,
                content: dialog.req_text("content")?,
                cancel: buttons.req_obj("cancel")?.req_text("text")?,
                confirm,
            })
        }
        "progressIndicator" => Widget::ProgressIndicator {
            value: node.opt_number("value")?,
        },
        "appBar" => {
            let height = node.opt_size("height")?;
            if matches!(height, Some(ref h) if h.is_relative()) {
                return Err(CompileError::structure(
                    node.field_path("height"),
                    "appBar height must be an absolute size",
                ));
            }
            Widget::AppBar(AppBarSpec {
                title: node.opt_text("title")?,
                background: node.opt_color("backgroundColor")?,
                text_color: node.opt_color("textColor")?,
                height,
            })
        }
        "bottomNavigationBar" => Widget::BottomNavigationBar(bottom_nav_spec(&node)?),
        _ => Widget::Unknown {
            type_name: type_name.clone(),
        },
    };

    Ok(WidgetNode { path, widget })
}

fn text_spec(node: &Obj<'_>) -> Result<TextSpec, CompileError> {
    Ok(TextSpec {
        text: node.req_text("text")?,
        font_size: node.opt_number("fontSize")?,
        bold: node.opt_bool("bold")?.unwrap_or(false),
        color: node.opt_color("textColor")?,
        align: node.opt_keyword("align", BoxAlign::from_keyword)?,
    })
}

fn toggle_spec(node: &Obj<'_>) -> Result<ToggleSpec, CompileError> {
    Ok(ToggleSpec {
        label: node.req_label("label")?,
        value: node.opt_bool("value")?.unwrap_or(false),
    })
}

fn choice_spec(node: &Obj<'_>, list_key: &str) -> Result<ChoiceSpec, CompileError> {
    Ok(ChoiceSpec {
        label: node.req_label("label")?,
        options: node.req_text_list(list_key)?,
        value: node.opt_text("value")?.unwrap_or_default(),
    })
}

fn flex_spec(node: &Obj<'_>) -> Result<FlexSpec, CompileError> {
    Ok(FlexSpec {
        main_axis: node.opt_keyword("mainAxisAlignment", MainAxis::from_keyword)?,
        cross_axis: node.opt_keyword("crossAxisAlignment", CrossAxis::from_keyword)?,
        children: node.children_at("children", false)?,
    })
}

fn table_spec(node: &Obj<'_>) -> Result<TableSpec, CompileError> {
    let table = node.req_obj("table")?;
    let columns = table.req_text_list("columns")?;
    if columns.is_empty() {
        return Err(CompileError::structure(
            table.field_path("columns"),
            "dataTable needs at least one column",
        ));
    }

    let mut rows = Vec::new();
    for (i, row) in table.req_array("rows")?.iter().enumerate() {
        let row_path = format!("{}[{}]", table.field_path("rows"), i);
        let cells = row.as_array().ok_or_else(|| {
            CompileError::validation(
                row_path.clone(),
                ValidationKind::InvalidType {
                    field: "rows".to_string(),
                    expected: "an array of cells",
                },
            )
        })?;
        let cells = cells
            .iter()
            .enumerate()
            .map(|(j, cell)| {
                scalar_text(cell).ok_or_else(|| {
                    CompileError::validation(
                        format!("{}[{}]", row_path, j),
                        ValidationKind::InvalidType {
                            field: "cell".to_string(),
                            expected: "a string, number or boolean",
                        },
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if cells.len() != columns.len() {
            return Err(CompileError::structure(
                row_path,
                format!(
                    "row has {} cells but the table has {} columns",
                    cells.len(),
                    columns.len()
                ),
            ));
        }
        rows.push(cells);
    }

    Ok(TableSpec { columns, rows })
}

fn bottom_nav_spec(node: &Obj<'_>) -> Result<BottomNavSpec, CompileError> {
    let mut items = Vec::new();
    for (i, item) in node.req_array("items")?.iter().enumerate() {
        let item = Obj::new(item, format!("{}[{}]", node.field_path("items"), i))?;
        items.push(NavItem {
            icon: item.req_ident("icon")?,
            label: item.req_text("label")?,
            route: item.req_text("route")?,
        });
    }
    if items.len() < 2 {
        return Err(CompileError::structure(
            node.field_path("items"),
            "bottomNavigationBar needs at least two items",
        ));
    }

    Ok(BottomNavSpec {
        items,
        selected_color: node.opt_color("selectedItemColor")?,
        unselected_color: node.opt_color("textColor")?,
    })
}

/// Text form of a JSON scalar; `None` for arrays, objects and null.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A JSON object together with the path it was found at.
struct Obj<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Obj<'a> {
    fn new(value: &'a Value, path: impl Into<String>) -> Result<Self, CompileError> {
        let path = path.into();
        match value.as_object() {
            Some(map) => Ok(Obj { map, path }),
            None => {
                let shown = if path.is_empty() { "$".to_string() } else { path };
                Err(CompileError::structure(shown, "expected a JSON object"))
            }
        }
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// `null` counts as absent.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn missing(&self, key: &str) -> CompileError {
        CompileError::validation(self.field_path(key), ValidationKind::MissingField(key.to_string()))
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> CompileError {
        CompileError::validation(
            self.field_path(key),
            ValidationKind::InvalidType {
                field: key.to_string(),
                expected,
            },
        )
    }

    fn convert<T>(&self, key: &str, result: Result<T, ConvertError>) -> Result<T, CompileError> {
        result.map_err(|e| CompileError::at(self.field_path(key), e))
    }

    fn opt_text(&self, key: &str) -> Result<Option<String>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => scalar_text(v)
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a string")),
        }
    }

    fn req_text(&self, key: &str) -> Result<String, CompileError> {
        self.opt_text(key)?.ok_or_else(|| self.missing(key))
    }

    /// A label that state variables are derived from; must not be blank.
    fn req_label(&self, key: &str) -> Result<String, CompileError> {
        let label = self.req_text(key)?;
        if label.trim().is_empty() {
            return Err(CompileError::structure(
                self.field_path(key),
                "label of an interactive widget must not be empty",
            ));
        }
        Ok(label)
    }

    /// A Material icon name, emitted as `Icons.<name>`.
    fn opt_ident(&self, key: &str) -> Result<Option<String>, CompileError> {
        match self.opt_text(key)? {
            None => Ok(None),
            Some(name) if is_identifier(&name) => Ok(Some(name)),
            Some(_) => Err(self.wrong_type(key, "an icon name like \"home\"")),
        }
    }

    fn req_ident(&self, key: &str) -> Result<String, CompileError> {
        self.opt_ident(key)?.ok_or_else(|| self.missing(key))
    }

    fn opt_bool(&self, key: &str) -> Result<Option<bool>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.wrong_type(key, "a boolean")),
        }
    }

    fn opt_number(&self, key: &str) -> Result<Option<f64>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a number")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a number")),
            Some(_) => Err(self.wrong_type(key, "a number")),
        }
    }

    fn opt_color(&self, key: &str) -> Result<Option<Color>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => self.convert(key, Color::parse(s)).map(Some),
            Some(_) => Err(self.wrong_type(key, "a hex color string")),
        }
    }

    fn req_color(&self, key: &str) -> Result<Color, CompileError> {
        self.opt_color(key)?.ok_or_else(|| self.missing(key))
    }

    fn opt_size(&self, key: &str) -> Result<Option<Size>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(|px| Some(Size::Pixels(px)))
                .ok_or_else(|| self.wrong_type(key, "a size")),
            Some(Value::String(s)) => self.convert(key, Size::parse(s)),
            Some(_) => Err(self.wrong_type(key, "a size")),
        }
    }

    fn opt_edge(&self, key: &str) -> Result<Option<EdgeSpec>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(|v| Some(EdgeSpec::All(v)))
                .ok_or_else(|| self.wrong_type(key, "a padding")),
            Some(Value::String(s)) => self.convert(key, EdgeSpec::parse(s)).map(Some),
            Some(_) => Err(self.wrong_type(key, "a padding")),
        }
    }

    fn opt_keyword<T>(
        &self,
        key: &str,
        parse: fn(&str) -> Result<T, ConvertError>,
    ) -> Result<Option<T>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => self.convert(key, parse(s)).map(Some),
            Some(_) => Err(self.wrong_type(key, "a keyword string")),
        }
    }

    fn opt_obj(&self, key: &str) -> Result<Option<Obj<'a>>, CompileError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => Obj::new(v, self.field_path(key)).map(Some),
        }
    }

    fn req_obj(&self, key: &str) -> Result<Obj<'a>, CompileError> {
        self.opt_obj(key)?.ok_or_else(|| self.missing(key))
    }

    fn req_array(&self, key: &str) -> Result<&'a Vec<Value>, CompileError> {
        match self.get(key) {
            None => Err(self.missing(key)),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(self.wrong_type(key, "an array")),
        }
    }

    fn req_text_list(&self, key: &str) -> Result<Vec<String>, CompileError> {
        self.req_array(key)?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                scalar_text(item).ok_or_else(|| {
                    CompileError::validation(
                        format!("{}[{}]", self.field_path(key), i),
                        ValidationKind::InvalidType {
                            field: key.to_string(),
                            expected: "a list of strings",
                        },
                    )
                })
            })
            .collect()
    }

    /// Lower the widget list under `key`; an absent list is empty unless `required`.
    fn children_at(&self, key: &str, required: bool) -> Result<Vec<WidgetNode>, CompileError> {
        let items = match self.get(key) {
            None if required => return Err(self.missing(key)),
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.wrong_type(key, "an array of widgets")),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, child)| lower_widget(child, format!("{}[{}]", self.field_path(key), i)))
            .collect()
    }
}
