/// Implicit state inference for generated pages
///
/// Interactive widgets (switch, checkbox, slider, radioGroup, dropdown,
/// datePicker) need a mutable field on the page's `State` class. The field is
/// not written in the specification; it is derived from the widget:
/// - switch / checkbox → `bool <label>`
/// - slider → `double sliderValue` (every slider on a page shares it)
/// - radioGroup / dropdown → `String <label>`
/// - datePicker → `DateTime? selectedDate`

use std::collections::HashMap;

use crate::compiler::convert::{dart_string, number};
use crate::compiler::error::{Warning, WarningKind};
use crate::compiler::naming::state_name;
use crate::compiler::schema::{Widget, WidgetNode};

pub const SLIDER_VAR: &str = "sliderValue";
pub const DATE_VAR: &str = "selectedDate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateType {
    Bool,
    Double,
    String,
    DateOrNull,
}

impl StateType {
    pub fn dart(&self) -> &'static str {
        match self {
            StateType::Bool => "bool",
            StateType::Double => "double",
            StateType::String => "String",
            StateType::DateOrNull => "DateTime?",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateVariable {
    pub name: String,
    pub declared_type: StateType,
    /// Dart initializer; `None` for nullable fields that start out null.
    pub initial: Option<String>,
}

impl StateVariable {
    /// `bool dark_mode = false;`
    pub fn declaration(&self) -> String {
        match &self.initial {
            Some(init) => format!("{} {} = {};", self.declared_type.dart(), self.name, init),
            None => format!("{} {};", self.declared_type.dart(), self.name),
        }
    }
}

/// The inferred state of one page, in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub variables: Vec<StateVariable>,
    pub warnings: Vec<Warning>,
}

impl PageState {
    pub fn is_stateful(&self) -> bool {
        !self.variables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StateVariable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// The state field an interactive widget reads and writes, or `None` for
/// widgets that hold no state.
pub fn bound_variable(widget: &Widget) -> Option<String> {
    match widget {
        Widget::Checkbox(toggle) | Widget::Switch(toggle) => Some(state_name(&toggle.label)),
        Widget::RadioGroup(choice) | Widget::Dropdown(choice) => Some(state_name(&choice.label)),
        Widget::Slider(_) => Some(SLIDER_VAR.to_string()),
        Widget::DatePicker { .. } => Some(DATE_VAR.to_string()),
        _ => None,
    }
}

pub struct StateAnalyzer {
    variables: Vec<StateVariable>,
    positions: HashMap<String, usize>,
    warnings: Vec<Warning>,
}

impl StateAnalyzer {
    pub fn new() -> Self {
        StateAnalyzer {
            variables: Vec::new(),
            positions: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Walk a page's widgets in pre-order and collect its state fields.
    pub fn analyze(widgets: &[WidgetNode]) -> PageState {
        let mut analyzer = StateAnalyzer::new();
        for node in widgets {
            analyzer.visit(node);
        }
        PageState {
            variables: analyzer.variables,
            warnings: analyzer.warnings,
        }
    }

    fn visit(&mut self, node: &WidgetNode) {
        if let Some(name) = bound_variable(&node.widget) {
            let (declared_type, initial) = match &node.widget {
                Widget::Checkbox(toggle) | Widget::Switch(toggle) => {
                    (StateType::Bool, Some(toggle.value.to_string()))
                }
                Widget::Slider(slider) => (StateType::Double, Some(number(slider.value))),
                Widget::RadioGroup(choice) | Widget::Dropdown(choice) => {
                    (StateType::String, Some(dart_string(&choice.value)))
                }
                _ => (StateType::DateOrNull, None),
            };
            let shared = matches!(node.widget, Widget::Slider(_) | Widget::DatePicker { .. });
            self.declare(&node.path, name, declared_type, initial, shared);
        }

        for child in node.widget.children() {
            self.visit(child);
        }
    }

    /// Last writer wins on type and initializer; the field keeps the position
    /// of its first declaration.
    fn declare(
        &mut self,
        path: &str,
        name: String,
        declared_type: StateType,
        initial: Option<String>,
        shared: bool,
    ) {
        match self.positions.get(&name) {
            Some(&index) => {
                if !shared {
                    self.warnings.push(Warning {
                        path: path.to_string(),
                        kind: WarningKind::StateCollision(name.clone()),
                    });
                }
                self.variables[index] = StateVariable {
                    name,
                    declared_type,
                    initial,
                };
            }
            None => {
                self.positions.insert(name.clone(), self.variables.len());
                self.variables.push(StateVariable {
                    name,
                    declared_type,
                    initial,
                });
            }
        }
    }
}

/// Infer the state fields of a page from its widget tree.
pub fn infer_state(widgets: &[WidgetNode]) -> PageState {
    StateAnalyzer::analyze(widgets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::schema::{ChoiceSpec, FlexSpec, SliderSpec, TextSpec, ToggleSpec};

    fn node(path: &str, widget: Widget) -> WidgetNode {
        WidgetNode {
            path: path.to_string(),
            widget,
        }
    }

    fn switch(path: &str, label: &str, value: bool) -> WidgetNode {
        node(
            path,
            Widget::Switch(ToggleSpec {
                label: label.to_string(),
                value,
            }),
        )
    }

    #[test]
    fn test_stateless_page() {
        let widgets = vec![node(
            "w[0]",
            Widget::Text(TextSpec {
                text: "Hi".to_string(),
                font_size: None,
                bold: false,
                color: None,
                align: None,
            }),
        )];
        let state = infer_state(&widgets);
        assert!(!state.is_stateful());
    }

    #[test]
    fn test_switch_declares_bool() {
        let state = infer_state(&[switch("w[0]", "Dark Mode", false)]);
        assert!(state.is_stateful());
        assert_eq!(state.variables[0].declaration(), "bool dark_mode = false;");
    }

    #[test]
    fn test_nested_widgets_are_visited() {
        let widgets = vec![node(
            "w[0]",
            Widget::Column(FlexSpec {
                main_axis: None,
                cross_axis: None,
                children: vec![
                    node("w[0].children[0]", Widget::DatePicker { placeholder: "Pick".into() }),
                    node(
                        "w[0].children[1]",
                        Widget::Dropdown(ChoiceSpec {
                            label: "Size".into(),
                            options: vec!["S".into(), "M".into()],
                            value: "M".into(),
                        }),
                    ),
                ],
            }),
        )];
        let state = infer_state(&widgets);
        let decls: Vec<_> = state.variables.iter().map(|v| v.declaration()).collect();
        assert_eq!(decls, vec!["DateTime? selectedDate;", "String size = 'M';"]);
    }

    #[test]
    fn test_collision_last_writer_wins_first_position() {
        let widgets = vec![
            switch("w[0]", "Alerts", false),
            node("w[1]", Widget::Slider(SliderSpec { value: 5.0, min: 0.0, max: 10.0 })),
            node(
                "w[2]",
                Widget::Checkbox(ToggleSpec {
                    label: "alerts".into(),
                    value: true,
                }),
            ),
        ];
        let state = infer_state(&widgets);
        assert_eq!(state.variables.len(), 2);
        assert_eq!(state.variables[0].declaration(), "bool alerts = true;");
        assert_eq!(state.variables[1].declaration(), "double sliderValue = 5;");
        assert_eq!(
            state.warnings,
            vec![Warning {
                path: "w[2]".into(),
                kind: WarningKind::StateCollision("alerts".into()),
            }]
        );
    }

    #[test]
    fn test_sliders_share_one_variable_without_warning() {
        let widgets = vec![
            node("w[0]", Widget::Slider(SliderSpec { value: 10.0, min: 0.0, max: 100.0 })),
            node("w[1]", Widget::Slider(SliderSpec { value: 2.5, min: 0.0, max: 5.0 })),
        ];
        let state = infer_state(&widgets);
        assert_eq!(state.variables.len(), 1);
        assert_eq!(state.get(SLIDER_VAR).unwrap().initial.as_deref(), Some("2.5"));
        assert!(state.warnings.is_empty());
    }
}
