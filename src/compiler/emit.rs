/// Widget emitter: one widget node → Dart expression lines
///
/// Every widget becomes one or more lines ending in a trailing comma, so the
/// caller can drop them straight into a `children: [...]` list or a named
/// argument. Relative sizes reference `constraints`, which the page assembler
/// binds through the `LayoutBuilder` wrapped around the page body.

use std::collections::BTreeSet;

use crate::compiler::convert::{dart_string, edge_insets, number, Dimension};
use crate::compiler::schema::{
    ChoiceSpec, ContainerSpec, DialogSpec, FlexSpec, ListTileSpec, SliderSpec, TableSpec,
    TextSpec, ToggleSpec, Widget, WidgetNode,
};
use crate::compiler::state::{bound_variable, DATE_VAR, SLIDER_VAR};
use crate::compiler::writer::SourceWriter;
use crate::compiler::Import;

/// Emit `node` as Dart lines starting at `indent` levels.
///
/// `imports` collects the import tokens the emitted code relies on.
pub fn emit(node: &WidgetNode, indent: usize, imports: &mut BTreeSet<Import>) -> Vec<String> {
    let mut w = SourceWriter::at(indent);
    emit_into(&mut w, node, imports);
    w.into_lines()
}

fn emit_into(w: &mut SourceWriter, node: &WidgetNode, imports: &mut BTreeSet<Import>) {
    let var = bound_variable(&node.widget).unwrap_or_default();

    match &node.widget {
        Widget::Text(text) | Widget::Heading(text) => emit_text(w, text),
        Widget::Icon { name } => w.line(format!("Icon(Icons.{}),", name)),
        Widget::Image { src, width, height } => {
            let mut args = vec![dart_string(src)];
            if let Some(width) = width {
                args.push(format!("width: {}", width.expr(Dimension::Width)));
            }
            if let Some(height) = height {
                args.push(format!("height: {}", height.expr(Dimension::Height)));
            }
            w.line(format!("Image.network({}),", args.join(", ")));
        }
        Widget::Button { label, background } => {
            w.open("ElevatedButton(");
            w.line("onPressed: () {},");
            if let Some(color) = background {
                w.line(format!(
                    "style: ElevatedButton.styleFrom(backgroundColor: {}),",
                    color.literal()
                ));
            }
            w.line(format!("child: Text({}),", dart_string(label)));
            w.close("),");
        }
        Widget::TextField { label, placeholder } => {
            let mut args = Vec::new();
            if let Some(label) = label {
                args.push(format!("labelText: {}", dart_string(label)));
            }
            if let Some(hint) = placeholder {
                args.push(format!("hintText: {}", dart_string(hint)));
            }
            w.line(format!(
                "TextField(decoration: InputDecoration({})),",
                args.join(", ")
            ));
        }
        Widget::Checkbox(toggle) => {
            emit_toggle(w, "CheckboxListTile", toggle, &var, &format!("newValue ?? {}", var))
        }
        Widget::Switch(toggle) => emit_toggle(w, "SwitchListTile", toggle, &var, "newValue"),
        Widget::Slider(slider) => emit_slider(w, slider),
        Widget::RadioGroup(choice) => emit_radio_group(w, choice, &var),
        Widget::Dropdown(choice) => emit_dropdown(w, choice, &var),
        Widget::DatePicker { placeholder } => {
            imports.insert(Import::Intl);
            w.open("OutlinedButton(");
            w.open("onPressed: () async {");
            w.open("final pickedDate = await showDatePicker(");
            w.line("context: context,");
            w.line(format!("initialDate: {} ?? DateTime.now(),", DATE_VAR));
            w.line("firstDate: DateTime(2000),");
            w.line("lastDate: DateTime(2100),");
            w.close(");");
            w.open("if (pickedDate != null && mounted) {");
            w.line(format!("setState(() => {} = pickedDate);", DATE_VAR));
            w.close("}");
            w.close("},");
            w.line(format!(
                "child: Text({} == null ? {} : DateFormat.yMMMd().format({}!)),",
                DATE_VAR,
                dart_string(placeholder),
                DATE_VAR
            ));
            w.close("),");
        }
        Widget::CircleAvatar { radius, src } => match src {
            Some(src) => w.line(format!(
                "CircleAvatar(radius: {}, backgroundImage: NetworkImage({})),",
                number(*radius),
                dart_string(src)
            )),
            None => w.line(format!("CircleAvatar(radius: {}),", number(*radius))),
        },
        Widget::Chip { text } => w.line(format!("Chip(label: Text({})),", dart_string(text))),
        Widget::ListView { height, children } => match height {
            Some(height) => {
                w.open("SizedBox(");
                w.line(format!("height: {},", height.expr(Dimension::Height)));
                w.open("child: ListView(");
                emit_children(w, children, imports);
                w.close("),");
                w.close("),");
            }
            None => {
                w.open("ListView(");
                w.line("shrinkWrap: true,");
                w.line("physics: const NeverScrollableScrollPhysics(),");
                emit_children(w, children, imports);
                w.close("),");
            }
        },
        Widget::ListTile(tile) => emit_list_tile(w, tile),
        Widget::Card {
            background,
            children,
        } => {
            w.open("Card(");
            if let Some(color) = background {
                w.line(format!("color: {},", color.literal()));
            }
            w.open("child: Column(");
            emit_children(w, children, imports);
            w.close("),");
            w.close("),");
        }
        Widget::Stack {
            background,
            height,
            children,
        } => {
            w.open("Container(");
            if let Some(color) = background {
                w.line(format!("color: {},", color.literal()));
            }
            if let Some(height) = height {
                w.line(format!("height: {},", height.expr(Dimension::Height)));
            }
            w.open("child: Stack(");
            emit_children(w, children, imports);
            w.close("),");
            w.close("),");
        }
        Widget::Row(flex) => emit_flex(w, "Row", flex, imports),
        Widget::Column(flex) => emit_flex(w, "Column", flex, imports),
        Widget::Container(container) => emit_container(w, container, imports),
        Widget::DataTable(table) => emit_table(w, table),
        Widget::AlertDialog(dialog) => emit_dialog(w, dialog),
        Widget::ProgressIndicator { value } => match value {
            Some(value) => w.line(format!("LinearProgressIndicator(value: {} / 100),", number(*value))),
            None => w.line("CircularProgressIndicator(),"),
        },
        // Only reached when the bar did not land in its Scaffold slot.
        Widget::AppBar(_) | Widget::BottomNavigationBar(_) => w.line("Container(),"),
        Widget::Unknown { .. } => w.line("Container(),"),
    }
}

fn emit_children(w: &mut SourceWriter, children: &[WidgetNode], imports: &mut BTreeSet<Import>) {
    if children.is_empty() {
        w.line("children: [],");
        return;
    }
    w.open("children: [");
    for child in children {
        emit_into(w, child, imports);
    }
    w.close("],");
}

fn emit_text(w: &mut SourceWriter, text: &TextSpec) {
    let mut style = Vec::new();
    if let Some(size) = text.font_size {
        style.push(format!("fontSize: {}", number(size)));
    }
    if text.bold {
        style.push("fontWeight: FontWeight.bold".to_string());
    }
    if let Some(color) = text.color {
        style.push(format!("color: {}", color.literal()));
    }

    let widget = if style.is_empty() {
        format!("Text({})", dart_string(&text.text))
    } else {
        format!(
            "Text({}, style: TextStyle({}))",
            dart_string(&text.text),
            style.join(", ")
        )
    };

    match text.align {
        Some(align) => w.line(format!("Align(alignment: {}, child: {}),", align.dart(), widget)),
        None => w.line(format!("{},", widget)),
    }
}

fn emit_toggle(w: &mut SourceWriter, widget: &str, toggle: &ToggleSpec, var: &str, assigned: &str) {
    w.open(format!("{}(", widget));
    w.line(format!("title: Text({}),", dart_string(&toggle.label)));
    w.line(format!("value: {},", var));
    w.line(format!(
        "onChanged: (newValue) => setState(() => {} = {}),",
        var, assigned
    ));
    w.close("),");
}

fn emit_slider(w: &mut SourceWriter, slider: &SliderSpec) {
    let (min, max) = (number(slider.min), number(slider.max));
    w.open("Slider(");
    // Sliders share one field, so the value may come from a wider range.
    w.line(format!("value: {}.clamp({}, {}).toDouble(),", SLIDER_VAR, min, max));
    w.line(format!("min: {},", min));
    w.line(format!("max: {},", max));
    w.line(format!(
        "onChanged: (newValue) => setState(() => {} = newValue),",
        SLIDER_VAR
    ));
    w.close("),");
}

fn emit_radio_group(w: &mut SourceWriter, choice: &ChoiceSpec, var: &str) {
    w.open("Column(");
    if choice.options.is_empty() {
        w.line("children: [],");
    } else {
        w.open("children: [");
        for option in &choice.options {
            w.open("RadioListTile<String>(");
            w.line(format!("title: Text({}),", dart_string(option)));
            w.line(format!("value: {},", dart_string(option)));
            w.line(format!("groupValue: {},", var));
            w.line(format!(
                "onChanged: (newValue) => setState(() => {} = newValue ?? {}),",
                var, var
            ));
            w.close("),");
        }
        w.close("],");
    }
    w.close("),");
}

fn emit_dropdown(w: &mut SourceWriter, choice: &ChoiceSpec, var: &str) {
    w.open("DropdownButton<String>(");
    w.line(format!("value: {}.isEmpty ? null : {},", var, var));
    w.line(format!("hint: Text({}),", dart_string(&choice.label)));
    if choice.options.is_empty() {
        w.line("items: [],");
    } else {
        w.open("items: [");
        for item in &choice.options {
            let item = dart_string(item);
            w.line(format!("DropdownMenuItem(value: {}, child: Text({})),", item, item));
        }
        w.close("],");
    }
    w.line(format!(
        "onChanged: (newValue) => setState(() => {} = newValue ?? {}),",
        var, var
    ));
    w.close("),");
}

fn emit_list_tile(w: &mut SourceWriter, tile: &ListTileSpec) {
    w.open("ListTile(");
    if let Some(icon) = &tile.icon {
        match icon.color {
            Some(color) => w.line(format!(
                "leading: Icon(Icons.{}, color: {}),",
                icon.name,
                color.literal()
            )),
            None => w.line(format!("leading: Icon(Icons.{}),", icon.name)),
        }
    }
    w.line(format!("title: Text({}),", dart_string(&tile.title)));
    if let Some(subtitle) = &tile.subtitle {
        w.line(format!("subtitle: Text({}),", dart_string(subtitle)));
    }
    if tile.check {
        w.line("trailing: Icon(Icons.check),");
    }
    w.close("),");
}

fn emit_flex(w: &mut SourceWriter, widget: &str, flex: &FlexSpec, imports: &mut BTreeSet<Import>) {
    w.open(format!("{}(", widget));
    if let Some(main) = flex.main_axis {
        w.line(format!("mainAxisAlignment: {},", main.dart()));
    }
    if let Some(cross) = flex.cross_axis {
        w.line(format!("crossAxisAlignment: {},", cross.dart()));
    }
    emit_children(w, &flex.children, imports);
    w.close("),");
}

fn emit_container(w: &mut SourceWriter, container: &ContainerSpec, imports: &mut BTreeSet<Import>) {
    w.open("Container(");
    let width = container
        .width
        .as_ref()
        .map(|size| size.expr(Dimension::Width))
        .unwrap_or_else(|| "constraints.maxWidth".to_string());
    w.line(format!("width: {},", width));
    if let Some(height) = &container.height {
        w.line(format!("height: {},", height.expr(Dimension::Height)));
    }
    if let Some(color) = container.background {
        w.line(format!("color: {},", color.literal()));
    }
    if let Some(align) = container.alignment {
        w.line(format!("alignment: {},", align.dart()));
    }
    if container.padding.is_some() {
        w.line(format!("padding: {},", edge_insets(container.padding.as_ref())));
    }
    if !container.children.is_empty() {
        w.open("child: Column(");
        if let Some(main) = container.main_axis {
            w.line(format!("mainAxisAlignment: {},", main.dart()));
        }
        if let Some(cross) = container.cross_axis {
            w.line(format!("crossAxisAlignment: {},", cross.dart()));
        }
        emit_children(w, &container.children, imports);
        w.close("),");
    }
    w.close("),");
}

fn emit_table(w: &mut SourceWriter, table: &TableSpec) {
    w.open("SingleChildScrollView(");
    w.line("scrollDirection: Axis.horizontal,");
    w.open("child: DataTable(");
    w.open("columns: [");
    for column in &table.columns {
        w.line(format!("DataColumn(label: Text({})),", dart_string(column)));
    }
    w.close("],");
    if table.rows.is_empty() {
        w.line("rows: [],");
    } else {
        w.open("rows: [");
        for row in &table.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| format!("DataCell(Text({}))", dart_string(cell)))
                .collect();
            w.line(format!("DataRow(cells: [{}]),", cells.join(", ")));
        }
        w.close("],");
    }
    w.close("),");
    w.close("),");
}

fn emit_dialog(w: &mut SourceWriter, dialog: &DialogSpec) {
    w.open("ElevatedButton(");
    w.open("onPressed: () {");
    w.open("showDialog<void>(");
    w.line("context: context,");
    w.open("builder: (dialogContext) => AlertDialog(");
    w.line(format!("title: Text({}),", dart_string(&dialog.title)));
    w.line(format!("content: Text({}),", dart_string(&dialog.content)));
    w.open("actions: [");
    for label in [&dialog.cancel, &dialog.confirm] {
        w.open("TextButton(");
        w.line("onPressed: () => Navigator.pop(dialogContext),");
        w.line(format!("child: Text({}),", dart_string(label)));
        w.close("),");
    }
    w.close("],");
    w.close("),");
    w.close(");");
    w.close("},");
    w.line(format!("child: Text({}),", dart_string(&dialog.trigger)));
    w.close("),");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::convert::{BoxAlign, Color, Size};

    fn node(widget: Widget) -> WidgetNode {
        WidgetNode {
            path: "pages[0].widgets[0]".to_string(),
            widget,
        }
    }

    fn render(widget: Widget) -> (String, BTreeSet<Import>) {
        let mut imports = BTreeSet::new();
        let lines = emit(&node(widget), 0, &mut imports);
        (lines.join("\n"), imports)
    }

    #[test]
    fn test_text_with_style_and_alignment() {
        let (out, _) = render(Widget::Text(TextSpec {
            text: "Hi".into(),
            font_size: Some(18.0),
            bold: true,
            color: Some(Color::parse("#ff0000").unwrap()),
            align: Some(BoxAlign::Center),
        }));
        assert_eq!(
            out,
            "Align(alignment: Alignment.center, child: Text('Hi', style: TextStyle(fontSize: 18, fontWeight: FontWeight.bold, color: Color(0xFFFF0000)))),"
        );
    }

    #[test]
    fn test_plain_text() {
        let (out, _) = render(Widget::Text(TextSpec {
            text: "it's".into(),
            font_size: None,
            bold: false,
            color: None,
            align: None,
        }));
        assert_eq!(out, r"Text('it\'s'),");
    }

    #[test]
    fn test_switch_is_bound_to_derived_variable() {
        let (out, _) = render(Widget::Switch(ToggleSpec {
            label: "Dark Mode".into(),
            value: false,
        }));
        assert!(out.starts_with("SwitchListTile("));
        assert!(out.contains("value: dark_mode,"));
        assert!(out.contains("setState(() => dark_mode = newValue)"));
    }

    #[test]
    fn test_slider_honors_range() {
        let (out, _) = render(Widget::Slider(SliderSpec {
            value: 3.0,
            min: 1.0,
            max: 5.0,
        }));
        assert!(out.contains("value: sliderValue.clamp(1, 5).toDouble(),"));
        assert!(out.contains("min: 1,"));
        assert!(out.contains("max: 5,"));
    }

    #[test]
    fn test_date_picker_requests_intl() {
        let (out, imports) = render(Widget::DatePicker {
            placeholder: "Select date".into(),
        });
        assert!(imports.contains(&Import::Intl));
        assert!(out.contains("firstDate: DateTime(2000),"));
        assert!(out.contains("lastDate: DateTime(2100),"));
        assert!(out.contains("selectedDate = pickedDate"));
    }

    #[test]
    fn test_list_view_without_height_shrink_wraps() {
        let (out, _) = render(Widget::ListView {
            height: None,
            children: vec![],
        });
        assert_eq!(
            out,
            "ListView(\n  shrinkWrap: true,\n  physics: const NeverScrollableScrollPhysics(),\n  children: [],\n),"
        );
    }

    #[test]
    fn test_container_defaults_to_full_width_and_nests_children() {
        let (out, _) = render(Widget::Container(ContainerSpec {
            width: None,
            height: Some(Size::Percent(25.0)),
            background: None,
            alignment: None,
            padding: None,
            main_axis: None,
            cross_axis: None,
            children: vec![node(Widget::Icon { name: "star".into() })],
        }));
        assert_eq!(
            out,
            [
                "Container(",
                "  width: constraints.maxWidth,",
                "  height: constraints.maxHeight * 0.25,",
                "  child: Column(",
                "    children: [",
                "      Icon(Icons.star),",
                "    ],",
                "  ),",
                "),",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_unknown_and_misplaced_bars_are_placeholders() {
        let (out, _) = render(Widget::Unknown {
            type_name: "unknown_widget".into(),
        });
        assert_eq!(out, "Container(),");
    }

    #[test]
    fn test_radio_group_shares_one_group_value() {
        let (out, _) = render(Widget::RadioGroup(ChoiceSpec {
            label: "Size".into(),
            options: vec!["S".into(), "M".into(), "L".into()],
            value: "M".into(),
        }));
        assert!(out.starts_with("Column(\n  children: [\n    RadioListTile<String>("));
        assert_eq!(out.matches("RadioListTile<String>(").count(), 3);
        assert_eq!(out.matches("      groupValue: size,").count(), 3);
        assert!(out
            .lines()
            .filter(|line| line.contains("groupValue:"))
            .all(|line| line == "      groupValue: size,"));
        assert!(out.contains("      title: Text('L'),\n      value: 'L',"));
        assert_eq!(
            out.matches("onChanged: (newValue) => setState(() => size = newValue ?? size),").count(),
            3
        );
    }

    #[test]
    fn test_empty_radio_group() {
        let (out, _) = render(Widget::RadioGroup(ChoiceSpec {
            label: "Size".into(),
            options: vec![],
            value: String::new(),
        }));
        assert_eq!(out, "Column(\n  children: [],\n),");
    }

    #[test]
    fn test_checkbox_falls_back_to_current_value() {
        let (out, _) = render(Widget::Checkbox(ToggleSpec {
            label: "Accept Terms".into(),
            value: true,
        }));
        assert_eq!(
            out,
            [
                "CheckboxListTile(",
                "  title: Text('Accept Terms'),",
                "  value: accept_terms,",
                "  onChanged: (newValue) => setState(() => accept_terms = newValue ?? accept_terms),",
                "),",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_card_wraps_children_in_column() {
        let (out, _) = render(Widget::Card {
            background: Some(Color::parse("#FFF3E0").unwrap()),
            children: vec![node(Widget::Chip { text: "Sale".into() })],
        });
        assert_eq!(
            out,
            [
                "Card(",
                "  color: Color(0xFFFFF3E0),",
                "  child: Column(",
                "    children: [",
                "      Chip(label: Text('Sale')),",
                "    ],",
                "  ),",
                "),",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_stack_sits_in_sized_container() {
        let (out, _) = render(Widget::Stack {
            background: None,
            height: Some(Size::Pixels(200.0)),
            children: vec![
                node(Widget::Icon { name: "home".into() }),
                node(Widget::Icon { name: "star".into() }),
            ],
        });
        assert_eq!(
            out,
            [
                "Container(",
                "  height: 200,",
                "  child: Stack(",
                "    children: [",
                "      Icon(Icons.home),",
                "      Icon(Icons.star),",
                "    ],",
                "  ),",
                "),",
            ]
            .join("\n")
        );

        let (out, _) = render(Widget::Stack {
            background: Some(Color::parse("000000").unwrap()),
            height: None,
            children: vec![],
        });
        assert_eq!(
            out,
            "Container(\n  color: Color(0xFF000000),\n  child: Stack(\n    children: [],\n  ),\n),"
        );
    }

    #[test]
    fn test_circle_avatar_with_and_without_image() {
        let (out, _) = render(Widget::CircleAvatar {
            radius: 40.0,
            src: Some("https://example.com/me.png".into()),
        });
        assert_eq!(
            out,
            "CircleAvatar(radius: 40, backgroundImage: NetworkImage('https://example.com/me.png')),"
        );

        let (out, _) = render(Widget::CircleAvatar {
            radius: 24.0,
            src: None,
        });
        assert_eq!(out, "CircleAvatar(radius: 24),");
    }

    #[test]
    fn test_image_sizes() {
        let (out, _) = render(Widget::Image {
            src: "u.png".into(),
            width: Some(Size::Percent(50.0)),
            height: Some(Size::Pixels(20.0)),
        });
        assert_eq!(
            out,
            "Image.network('u.png', width: constraints.maxWidth * 0.5, height: 20),"
        );

        let (out, _) = render(Widget::Image {
            src: "u.png".into(),
            width: None,
            height: None,
        });
        assert_eq!(out, "Image.network('u.png'),");
    }

    #[test]
    fn test_text_field_decoration() {
        let (out, _) = render(Widget::TextField {
            label: Some("Email".into()),
            placeholder: Some("you@example.com".into()),
        });
        assert_eq!(
            out,
            "TextField(decoration: InputDecoration(labelText: 'Email', hintText: 'you@example.com')),"
        );

        let (out, _) = render(Widget::TextField {
            label: None,
            placeholder: None,
        });
        assert_eq!(out, "TextField(decoration: InputDecoration()),");
    }

    #[test]
    fn test_indent_is_applied() {
        let mut imports = BTreeSet::new();
        let lines = emit(&node(Widget::Chip { text: "New".into() }), 3, &mut imports);
        assert_eq!(lines, vec!["      Chip(label: Text('New')),"]);
    }

    #[test]
    fn test_progress_indicator() {
        let (out, _) = render(Widget::ProgressIndicator { value: Some(40.0) });
        assert_eq!(out, "LinearProgressIndicator(value: 40 / 100),");
        let (out, _) = render(Widget::ProgressIndicator { value: None });
        assert_eq!(out, "CircularProgressIndicator(),");
    }
}
