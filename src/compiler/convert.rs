//! Scalar JSON value → Dart literal conversions.
//!
//! Everything here is pure. Parsing happens once while the schema is lowered,
//! so emission only ever deals with values that are already known to be good.

use crate::compiler::error::ConvertError;

/// An opaque RGB color, always emitted with full alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(u32);

impl Color {
    /// Parse `rrggbb` or `#rrggbb`.
    pub fn parse(value: &str) -> Result<Self, ConvertError> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConvertError::InvalidColor(value.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|_| ConvertError::InvalidColor(value.to_string()))
    }

    pub fn rgb(&self) -> u32 {
        self.0
    }

    /// `Color(0xFFRRGGBB)`
    pub fn literal(&self) -> String {
        format!("Color(0xFF{:06X})", self.0)
    }
}

/// Convenience wrapper over [`Color::parse`] + [`Color::literal`].
pub fn color_literal(value: &str) -> Result<String, ConvertError> {
    Color::parse(value).map(|c| c.literal())
}

/// Which layout constraint a relative size is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    fn constraint(&self) -> &'static str {
        match self {
            Dimension::Width => "constraints.maxWidth",
            Dimension::Height => "constraints.maxHeight",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Size {
    /// `"50%"` of the available constraint.
    Percent(f64),
    /// `"20px"` or a bare JSON number.
    Pixels(f64),
    /// Anything else is handed through as a Dart expression.
    Raw(String),
}

impl Size {
    /// Returns `Ok(None)` for an empty string.
    pub fn parse(value: &str) -> Result<Option<Self>, ConvertError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        if let Some(pct) = value.strip_suffix('%') {
            let pct = parse_number(pct).ok_or_else(|| ConvertError::InvalidSize(value.to_string()))?;
            return Ok(Some(Size::Percent(pct)));
        }
        if let Some(px) = value.strip_suffix("px") {
            let px = parse_number(px).ok_or_else(|| ConvertError::InvalidSize(value.to_string()))?;
            return Ok(Some(Size::Pixels(px)));
        }
        Ok(Some(Size::Raw(value.to_string())))
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Size::Percent(_))
    }

    pub fn expr(&self, dimension: Dimension) -> String {
        match self {
            Size::Percent(pct) => format!("{} * {}", dimension.constraint(), number(pct / 100.0)),
            Size::Pixels(px) => number(*px),
            Size::Raw(expr) => expr.clone(),
        }
    }
}

/// Size string → Dart expression; `None` means "emit nothing".
pub fn size_expr(value: Option<&str>, dimension: Dimension) -> Result<Option<String>, ConvertError> {
    match value {
        None => Ok(None),
        Some(v) => Ok(Size::parse(v)?.map(|size| size.expr(dimension))),
    }
}

/// Padding in one (`"8"`) or two (`"8px 16px"`, horizontal then vertical) tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeSpec {
    All(f64),
    Symmetric { horizontal: f64, vertical: f64 },
}

impl EdgeSpec {
    pub fn parse(value: &str) -> Result<Self, ConvertError> {
        let invalid = || ConvertError::InvalidSize(value.to_string());
        let tokens = value
            .split_whitespace()
            .map(|t| parse_number(t.trim_end_matches("px")).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        match tokens.as_slice() {
            [all] => Ok(EdgeSpec::All(*all)),
            [horizontal, vertical] => Ok(EdgeSpec::Symmetric {
                horizontal: *horizontal,
                vertical: *vertical,
            }),
            _ => Err(invalid()),
        }
    }
}

pub fn edge_insets(edge: Option<&EdgeSpec>) -> String {
    match edge {
        None => "EdgeInsets.zero".to_string(),
        Some(EdgeSpec::All(v)) => format!("EdgeInsets.all({})", number(*v)),
        Some(EdgeSpec::Symmetric { horizontal, vertical }) => format!(
            "EdgeInsets.symmetric(horizontal: {}, vertical: {})",
            number(*horizontal),
            number(*vertical)
        ),
    }
}

macro_rules! keyword_table {
    (
        $(#[$meta:meta])*
        $name:ident, $table:literal {
            $($variant:ident => $keyword:literal => $dart:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const TABLE: &'static str = $table;

            pub fn from_keyword(keyword: &str) -> Result<Self, ConvertError> {
                match keyword {
                    $($keyword => Ok($name::$variant),)+
                    other => Err(ConvertError::UnknownEnumValue {
                        table: $table,
                        value: other.to_string(),
                    }),
                }
            }

            pub fn dart(&self) -> &'static str {
                match self {
                    $($name::$variant => $dart,)+
                }
            }
        }
    };
}

keyword_table! {
    MainAxis, "main axis alignment" {
        Start => "flex-start" => "MainAxisAlignment.start",
        Center => "center" => "MainAxisAlignment.center",
        End => "flex-end" => "MainAxisAlignment.end",
        SpaceBetween => "space-between" => "MainAxisAlignment.spaceBetween",
        SpaceAround => "space-around" => "MainAxisAlignment.spaceAround",
        SpaceEvenly => "space-evenly" => "MainAxisAlignment.spaceEvenly",
    }
}

keyword_table! {
    CrossAxis, "cross axis alignment" {
        Start => "flex-start" => "CrossAxisAlignment.start",
        Center => "center" => "CrossAxisAlignment.center",
        End => "flex-end" => "CrossAxisAlignment.end",
        Stretch => "stretch" => "CrossAxisAlignment.stretch",
    }
}

keyword_table! {
    /// Alignment of a single child inside its box.
    BoxAlign, "alignment" {
        Center => "center" => "Alignment.center",
        Start => "flex-start" => "Alignment.centerLeft",
        End => "flex-end" => "Alignment.centerRight",
    }
}

keyword_table! {
    FabPosition, "FAB position" {
        BottomRight => "bottomRight" => "FloatingActionButtonLocation.endFloat",
        BottomLeft => "bottomLeft" => "FloatingActionButtonLocation.startFloat",
        BottomCenter => "bottomCenter" => "FloatingActionButtonLocation.centerFloat",
        CenterDocked => "centerDocked" => "FloatingActionButtonLocation.centerDocked",
        TopRight => "topRight" => "FloatingActionButtonLocation.endTop",
        TopLeft => "topLeft" => "FloatingActionButtonLocation.startTop",
    }
}

impl Default for FabPosition {
    fn default() -> Self {
        FabPosition::BottomRight
    }
}

/// Render a number the way a person would write it in Dart source:
/// integral values lose the trailing `.0`.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Single-quoted Dart string literal.
pub fn dart_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
