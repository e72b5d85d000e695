// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use serde_json::{json, Map, Value};

use crate::errors::ProteinScapeError;
use crate::predict::StructureText;
use crate::render::svg::escape_xml;
use crate::render::RenderStyle;

const VIEWER_JS_URL: &str = "https://3Dmol.org/build/3Dmol-min.js";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub color_scheme: String,
    pub spin: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        ViewerOptions {
            width: 800,
            height: 500,
            background: String::from("white"),
            color_scheme: String::from("spectrum"),
            spin: true,
        }
    }
}

/// A structure ready to be shown: the model, how to draw it, and the canvas settings.
#[derive(Debug, Clone)]
pub struct Viewer {
    structure: StructureText,
    style: RenderStyle,
    options: ViewerOptions,
}

impl Viewer {
    pub fn new(structure: StructureText, style: RenderStyle, options: ViewerOptions) -> Self {
        Viewer {
            structure,
            style,
            options,
        }
    }

    pub fn structure(&self) -> &StructureText {
        &self.structure
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// 3Dmol style object, e.g. `{"cartoon":{"color":"spectrum"}}`.
    pub fn style_spec(&self) -> Value {
        let mut spec = Map::new();
        spec.insert(
            self.style.to_string(),
            json!({ "color": self.options.color_scheme }),
        );
        Value::Object(spec)
    }

    fn script_options(&self) -> Value {
        json!({
            "style": self.style_spec(),
            "background": self.options.background,
            "spin": self.options.spin,
        })
    }

    /// Stand-alone HTML page showing the structure with 3Dmol.js, optionally followed by an inline
    /// SVG (the composition chart).
    pub fn to_html(
        &self,
        title: &str,
        chart_svg: Option<&str>,
    ) -> Result<String, ProteinScapeError> {
        let structure_js = script_json(&Value::String(String::from(self.structure.as_str())))?;
        let options_js = script_json(&self.script_options())?;
        let title = escape_xml(title);

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", title));
        out.push_str(&format!("<script src=\"{}\"></script>\n", VIEWER_JS_URL));
        out.push_str("</head>\n<body>\n");
        out.push_str(&format!("<h1>{}</h1>\n", title));
        out.push_str(&format!(
            "<div id=\"viewer\" style=\"width: {}px; height: {}px; position: relative;\"></div>\n",
            self.options.width, self.options.height
        ));
        out.push_str("<script>\n");
        out.push_str(&format!("const structure = {};\n", structure_js));
        out.push_str(&format!("const options = {};\n", options_js));
        out.push_str("const viewer = $3Dmol.createViewer(document.getElementById(\"viewer\"));\n");
        out.push_str("viewer.addModel(structure, \"pdb\");\n");
        out.push_str("viewer.setStyle({}, options.style);\n");
        out.push_str("viewer.setBackgroundColor(options.background);\n");
        out.push_str("viewer.zoomTo();\n");
        out.push_str("viewer.spin(options.spin);\n");
        out.push_str("viewer.render();\n");
        out.push_str("</script>\n");
        if let Some(svg) = chart_svg {
            out.push_str("<div id=\"composition\">\n");
            out.push_str(svg);
            out.push_str("</div>\n");
        }
        out.push_str("</body>\n</html>\n");
        Ok(out)
    }
}

// JSON that can sit inside a <script> element: a literal "</" would close it.
fn script_json(value: &Value) -> Result<String, ProteinScapeError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
