use minijinja::{context, AutoEscape, Environment};
use owo_colors::OwoColorize;
use serde::Serialize;
use thiserror::Error;

use crate::context::{GridConfig, GridModel, Region, SelectionEngine, Settings};

const MARKUP_TEMPLATE: &str = "markup";
const STYLE_TEMPLATE: &str = "style";

const MARKUP_SOURCE: &str = r#"<div class="{{ container_class }}">
{% for region in regions %}
  <div class="{{ region.id }}">{{ region.content }}</div>
{% endfor %}
</div>
"#;

const STYLE_SOURCE: &str = r#".{{ container_class }} {
  display: grid;
  grid-template-columns: repeat({{ columns }}, 1fr);
  grid-template-rows: repeat({{ rows }}, 1fr);
  gap: {{ gap }}px;
  width: {{ width }};
  height: {{ height }};
}
{% if placeholder_style %}

/* shared item placeholder style */
.{{ container_class }} > div {
  background-color: gray;
  display: flex;
  justify-content: center;
  align-items: center;
  font-size: 2rem;
  font-weight: bold;
  color: #fff;
}
{% endif %}
{% for region in regions %}

.{{ region.id }} {
  grid-column: {{ region.start_col }} / span {{ region.col_span }};
  grid-row: {{ region.start_row }} / span {{ region.row_span }};
  width: {{ item_width }};
  height: {{ item_height }};
}
{% endfor %}
"#;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// The two emitted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub markup: String,
    pub style: String,
}

/// Emission options that are not part of the grid itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub container_class: String,
    pub placeholder_style: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for GenerateOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            container_class: settings.container_class.clone(),
            placeholder_style: settings.placeholder_style,
        }
    }
}

#[derive(Serialize)]
struct RegionView<'a> {
    id: &'a str,
    content: &'a str,
    start_row: u32,
    start_col: u32,
    row_span: u32,
    col_span: u32,
}

impl<'a> From<&'a Region> for RegionView<'a> {
    fn from(region: &'a Region) -> Self {
        Self {
            id: &region.id,
            content: &region.content,
            start_row: region.range.start_row,
            start_col: region.range.start_col,
            row_span: region.range.row_span(),
            col_span: region.range.col_span(),
        }
    }
}

/// Turns a grid config and its regions into markup and style text.
///
/// Output depends only on the arguments: identical input always yields
/// byte-identical text.
pub struct CodeGenerator {
    env: Environment<'static>,
    options: GenerateOptions,
}

impl std::fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CodeGenerator {
    pub fn new(options: GenerateOptions) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(MARKUP_TEMPLATE, MARKUP_SOURCE)?;
        env.add_template(STYLE_TEMPLATE, STYLE_SOURCE)?;
        Ok(Self { env, options })
    }

    pub fn generate(
        &self,
        config: &GridConfig,
        regions: &[Region],
    ) -> Result<GeneratedCode, RenderError> {
        Ok(GeneratedCode {
            markup: self.markup(regions)?,
            style: self.style(config, regions)?,
        })
    }

    pub fn markup(&self, regions: &[Region]) -> Result<String, RenderError> {
        let views: Vec<RegionView> = regions.iter().map(RegionView::from).collect();
        let template = self.env.get_template(MARKUP_TEMPLATE)?;
        Ok(template.render(context! {
            container_class => &self.options.container_class,
            regions => views,
        })?)
    }

    pub fn style(&self, config: &GridConfig, regions: &[Region]) -> Result<String, RenderError> {
        let views: Vec<RegionView> = regions.iter().map(RegionView::from).collect();
        let template = self.env.get_template(STYLE_TEMPLATE)?;
        Ok(template.render(context! {
            container_class => &self.options.container_class,
            placeholder_style => self.options.placeholder_style,
            columns => config.columns,
            rows => config.rows,
            gap => config.gap,
            width => config.container_width.to_string(),
            height => config.container_height.to_string(),
            item_width => config.item_width.resolve(),
            item_height => config.item_height.resolve(),
            regions => views,
        })?)
    }
}

/// Text picture of the grid: region labels on covered cells, `*` on cells
/// in the open selection, `.` elsewhere.
pub fn render_preview(model: &GridModel, selection: &SelectionEngine) -> String {
    let config = model.config();
    let width = model
        .regions()
        .iter()
        .map(|r| r.content.len())
        .max()
        .unwrap_or(1)
        .max(1);

    let mut output = String::new();
    for row in 1..=config.rows {
        let line: Vec<String> = (1..=config.columns)
            .map(|col| {
                let cell = crate::context::Cell::new(row, col);
                if let Some(region) = model.region_at(cell) {
                    format!("{:>width$}", region.content).bright_green().bold().to_string()
                } else if selection.is_highlighted(cell) {
                    format!("{:>width$}", "*").yellow().to_string()
                } else {
                    format!("{:>width$}", ".").bright_black().to_string()
                }
            })
            .collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }
    output
}
