use indexmap::IndexMap;
use tokenweave_core::{GridAlignment, GridStyle, LayoutGrid, Token, TokenType, TokenValue, Value};

use super::paint::with_description;
use super::StyleResolver;

impl StyleResolver<'_, '_> {
    /// A layout grid style as CSS grid properties.
    ///
    /// The first visible column grid and row grid are used.
    pub fn grid(&self, style: &GridStyle) -> Option<Token> {
        let mut props = IndexMap::new();

        for grid in style.layout_grids.iter() {
            match grid {
                LayoutGrid::Columns {
                    count,
                    gutter_size,
                    offset,
                    section_size,
                    alignment,
                    visible: true,
                    bound_variables,
                } if !props.contains_key("grid-template-columns") => {
                    let track = self.track(*count, *section_size, *alignment, bound_variables);
                    props.insert("grid-template-columns".to_string(), track);
                    props.insert(
                        "column-gap".to_string(),
                        self.bound_or(bound_variables, "gutterSize", self.px(*gutter_size)),
                    );
                    if *offset > 0.0 || bound_variables.contains_key("offset") {
                        props.insert(
                            "padding-inline".to_string(),
                            self.bound_or(bound_variables, "offset", self.px(*offset)),
                        );
                    }
                }
                LayoutGrid::Rows {
                    count,
                    gutter_size,
                    offset,
                    section_size,
                    alignment,
                    visible: true,
                    bound_variables,
                } if !props.contains_key("grid-template-rows") => {
                    let track = self.track(*count, *section_size, *alignment, bound_variables);
                    props.insert("grid-template-rows".to_string(), track);
                    props.insert(
                        "row-gap".to_string(),
                        self.bound_or(bound_variables, "gutterSize", self.px(*gutter_size)),
                    );
                    if *offset > 0.0 || bound_variables.contains_key("offset") {
                        props.insert(
                            "padding-block".to_string(),
                            self.bound_or(bound_variables, "offset", self.px(*offset)),
                        );
                    }
                }
                LayoutGrid::Grid {
                    section_size,
                    visible: true,
                    bound_variables,
                } if !props.contains_key("background-size") => {
                    let size = self.bound_or(bound_variables, "sectionSize", self.px(*section_size));
                    props.insert("background-size".to_string(), format!("{} {}", size, size));
                }
                _ => {}
            }
        }

        if props.is_empty() {
            return None;
        }
        Some(with_description(
            Token::new(TokenType::Grid, TokenValue::Single(Value::Composite(props))),
            &style.description,
        ))
    }

    fn track(
        &self,
        count: u32,
        section_size: Option<f64>,
        alignment: GridAlignment,
        bindings: &tokenweave_core::styles::BoundVariables,
    ) -> String {
        let count = self.bound_or(bindings, "count", count.to_string());
        let size = match (alignment, section_size) {
            (GridAlignment::Stretch, _) | (_, None) => "1fr".to_string(),
            (_, Some(size)) => self.bound_or(bindings, "sectionSize", self.px(size)),
        };
        format!("repeat({}, {})", count, size)
    }
}
