use crate::layout::{Anchor, Line};
use crate::settings::CardStyle;

use super::TemplateBinder;

/// Where a text run starts a new chunk of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunPosition {
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
}

/// Everything needed to build one text-run node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub bold: bool,
    pub fill: Option<&'a str>,
    /// Set on the first run of a line; later runs flow inline.
    pub position: Option<RunPosition>,
}

/// Replaces the children of `container` with one text-run node per laid-out run.
///
/// Bold runs are filled with the style's bold colour. Lines without runs emit
/// nothing; their height is already reflected in the following lines' `y`.
pub fn materialize<B: TemplateBinder>(
    binder: &mut B,
    container: B::Node,
    lines: &[Line],
    style: &CardStyle,
) {
    binder.clear_children(container);
    for line in lines {
        for (index, run) in line.runs.iter().enumerate() {
            let position = (index == 0).then_some(RunPosition {
                x: line.x,
                y: line.y,
                anchor: line.anchor,
            });
            let node = binder.new_text_run(&TextRun {
                text: &run.text,
                bold: run.bold,
                fill: run.bold.then_some(style.bold_color.as_str()),
                position,
            });
            binder.append_child(container, node);
        }
    }
}
