//! # Text Layout
//!
//! Lays parsed [`Block`]s out as positioned lines of styled runs inside a
//! fixed-width region.
//!
//! Layout is a single greedy pass: words from all of a block's segments flow
//! onto the current line until the next word (plus a space) would overflow
//! `max_width`, at which point the line is closed and a new one opened. Each
//! closed line advances the baseline by one line height, and every block after
//! the first is preceded by a gap that is tighter before bullets than before
//! headers and paragraphs.
//!
//! The output is plain data; turning it into template nodes is the job of
//! [`crate::template::materialize`].

pub mod geometry;
pub mod line;

pub use geometry::Geometry;
pub use line::{Anchor, BULLET_PREFIX, Line, Run};

use crate::markup::Block;

use geometry::{BLOCK_GAP_FACTOR, BULLET_GAP_FACTOR};
use line::LineBuilder;

/// Lays out `blocks` within `geometry`, returning lines in block order.
pub fn layout(blocks: &[Block], geometry: &Geometry) -> Vec<Line> {
    let mut layouter = Layouter {
        geometry,
        y: geometry.first_baseline(),
        lines: vec![],
    };
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            layouter.y += block_gap(block, geometry);
        }
        layouter.block(block);
    }
    layouter.lines
}

/// Vertical gap inserted before a block that follows another block.
pub fn block_gap(block: &Block, geometry: &Geometry) -> f64 {
    let factor = if block.is_bullet() {
        BULLET_GAP_FACTOR
    } else {
        BLOCK_GAP_FACTOR
    };
    geometry.line_height() * factor
}

struct Layouter<'g> {
    geometry: &'g Geometry,
    /// Baseline of the line currently being built.
    y: f64,
    lines: Vec<Line>,
}

impl Layouter<'_> {
    fn block(&mut self, block: &Block) {
        let g = self.geometry;
        let space_width = g.avg_char_width();
        let mut line = LineBuilder::open(block.kind, g, self.y, true);

        for segment in &block.segments {
            for word in segment.text.split_whitespace() {
                let word_width = g.estimate_width(word);
                if line.has_words() && line.width() + space_width + word_width > g.max_width {
                    self.close(line);
                    line = LineBuilder::open(block.kind, g, self.y, false);
                }
                line.push_word(word, segment.bold, word_width, space_width);
            }
        }

        self.close(line);
    }

    fn close(&mut self, line: LineBuilder) {
        self.lines.push(line.finish());
        self.y += self.geometry.line_height();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{BlockKind, Segment, parse};
    use pretty_assertions::assert_eq;

    /// font 10: line height 12, char width 5.
    fn geometry() -> Geometry {
        Geometry::new(0.0, 0.0, 10.0, 100.0)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn prefix_runs(line: &Line) -> usize {
        line.runs.iter().filter(|r| r.text == BULLET_PREFIX).count()
    }

    #[test]
    fn short_paragraph_is_one_centred_line() {
        let lines = layout(&parse("Hello there"), &geometry());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Hello there");
        assert_eq!(lines[0].anchor, Anchor::Middle);
        assert_eq!(lines[0].x, 50.0);
        assert_eq!(lines[0].y, 10.0);
    }

    #[test]
    fn runs_alternate_words_and_spaces() {
        let lines = layout(&parse("a b c"), &geometry());
        let texts: Vec<&str> = lines[0].runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", " ", "b", " ", "c"]);
    }

    #[test]
    fn wraps_when_next_word_overflows() {
        // Each word is 20 wide and each space 5: four words fit in 100.
        let lines = layout(&parse("aaaa bbbb cccc dddd eeee ffff"), &geometry());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "aaaa bbbb cccc dddd");
        assert_eq!(lines[1].text(), "eeee ffff");
        assert_close(lines[1].y - lines[0].y, 12.0);
    }

    #[test]
    fn exact_fit_does_not_wrap() {
        // 9 + 1 + 10 characters = 100 wide.
        let lines = layout(&parse("aaaaaaaaa bbbbbbbbbb"), &geometry());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn overlong_first_word_is_placed_alone() {
        let long = "x".repeat(30);
        let lines = layout(&parse(&format!("{long} tail")), &geometry());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), long);
        assert_eq!(lines[1].text(), "tail");
    }

    #[test]
    fn bold_words_flow_inline_with_plain_words() {
        let lines = layout(&parse("Hello **big world** end"), &geometry());
        assert_eq!(lines.len(), 1);
        let styled: Vec<(&str, bool)> = lines[0]
            .runs
            .iter()
            .map(|r| (r.text.as_str(), r.bold))
            .collect();
        assert_eq!(
            styled,
            vec![
                ("Hello", false),
                (" ", false),
                ("big", true),
                (" ", false),
                ("world", true),
                (" ", false),
                ("end", false),
            ]
        );
    }

    #[test]
    fn segments_are_not_line_boundaries() {
        let blocks = vec![Block {
            kind: BlockKind::Paragraph,
            segments: vec![Segment::plain("one "), Segment::bold("two")],
        }];
        let lines = layout(&blocks, &geometry());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "one two");
    }

    #[test]
    fn bullet_prefix_only_on_first_line() {
        // Prefix is 10 wide, so three 20-wide words fit on the first line.
        let lines = layout(&parse("* aaaa bbbb cccc dddd eeee"), &geometry());
        assert_eq!(lines.len(), 2);
        assert_eq!(prefix_runs(&lines[0]), 1);
        assert_eq!(lines[0].runs[0].text, BULLET_PREFIX);
        assert_eq!(lines[0].text(), "• aaaa bbbb cccc");
        assert_eq!(prefix_runs(&lines[1]), 0);
        assert_eq!(lines[1].text(), "dddd eeee");
    }

    #[test]
    fn bullet_lines_are_left_anchored() {
        let g = Geometry::new(20.0, 0.0, 10.0, 100.0);
        let lines = layout(&parse("* item"), &g);
        assert_eq!(lines[0].anchor, Anchor::Start);
        assert_eq!(lines[0].x, 25.0);
    }

    #[test]
    fn each_bullet_block_gets_its_own_prefix() {
        let lines = layout(&parse("* one\n* two"), &geometry());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "• one");
        assert_eq!(lines[1].text(), "• two");
    }

    #[test]
    fn gap_before_bullet_is_tighter() {
        let lines = layout(&parse("* one\n* two"), &geometry());
        // One line height plus 0.3 of a line height.
        assert_close(lines[1].y - lines[0].y, 12.0 + 3.6);
    }

    #[test]
    fn gap_before_paragraph_and_header() {
        let lines = layout(&parse("one\n\ntwo\n## three"), &geometry());
        assert_eq!(lines.len(), 3);
        assert_close(lines[1].y - lines[0].y, 12.0 + 7.2);
        assert_close(lines[2].y - lines[1].y, 12.0 + 7.2);
    }

    #[test]
    fn block_gap_depends_on_the_following_block() {
        let g = geometry();
        assert_close(block_gap(&Block::new(BlockKind::Bullet, "x"), &g), 3.6);
        assert_close(block_gap(&Block::new(BlockKind::Header, "x"), &g), 7.2);
        assert_close(block_gap(&Block::new(BlockKind::Paragraph, "x"), &g), 7.2);
    }

    #[test]
    fn first_baseline_sits_one_font_size_below_top() {
        let g = Geometry::new(0.0, 40.0, 10.0, 100.0);
        let lines = layout(&parse("## Top"), &g);
        assert_eq!(lines[0].y, 50.0);
    }

    #[test]
    fn empty_block_still_consumes_a_line() {
        let blocks = vec![
            Block {
                kind: BlockKind::Paragraph,
                segments: vec![],
            },
            Block::new(BlockKind::Paragraph, "after"),
        ];
        let lines = layout(&blocks, &geometry());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].is_empty());
        assert_close(lines[1].y, 10.0 + 12.0 + 7.2);
    }

    #[test]
    fn empty_bullet_keeps_prefix() {
        let blocks = vec![Block {
            kind: BlockKind::Bullet,
            segments: vec![Segment::plain("")],
        }];
        let lines = layout(&blocks, &geometry());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), BULLET_PREFIX);
    }

    #[test]
    fn no_blocks_no_lines() {
        assert!(layout(&[], &geometry()).is_empty());
    }

    #[test]
    fn multi_word_lines_never_exceed_max_width() {
        let text = "the quick brown fox jumps over a lazy dog while seventeen \
                    extraordinarily verbose quartermasters deliberate endlessly \
                    about x y z and **bold claims** scattered through it";
        let g = geometry();
        for line in layout(&parse(text), &g) {
            let words = line.runs.iter().filter(|r| r.text != " ").count();
            if words > 1 {
                assert!(
                    g.estimate_width(&line.text()) <= g.max_width,
                    "line {:?} overflows",
                    line.text()
                );
            }
        }
    }
}
