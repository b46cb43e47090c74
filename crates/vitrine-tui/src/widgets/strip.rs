//! Column-window composition for horizontal marquee tracks
//!
//! A track's doubled cell sequence is laid out as one long strip; the
//! visible part is the `width`-column window starting at the scroll offset.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Extract a display-column window `[skip, skip + take)` from `text`
///
/// Wide characters straddling a window edge are replaced by spaces for
/// their visible columns; the result is padded to exactly `take` columns.
pub(crate) fn clip_columns(text: &str, skip: usize, take: usize) -> String {
    let end = skip + take;
    let mut out = String::with_capacity(take);
    let mut col = 0usize;
    let mut filled = 0usize;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if w == 0 {
            continue;
        }
        let ch_start = col;
        let ch_end = col + w;
        col = ch_end;

        if ch_end <= skip {
            continue;
        }
        if ch_start >= end {
            break;
        }

        if ch_start < skip || ch_end > end {
            let visible = ch_end.min(end) - ch_start.max(skip);
            for _ in 0..visible {
                out.push(' ');
            }
            filled += visible;
        } else {
            out.push(ch);
            filled += w;
        }
    }

    for _ in filled..take {
        out.push(' ');
    }
    out
}

/// Compose the visible window of a marquee strip
///
/// `cells` is the track's doubled sequence as `(text, extent)` pairs, where
/// `extent` is the cell's total column footprint including its trailing gap
/// (text shorter than the extent is padded). The sequence is cycled, so the
/// window is well defined even when the viewport is wider than the strip.
pub(crate) fn marquee_window<'a, I>(cells: I, offset: usize, width: usize) -> String
where
    I: Iterator<Item = (&'a str, u16)> + Clone,
{
    let copy_extent: usize = cells.clone().map(|(_, w)| w as usize).sum();
    if copy_extent == 0 || width == 0 {
        return " ".repeat(width);
    }

    let needed = offset + width;
    let mut strip = String::with_capacity(needed + 8);
    let mut built = 0usize;

    'fill: loop {
        for (text, extent) in cells.clone() {
            if built >= needed {
                break 'fill;
            }
            strip.push_str(text);
            let text_width = text.width();
            for _ in text_width..extent as usize {
                strip.push(' ');
            }
            built += extent as usize;
        }
    }

    clip_columns(&strip, offset, width)
}

/// Screen positions of the cells visible in a marquee window
///
/// Walks the doubled sequence of `extent`s the same way `marquee_window`
/// builds its strip and reports, for every cell intersecting the window,
/// `(cell_index, screen_start, extent)`. `screen_start` is relative to the
/// window's left edge and negative for a cell partly scrolled out.
pub(crate) fn window_spans<I>(extents: I, offset: usize, width: usize) -> Vec<(usize, i32, u16)>
where
    I: Iterator<Item = u16> + Clone,
{
    let total: usize = extents.clone().map(|w| w as usize).sum();
    if total == 0 || width == 0 {
        return Vec::new();
    }

    let end = offset + width;
    let mut spans = Vec::new();
    let mut pos = 0usize;

    'walk: loop {
        for (i, extent) in extents.clone().enumerate() {
            if pos >= end {
                break 'walk;
            }
            let e = extent as usize;
            if e > 0 && pos + e > offset {
                spans.push((i, pos as i32 - offset as i32, extent));
            }
            pos += e;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_plain_ascii() {
        assert_eq!(clip_columns("abcdef", 2, 3), "cde");
    }

    #[test]
    fn test_clip_pads_short_input() {
        assert_eq!(clip_columns("ab", 0, 5), "ab   ");
    }

    #[test]
    fn test_clip_wide_char_at_edge_becomes_space() {
        // "你" is two columns; skipping one column cuts it in half
        assert_eq!(clip_columns("你a", 1, 2), " a");
    }

    #[test]
    fn test_window_cycles_past_strip_end() {
        let cells = [("ab", 3u16), ("cd", 3u16)];
        let doubled = cells.iter().chain(cells.iter()).map(|&(t, w)| (t, w));

        // One copy is 6 columns; a window starting near the end wraps onto
        // the duplicated content with no seam
        let window = marquee_window(doubled, 3, 6);
        assert_eq!(window, "cd ab ");
    }

    #[test]
    fn test_window_wider_than_content_repeats() {
        let cells = [("x", 2u16)];
        let doubled = cells.iter().chain(cells.iter()).map(|&(t, w)| (t, w));
        assert_eq!(marquee_window(doubled, 0, 6), "x x x ");
    }

    #[test]
    fn test_empty_cells_render_blank() {
        let window = marquee_window(std::iter::empty::<(&str, u16)>(), 0, 4);
        assert_eq!(window, "    ");
    }

    #[test]
    fn test_window_at_offset_zero_is_strip_head() {
        let cells = [("hi", 4u16)];
        let doubled = cells.iter().chain(cells.iter()).map(|&(t, w)| (t, w));
        assert_eq!(marquee_window(doubled, 0, 4), "hi  ");
    }

    fn doubled_extents(extents: &[u16]) -> impl Iterator<Item = u16> + Clone + '_ {
        extents.iter().chain(extents.iter()).copied()
    }

    #[test]
    fn test_spans_wrap_onto_duplicate() {
        // Two 3-column cells doubled; window past the first copy's end
        let spans = window_spans(doubled_extents(&[3, 3]), 3, 6);
        assert_eq!(spans, vec![(1, 0, 3), (2, 3, 3)]);
    }

    #[test]
    fn test_spans_report_partial_leading_cell() {
        let spans = window_spans(doubled_extents(&[3, 3]), 1, 6);
        assert_eq!(spans, vec![(0, -1, 3), (1, 2, 3), (2, 5, 3)]);
    }

    #[test]
    fn test_spans_cycle_when_window_wider_than_strip() {
        let spans = window_spans(doubled_extents(&[2]), 0, 6);
        assert_eq!(spans, vec![(0, 0, 2), (1, 2, 2), (0, 4, 2)]);
    }

    #[test]
    fn test_spans_empty_track() {
        assert!(window_spans(std::iter::empty::<u16>(), 0, 10).is_empty());
    }
}
