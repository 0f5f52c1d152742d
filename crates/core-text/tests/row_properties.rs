//! Property checks for column translation and highlight/render consistency.

use core_text::{HIGHLIGHT_DB, Row, TAB_STOP, cx_to_rx, render, rx_to_cx};
use proptest::prelude::*;

fn line_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just(b'\t'),
            Just(b'"'),
            Just(b'\''),
            Just(b'\\'),
            Just(b'.'),
            b'0'..=b'9',
            b'a'..=b'z',
            Just(b' '),
        ],
        0..48,
    )
}

#[derive(Debug, Clone)]
enum Edit {
    Insert(usize, u8),
    Delete(usize),
    Append(Vec<u8>),
    SplitOff(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..64, b' '..=b'~').prop_map(|(at, ch)| Edit::Insert(at, ch)),
        (0usize..64).prop_map(Edit::Delete),
        line_bytes().prop_map(Edit::Append),
        (0usize..64).prop_map(Edit::SplitOff),
    ]
}

proptest! {
    #[test]
    fn column_round_trip_is_stable(content in line_bytes(), seed in 0usize..64) {
        let cx = seed % (content.len() + 1);
        let rx = cx_to_rx(&content, cx);
        prop_assert_eq!(cx_to_rx(&content, rx_to_cx(&content, rx)), rx);
    }

    #[test]
    fn rendered_width_matches_cx_to_rx_at_end(content in line_bytes()) {
        prop_assert_eq!(render(&content).len(), cx_to_rx(&content, content.len()));
        prop_assert!(!render(&content).contains(&b'\t'));
    }

    #[test]
    fn tabs_land_on_stops(content in line_bytes()) {
        for (cx, &b) in content.iter().enumerate() {
            if b == b'\t' {
                prop_assert_eq!(cx_to_rx(&content, cx + 1) % TAB_STOP, 0);
            }
        }
    }

    #[test]
    fn highlight_tracks_render_through_edits(
        content in line_bytes(),
        ops in prop::collection::vec(edit(), 0..16),
        profile in prop::option::of(0usize..HIGHLIGHT_DB.len()),
    ) {
        let syntax = profile.map(|i| &HIGHLIGHT_DB[i]);
        let mut row = Row::new(content, syntax);
        prop_assert_eq!(row.highlight().len(), row.rendered().len());
        for op in ops {
            match op {
                Edit::Insert(at, ch) => row.insert_byte(at, ch, syntax),
                Edit::Delete(at) => {
                    row.delete_byte(at, syntax);
                }
                Edit::Append(text) => row.append(&text, syntax),
                Edit::SplitOff(at) => {
                    let before = row.content().len();
                    let tail = row.split_off(at, syntax);
                    prop_assert_eq!(row.content().len() + tail.len(), before);
                }
            }
            prop_assert_eq!(row.highlight().len(), row.rendered().len());
            let expected = render(row.content());
            prop_assert_eq!(row.rendered(), expected.as_slice());
        }
    }
}
