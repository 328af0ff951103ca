use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Characters a cell may be broken after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiters {
    /// No soft breaks, always hard-cut.
    None,
    Whitespace,
    Char(char),
}

impl Delimiters {
    fn contains(self, ch: char) -> bool {
        match self {
            Delimiters::None => false,
            Delimiters::Whitespace => ch.is_whitespace(),
            Delimiters::Char(delimiter) => ch == delimiter,
        }
    }
}

/// Splits `text` into fragments no wider than `width` display columns.
///
/// Breaks go after a delimiter when at least one delimited piece fits,
/// otherwise the fragment is hard-cut at `width`. The delimiter stays with
/// the fragment before the break, so the fragments concatenate back to
/// `text`. An empty `text` yields a single empty fragment.
pub fn wrap(text: &str, width: usize, delimiters: Delimiters) -> Fragments<'_> {
    Fragments {
        rest: text,
        width,
        delimiters,
        finished: false,
    }
}

/// Lazy fragment sequence of one cell. See [`wrap`].
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    rest: &'a str,
    width: usize,
    delimiters: Delimiters,
    finished: bool,
}

impl<'a> Fragments<'a> {
    /// Places `rest` may be cut: the byte offset just past each char not
    /// followed by a zero-width char, that char, and the display width of
    /// the prefix ending there.
    ///
    /// Prefixes are measured as whole strings, the same way the fit check
    /// and cell padding measure, so emoji sequences count as rendered.
    fn cut_points(&self) -> impl Iterator<Item = (usize, char, usize)> + 'a {
        let rest = self.rest;
        let mut chars = rest.char_indices().peekable();
        std::iter::from_fn(move || loop {
            let (idx, ch) = chars.next()?;
            let joins_next = chars
                .peek()
                .is_some_and(|&(_, next)| next.width() == Some(0));
            if !joins_next {
                let end = idx + ch.len_utf8();
                return Some((end, ch, rest[..end].width()));
            }
        })
    }

    /// Byte offset just past the last delimiter whose prefix still fits.
    fn delimited_end(&self) -> Option<usize> {
        let mut found = None;
        for (end, ch, used) in self.cut_points() {
            if used > self.width {
                break;
            }
            if self.delimiters.contains(ch) {
                found = Some(end);
            }
        }
        found
    }

    /// Byte offset of a hard cut at `width` columns, never less than one char.
    fn hard_cut_end(&self) -> usize {
        let mut cut = 0;
        for (end, _, used) in self.cut_points() {
            if used > self.width && cut > 0 {
                break;
            }
            cut = end;
        }
        cut
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.finished {
            return None;
        }
        if self.rest.width() <= self.width {
            self.finished = true;
            return Some(std::mem::take(&mut self.rest));
        }

        let end = self
            .delimited_end()
            .unwrap_or_else(|| self.hard_cut_end());
        let (fragment, rest) = self.rest.split_at(end);
        self.rest = rest;
        // Only a hard cut of one over-wide char (plus its zero-width
        // followers) can consume everything.
        self.finished = rest.is_empty();
        Some(fragment)
    }
}

impl std::iter::FusedIterator for Fragments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collect(text: &str, width: usize, delimiters: Delimiters) -> Vec<&str> {
        wrap(text, width, delimiters).collect()
    }

    #[test]
    fn test_short_text_is_single_fragment() {
        assert_eq!(collect("abc", 5, Delimiters::None), vec!["abc"]);
        assert_eq!(collect("abcde", 5, Delimiters::None), vec!["abcde"]);
    }

    #[test]
    fn test_empty_text_yields_one_empty_fragment() {
        assert_eq!(collect("", 3, Delimiters::Whitespace), vec![""]);
    }

    #[test]
    fn test_breaks_after_whitespace() {
        assert_eq!(
            collect("Ivanov Ivan Ivanovich", 15, Delimiters::Whitespace),
            vec!["Ivanov Ivan ", "Ivanovich"]
        );
    }

    #[test]
    fn test_greedy_takes_as_many_pieces_as_fit() {
        assert_eq!(
            collect("a b c d e f", 6, Delimiters::Whitespace),
            vec!["a b c ", "d e f"]
        );
    }

    #[test]
    fn test_date_breaks_after_separator() {
        assert_eq!(
            collect("01.01.2023", 6, Delimiters::Char('.')),
            vec!["01.01.", "2023"]
        );
    }

    #[test]
    fn test_hard_cut_only_when_no_piece_fits() {
        // "2023/" is wider than 4, so the first fragment is cut mid-token,
        // after which "/11/" fits on delimiters again.
        assert_eq!(
            collect("2023/11/05", 4, Delimiters::Char('/')),
            vec!["2023", "/11/", "05"]
        );
    }

    #[test]
    fn test_number_is_hard_cut() {
        assert_eq!(
            collect("1234567", 3, Delimiters::None),
            vec!["123", "456", "7"]
        );
    }

    #[test]
    fn test_long_word_falls_back_to_hard_cut_then_resumes() {
        assert_eq!(
            collect("Konstantinopolsky Ivan", 8, Delimiters::Whitespace),
            vec!["Konstant", "inopolsk", "y Ivan"]
        );
    }

    #[test]
    fn test_wide_chars_measured_in_columns() {
        assert_eq!(
            collect("漢字漢字", 4, Delimiters::None),
            vec!["漢字", "漢字"]
        );
    }

    #[test]
    fn test_char_wider_than_column_still_progresses() {
        assert_eq!(collect("漢字", 1, Delimiters::None), vec!["漢", "字"]);
    }

    #[test]
    fn test_cyrillic_counts_one_column_per_char() {
        assert_eq!(
            collect("Иванов Иван", 7, Delimiters::Whitespace),
            vec!["Иванов ", "Иван"]
        );
    }

    #[test]
    fn test_emoji_with_variation_selector_counts_two_columns() {
        let text = "\u{2764}\u{FE0F}".repeat(3);
        let fragments = collect(&text, 4, Delimiters::None);

        assert_eq!(
            fragments,
            vec!["\u{2764}\u{FE0F}\u{2764}\u{FE0F}", "\u{2764}\u{FE0F}"]
        );
        assert!(fragments.iter().all(|fragment| fragment.width() <= 4));
    }

    #[test]
    fn test_non_bmp_emoji_sequence_keeps_both_columns() {
        let flag = "\u{1F3F3}\u{FE0F}";
        let text = format!("{flag} {flag} {flag}");

        assert_eq!(
            collect(&text, 5, Delimiters::Whitespace),
            vec![format!("{flag} "), format!("{flag} {flag}")]
        );
    }

    /// Text made of plain, wide and emoji pieces, including sequences whose
    /// rendered width differs from the sum of their chars.
    fn mixed_text(max_pieces: usize) -> impl Strategy<Value = String> {
        let pieces = vec![
            "a", "b", "Z", "7", " ", "/", ".", "Я", "漢", "\u{1F600}", "\u{2764}\u{FE0F}",
            "\u{1F3F3}\u{FE0F}",
        ];
        prop::collection::vec(prop::sample::select(pieces), 0..max_pieces)
            .prop_map(|pieces| pieces.concat())
    }

    proptest! {
        #[test]
        fn prop_fragments_concatenate_to_input(
            text in "[a-zA-Zа-я0-9 ./]{0,60}",
            width in 1usize..20,
        ) {
            for delimiters in [Delimiters::None, Delimiters::Whitespace, Delimiters::Char('/'), Delimiters::Char('.')] {
                let joined: String = wrap(&text, width, delimiters).collect();
                prop_assert_eq!(&joined, &text);
            }
        }

        #[test]
        fn prop_fragments_fit_width(
            text in "[a-zA-Z0-9 ./]{0,60}",
            width in 1usize..20,
        ) {
            for fragment in wrap(&text, width, Delimiters::Whitespace) {
                prop_assert!(fragment.width() <= width);
            }
        }

        // Width starts at 2: a single wide char may not fit a 1 column cell.
        #[test]
        fn prop_mixed_fragments_fit_width(
            text in mixed_text(30),
            width in 2usize..20,
        ) {
            for delimiters in [Delimiters::None, Delimiters::Whitespace, Delimiters::Char('/')] {
                let fragments: Vec<&str> = wrap(&text, width, delimiters).collect();
                for fragment in &fragments {
                    prop_assert!(fragment.width() <= width, "{:?} wider than {}", fragment, width);
                }
                prop_assert_eq!(fragments.concat(), text.clone());
            }
        }
    }
}
