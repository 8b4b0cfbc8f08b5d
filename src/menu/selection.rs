//! Wrap-around selection shared by the menus and the date picker

/// A cursor over a fixed number of items that wraps at both ends
pub trait Selectable {
    /// Total number of items
    fn count(&self) -> usize;
    /// Index of the current item
    fn selected(&self) -> usize;
    /// Set the index without bounds handling
    fn set_selected(&mut self, index: usize);

    /// Select the next item, wrapping to the first
    fn next(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.set_selected((self.selected() + 1) % count);
    }

    /// Select the previous item, wrapping to the last
    fn prev(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }
        let prev = if self.selected() == 0 {
            count - 1
        } else {
            self.selected() - 1
        };
        self.set_selected(prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cursor {
        count: usize,
        index: usize,
    }

    impl Selectable for Cursor {
        fn count(&self) -> usize {
            self.count
        }

        fn selected(&self) -> usize {
            self.index
        }

        fn set_selected(&mut self, index: usize) {
            self.index = index;
        }
    }

    #[test]
    fn test_next_wraps_after_count_steps() {
        for count in 1..6 {
            let mut cursor = Cursor { count, index: 0 };
            for _ in 0..count {
                cursor.next();
            }
            assert_eq!(cursor.selected(), 0);
        }
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let mut cursor = Cursor { count: 3, index: 0 };
        cursor.prev();
        assert_eq!(cursor.selected(), 2);
        cursor.prev();
        assert_eq!(cursor.selected(), 1);
    }

    #[test]
    fn test_empty_is_noop() {
        let mut cursor = Cursor { count: 0, index: 0 };
        cursor.next();
        cursor.prev();
        assert_eq!(cursor.selected(), 0);
    }
}
