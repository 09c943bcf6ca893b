/// Paint order over the viewport's window that lifts the sticky headers above normal flow.
///
/// Step `count - 1` paints the current header, step `count - 2` the previous one (while it is
/// still on screen during a hand-off). All other window indexes keep their natural relative
/// order. Only these two headers are distinguished; any further header overlapping the top edge
/// paints in natural order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOrder {
    count: usize,
    previous: Option<usize>,
    current: Option<usize>,
}

impl DrawOrder {
    pub fn identity(count: usize) -> Self {
        Self {
            count,
            previous: None,
            current: None,
        }
    }

    /// `previous` and `current` are window indexes; out-of-range values are ignored.
    pub fn new(count: usize, previous: Option<usize>, current: Option<usize>) -> Self {
        let current = current.filter(|&i| i < count);
        let previous = previous.filter(|&i| i < count && Some(i) != current);
        Self {
            count,
            previous,
            current,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_identity(&self) -> bool {
        self.previous.is_none() && self.current.is_none()
    }

    /// The window index to paint at step `i`.
    pub fn index(&self, i: usize) -> usize {
        if i >= self.count {
            swarn!(i, count = self.count, "DrawOrder: step out of range");
            debug_assert!(
                i < self.count,
                "DrawOrder: step out of range (i={i}, count={})",
                self.count
            );
            return i;
        }

        let lifted = [self.previous, self.current];
        let lifted_len = lifted.iter().flatten().count();
        let tail_start = self.count - lifted_len;
        if i >= tail_start {
            if let Some(&index) = lifted.iter().flatten().nth(i - tail_start) {
                return index;
            }
        }

        let (low, high) = match (self.previous, self.current) {
            (Some(a), Some(b)) => (Some(a.min(b)), Some(a.max(b))),
            (Some(a), None) | (None, Some(a)) => (Some(a), None),
            (None, None) => (None, None),
        };
        let mut index = i;
        for skip in [low, high].into_iter().flatten() {
            if skip <= index {
                index += 1;
            }
        }
        index
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(|i| self.index(i))
    }
}
