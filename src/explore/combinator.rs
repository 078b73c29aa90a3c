//! Composition of lazy graph sets without consuming the original.
//!
//! Filtering a lazy graph set normally devours it. [`split_and_filter`]
//! instead duplicates the stream into two independent cursors over a shared
//! buffer and applies a further conjunction of conditions to one of them,
//! so condition sets developed independently can be layered over the same
//! enumeration without re-running it.
//!
//! **Contract: retain both return values.** The first output replaces the
//! stream you passed in; dropping it loses the ability to ever re-traverse
//! the unfiltered candidates, since the source iterator itself has been
//! moved into the shared buffer. This is a documented composition hazard of
//! buffered duplication, not a defect — both outputs are equally
//! first-class.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::errors::EngineError;
use crate::explore::conditions::{holds_all, Condition};
use crate::explore::enumerate::GraphResult;

struct TeeShared<I: Iterator> {
    source: I,
    // Items pulled by the other cursor but not yet seen by this side.
    left: VecDeque<I::Item>,
    right: VecDeque<I::Item>,
    exhausted: bool,
}

enum Side {
    Left,
    Right,
}

/// One of two independent cursors over a shared, buffered graph stream.
///
/// Advancing one cursor buffers the pulled element for the other; the two
/// may be advanced in any interleaving without interference. Elements are
/// held only until the laggard cursor consumes them.
pub struct GraphSetTee<I: Iterator> {
    shared: Rc<RefCell<TeeShared<I>>>,
    side: Side,
}

impl<I> Iterator for GraphSetTee<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut guard = self.shared.borrow_mut();
        let shared = &mut *guard;
        let (mine, other) = match self.side {
            Side::Left => (&mut shared.left, &mut shared.right),
            Side::Right => (&mut shared.right, &mut shared.left),
        };
        if let Some(item) = mine.pop_front() {
            return Some(item);
        }
        if shared.exhausted {
            return None;
        }
        match shared.source.next() {
            Some(item) => {
                other.push_back(item.clone());
                Some(item)
            }
            None => {
                shared.exhausted = true;
                None
            }
        }
    }
}

/// Duplicates `source` into two independent cursors over the same values.
pub fn tee<I>(source: I) -> (GraphSetTee<I>, GraphSetTee<I>)
where
    I: Iterator,
    I::Item: Clone,
{
    let shared = Rc::new(RefCell::new(TeeShared {
        source,
        left: VecDeque::new(),
        right: VecDeque::new(),
        exhausted: false,
    }));
    (
        GraphSetTee {
            shared: Rc::clone(&shared),
            side: Side::Left,
        },
        GraphSetTee {
            shared,
            side: Side::Right,
        },
    )
}

/// A lazy graph stream with a further conjunction of conditions applied.
///
/// Produced by [`split_and_filter`]. Upstream errors pass through; a
/// condition evaluation error is yielded in place of the offending element.
pub struct ConditionalGraphSet<I: Iterator> {
    inner: GraphSetTee<I>,
    conditions: Vec<Condition>,
}

impl<I> Iterator for ConditionalGraphSet<I>
where
    I: Iterator<Item = GraphResult>,
{
    type Item = GraphResult;

    fn next(&mut self) -> Option<GraphResult> {
        loop {
            match self.inner.next()? {
                Ok(graph) => match holds_all(&graph, &self.conditions) {
                    // Each element is an owned snapshot: conditions receive a
                    // shared reference and cannot mutate it, so no defensive
                    // copy is taken before testing.
                    Ok(true) => return Some(Ok(graph)),
                    Ok(false) => continue,
                    Err(e) => return Some(Err(e)),
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Splits `graphs` into an untouched duplicate and a further-filtered view.
///
/// Returns `(duplicate, filtered)`. The duplicate yields exactly what
/// `graphs` would have yielded; the filtered stream applies `conditions` as
/// a lazy conjunction. Consuming either does not alter what the other
/// yields. See the module docs for the retain-both-halves contract.
///
/// # Errors
///
/// [`EngineError::Configuration`] if `conditions` is empty.
pub fn split_and_filter<I>(
    graphs: I,
    conditions: Vec<Condition>,
) -> Result<(GraphSetTee<I>, ConditionalGraphSet<I>), EngineError>
where
    I: Iterator<Item = GraphResult>,
{
    if conditions.is_empty() {
        return Err(EngineError::Configuration(
            "splitting a graph set requires a non-empty list of conditions".into(),
        ));
    }
    let (duplicate, to_filter) = tee(graphs);
    Ok((
        duplicate,
        ConditionalGraphSet {
            inner: to_filter,
            conditions,
        },
    ))
}
