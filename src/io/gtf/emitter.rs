use std::collections::VecDeque;

use crate::data_structs::{
    Comment,
    Directive,
    Feature,
    Item,
    Sequence,
};
use crate::error::GtfError;

/// Receiver of parser output. Each emitted item reaches exactly one of the
/// record sinks exactly once; a run ends with either one `on_end` or one
/// `on_error`.
///
/// All sinks default to doing nothing, so implementors only override the
/// kinds they care about.
pub trait Emitter {
    fn on_feature(
        &mut self,
        _feature: Feature,
    ) {
    }

    fn on_directive(
        &mut self,
        _directive: Directive,
    ) {
    }

    fn on_comment(
        &mut self,
        _comment: Comment,
    ) {
    }

    fn on_sequence(
        &mut self,
        _sequence: Sequence,
    ) {
    }

    fn on_error(
        &mut self,
        _error: &GtfError,
    ) {
    }

    fn on_end(&mut self) {}

    /// Routes an item to its sink.
    fn emit(
        &mut self,
        item: Item,
    ) {
        match item {
            Item::Feature(feature) => self.on_feature(feature),
            Item::Directive(directive) => self.on_directive(directive),
            Item::Comment(comment) => self.on_comment(comment),
            Item::Sequence(sequence) => self.on_sequence(sequence),
        }
    }
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    fn emit(
        &mut self,
        item: Item,
    ) {
        (**self).emit(item)
    }

    fn on_error(
        &mut self,
        error: &GtfError,
    ) {
        (**self).on_error(error)
    }

    fn on_end(&mut self) { (**self).on_end() }
}

/// Collects every item in emission order.
impl Emitter for Vec<Item> {
    fn emit(
        &mut self,
        item: Item,
    ) {
        self.push(item)
    }
}

/// Queue used by [`crate::io::gtf::GtfReader`] to hand items out lazily.
impl Emitter for VecDeque<Item> {
    fn emit(
        &mut self,
        item: Item,
    ) {
        self.push_back(item)
    }
}

/// Adapts a closure receiving every item.
pub struct FnEmitter<F: FnMut(Item)> {
    callback: F,
    ended:    bool,
    error:    Option<GtfError>,
}

impl<F: FnMut(Item)> FnEmitter<F> {
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            ended: false,
            error: None,
        }
    }

    pub fn ended(&self) -> bool { self.ended }

    pub fn error(&self) -> Option<&GtfError> { self.error.as_ref() }
}

impl<F: FnMut(Item)> Emitter for FnEmitter<F> {
    fn emit(
        &mut self,
        item: Item,
    ) {
        (self.callback)(item)
    }

    fn on_error(
        &mut self,
        error: &GtfError,
    ) {
        self.error = Some(error.clone())
    }

    fn on_end(&mut self) { self.ended = true }
}
