//! Ordered parser registries.
//!
//! Registration order is load-bearing: parsers earlier in the list get
//! first refusal on a trigger character, and extensions rely on documented
//! relative ordering, so the registry supports positional insertion keyed
//! by parser type.

use std::any::TypeId;
use std::sync::Arc;

use crate::error::PipelineError;
use crate::parser::{BlockParser, InlineParser};

struct Entry<P: ?Sized> {
    id: TypeId,
    name: &'static str,
    parser: Arc<P>,
}

enum Position {
    End,
    Before(TypeId, &'static str),
    After(TypeId, &'static str),
}

/// An insertion-ordered, duplicate-free set of parsers.
pub struct Registry<P: ?Sized> {
    entries: Vec<Entry<P>>,
}

impl<P: ?Sized> Default for Registry<P> {
    fn default() -> Self {
        Registry {
            entries: Vec::new(),
        }
    }
}

impl<P: ?Sized> Registry<P> {
    fn position_of(&self, id: TypeId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.position_of(TypeId::of::<T>()).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Arc<P>> {
        self.entries.iter().map(|e| &e.parser)
    }

    fn insert_arc(
        &mut self,
        id: TypeId,
        name: &'static str,
        parser: Arc<P>,
        position: Position,
    ) -> Result<(), PipelineError> {
        if self.position_of(id).is_some() {
            return Err(PipelineError::DuplicateParser(name));
        }
        let at = match position {
            Position::End => self.entries.len(),
            Position::Before(anchor, anchor_name) => self
                .position_of(anchor)
                .ok_or(PipelineError::UnknownParser(anchor_name))?,
            Position::After(anchor, anchor_name) => {
                self.position_of(anchor)
                    .ok_or(PipelineError::UnknownParser(anchor_name))?
                    + 1
            }
        };
        self.entries.insert(at, Entry { id, name, parser });
        Ok(())
    }

    fn replace_arc(
        &mut self,
        old: TypeId,
        old_name: &'static str,
        id: TypeId,
        name: &'static str,
        parser: Arc<P>,
    ) -> Result<(), PipelineError> {
        let at = self
            .position_of(old)
            .ok_or(PipelineError::UnknownParser(old_name))?;
        if old != id && self.position_of(id).is_some() {
            return Err(PipelineError::DuplicateParser(name));
        }
        self.entries[at] = Entry { id, name, parser };
        Ok(())
    }
}

macro_rules! typed_registry {
    ($trait:ident) => {
        impl Registry<dyn $trait> {
            /// Append a parser at the end of the order.
            pub fn register<T: $trait>(&mut self, parser: T) -> Result<(), PipelineError> {
                self.insert_arc(
                    TypeId::of::<T>(),
                    std::any::type_name::<T>(),
                    Arc::new(parser),
                    Position::End,
                )
            }

            /// Insert a parser just before `Anchor`.
            pub fn insert_before<Anchor: $trait, T: $trait>(
                &mut self,
                parser: T,
            ) -> Result<(), PipelineError> {
                self.insert_arc(
                    TypeId::of::<T>(),
                    std::any::type_name::<T>(),
                    Arc::new(parser),
                    Position::Before(TypeId::of::<Anchor>(), std::any::type_name::<Anchor>()),
                )
            }

            /// Insert a parser just after `Anchor`.
            pub fn insert_after<Anchor: $trait, T: $trait>(
                &mut self,
                parser: T,
            ) -> Result<(), PipelineError> {
                self.insert_arc(
                    TypeId::of::<T>(),
                    std::any::type_name::<T>(),
                    Arc::new(parser),
                    Position::After(TypeId::of::<Anchor>(), std::any::type_name::<Anchor>()),
                )
            }

            /// Swap `Old` for `parser`, keeping its position in the order.
            pub fn replace<Old: $trait, T: $trait>(
                &mut self,
                parser: T,
            ) -> Result<(), PipelineError> {
                self.replace_arc(
                    TypeId::of::<Old>(),
                    std::any::type_name::<Old>(),
                    TypeId::of::<T>(),
                    std::any::type_name::<T>(),
                    Arc::new(parser),
                )
            }
        }
    };
}

typed_registry!(BlockParser);
typed_registry!(InlineParser);
