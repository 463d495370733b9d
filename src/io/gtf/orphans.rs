//! Bookkeeping for references to ids that have not been seen yet.

use indexmap::IndexMap;
use log::trace;

use super::refs::{
    FeatureId,
    Relation,
};
use super::state::{
    FeatureKey,
    ParserState,
};
use crate::error::DanglingRef;

/// Features waiting for a target id, grouped by the relation they wait
/// with. Insertion order is kept so that waiting siblings attach in file
/// order and errors list targets in the order they were first referenced.
#[derive(Debug, Default)]
pub(crate) struct OrphanIndex {
    waiting: IndexMap<FeatureId, IndexMap<Relation, Vec<FeatureKey>>>,
}

impl OrphanIndex {
    /// Records that `feature` waits for `target`. Returns `false` if it was
    /// already waiting for it with the same relation.
    pub fn add(
        &mut self,
        target: FeatureId,
        relation: Relation,
        feature: FeatureKey,
    ) -> bool {
        let entry = self
            .waiting
            .entry(target)
            .or_default()
            .entry(relation)
            .or_default();
        if entry.contains(&feature) {
            false
        }
        else {
            entry.push(feature);
            true
        }
    }

    pub fn take(
        &mut self,
        target: &FeatureId,
    ) -> Option<IndexMap<Relation, Vec<FeatureKey>>> {
        self.waiting.shift_remove(target)
    }

    pub fn is_empty(&self) -> bool {
        self.waiting
            .values()
            .all(|by_relation| by_relation.values().all(Vec::is_empty))
    }

    pub fn len(&self) -> usize {
        self.waiting
            .values()
            .flat_map(|by_relation| by_relation.values())
            .map(Vec::len)
            .sum()
    }

    /// Every `(target, attribute)` pair still waiting.
    pub fn unresolved(&self) -> Vec<DanglingRef> {
        self.waiting
            .iter()
            .flat_map(|(target, by_relation)| {
                by_relation
                    .iter()
                    .filter(|(_, waiting)| !waiting.is_empty())
                    .map(move |(relation, _)| {
                        DanglingRef {
                            target:    target.to_string(),
                            attribute: relation.attribute_name().to_string(),
                        }
                    })
            })
            .collect()
    }

    pub fn clear(&mut self) { self.waiting.clear() }
}

impl ParserState {
    /// Attaches every feature waiting for `id` into the matching containers
    /// of `feature` and forgets the waiting entries.
    pub fn resolve_references_to(
        &mut self,
        feature: FeatureKey,
        id: &FeatureId,
    ) {
        let Some(waiting) = self.orphans.take(id) else {
            return;
        };
        if !self.arena.contains_key(feature) {
            return;
        }

        for (relation, orphans) in waiting {
            trace!(
                "Resolved {} feature(s) waiting on {} '{}'",
                orphans.len(),
                relation,
                id
            );
            if let Some(node) = self.arena.get_mut(feature) {
                for line in node.lines.iter_mut() {
                    line.links
                        .entry(relation.clone())
                        .or_default()
                        .extend(orphans.iter().copied());
                }
                node.attached.extend(orphans.iter().copied());
            }

            for orphan in orphans {
                // The hold taken by the orphan entry now belongs to the
                // attachment.
                let (span, orphan_ids) = match self.arena.get_mut(orphan) {
                    Some(node) => {
                        node.attached_to.push(feature);
                        (node.span(), node.ids.clone())
                    },
                    None => continue,
                };
                for orphan_id in orphan_ids {
                    self.completed
                        .entry(orphan_id)
                        .or_default()
                        .insert((relation.clone(), id.clone()));
                }
                self.widen(feature, span);
            }
        }
    }

    /// Attaches `feature` under each referenced target that is already under
    /// construction, or records it as an orphan of the targets that are not.
    ///
    /// `ids` are the ids of the line being processed; a `(relation, target)`
    /// pair already applied for any of them is not attached again.
    pub fn resolve_references_from(
        &mut self,
        feature: FeatureKey,
        references: &[(Relation, FeatureId)],
        ids: &[FeatureId],
    ) {
        for (relation, target) in references {
            match self.by_id.get(target).copied() {
                // Another id of this very feature
                Some(target_key) if target_key == feature => {},
                Some(target_key) => {
                    let span = match self.arena.get(feature) {
                        Some(node) => node.span(),
                        None => continue,
                    };
                    self.widen(target_key, span);

                    let mut already_applied = false;
                    for id in ids {
                        let fresh = self
                            .completed
                            .entry(id.clone())
                            .or_default()
                            .insert((relation.clone(), target.clone()));
                        already_applied |= !fresh;
                    }
                    if !already_applied {
                        self.attach(target_key, feature, relation);
                    }
                },
                None => {
                    if self
                        .orphans
                        .add(target.clone(), relation.clone(), feature)
                    {
                        if let Some(node) = self.arena.get_mut(feature) {
                            node.holds += 1;
                        }
                    }
                },
            }
        }
    }
}
