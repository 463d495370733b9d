use std::collections::VecDeque;

use hashbrown::{
    HashMap,
    HashSet,
};
use indexmap::IndexMap;
use slotmap::{
    new_key_type,
    SlotMap,
};

use super::orphans::OrphanIndex;
use super::refs::{
    FeatureId,
    Relation,
};
use crate::data_structs::typedef::PosType;
use crate::data_structs::{
    max_pos,
    min_pos,
    Feature,
    FeatureLine,
    Sequence,
};

new_key_type! {
    /// Stable handle of a feature in the [`ParserState`] arena.
    pub struct FeatureKey;
}

pub(crate) type Span = (Option<PosType>, Option<PosType>);

/// A line of an in-flight feature with the handles of the features attached
/// to it, grouped by relation.
#[derive(Debug)]
pub(crate) struct LineNode {
    pub line:  FeatureLine,
    pub links: IndexMap<Relation, Vec<FeatureKey>>,
}

impl LineNode {
    pub fn new(line: FeatureLine) -> Self {
        Self {
            line,
            links: IndexMap::new(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct FeatureNode {
    pub ids:         Vec<FeatureId>,
    pub lines:       Vec<LineNode>,
    /// Number of places holding this node: the top-level buffer, orphan
    /// entries and attachments under other features. The node is freed when
    /// it drops to zero after an early emission.
    pub holds:       usize,
    /// Features this one is attached under.
    pub attached_to: Vec<FeatureKey>,
    /// Features attached under this one, once per attachment.
    pub attached:    Vec<FeatureKey>,
}

impl FeatureNode {
    pub fn new(line: FeatureLine) -> Self {
        Self {
            ids:         Vec::new(),
            lines:       vec![LineNode::new(line)],
            holds:       0,
            attached_to: Vec::new(),
            attached:    Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        self.lines
            .iter()
            .fold((None, None), |(start, end), node| {
                (min_pos(start, node.line.start), max_pos(end, node.line.end))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserStatus {
    Running,
    /// A fatal error occurred; remaining input is ignored.
    Halted,
    /// End of input was processed successfully.
    Finished,
}

/// All in-flight state of one parse run.
#[derive(Debug)]
pub(crate) struct ParserState {
    pub arena:       SlotMap<FeatureKey, FeatureNode>,
    /// Every feature not yet emitted, by id.
    pub by_id:       HashMap<FeatureId, FeatureKey>,
    /// Root features in creation order.
    pub top_level:   VecDeque<FeatureKey>,
    pub orphans:     OrphanIndex,
    /// `(relation, target)` pairs already applied, by referencing id.
    pub completed:   HashMap<FeatureId, HashSet<(Relation, FeatureId)>>,
    pub line_number: usize,
    pub status:      ParserStatus,
    /// `Some` once a FASTA section started.
    pub fasta:       Option<FastaSection>,
}

#[derive(Debug, Default)]
pub(crate) struct FastaSection {
    /// Sequence whose residue lines are being read.
    pub current: Option<Sequence>,
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            arena:       SlotMap::with_key(),
            by_id:       HashMap::new(),
            top_level:   VecDeque::new(),
            orphans:     OrphanIndex::default(),
            completed:   HashMap::new(),
            line_number: 0,
            status:      ParserStatus::Running,
            fasta:       None,
        }
    }

    pub fn append_line(
        &mut self,
        key: FeatureKey,
        line: FeatureLine,
    ) {
        if let Some(node) = self.arena.get_mut(key) {
            node.lines.push(LineNode::new(line));
        }
    }

    /// Attaches `child` into the `relation` container of every line of
    /// `target`.
    pub fn attach(
        &mut self,
        target: FeatureKey,
        child: FeatureKey,
        relation: &Relation,
    ) {
        let Some(node) = self.arena.get_mut(target) else {
            return;
        };
        for line in node.lines.iter_mut() {
            line.links
                .entry(relation.clone())
                .or_default()
                .push(child);
        }
        node.attached.push(child);
        if let Some(child) = self.arena.get_mut(child) {
            child.attached_to.push(target);
            child.holds += 1;
        }
    }

    /// Every feature holding one of `ids` in its subtree, including the
    /// features those ids belong to.
    pub fn roots_holding<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a FeatureId>,
    ) -> HashSet<FeatureKey> {
        let mut visited = HashSet::new();
        let mut stack = ids
            .into_iter()
            .filter_map(|id| self.by_id.get(id).copied())
            .collect::<Vec<_>>();
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            if let Some(node) = self.arena.get(key) {
                stack.extend(node.attached_to.iter().copied());
            }
        }
        visited
    }

    /// Takes `key` out of the top-level buffer once it references another
    /// feature. The root hold is dropped only while something else still
    /// holds the node.
    pub fn demote_root(
        &mut self,
        key: FeatureKey,
    ) {
        let Some(position) = self
            .top_level
            .iter()
            .position(|root| *root == key)
        else {
            return;
        };
        let Some(node) = self.arena.get_mut(key) else {
            return;
        };
        if node.holds > 1 {
            node.holds -= 1;
            self.top_level.remove(position);
        }
    }

    /// Grows the coordinate envelope of `target` (its first line) to cover
    /// `span`, then does the same for every feature `target` is attached
    /// under.
    pub fn widen(
        &mut self,
        target: FeatureKey,
        span: Span,
    ) {
        let mut visited = HashSet::new();
        let mut stack = vec![(target, span)];
        while let Some((key, (start, end))) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(node) = self.arena.get_mut(key) else {
                continue;
            };
            if let Some(first) = node.lines.first_mut() {
                first.line.start = min_pos(first.line.start, start);
                first.line.end = max_pos(first.line.end, end);
            }
            let span = node.span();
            stack.extend(
                node.attached_to
                    .iter()
                    .map(|parent| (*parent, span)),
            );
        }
    }

    /// Builds the owned record of `key` with its attached subtree.
    pub fn materialize(
        &self,
        key: FeatureKey,
    ) -> Option<Feature> {
        let mut path = HashSet::new();
        self.materialize_inner(key, &mut path)
    }

    fn materialize_inner(
        &self,
        key: FeatureKey,
        path: &mut HashSet<FeatureKey>,
    ) -> Option<Feature> {
        let node = self.arena.get(key)?;
        // A feature cannot contain itself
        if !path.insert(key) {
            return None;
        }
        let mut lines = Vec::with_capacity(node.lines.len());
        for line_node in node.lines.iter() {
            let mut line = line_node.line.clone();
            for (relation, keys) in line_node.links.iter() {
                let nested = keys
                    .iter()
                    .filter_map(|k| self.materialize_inner(*k, path))
                    .collect::<Vec<_>>();
                line.container_mut(&relation.container_name())
                    .extend(nested);
            }
            lines.push(line);
        }
        path.remove(&key);
        Some(Feature::new(lines))
    }

    /// Removes `root` and everything attached under it from the id index and
    /// the completed-reference table.
    pub fn detach_subtree(
        &mut self,
        root: FeatureKey,
    ) {
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(node) = self.arena.get(key) else {
                continue;
            };
            for id in node.ids.iter() {
                if self.by_id.get(id) == Some(&key) {
                    self.by_id.remove(id);
                }
                self.completed.remove(id);
            }
            stack.extend(node.attached.iter().copied());
        }
    }

    /// Drops one hold on `key`, freeing it and cascading into its attached
    /// features once nothing holds it anymore.
    pub fn release(
        &mut self,
        key: FeatureKey,
    ) {
        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            let Some(node) = self.arena.get_mut(key) else {
                continue;
            };
            node.holds = node.holds.saturating_sub(1);
            if node.holds == 0 {
                if let Some(node) = self.arena.remove(key) {
                    stack.extend(node.attached);
                }
            }
        }
    }

    /// Number of live features no top-level root leads to. Only reference
    /// cycles without a root end up here.
    pub fn n_unreachable(&self) -> usize {
        let mut visited = HashSet::new();
        let mut stack = self
            .top_level
            .iter()
            .copied()
            .collect::<Vec<_>>();
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            if let Some(node) = self.arena.get(key) {
                stack.extend(node.attached.iter().copied());
            }
        }
        self.arena
            .keys()
            .filter(|key| !visited.contains(key))
            .count()
    }

    /// Forgets everything belonging to the current synchronization scope.
    pub fn clear_scope(&mut self) {
        self.top_level.clear();
        self.by_id.clear();
        self.completed.clear();
        self.orphans.clear();
        self.arena.clear();
    }
}

impl Default for ParserState {
    fn default() -> Self { Self::new() }
}
