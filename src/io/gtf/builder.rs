use hashbrown::HashSet;
use itertools::Itertools;
use log::{
    debug,
    error,
    info,
    warn,
};

use super::classify::{
    classify,
    LineClass,
};
use super::config::ParserConfig;
use super::emitter::Emitter;
use super::refs::{
    FeatureId,
    Relation,
    DERIVES_FROM_ATTR,
    ID_ATTR,
    PARENT_ATTR,
    TRANSCRIPT_ID_ATTR,
    TRANSCRIPT_TYPE,
};
use super::state::{
    FastaSection,
    FeatureKey,
    FeatureNode,
    ParserState,
    ParserStatus,
};
use super::tokenizer::{
    parse_directive,
    parse_fasta_header,
    parse_feature,
};
use crate::data_structs::{
    Comment,
    Feature,
    FeatureLine,
    Item,
    Sequence,
};
use crate::error::{
    GtfError,
    GtfResult,
};

const FASTA_DIRECTIVE: &str = "FASTA";

/// Incremental GTF parser.
///
/// Lines are fed one at a time with [`GtfParser::add_line`] and resolved
/// records are handed to the [`Emitter`] as soon as nothing else can attach
/// to them: at a `###` marker, at [`GtfParser::finish`], or when the
/// top-level buffer exceeds its capacity.
///
/// The first fatal error halts the parser. It is reported once through
/// [`Emitter::on_error`] and returned from the call that caused it; every
/// later call is a no-op.
pub struct GtfParser<E: Emitter> {
    config:  ParserConfig,
    state:   ParserState,
    emitter: E,
}

impl<E: Emitter> GtfParser<E> {
    pub fn new(
        config: ParserConfig,
        emitter: E,
    ) -> GtfResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: ParserState::new(),
            emitter,
        })
    }

    pub fn config(&self) -> &ParserConfig { &self.config }

    pub fn emitter(&self) -> &E { &self.emitter }

    pub fn emitter_mut(&mut self) -> &mut E { &mut self.emitter }

    pub fn into_emitter(self) -> E { self.emitter }

    /// Number of lines accepted so far.
    pub fn line_number(&self) -> usize { self.state.line_number }

    pub fn status(&self) -> ParserStatus { self.state.status }

    pub fn is_halted(&self) -> bool { self.state.status == ParserStatus::Halted }

    /// Root features currently held back.
    pub fn n_buffered(&self) -> usize { self.state.top_level.len() }

    /// Features created but not emitted yet.
    pub fn n_under_construction(&self) -> usize { self.state.arena.len() }

    /// Features waiting for a target that has not appeared yet.
    pub fn n_pending_orphans(&self) -> usize { self.state.orphans.len() }

    /// Processes one line of input. Line terminators are ignored.
    pub fn add_line(
        &mut self,
        line: &str,
    ) -> GtfResult<()> {
        if self.state.status != ParserStatus::Running {
            return Ok(());
        }
        self.state.line_number += 1;
        let line = line.trim_end_matches(['\r', '\n']);
        self.process_line(line)
            .map_err(|err| self.halt(err))
    }

    /// Flushes everything still buffered and signals the end of the stream.
    pub fn finish(&mut self) -> GtfResult<()> {
        if self.state.status != ParserStatus::Running {
            return Ok(());
        }
        if let Err(err) = self.flush() {
            return Err(self.halt(err));
        }
        if let Some(sequence) = self
            .state
            .fasta
            .take()
            .and_then(|section| section.current)
        {
            self.emit_item(sequence.into());
        }
        self.state.status = ParserStatus::Finished;
        debug!("Finished after {} lines", self.state.line_number);
        self.emitter.on_end();
        Ok(())
    }

    fn halt(
        &mut self,
        err: GtfError,
    ) -> GtfError {
        error!("{}", err);
        self.state.status = ParserStatus::Halted;
        self.emitter.on_error(&err);
        err
    }

    fn emit_item(
        &mut self,
        item: Item,
    ) {
        if self.config.selects(item.kind()) {
            self.emitter.emit(item)
        }
    }

    fn process_line(
        &mut self,
        line: &str,
    ) -> GtfResult<()> {
        if self.state.fasta.is_some() {
            return self.process_fasta_line(line);
        }

        match classify(line) {
            LineClass::Feature => {
                let feature_line = parse_feature(line).map_err(|e| {
                    GtfError::InvalidFeature {
                        line:   self.state.line_number,
                        reason: format!("{:#}", e),
                    }
                })?;
                self.ingest_feature(feature_line);
            },
            LineClass::SyncMarker => self.flush()?,
            LineClass::Directive => {
                let directive = parse_directive(line);
                if directive.is(FASTA_DIRECTIVE) {
                    self.flush()?;
                    self.state.fasta = Some(FastaSection::default());
                }
                else {
                    self.emit_item(directive.into());
                }
            },
            LineClass::Comment(contents) => {
                self.emit_item(
                    Comment {
                        comment: contents.to_string(),
                    }
                    .into(),
                );
            },
            LineClass::FastaHeader => {
                self.flush()?;
                self.state.fasta = Some(FastaSection::default());
                self.process_fasta_line(line)?;
            },
            LineClass::Blank => {},
            LineClass::Malformed => {
                return Err(GtfError::MalformedLine {
                    line: self.state.line_number,
                    text: line.to_string(),
                })
            },
        }
        Ok(())
    }

    fn process_fasta_line(
        &mut self,
        line: &str,
    ) -> GtfResult<()> {
        let line_number = self.state.line_number;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let Some(section) = self.state.fasta.as_mut()
        else {
            return Ok(());
        };
        if trimmed.starts_with('>') {
            let (id, description) = parse_fasta_header(trimmed);
            let previous = section.current.replace(Sequence {
                id,
                description,
                sequence: String::new(),
            });
            if let Some(previous) = previous {
                self.emit_item(previous.into());
            }
            return Ok(());
        }

        match section.current.as_mut() {
            Some(sequence) => {
                sequence.sequence.push_str(trimmed);
                Ok(())
            },
            None => {
                Err(GtfError::MalformedLine {
                    line: line_number,
                    text: line.to_string(),
                })
            },
        }
    }

    /// Ids a line is known by and the references it makes.
    fn identify(
        &self,
        line: &FeatureLine,
    ) -> (Vec<FeatureId>, Vec<(Relation, FeatureId)>) {
        let is_transcript = line.is_type(TRANSCRIPT_TYPE);
        let explicit_ids = line.attribute(ID_ATTR);

        let ids = if is_transcript {
            line.attribute(TRANSCRIPT_ID_ATTR)
                .iter()
                .chain(explicit_ids)
                .map(|id| FeatureId::named(id))
                .unique()
                .collect_vec()
        }
        else if !explicit_ids.is_empty() {
            explicit_ids
                .iter()
                .map(|id| FeatureId::named(id))
                .unique()
                .collect_vec()
        }
        else {
            vec![FeatureId::Line(self.state.line_number)]
        };

        let transcript_parents: &[String] = if is_transcript {
            &[]
        }
        else {
            line.attribute(TRANSCRIPT_ID_ATTR)
        };
        let parents = transcript_parents
            .iter()
            .chain(line.attribute(PARENT_ATTR))
            .map(|id| (Relation::Parent, FeatureId::named(id)));

        let derived_from: &[String] =
            if *self.config.disable_derives_from_references() {
                &[]
            }
            else {
                line.attribute(DERIVES_FROM_ATTR)
            };
        let derives = derived_from
            .iter()
            .map(|id| (Relation::DerivesFrom, FeatureId::named(id)));

        let others = self
            .config
            .reference_attributes()
            .iter()
            .flat_map(move |name| {
                let relation = Relation::Other(name.as_str().into());
                line.attribute(name)
                    .iter()
                    .map(move |id| (relation.clone(), FeatureId::named(id)))
            });

        let references = parents
            .chain(derives)
            .chain(others)
            .unique()
            .filter(|(relation, target)| {
                let is_self = ids.contains(target);
                if is_self {
                    warn!(
                        "Line {}: ignoring {} reference of '{}' to itself",
                        self.state.line_number, relation, target
                    );
                }
                !is_self
            })
            .collect_vec();
        (ids, references)
    }

    /// Transcript line standing in for `transcript_id` when the file never
    /// declares it.
    fn synthesize_transcript(
        &self,
        line: &FeatureLine,
        transcript_id: &str,
    ) -> FeatureLine {
        let mut transcript = line
            .clone()
            .with_feature_type(TRANSCRIPT_TYPE)
            .with_attribute(TRANSCRIPT_ID_ATTR, vec![transcript_id.to_string()])
            .without_attribute(ID_ATTR)
            .without_attribute(PARENT_ATTR)
            .without_attribute(DERIVES_FROM_ATTR);
        for name in self.config.reference_attributes() {
            transcript = transcript.without_attribute(name);
        }
        transcript
    }

    fn ingest_feature(
        &mut self,
        line: FeatureLine,
    ) {
        let (ids, references) = self.identify(&line);
        if ids.is_empty() && references.is_empty() {
            self.emit_item(Feature::from_line(line).into());
            return;
        }

        let missing = if line.is_type(TRANSCRIPT_TYPE) {
            Vec::new()
        }
        else {
            line.attribute(TRANSCRIPT_ID_ATTR)
                .iter()
                .unique()
                .filter(|id| {
                    let id = FeatureId::named(id);
                    !ids.contains(&id) && !self.state.by_id.contains_key(&id)
                })
                .cloned()
                .collect_vec()
        };
        let is_new_root = references.is_empty()
            && ids
                .iter()
                .all(|id| !self.state.by_id.contains_key(id));

        // Roots this line merges into or references must survive until the
        // line is linked.
        let pinned = self.state.roots_holding(
            ids.iter()
                .chain(references.iter().map(|(_, target)| target)),
        );
        self.enforce_capacity(missing.len() + usize::from(is_new_root), &pinned);

        for transcript_id in missing {
            debug!(
                "Line {}: synthesizing transcript '{}'",
                self.state.line_number, transcript_id
            );
            let transcript =
                self.synthesize_transcript(&line, &transcript_id);
            let (transcript_ids, transcript_references) =
                self.identify(&transcript);
            self.register(transcript, transcript_ids, transcript_references);
        }
        self.register(line, ids, references);
    }

    /// Adds `line` to the graph. Buffer capacity must already be reserved.
    fn register(
        &mut self,
        line: FeatureLine,
        ids: Vec<FeatureId>,
        references: Vec<(Relation, FeatureId)>,
    ) {
        let existing = ids
            .iter()
            .filter_map(|id| self.state.by_id.get(id).copied())
            .unique()
            .collect_vec();

        let key = match existing.first().copied() {
            Some(first) => {
                for key in existing.iter() {
                    self.state
                        .append_line(*key, line.clone());
                }
                first
            },
            None => {
                let key = self
                    .state
                    .arena
                    .insert(FeatureNode::new(line));
                if references.is_empty() {
                    self.hold_as_root(key);
                }
                key
            },
        };

        for id in ids.iter() {
            if self.state.by_id.contains_key(id) {
                continue;
            }
            if let Some(node) = self.state.arena.get_mut(key) {
                node.ids.push(id.clone());
            }
            self.state.by_id.insert(id.clone(), key);
            self.state.resolve_references_to(key, id);
        }

        self.state
            .resolve_references_from(key, &references, &ids);
        if !references.is_empty() {
            self.state.demote_root(key);
        }
    }

    fn hold_as_root(
        &mut self,
        key: FeatureKey,
    ) {
        if let Some(node) = self.state.arena.get_mut(key) {
            node.holds += 1;
        }
        self.state.top_level.push_back(key);
    }

    /// Emits the oldest roots early until `n_new` more fit into the buffer.
    /// Roots in `pinned` are kept even if that leaves the buffer over
    /// capacity.
    fn enforce_capacity(
        &mut self,
        n_new: usize,
        pinned: &HashSet<FeatureKey>,
    ) {
        while self.state.top_level.len() + n_new > *self.config.buffer_size() {
            let Some(root) = self
                .state
                .top_level
                .iter()
                .position(|key| !pinned.contains(key))
                .and_then(|position| self.state.top_level.remove(position))
            else {
                debug!(
                    "Line {}: buffer over capacity, every buffered root is \
                     referenced by the current line",
                    self.state.line_number
                );
                break;
            };
            if let Some(feature) = self.state.materialize(root) {
                debug!(
                    "Line {}: buffer full, emitting feature with {} nested \
                     record(s) early",
                    self.state.line_number,
                    feature.subtree_size() - 1
                );
                self.emit_item(feature.into());
            }
            self.state.detach_subtree(root);
            self.state.release(root);
        }
    }

    /// Emits every buffered root in creation order and closes the current
    /// synchronization scope.
    fn flush(&mut self) -> GtfResult<()> {
        let roots = self
            .state
            .top_level
            .iter()
            .copied()
            .collect_vec();
        let n_roots = roots.len();
        for root in roots {
            if let Some(feature) = self.state.materialize(root) {
                self.emit_item(feature.into());
            }
        }

        let unresolved = self.state.orphans.unresolved();
        if self.state.orphans.is_empty() {
            let n_unreachable = self.state.n_unreachable();
            if n_unreachable > 0 {
                warn!(
                    "Line {}: dropping {} feature(s) that only reference each \
                     other",
                    self.state.line_number, n_unreachable
                );
            }
        }
        self.state.clear_scope();

        if !unresolved.is_empty() {
            return Err(GtfError::DanglingReferences {
                line: self.state.line_number,
                unresolved,
            });
        }
        if n_roots > 0 {
            info!(
                "Line {}: flushed {} top-level feature(s)",
                self.state.line_number, n_roots
            );
        }
        Ok(())
    }
}
